//! 头像上传校验：扩展名白名单、大小上限、魔术字节

use std::path::Path;

use actix_multipart::Field;
use futures_util::StreamExt;

use crate::config::MediaConfig;
use crate::models::ErrorCode;
use crate::utils::validate_magic_bytes;

/// 头像校验失败，携带错误码与提示信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarRejected {
    pub code: ErrorCode,
    pub message: &'static str,
}

impl AvatarRejected {
    fn new(code: ErrorCode, message: &'static str) -> Self {
        Self { code, message }
    }
}

/// 取出小写的带点扩展名，不在白名单内返回 None
pub fn allowed_extension(filename: &str, allowed: &[String]) -> Option<String> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))?;

    allowed
        .iter()
        .any(|t| t.to_lowercase() == extension)
        .then_some(extension)
}

/// 校验头像文件，成功时返回扩展名
pub fn validate_avatar(
    filename: &str,
    bytes: &[u8],
    config: &MediaConfig,
) -> Result<String, AvatarRejected> {
    let extension = allowed_extension(filename, &config.allowed_types).ok_or_else(|| {
        AvatarRejected::new(ErrorCode::FileTypeNotAllowed, "Avatar file type not allowed")
    })?;

    if bytes.is_empty() {
        return Err(AvatarRejected::new(
            ErrorCode::FileNotFound,
            "The submitted avatar file is empty",
        ));
    }
    if bytes.len() > config.max_avatar_size {
        return Err(AvatarRejected::new(
            ErrorCode::FileSizeExceeded,
            "Avatar file size exceeds the limit",
        ));
    }
    if !validate_magic_bytes(bytes, &extension) {
        return Err(AvatarRejected::new(
            ErrorCode::FileTypeNotAllowed,
            "Avatar content does not match its extension",
        ));
    }

    Ok(extension)
}

/// 读取 multipart 字段，超过上限时提前停止
pub async fn read_field_limited(
    field: &mut Field,
    limit: usize,
) -> Result<Vec<u8>, AvatarRejected> {
    let mut buf = Vec::new();
    while let Some(chunk) = field.next().await {
        let data = chunk.map_err(|_| {
            AvatarRejected::new(ErrorCode::FileUploadFailed, "Failed to read upload data")
        })?;
        if buf.len() + data.len() > limit {
            return Err(AvatarRejected::new(
                ErrorCode::FileSizeExceeded,
                "Avatar file size exceeds the limit",
            ));
        }
        buf.extend_from_slice(&data);
    }
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MediaConfig {
        MediaConfig {
            dir: "media".into(),
            base_url: String::new(),
            max_avatar_size: 16,
            allowed_types: vec![".png".into(), ".jpg".into()],
        }
    }

    const PNG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_allowed_extension() {
        let allowed = config().allowed_types;
        assert_eq!(allowed_extension("me.PNG", &allowed).as_deref(), Some(".png"));
        assert_eq!(allowed_extension("me.gif", &allowed), None);
        assert_eq!(allowed_extension("noext", &allowed), None);
    }

    #[test]
    fn test_validate_avatar() {
        assert_eq!(validate_avatar("a.png", &PNG, &config()).unwrap(), ".png");

        let err = validate_avatar("a.jpg", &PNG, &config()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileTypeNotAllowed);

        let big = [PNG.as_slice(), &[0u8; 16]].concat();
        let err = validate_avatar("a.png", &big, &config()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileSizeExceeded);

        let err = validate_avatar("a.png", &[], &config()).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileNotFound);
    }
}
