//! 本地文件系统媒体存储

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use super::{MediaStore, is_valid_key};
use crate::errors::{Result, SocialError};

pub struct LocalMediaStore {
    dir: PathBuf,
}

impl LocalMediaStore {
    /// 创建存储，目录不存在时自动创建
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            SocialError::media_storage(format!("创建媒体目录 {} 失败: {e}", dir.display()))
        })?;
        Ok(Self { dir })
    }
}

#[async_trait]
impl MediaStore for LocalMediaStore {
    async fn save(&self, extension: &str, bytes: &[u8]) -> Result<String> {
        let key = format!("{}{}", Uuid::new_v4(), extension);
        if !is_valid_key(&key) {
            return Err(SocialError::validation(format!("非法的扩展名: {extension}")));
        }

        fs::write(self.dir.join(&key), bytes)
            .map_err(|e| SocialError::media_storage(format!("写入媒体文件失败: {e}")))?;

        tracing::debug!("保存媒体文件 {key} ({} bytes)", bytes.len());
        Ok(key)
    }

    async fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        if !is_valid_key(key) {
            return Ok(None);
        }

        match fs::read(self.dir.join(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(SocialError::media_storage(format!("读取媒体文件失败: {e}"))),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        if !is_valid_key(key) {
            return Ok(());
        }

        match fs::remove_file(self.dir.join(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SocialError::media_storage(format!("删除媒体文件失败: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("social-media-test-{}", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = temp_dir();
        let store = LocalMediaStore::new(&dir).unwrap();

        let key = store.save(".png", b"image-bytes").await.unwrap();
        assert!(key.ends_with(".png"));
        assert_eq!(store.load(&key).await.unwrap().as_deref(), Some(&b"image-bytes"[..]));
        assert!(store.load("missing.png").await.unwrap().is_none());
        assert!(store.load("../secret").await.unwrap().is_none());

        store.delete(&key).await.unwrap();
        assert!(store.load(&key).await.unwrap().is_none());
        store.delete(&key).await.unwrap();

        fs::remove_dir_all(dir).unwrap();
    }
}
