//! 路径参数提取器
//!
//! 非法 ID 直接返回统一格式的 400 响应，而不是 actix 默认的纯文本错误。

use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use std::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 从路径中的 `{id}` 解析出的正整数 ID
#[derive(Debug, Clone, Copy)]
pub struct SafeIDI64(pub i64);

impl SafeIDI64 {
    fn parse(raw: Option<&str>) -> Result<i64, String> {
        let raw = raw.ok_or_else(|| "Missing path parameter: id".to_string())?;
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(id),
            _ => Err(format!("Invalid id: {raw}")),
        }
    }
}

impl FromRequest for SafeIDI64 {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            Self::parse(req.match_info().get("id"))
                .map(SafeIDI64)
                .map_err(|msg| {
                    let response = HttpResponse::BadRequest()
                        .json(ApiResponse::error_empty(ErrorCode::BadRequest, &msg));
                    InternalError::from_response(msg, response).into()
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(SafeIDI64::parse(Some("15")), Ok(15));
        assert!(SafeIDI64::parse(Some("0")).is_err());
        assert!(SafeIDI64::parse(Some("-3")).is_err());
        assert!(SafeIDI64::parse(Some("abc")).is_err());
        assert!(SafeIDI64::parse(None).is_err());
    }
}
