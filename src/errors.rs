//! 统一错误处理模块
//!
//! `SocialError` 由宏生成，每个变体带有错误代码、类型名称以及对应的 HTTP 状态码，
//! 服务层可以直接把它转换为统一的 `ApiResponse` 错误响应。

use std::fmt;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() / error_type() / status_code() / message()
/// - 便捷构造函数
macro_rules! define_social_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal, $status:ident)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum SocialError {
            $($variant(String),)*
        }

        impl SocialError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(SocialError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(SocialError::$variant(_) => $type_name,)*
                }
            }

            /// 对应的 HTTP 状态码
            pub fn status_code(&self) -> StatusCode {
                match self {
                    $(SocialError::$variant(_) => StatusCode::$status,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(SocialError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl SocialError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        SocialError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_social_errors! {
    CacheConnection("E001", "Cache Connection Error", INTERNAL_SERVER_ERROR),
    CachePluginNotFound("E002", "Cache Plugin Not Found", INTERNAL_SERVER_ERROR),
    DatabaseConfig("E003", "Database Configuration Error", INTERNAL_SERVER_ERROR),
    DatabaseConnection("E004", "Database Connection Error", INTERNAL_SERVER_ERROR),
    DatabaseOperation("E005", "Database Operation Error", INTERNAL_SERVER_ERROR),
    FileOperation("E006", "File Operation Error", INTERNAL_SERVER_ERROR),
    Validation("E007", "Validation Error", BAD_REQUEST),
    NotFound("E008", "Resource Not Found", NOT_FOUND),
    Serialization("E009", "Serialization Error", INTERNAL_SERVER_ERROR),
    MediaStorage("E010", "Media Storage Error", INTERNAL_SERVER_ERROR),
    DateParse("E011", "Date Parse Error", BAD_REQUEST),
    Authentication("E012", "Authentication Error", UNAUTHORIZED),
    Authorization("E013", "Authorization Error", FORBIDDEN),
    Conflict("E014", "Resource Conflict", CONFLICT),
}

impl SocialError {
    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 转换为统一错误响应，服务器内部错误会记录日志
    pub fn to_response(&self, code: ErrorCode) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("{}", self.format_simple());
        }
        HttpResponse::build(status).json(ApiResponse::error_empty(code, self.message()))
    }
}

impl fmt::Display for SocialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for SocialError {}

impl From<sea_orm::DbErr> for SocialError {
    fn from(err: sea_orm::DbErr) -> Self {
        SocialError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for SocialError {
    fn from(err: std::io::Error) -> Self {
        SocialError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for SocialError {
    fn from(err: serde_json::Error) -> Self {
        SocialError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for SocialError {
    fn from(err: chrono::ParseError) -> Self {
        SocialError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SocialError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(SocialError::cache_connection("test").code(), "E001");
        assert_eq!(SocialError::database_config("test").code(), "E003");
        assert_eq!(SocialError::validation("test").code(), "E007");
        assert_eq!(SocialError::conflict("test").code(), "E014");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            SocialError::validation("x").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SocialError::not_found("x").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SocialError::conflict("x").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            SocialError::database_operation("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_db_err_conversion() {
        let err: SocialError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = SocialError::validation("Invalid reason");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Invalid reason"));
    }

    #[test]
    fn test_to_response_status() {
        let resp = SocialError::not_found("Post not found").to_response(ErrorCode::PostNotFound);
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
