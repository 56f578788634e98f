pub mod auctions;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod media;
pub mod posts;
pub mod reports;
pub mod transactions;
pub mod users;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireAuth;
use crate::models::{ApiResponse, ErrorCode, users::entities::User};

pub use auctions::AuctionService;
pub use auth::AuthService;
pub use categories::CategoryService;
pub use comments::CommentService;
pub use media::MediaService;
pub use posts::PostService;
pub use reports::ReportService;
pub use transactions::TransactionService;
pub use users::UserService;

/// 取出 RequireAuth 写入的当前用户，缺失时返回 401 响应
pub(crate) fn require_user(request: &HttpRequest) -> Result<User, HttpResponse> {
    RequireAuth::extract_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication credentials were not provided",
        ))
    })
}
