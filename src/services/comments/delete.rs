use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CommentService, load_owned_comment};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_user;

pub async fn delete_comment(
    service: &CommentService,
    comment_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = load_owned_comment(&storage, comment_id, &user).await {
        return Ok(response);
    }

    match storage.delete_comment(comment_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Comment deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CommentNotFound,
            "Comment not found",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::CommentDeleteFailed)),
    }
}
