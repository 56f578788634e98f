use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PostService, load_active_post};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::require_user;

pub async fn delete_post(
    service: &PostService,
    post_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let existing = match load_active_post(&storage, post_id).await {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    if !existing.post.can_be_modified_by(&user) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PostPermissionDenied,
            "You do not have permission to delete this post.",
        )));
    }

    match storage.delete_post(post_id).await {
        Ok(true) => {
            tracing::info!("Post {} deleted by user {}", post_id, user.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Post deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PostNotFound,
            "Post not found",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::PostDeleteFailed)),
    }
}
