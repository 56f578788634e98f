use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{CommentService, load_owned_comment};
use crate::models::{
    ApiResponse, ErrorCode,
    comments::{requests::CommentContentRequest, responses::CommentResponse},
};
use crate::services::posts::comments::checked_comment_content;
use crate::services::require_user;

pub async fn update_comment(
    service: &CommentService,
    comment_id: i64,
    update: CommentContentRequest,
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

    let content = match checked_comment_content(&update) {
        Ok(content) => content,
        Err(response) => return Ok(response),
    };

    match storage.update_comment(comment_id, &content).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CommentResponse::new(updated, user),
            "Comment updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CommentNotFound,
            "Comment not found",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::CommentUpdateFailed)),
    }
}
