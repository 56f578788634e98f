use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    PostService, check_category, hashtag_input_names, load_active_post, validate_content,
    validate_hashtag_names, validate_title,
};
use crate::models::{
    ApiResponse, ErrorCode,
    posts::{requests::UpdatePostRequest, responses::PostResponse},
};
use crate::services::require_user;

pub async fn update_post(
    service: &PostService,
    post_id: i64,
    update: UpdatePostRequest,
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

    // 作者本人或管理员
    if !existing.post.can_be_modified_by(&user) {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::PostPermissionDenied,
            "You do not have permission to modify this post.",
        )));
    }

    let validation = update
        .content
        .as_deref()
        .map_or(Ok(()), validate_content)
        .and_then(|_| validate_title(update.title.as_deref()))
        .and_then(|_| {
            update
                .hashtag
                .as_deref()
                .map_or(Ok(()), |tags| validate_hashtag_names(hashtag_input_names(tags)))
        });
    if let Err(response) = validation {
        return Ok(response);
    }
    if let Err(response) = check_category(&storage, update.category.flatten()).await {
        return Ok(response);
    }

    match storage.update_post(post_id, update).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PostResponse::from(updated),
            "Post updated successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PostNotFound,
            "Post not found",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::PostUpdateFailed)),
    }
}
