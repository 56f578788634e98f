use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PostService, load_active_post};
use crate::models::{
    ApiResponse, ErrorCode,
    posts::responses::{PostDetailResponse, PostResponse},
};
use crate::services::require_user;

pub async fn toggle_like(
    service: &PostService,
    post_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let post = match load_active_post(&storage, post_id).await {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    match storage.toggle_like(user.id, post_id).await {
        Ok(like) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            PostDetailResponse {
                post: PostResponse::from(post),
                liked: like.active,
            },
            if like.active { "Post liked" } else { "Post unliked" },
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::LikeFailed)),
    }
}
