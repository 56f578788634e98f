use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::{PostService, load_active_post};
use crate::errors::Result;
use crate::models::{
    ApiResponse,
    posts::{
        entities::PostWithHashtags,
        responses::{PostDetailResponse, PostResponse},
    },
};
use crate::services::require_user;
use crate::storage::Storage;

/// 组装帖子详情，liked 为当前用户是否有有效点赞
pub(crate) async fn build_detail(
    storage: &Arc<dyn Storage>,
    post: PostWithHashtags,
    user_id: i64,
) -> Result<PostDetailResponse> {
    let liked = storage.is_post_liked_by(user_id, post.post.id).await?;
    Ok(PostDetailResponse {
        post: PostResponse::from(post),
        liked,
    })
}

pub async fn get_post(
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

    match build_detail(&storage, post, user.id).await {
        Ok(detail) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            detail,
            "Post retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response(crate::models::ErrorCode::InternalServerError)),
    }
}
