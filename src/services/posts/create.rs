use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{
    PostService, check_category, hashtag_input_names, validate_content, validate_hashtag_names,
    validate_title,
};
use crate::models::{
    ApiResponse, ErrorCode,
    posts::{requests::CreatePostRequest, responses::PostResponse},
};
use crate::services::require_user;

pub async fn create_post(
    service: &PostService,
    post: CreatePostRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Err(response) = validate_content(&post.content)
        .and_then(|_| validate_title(post.title.as_deref()))
        .and_then(|_| validate_hashtag_names(hashtag_input_names(&post.hashtag)))
    {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    if let Err(response) = check_category(&storage, post.category).await {
        return Ok(response);
    }

    match storage.create_post(user.id, post).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(
            PostResponse::from(created),
            "Post created successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::PostCreationFailed)),
    }
}
