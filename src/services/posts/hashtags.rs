use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PostService, load_active_post, validate_hashtag_names};
use crate::models::{ApiResponse, ErrorCode, hashtags::requests::AddHashtagsRequest};
use crate::services::require_user;

pub async fn add_hashtags(
    service: &PostService,
    post_id: i64,
    hashtags: AddHashtagsRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    if let Err(response) = require_user(request) {
        return Ok(response);
    }

    if let Err(response) = validate_hashtag_names(hashtags.hashtags.iter().map(String::as_str)) {
        return Ok(response);
    }

    let storage = service.get_storage(request);
    if let Err(response) = load_active_post(&storage, post_id).await {
        return Ok(response);
    }

    match storage.add_hashtags_to_post(post_id, hashtags.hashtags).await {
        Ok(_) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Hashtags added to the post successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::HashtagAddFailed)),
    }
}
