use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PostService, load_active_post};
use crate::models::{ApiResponse, ErrorCode, posts::entities::PostStatistics};

pub async fn get_post_statistics(
    service: &PostService,
    post_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    if let Err(response) = load_active_post(&storage, post_id).await {
        return Ok(response);
    }

    match storage.get_post_statistics(post_id).await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats.unwrap_or(PostStatistics {
                post_id,
                comment_count: 0,
                like_count: 0,
            }),
            "Post statistics retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::PostStatsFailed)),
    }
}

pub async fn get_post_stats(
    service: &PostService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_post_stats().await {
        Ok(stats) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            stats,
            "Post stats retrieved successfully",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::PostStatsFailed,
                e.message(),
            )),
        ),
    }
}
