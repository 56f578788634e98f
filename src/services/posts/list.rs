use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::PostService;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};

pub async fn list_posts(
    service: &PostService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_active_posts(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Posts retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}
