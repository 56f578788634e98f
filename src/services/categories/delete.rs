use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CategoryService;
use crate::errors::SocialError;
use crate::models::{ApiResponse, ErrorCode};

pub async fn delete_category(
    service: &CategoryService,
    category_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.delete_category(category_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty(
            "Category deleted successfully",
        ))),
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::CategoryNotFound,
            "Category not found",
        ))),
        // 仍有帖子引用该分类
        Err(e @ SocialError::Conflict(_)) => Ok(e.to_response(ErrorCode::CategoryInUse)),
        Err(e) => Ok(e.to_response(ErrorCode::CategoryDeleteFailed)),
    }
}
