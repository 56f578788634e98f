use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CategoryService;
use crate::models::{ApiResponse, ErrorCode, categories::requests::CreateCategoryRequest};
use crate::utils::validate::{CATEGORY_NAME_MAX_LEN, validate_required_text};

pub async fn create_category(
    service: &CategoryService,
    category: CreateCategoryRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let name = category.name.trim();
    if let Err(msg) = validate_required_text("name", name, CATEGORY_NAME_MAX_LEN) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CategoryNameInvalid, msg)));
    }

    let storage = service.get_storage(request);
    match storage.create_category(name).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(
            created,
            "Category created successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::CategoryCreationFailed)),
    }
}
