use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{ApiResponse, ErrorCode, reports::requests::ReportListQuery};

pub async fn list_reports(
    service: &ReportService,
    query: ReportListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_reports(query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Reports retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}
