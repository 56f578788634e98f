use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ReportService;
use crate::models::{
    ApiResponse, ErrorCode,
    reports::{entities::ReportReason, requests::CreateReportRequest},
};
use crate::services::require_user;

pub async fn create_report(
    service: &ReportService,
    report: CreateReportRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 1. 必填字段
    let reason = report.reason.as_deref().unwrap_or_default();
    if !report.has_post_id() || reason.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ReportFieldsMissing,
            "post_id and reason are required fields",
        )));
    }

    // 2. 帖子必须存在
    let storage = service.get_storage(request);
    let post = match report.parsed_post_id() {
        Some(post_id) => match storage.get_active_post(post_id).await {
            Ok(post) => post,
            Err(e) => return Ok(e.to_response(ErrorCode::ReportCreationFailed)),
        },
        None => None,
    };
    let Some(post) = post else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ReportPostInvalid,
            "Invalid post_id",
        )));
    };

    // 3. 原因必须是已知选项
    let Ok(reason) = reason.parse::<ReportReason>() else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ReportReasonInvalid,
            "Invalid reason",
        )));
    };

    match storage.create_report(user.id, post.post.id, reason).await {
        Ok(created) => {
            tracing::info!("User {} reported post {} ({})", user.id, post.post.id, reason);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Report submitted successfully",
            )))
        }
        Err(e) => Ok(e.to_response(ErrorCode::ReportCreationFailed)),
    }
}
