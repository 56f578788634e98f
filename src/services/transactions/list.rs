use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TransactionService;
use crate::models::{ApiResponse, ErrorCode, PaginationQuery};
use crate::services::require_user;

pub async fn list_transactions(
    service: &TransactionService,
    query: PaginationQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    match storage.list_transactions_for_user(user.id, query).await {
        Ok(page) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            page,
            "Transactions retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}
