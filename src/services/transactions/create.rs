use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::TransactionService;
use crate::models::{ApiResponse, ErrorCode, transactions::requests::CreateTransactionRequest};
use crate::services::require_user;

pub async fn create_transaction(
    service: &TransactionService,
    transaction: CreateTransactionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if !transaction.amount.is_positive() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::TransactionInvalid,
            "Amount must be greater than zero",
        )));
    }
    if transaction.receiver_id == user.id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::TransactionInvalid,
            "You cannot send money to yourself",
        )));
    }

    let storage = service.get_storage(request);
    match storage.get_user_by_id(transaction.receiver_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::TransactionReceiverNotFound,
                "Receiver does not exist",
            )));
        }
        Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
    }

    match storage
        .create_transaction(user.id, transaction.receiver_id, transaction.amount)
        .await
    {
        Ok(created) => {
            tracing::info!(
                "Transaction {}: {} -> {} ({})",
                created.id,
                created.sender_id,
                created.receiver_id,
                created.amount
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(
                created,
                "Transaction created successfully",
            )))
        }
        Err(e) => Ok(e.to_response(ErrorCode::TransactionCreationFailed)),
    }
}
