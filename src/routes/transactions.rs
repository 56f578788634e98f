use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::transactions::requests::CreateTransactionRequest;
use crate::services::TransactionService;

static TRANSACTION_SERVICE: Lazy<TransactionService> = Lazy::new(TransactionService::new_lazy);

pub async fn create_transaction(
    req: HttpRequest,
    transaction: web::Json<CreateTransactionRequest>,
) -> ActixResult<HttpResponse> {
    TRANSACTION_SERVICE
        .create_transaction(transaction.into_inner(), &req)
        .await
}

pub async fn list_transactions(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    TRANSACTION_SERVICE
        .list_transactions(query.into_inner(), &req)
        .await
}

pub fn configure_transaction_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/transactions")
            .wrap(middlewares::RequireAuth)
            .route("/", web::post().to(create_transaction))
            .route("/", web::get().to(list_transactions)),
    );
}
