use super::entities::Transaction;
use crate::models::common::PaginatedResponse;

pub type TransactionListResponse = PaginatedResponse<Transaction>;
