use serde::Deserialize;

use crate::utils::money::Money;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTransactionRequest {
    pub receiver_id: i64,
    pub amount: Money,
}
