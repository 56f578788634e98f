use serde::{Deserialize, Serialize};

use crate::utils::money::Money;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "sender")]
    pub sender_id: i64,
    #[serde(rename = "receiver")]
    pub receiver_id: i64,
    pub amount: Money,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
