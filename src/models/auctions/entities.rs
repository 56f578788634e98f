use serde::{Deserialize, Serialize};

use crate::utils::money::Money;

// 竞拍出价记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Auction {
    pub id: i64,
    #[serde(rename = "post")]
    pub post_id: i64,
    #[serde(rename = "participant")]
    pub participant_id: i64,
    pub bid_price: Money,
    #[serde(rename = "winner")]
    pub winner_id: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
