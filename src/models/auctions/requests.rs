use serde::Deserialize;

use crate::utils::money::Money;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateAuctionRequest {
    pub post_id: i64,
    pub bid_price: Money,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionListQuery {
    pub post_id: Option<i64>,
}
