use serde::Serialize;

use super::entities::Auction;

#[derive(Debug, Clone, Serialize)]
pub struct AuctionListResponse {
    pub items: Vec<Auction>,
}
