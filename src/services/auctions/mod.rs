pub mod bid;
pub mod list;
pub mod winner;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::auctions::requests::{AuctionListQuery, CreateAuctionRequest};
use crate::storage::Storage;

pub struct AuctionService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuctionService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 帖子的出价列表
    pub async fn list_auctions(
        &self,
        query: AuctionListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_auctions(self, query, request).await
    }

    // 出价
    pub async fn place_bid(
        &self,
        bid: CreateAuctionRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        bid::place_bid(self, bid, request).await
    }

    // 设定中标者
    pub async fn set_winner(
        &self,
        auction_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        winner::set_winner(self, auction_id, request).await
    }
}
