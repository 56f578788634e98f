use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auctions::requests::{AuctionListQuery, CreateAuctionRequest};
use crate::services::AuctionService;
use crate::utils::SafeIDI64;

static AUCTION_SERVICE: Lazy<AuctionService> = Lazy::new(AuctionService::new_lazy);

pub async fn list_auctions(
    req: HttpRequest,
    query: web::Query<AuctionListQuery>,
) -> ActixResult<HttpResponse> {
    AUCTION_SERVICE.list_auctions(query.into_inner(), &req).await
}

pub async fn place_bid(
    req: HttpRequest,
    bid: web::Json<CreateAuctionRequest>,
) -> ActixResult<HttpResponse> {
    AUCTION_SERVICE.place_bid(bid.into_inner(), &req).await
}

pub async fn set_winner(req: HttpRequest, auction_id: SafeIDI64) -> ActixResult<HttpResponse> {
    AUCTION_SERVICE.set_winner(auction_id.0, &req).await
}

pub fn configure_auction_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auctions")
            .wrap(middlewares::RequireAuth)
            .route("/", web::get().to(list_auctions))
            .route("/", web::post().to(place_bid))
            .route("/{id}/winner/", web::post().to(set_winner)),
    );
}
