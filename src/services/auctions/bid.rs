use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuctionService;
use crate::errors::SocialError;
use crate::models::{ApiResponse, ErrorCode, auctions::requests::CreateAuctionRequest};
use crate::services::{posts::load_active_post, require_user};

pub async fn place_bid(
    service: &AuctionService,
    bid: CreateAuctionRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if !bid.bid_price.is_positive() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::AuctionBidInvalid,
            "Bid price must be greater than zero",
        )));
    }

    let storage = service.get_storage(request);
    let post = match load_active_post(&storage, bid.post_id).await {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    if post.post.user_id == user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AuctionOwnPost,
            "You cannot bid on your own post",
        )));
    }

    match storage
        .create_auction(post.post.id, user.id, bid.bid_price)
        .await
    {
        Ok(auction) => {
            tracing::info!(
                "User {} bid {} on post {}",
                user.id,
                auction.bid_price,
                post.post.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(auction, "Bid placed successfully")))
        }
        // 出价不高于当前最高价
        Err(e @ SocialError::Validation(_)) => Ok(e.to_response(ErrorCode::AuctionBidTooLow)),
        // 出价期间帖子被删除
        Err(e @ SocialError::NotFound(_)) => Ok(e.to_response(ErrorCode::PostNotFound)),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}
