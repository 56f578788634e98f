use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuctionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{posts::load_active_post, require_user};

pub async fn set_winner(
    service: &AuctionService,
    auction_id: i64,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    let auction = match storage.get_auction_by_id(auction_id).await {
        Ok(Some(auction)) => auction,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AuctionNotFound,
                "Bid not found",
            )));
        }
        Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
    };

    let post = match load_active_post(&storage, auction.post_id).await {
        Ok(post) => post,
        Err(response) => return Ok(response),
    };

    // 只有帖子作者可以选择中标者
    if post.post.user_id != user.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AuctionPermissionDenied,
            "Only the post owner can choose the winner",
        )));
    }

    match storage.set_auction_winner(auction.id).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            updated,
            "Winner selected successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AuctionNotFound,
            "Bid not found",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}
