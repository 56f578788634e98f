use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuctionService;
use crate::models::{
    ApiResponse, ErrorCode,
    auctions::{requests::AuctionListQuery, responses::AuctionListResponse},
};

pub async fn list_auctions(
    service: &AuctionService,
    query: AuctionListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(post_id) = query.post_id else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Parameter post_id is missing.",
        )));
    };

    let storage = service.get_storage(request);
    match storage.list_auctions_for_post(post_id).await {
        Ok(items) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AuctionListResponse { items },
            "Bids retrieved successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}
