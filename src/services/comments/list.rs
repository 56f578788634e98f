use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CommentService;
use crate::models::{
    ApiResponse, ErrorCode,
    comments::{requests::CommentListQuery, responses::CommentResponse},
};

pub async fn list_comments(
    service: &CommentService,
    query: CommentListQuery,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let Some(post_id) = query.post_id.filter(|id| *id != 0) else {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CommentPostIdMissing,
            "Parameter post_id is missing.",
        )));
    };

    let storage = service.get_storage(request);
    match storage.list_comments_for_post(post_id).await {
        Ok(rows) if rows.is_empty() => Ok(HttpResponse::Ok().json(ApiResponse::success(
            Vec::<CommentResponse>::new(),
            "No comments found for the specified post.",
        ))),
        Ok(rows) => {
            let comments: Vec<CommentResponse> = rows
                .into_iter()
                .map(|(comment, user)| CommentResponse::new(comment, user))
                .collect();
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                comments,
                "Comments retrieved successfully",
            )))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                e.message(),
            )),
        ),
    }
}
