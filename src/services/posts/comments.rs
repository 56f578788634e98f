use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{PostService, load_active_post};
use crate::models::{
    ApiResponse, ErrorCode,
    comments::{requests::CommentContentRequest, responses::CommentResponse},
};
use crate::services::require_user;
use crate::utils::validate::{COMMENT_MAX_LEN, validate_required_text};

/// 校验评论内容，返回去除首尾空白后的文本
pub(crate) fn checked_comment_content(
    request: &CommentContentRequest,
) -> Result<String, HttpResponse> {
    let Some(content) = request.content.as_deref() else {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CommentContentInvalid,
            "content is required",
        )));
    };
    validate_required_text("content", content, COMMENT_MAX_LEN).map_err(|msg| {
        HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::CommentContentInvalid, msg))
    })?;
    Ok(content.trim().to_string())
}

pub async fn add_comment(
    service: &PostService,
    post_id: i64,
    comment: CommentContentRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    let content = match checked_comment_content(&comment) {
        Ok(content) => content,
        Err(response) => return Ok(response),
    };

    let storage = service.get_storage(request);
    if let Err(response) = load_active_post(&storage, post_id).await {
        return Ok(response);
    }

    match storage.create_comment(user.id, post_id, &content).await {
        Ok(created) => Ok(HttpResponse::Created().json(ApiResponse::success(
            CommentResponse::new(created, user),
            "Comment created successfully",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::CommentCreationFailed)),
    }
}
