pub mod delete;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode,
    comments::{
        entities::Comment,
        requests::{CommentContentRequest, CommentListQuery},
    },
    users::entities::User,
};
use crate::storage::Storage;

pub struct CommentService {
    storage: Option<Arc<dyn Storage>>,
}

impl CommentService {
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

    // 帖子的评论列表
    pub async fn list_comments(
        &self,
        query: CommentListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_comments(self, query, request).await
    }

    // 修改评论
    pub async fn update_comment(
        &self,
        comment_id: i64,
        update: CommentContentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_comment(self, comment_id, update, request).await
    }

    // 删除评论
    pub async fn delete_comment(
        &self,
        comment_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_comment(self, comment_id, request).await
    }
}

/// 读取评论并确认当前用户是作者
pub(crate) async fn load_owned_comment(
    storage: &Arc<dyn Storage>,
    comment_id: i64,
    user: &User,
) -> Result<Comment, HttpResponse> {
    let comment = match storage.get_comment_by_id(comment_id).await {
        Ok(Some(comment)) if comment.active => comment,
        Ok(_) => {
            return Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CommentNotFound,
                "Comment not found",
            )));
        }
        Err(e) => return Err(e.to_response(ErrorCode::InternalServerError)),
    };

    if comment.user_id != user.id {
        return Err(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::CommentPermissionDenied,
            "You do not have permission to perform this action.",
        )));
    }

    Ok(comment)
}
