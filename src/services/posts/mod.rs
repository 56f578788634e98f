pub mod comments;
pub mod create;
pub mod delete;
pub mod detail;
pub mod hashtags;
pub mod likes;
pub mod list;
pub mod stats;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::{
    ApiResponse, ErrorCode, PaginationQuery,
    comments::requests::CommentContentRequest,
    hashtags::requests::{AddHashtagsRequest, HashtagInput},
    posts::{
        entities::PostWithHashtags,
        requests::{CreatePostRequest, UpdatePostRequest},
    },
};
use crate::storage::Storage;
use crate::utils::validate::{HASHTAG_NAME_MAX_LEN, TITLE_MAX_LEN, validate_max_len};

pub struct PostService {
    storage: Option<Arc<dyn Storage>>,
}

impl PostService {
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

    // 创建帖子
    pub async fn create_post(
        &self,
        post: CreatePostRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_post(self, post, request).await
    }

    // 帖子详情
    pub async fn get_post(&self, post_id: i64, request: &HttpRequest) -> ActixResult<HttpResponse> {
        detail::get_post(self, post_id, request).await
    }

    // 部分更新帖子
    pub async fn update_post(
        &self,
        post_id: i64,
        update: UpdatePostRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_post(self, post_id, update, request).await
    }

    // 删除帖子
    pub async fn delete_post(
        &self,
        post_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        delete::delete_post(self, post_id, request).await
    }

    // 发表评论
    pub async fn add_comment(
        &self,
        post_id: i64,
        comment: CommentContentRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        comments::add_comment(self, post_id, comment, request).await
    }

    // 点赞 / 取消点赞
    pub async fn toggle_like(
        &self,
        post_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        likes::toggle_like(self, post_id, request).await
    }

    // 追加标签
    pub async fn add_hashtags(
        &self,
        post_id: i64,
        hashtags: AddHashtagsRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        hashtags::add_hashtags(self, post_id, hashtags, request).await
    }

    // 单个帖子的计数
    pub async fn get_statistics(
        &self,
        post_id: i64,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        stats::get_post_statistics(self, post_id, request).await
    }

    // 帖子分页列表
    pub async fn list_posts(
        &self,
        query: PaginationQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_posts(self, query, request).await
    }

    // 汇总统计
    pub async fn get_stats(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        stats::get_post_stats(self, request).await
    }
}

/// 读取有效帖子，不存在时返回 404 响应
pub(crate) async fn load_active_post(
    storage: &Arc<dyn Storage>,
    post_id: i64,
) -> Result<PostWithHashtags, HttpResponse> {
    match storage.get_active_post(post_id).await {
        Ok(Some(post)) => Ok(post),
        Ok(None) => Err(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::PostNotFound,
            "Post not found",
        ))),
        Err(e) => Err(e.to_response(ErrorCode::InternalServerError)),
    }
}

/// 分类必须存在
pub(crate) async fn check_category(
    storage: &Arc<dyn Storage>,
    category_id: Option<i64>,
) -> Result<(), HttpResponse> {
    let Some(category_id) = category_id else {
        return Ok(());
    };
    match storage.get_category_by_id(category_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::CategoryNotFound,
            format!("Invalid pk \"{category_id}\" - category does not exist."),
        ))),
        Err(e) => Err(e.to_response(ErrorCode::InternalServerError)),
    }
}

pub(crate) fn validate_title(title: Option<&str>) -> Result<(), HttpResponse> {
    match title {
        Some(title) => validate_max_len("title", title, TITLE_MAX_LEN).map_err(|msg| {
            HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg))
        }),
        None => Ok(()),
    }
}

pub(crate) fn validate_content(content: &str) -> Result<(), HttpResponse> {
    if content.trim().is_empty() {
        return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PostContentInvalid,
            "content may not be blank",
        )));
    }
    Ok(())
}

pub(crate) fn validate_hashtag_names<'a, I>(names: I) -> Result<(), HttpResponse>
where
    I: IntoIterator<Item = &'a str>,
{
    for name in names {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::HashtagInvalid,
                "Hashtag name may not be blank",
            )));
        }
        if let Err(msg) = validate_max_len("hashtag name", trimmed, HASHTAG_NAME_MAX_LEN) {
            return Err(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::HashtagInvalid, msg)));
        }
    }
    Ok(())
}

pub(crate) fn hashtag_input_names(inputs: &[HashtagInput]) -> impl Iterator<Item = &str> {
    inputs.iter().map(|h| h.name.as_str())
}
