use serde::Serialize;

use super::entities::PostWithHashtags;
use crate::models::common::PaginatedResponse;
use crate::models::hashtags::entities::Hashtag;

// 帖子响应
#[derive(Debug, Clone, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: Option<String>,
    pub content: String,
    pub category: Option<i64>,
    pub hashtag: Vec<Hashtag>,
}

impl From<PostWithHashtags> for PostResponse {
    fn from(value: PostWithHashtags) -> Self {
        Self {
            id: value.post.id,
            title: value.post.title,
            content: value.post.content,
            category: value.post.category_id,
            hashtag: value.hashtags,
        }
    }
}

// 帖子详情，附带当前用户是否点赞
#[derive(Debug, Clone, Serialize)]
pub struct PostDetailResponse {
    #[serde(flatten)]
    pub post: PostResponse,
    pub liked: bool,
}

pub type PostListResponse = PaginatedResponse<PostResponse>;
