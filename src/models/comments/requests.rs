use serde::Deserialize;

use crate::models::common::pagination::deserialize_optional_i64;

// 评论内容请求，创建与更新共用
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentContentRequest {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub post_id: Option<i64>,
}
