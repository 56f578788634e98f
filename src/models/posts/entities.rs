use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::hashtags::entities::Hashtag;

// 帖子实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    pub content: String,
    pub category_id: Option<i64>,
    pub active: bool,
    pub created_date: NaiveDate,
    pub updated_date: NaiveDate,
}

impl Post {
    /// 作者本人或管理员可以修改
    pub fn can_be_modified_by(&self, user: &crate::models::users::entities::User) -> bool {
        self.user_id == user.id || user.is_privileged()
    }
}

// 帖子及其标签
#[derive(Debug, Clone)]
pub struct PostWithHashtags {
    pub post: Post,
    pub hashtags: Vec<Hashtag>,
}

// 帖子统计
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostStatistics {
    #[serde(rename = "post")]
    pub post_id: i64,
    pub comment_count: i64,
    pub like_count: i64,
}
