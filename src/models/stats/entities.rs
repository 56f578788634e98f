use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 按发布日期统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeStats {
    pub created_date: NaiveDate,
    pub post_count: i64,
    pub likes_count: i64,
    pub comments_count: i64,
}

// 按分类统计，未分类的帖子 category 为 null
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub category: Option<i64>,
    pub post_count: i64,
    pub likes_count: i64,
    pub comments_count: i64,
}
