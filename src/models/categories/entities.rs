use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 帖子分类
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub created_date: NaiveDate,
    pub updated_date: NaiveDate,
}
