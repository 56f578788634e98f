use serde::{Deserialize, Deserializer};

use crate::models::hashtags::requests::HashtagInput;

// 创建帖子请求
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub category: Option<i64>,
    #[serde(default)]
    pub hashtag: Vec<HashtagInput>,
}

// 部分更新帖子，提供 hashtag 时整体替换
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    /// 缺省为 None，显式 null 为 Some(None) 表示清除分类
    #[serde(default, deserialize_with = "deserialize_present")]
    pub category: Option<Option<i64>>,
    pub hashtag: Option<Vec<HashtagInput>>,
}

// 字段出现即为 Some，值可为 null
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<i64>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_category_distinguishes_null_from_missing() {
        let missing: UpdatePostRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.category, None);

        let cleared: UpdatePostRequest = serde_json::from_str(r#"{"category": null}"#).unwrap();
        assert_eq!(cleared.category, Some(None));

        let set: UpdatePostRequest = serde_json::from_str(r#"{"category": 3}"#).unwrap();
        assert_eq!(set.category, Some(Some(3)));
    }
}
