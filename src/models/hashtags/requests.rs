use serde::Deserialize;

// 帖子请求中内嵌的标签 {"name": "..."}
#[derive(Debug, Clone, Deserialize)]
pub struct HashtagInput {
    pub name: String,
}

// 给帖子追加标签
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddHashtagsRequest {
    #[serde(default)]
    pub hashtags: Vec<String>,
}
