use serde::Deserialize;

use super::entities::ReportReason;
use crate::models::common::pagination::deserialize_optional_i64;

// 举报请求，字段的存在性与合法性在服务层逐项校验
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReportRequest {
    #[serde(default)]
    pub post_id: Option<serde_json::Value>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl CreateReportRequest {
    /// 接受数字或数字字符串形式的 post_id
    pub fn parsed_post_id(&self) -> Option<i64> {
        match self.post_id.as_ref()? {
            serde_json::Value::Number(n) => n.as_i64(),
            serde_json::Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// post_id 为空、0、空串或 null 时视为缺失
    pub fn has_post_id(&self) -> bool {
        match &self.post_id {
            None | Some(serde_json::Value::Null) => false,
            Some(serde_json::Value::String(s)) => !s.trim().is_empty(),
            Some(serde_json::Value::Number(n)) => n.as_i64() != Some(0),
            Some(_) => true,
        }
    }
}

// 举报列表查询（管理端）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportListQuery {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub size: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub post_id: Option<i64>,
    pub reason: Option<ReportReason>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_id_forms() {
        let req: CreateReportRequest =
            serde_json::from_str(r#"{"post_id":"12","reason":"spam"}"#).unwrap();
        assert!(req.has_post_id());
        assert_eq!(req.parsed_post_id(), Some(12));

        let req: CreateReportRequest = serde_json::from_str(r#"{"post_id":5}"#).unwrap();
        assert_eq!(req.parsed_post_id(), Some(5));

        let req: CreateReportRequest = serde_json::from_str(r#"{"post_id":"x"}"#).unwrap();
        assert!(req.has_post_id());
        assert_eq!(req.parsed_post_id(), None);

        let req: CreateReportRequest = serde_json::from_str(r#"{"post_id":""}"#).unwrap();
        assert!(!req.has_post_id());
    }
}
