use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// 举报原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportReason {
    InappropriateLanguage, // 不当言论
    Spam,
    NoPaymentAfterAuction, // 竞拍后未付款
    Other,
}

impl ReportReason {
    pub const ALL: [ReportReason; 4] = [
        ReportReason::InappropriateLanguage,
        ReportReason::Spam,
        ReportReason::NoPaymentAfterAuction,
        ReportReason::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportReason::InappropriateLanguage => "inappropriate_language",
            ReportReason::Spam => "spam",
            ReportReason::NoPaymentAfterAuction => "no_payment_after_auction",
            ReportReason::Other => "other",
        }
    }
}

impl std::fmt::Display for ReportReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|reason| reason.as_str() == s)
            .ok_or_else(|| format!("Invalid report reason: {s}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(rename = "user")]
    pub user_id: i64,
    #[serde(rename = "post")]
    pub post_id: i64,
    pub reason: ReportReason,
    pub active: bool,
    pub created_date: NaiveDate,
    pub updated_date: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_parse_and_display() {
        for reason in ReportReason::ALL {
            assert_eq!(reason.as_str().parse::<ReportReason>().unwrap(), reason);
        }
        assert!("abuse".parse::<ReportReason>().is_err());
        assert_eq!(
            serde_json::to_string(&ReportReason::NoPaymentAfterAuction).unwrap(),
            "\"no_payment_after_auction\""
        );
    }
}
