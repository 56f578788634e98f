use serde::{Deserialize, Serialize};

// OAuth2 令牌
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OAuthToken {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: i64,
    pub client_id: String,
    pub scope: String,
    /// 过期时间（Unix 秒）
    pub expires_at: i64,
}

impl OAuthToken {
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}
