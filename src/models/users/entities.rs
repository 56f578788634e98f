use serde::{Deserialize, Serialize};

// 用户实体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing, default)] // 不序列化到JSON响应中
    pub password_hash: String,
    pub is_superuser: bool,
    pub is_staff: bool,
    pub is_active: bool,
    /// 头像在媒体存储中的 key
    pub avatar: Option<String>,
    pub date_joined: chrono::DateTime<chrono::Utc>,
    pub last_login: Option<chrono::DateTime<chrono::Utc>>,
}

impl User {
    pub const ROLE_SUPERUSER: &'static str = "superuser";
    pub const ROLE_STAFF: &'static str = "staff";
    pub const ROLE_USER: &'static str = "user";

    /// 管理员或超级用户
    pub fn is_privileged(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    /// 写入 JWT 的角色名
    pub fn role_name(&self) -> &'static str {
        if self.is_superuser {
            Self::ROLE_SUPERUSER
        } else if self.is_staff {
            Self::ROLE_STAFF
        } else {
            Self::ROLE_USER
        }
    }

    // 生成 token 对（access + refresh）
    pub fn generate_token_pair(&self) -> Result<crate::utils::jwt::TokenPair, String> {
        crate::utils::jwt::JwtUtils::generate_token_pair(self.id, self.role_name())
            .map_err(|e| format!("生成 token 对失败: {e}"))
    }
}
