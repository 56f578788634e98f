//! OAuth2 令牌存储操作

use super::SeaOrmStorage;
use crate::entity::oauth_tokens::{ActiveModel, Column, Entity as OAuthTokens};
use crate::errors::{Result, SocialError};
use crate::models::auth::entities::OAuthToken;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};

async fn insert_token<C: ConnectionTrait>(conn: &C, token: OAuthToken) -> Result<OAuthToken> {
    let model = ActiveModel {
        access_token: Set(token.access_token),
        refresh_token: Set(token.refresh_token),
        user_id: Set(token.user_id),
        client_id: Set(token.client_id),
        scope: Set(token.scope),
        expires_at: Set(token.expires_at),
        created_at: Set(chrono::Utc::now().timestamp()),
        ..Default::default()
    };

    let result = model
        .insert(conn)
        .await
        .map_err(|e| SocialError::database_operation(format!("创建令牌失败: {e}")))?;

    Ok(result.into_oauth_token())
}

impl SeaOrmStorage {
    pub async fn create_oauth_token_impl(&self, token: OAuthToken) -> Result<OAuthToken> {
        insert_token(&self.db, token).await
    }

    /// 用 refresh token 换新令牌，删除旧令牌与写入新令牌在同一事务中
    ///
    /// 旧令牌已不存在（例如被并发请求用掉）时返回 None。
    pub async fn rotate_oauth_token_impl(
        &self,
        refresh_token: &str,
        token: OAuthToken,
    ) -> Result<Option<OAuthToken>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = OAuthTokens::delete_many()
            .filter(Column::RefreshToken.eq(refresh_token))
            .exec(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("删除旧令牌失败: {e}")))?;
        if deleted.rows_affected == 0 {
            return Ok(None);
        }

        let issued = insert_token(&txn, token).await?;

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(issued))
    }

    pub async fn get_oauth_token_by_access_impl(
        &self,
        access_token: &str,
    ) -> Result<Option<OAuthToken>> {
        let result = OAuthTokens::find()
            .filter(Column::AccessToken.eq(access_token))
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询令牌失败: {e}")))?;

        Ok(result.map(|m| m.into_oauth_token()))
    }

    pub async fn get_oauth_token_by_refresh_impl(
        &self,
        refresh_token: &str,
    ) -> Result<Option<OAuthToken>> {
        let result = OAuthTokens::find()
            .filter(Column::RefreshToken.eq(refresh_token))
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询令牌失败: {e}")))?;

        Ok(result.map(|m| m.into_oauth_token()))
    }

    /// 删除令牌，access 或 refresh 任一匹配即可
    pub async fn delete_oauth_token_impl(&self, token: &str) -> Result<bool> {
        let result = OAuthTokens::delete_many()
            .filter(
                Condition::any()
                    .add(Column::AccessToken.eq(token))
                    .add(Column::RefreshToken.eq(token)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("删除令牌失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
