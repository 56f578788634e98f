//! 点赞存储操作

use super::posts::adjust_post_statistics;
use super::{SeaOrmStorage, today};
use crate::entity::likes::{ActiveModel, Column, Entity as Likes, Model};
use crate::errors::{Result, SocialError};
use crate::models::likes::entities::Like;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait,
};

async fn find_like<C: ConnectionTrait>(
    conn: &C,
    user_id: i64,
    post_id: i64,
) -> Result<Option<Model>> {
    Likes::find()
        .filter(Column::UserId.eq(user_id))
        .filter(Column::PostId.eq(post_id))
        .one(conn)
        .await
        .map_err(|e| SocialError::database_operation(format!("查询点赞失败: {e}")))
}

/// 切换已存在点赞的 active 状态并同步计数
async fn flip_like<C: ConnectionTrait>(conn: &C, like: Model) -> Result<Model> {
    let active = !like.active;
    let post_id = like.post_id;

    let mut model: ActiveModel = like.into();
    model.active = Set(active);
    model.updated_date = Set(today());
    let updated = model
        .update(conn)
        .await
        .map_err(|e| SocialError::database_operation(format!("更新点赞失败: {e}")))?;

    adjust_post_statistics(conn, post_id, 0, if active { 1 } else { -1 }).await?;
    Ok(updated)
}

impl SeaOrmStorage {
    /// 点赞或取消点赞
    pub async fn toggle_like_impl(&self, user_id: i64, post_id: i64) -> Result<Like> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let like = match find_like(&txn, user_id, post_id).await? {
            Some(existing) => flip_like(&txn, existing).await?,
            None => {
                let date = today();
                let inserted = Likes::insert(ActiveModel {
                    user_id: Set(user_id),
                    post_id: Set(post_id),
                    active: Set(true),
                    created_date: Set(date),
                    updated_date: Set(date),
                    ..Default::default()
                })
                .on_conflict(
                    OnConflict::columns([Column::UserId, Column::PostId])
                        .do_nothing()
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| SocialError::database_operation(format!("创建点赞失败: {e}")))?;

                let like = find_like(&txn, user_id, post_id)
                    .await?
                    .ok_or_else(|| SocialError::database_operation("点赞创建后不存在"))?;

                if inserted == 0 {
                    // 并发请求已先创建，按已存在处理
                    flip_like(&txn, like).await?
                } else {
                    adjust_post_statistics(&txn, post_id, 0, 1).await?;
                    like
                }
            }
        };

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(like.into_like())
    }

    /// 用户当前是否点赞了帖子
    pub async fn is_post_liked_by_impl(&self, user_id: i64, post_id: i64) -> Result<bool> {
        let count = Likes::find()
            .filter(Column::UserId.eq(user_id))
            .filter(Column::PostId.eq(post_id))
            .filter(Column::Active.eq(true))
            .count(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询点赞失败: {e}")))?;

        Ok(count > 0)
    }
}
