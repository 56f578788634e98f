//! 评论存储操作

use super::posts::adjust_post_statistics;
use super::{SeaOrmStorage, today};
use crate::entity::comments::{ActiveModel, Column, Entity as Comments};
use crate::entity::users::Entity as Users;
use crate::errors::{Result, SocialError};
use crate::models::{comments::entities::Comment, users::entities::User};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建评论并增加评论计数
    pub async fn create_comment_impl(
        &self,
        user_id: i64,
        post_id: i64,
        content: &str,
    ) -> Result<Comment> {
        let date = today();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let comment = ActiveModel {
            user_id: Set(user_id),
            post_id: Set(post_id),
            content: Set(content.to_string()),
            active: Set(true),
            created_date: Set(date),
            updated_date: Set(date),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SocialError::database_operation(format!("创建评论失败: {e}")))?;

        adjust_post_statistics(&txn, post_id, 1, 0).await?;

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(comment.into_comment())
    }

    /// 通过 ID 获取评论
    pub async fn get_comment_by_id_impl(&self, id: i64) -> Result<Option<Comment>> {
        let result = Comments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询评论失败: {e}")))?;

        Ok(result.map(|m| m.into_comment()))
    }

    /// 列出帖子的有效评论及作者
    pub async fn list_comments_for_post_impl(&self, post_id: i64) -> Result<Vec<(Comment, User)>> {
        let rows = Comments::find()
            .filter(Column::PostId.eq(post_id))
            .filter(Column::Active.eq(true))
            .find_also_related(Users)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询评论列表失败: {e}")))?;

        Ok(rows
            .into_iter()
            .filter_map(|(comment, user)| Some((comment.into_comment(), user?.into_user())))
            .collect())
    }

    /// 更新评论内容
    pub async fn update_comment_impl(&self, id: i64, content: &str) -> Result<Option<Comment>> {
        let Some(existing) = Comments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询评论失败: {e}")))?
        else {
            return Ok(None);
        };

        let mut model: ActiveModel = existing.into();
        model.content = Set(content.to_string());
        model.updated_date = Set(today());

        let result = model
            .update(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("更新评论失败: {e}")))?;

        Ok(Some(result.into_comment()))
    }

    /// 删除评论，有效评论同时减少计数
    pub async fn delete_comment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Comments::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询评论失败: {e}")))?
        else {
            return Ok(false);
        };

        Comments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("删除评论失败: {e}")))?;

        if existing.active {
            adjust_post_statistics(&txn, existing.post_id, -1, 0).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(true)
    }
}
