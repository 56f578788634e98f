//! 分类存储操作

use super::{SeaOrmStorage, today};
use crate::entity::categories::{ActiveModel, Column, Entity as Categories};
use crate::entity::posts::{Column as PostColumn, Entity as Posts};
use crate::errors::{Result, SocialError};
use crate::models::categories::entities::Category;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 列出所有分类
    pub async fn list_categories_impl(&self) -> Result<Vec<Category>> {
        let models = Categories::find()
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询分类列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_category()).collect())
    }

    /// 通过 ID 获取分类
    pub async fn get_category_by_id_impl(&self, id: i64) -> Result<Option<Category>> {
        let result = Categories::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询分类失败: {e}")))?;

        Ok(result.map(|m| m.into_category()))
    }

    /// 创建分类
    pub async fn create_category_impl(&self, name: &str) -> Result<Category> {
        let date = today();
        let model = ActiveModel {
            name: Set(name.to_string()),
            active: Set(true),
            created_date: Set(date),
            updated_date: Set(date),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("创建分类失败: {e}")))?;

        Ok(result.into_category())
    }

    /// 删除分类，仍被帖子引用时拒绝
    pub async fn delete_category_impl(&self, id: i64) -> Result<bool> {
        let referenced = Posts::find()
            .filter(PostColumn::CategoryId.eq(id))
            .count(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询分类引用失败: {e}")))?;

        if referenced > 0 {
            return Err(SocialError::conflict(format!(
                "Cannot delete category: {referenced} post(s) still reference it"
            )));
        }

        let result = Categories::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("删除分类失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
