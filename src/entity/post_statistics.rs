//! 帖子统计实体，与帖子一对一，计数随点赞/评论维护

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "post_statistics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub post_id: i64,
    pub comment_count: i64,
    pub like_count: i64,
    pub active: bool,
    pub created_date: Date,
    pub updated_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::posts::Entity",
        from = "Column::PostId",
        to = "super::posts::Column::Id"
    )]
    Post,
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_statistics(self) -> crate::models::posts::entities::PostStatistics {
        crate::models::posts::entities::PostStatistics {
            post_id: self.post_id,
            comment_count: self.comment_count,
            like_count: self.like_count,
        }
    }
}
