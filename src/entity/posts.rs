//! 帖子实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub title: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub category_id: Option<i64>,
    pub active: bool,
    pub created_date: Date,
    pub updated_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::post_hashtags::Entity")]
    PostHashtags,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::likes::Entity")]
    Likes,
    #[sea_orm(has_many = "super::reports::Entity")]
    Reports,
    #[sea_orm(has_many = "super::auctions::Entity")]
    Auctions,
    #[sea_orm(has_one = "super::post_statistics::Entity")]
    Statistics,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::post_hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostHashtags.def()
    }
}

// 多对多：posts <-> post_hashtags <-> hashtags
impl Related<super::hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_hashtags::Relation::Hashtag.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_hashtags::Relation::Post.def().rev())
    }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl Related<super::likes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::reports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reports.def()
    }
}

impl Related<super::auctions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Auctions.def()
    }
}

impl Related<super::post_statistics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Statistics.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_post(self) -> crate::models::posts::entities::Post {
        crate::models::posts::entities::Post {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            category_id: self.category_id,
            active: self.active,
            created_date: self.created_date,
            updated_date: self.updated_date,
        }
    }
}
