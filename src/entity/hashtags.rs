//! 话题标签实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "hashtags")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub active: bool,
    pub created_date: Date,
    pub updated_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::post_hashtags::Entity")]
    PostHashtags,
}

impl Related<super::post_hashtags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PostHashtags.def()
    }
}

// 多对多：hashtags <-> post_hashtags <-> posts
impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        super::post_hashtags::Relation::Post.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::post_hashtags::Relation::Hashtag.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_hashtag(self) -> crate::models::hashtags::entities::Hashtag {
        crate::models::hashtags::entities::Hashtag {
            id: self.id,
            name: self.name,
        }
    }
}
