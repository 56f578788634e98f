//! 竞拍实体
//!
//! `bid_price` 以分为单位存储。

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "auctions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub post_id: i64,
    pub participant_id: i64,
    pub bid_price: i64,
    pub winner_id: Option<i64>,
    pub created_at: i64,
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ParticipantId",
        to = "super::users::Column::Id"
    )]
    Participant,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::WinnerId",
        to = "super::users::Column::Id"
    )]
    Winner,
}

impl Related<super::posts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_auction(self) -> crate::models::auctions::entities::Auction {
        use crate::models::auctions::entities::Auction;
        use crate::utils::money::Money;
        use chrono::{DateTime, Utc};

        Auction {
            id: self.id,
            post_id: self.post_id,
            participant_id: self.participant_id,
            bid_price: Money::from_cents(self.bid_price),
            winner_id: self.winner_id,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
