//! 竞拍存储操作

use super::{SeaOrmStorage, today};
use crate::entity::auctions::{ActiveModel, Column, Entity as Auctions};
use crate::entity::posts::{Column as PostColumn, Entity as Posts};
use crate::errors::{Result, SocialError};
use crate::models::auctions::entities::Auction;
use crate::utils::money::Money;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

/// 帖子当前最高的有效出价，同价时先出价者优先
async fn highest_bid<C: ConnectionTrait>(
    conn: &C,
    post_id: i64,
) -> Result<Option<crate::entity::auctions::Model>> {
    Auctions::find()
        .filter(Column::PostId.eq(post_id))
        .filter(Column::Active.eq(true))
        .order_by_desc(Column::BidPrice)
        .order_by_asc(Column::Id)
        .one(conn)
        .await
        .map_err(|e| SocialError::database_operation(format!("查询最高出价失败: {e}")))
}

impl SeaOrmStorage {
    /// 创建出价，必须严格高于当前最高出价
    ///
    /// 先对帖子行加排他锁，同一帖子的出价按顺序比较最高价。SQLite 不支持行锁，
    /// 其写事务本身是串行的。
    pub async fn create_auction_impl(
        &self,
        post_id: i64,
        participant_id: i64,
        bid_price: Money,
    ) -> Result<Auction> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let locked = Posts::find_by_id(post_id)
            .filter(PostColumn::Active.eq(true))
            .lock_exclusive()
            .one(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("锁定帖子失败: {e}")))?;
        if locked.is_none() {
            return Err(SocialError::not_found("Post not found"));
        }

        if let Some(top) = highest_bid(&txn, post_id).await?
            && bid_price.cents() <= top.bid_price
        {
            return Err(SocialError::validation(format!(
                "出价必须高于当前最高出价 {}",
                Money::from_cents(top.bid_price)
            )));
        }

        let date = today();
        let auction = ActiveModel {
            post_id: Set(post_id),
            participant_id: Set(participant_id),
            bid_price: Set(bid_price.cents()),
            winner_id: Set(None),
            created_at: Set(chrono::Utc::now().timestamp()),
            active: Set(true),
            created_date: Set(date),
            updated_date: Set(date),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| SocialError::database_operation(format!("创建出价失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(auction.into_auction())
    }

    /// 通过 ID 获取出价
    pub async fn get_auction_by_id_impl(&self, id: i64) -> Result<Option<Auction>> {
        let result = Auctions::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询出价失败: {e}")))?;

        Ok(result.map(|m| m.into_auction()))
    }

    /// 列出帖子的有效出价，价高者在前
    pub async fn list_auctions_for_post_impl(&self, post_id: i64) -> Result<Vec<Auction>> {
        let rows = Auctions::find()
            .filter(Column::PostId.eq(post_id))
            .filter(Column::Active.eq(true))
            .order_by_desc(Column::BidPrice)
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询出价列表失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_auction()).collect())
    }

    /// 选定中标出价，同一帖子的其他出价清除中标者
    pub async fn set_auction_winner_impl(&self, id: i64) -> Result<Option<Auction>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SocialError::database_operation(format!("开启事务失败: {e}")))?;

        let Some(existing) = Auctions::find_by_id(id)
            .one(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询出价失败: {e}")))?
        else {
            return Ok(None);
        };

        Auctions::update_many()
            .col_expr(Column::WinnerId, Expr::value(Option::<i64>::None))
            .col_expr(Column::UpdatedDate, Expr::value(today()))
            .filter(Column::PostId.eq(existing.post_id))
            .filter(Column::Id.ne(id))
            .exec(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("清除中标者失败: {e}")))?;

        let participant_id = existing.participant_id;
        let mut model: ActiveModel = existing.into();
        model.winner_id = Set(Some(participant_id));
        model.updated_date = Set(today());

        let result = model
            .update(&txn)
            .await
            .map_err(|e| SocialError::database_operation(format!("设置中标者失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| SocialError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(result.into_auction()))
    }
}
