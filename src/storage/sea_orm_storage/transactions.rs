//! 转账存储操作

use super::{SeaOrmStorage, today};
use crate::entity::transactions::{ActiveModel, Column, Entity as Transactions};
use crate::errors::{Result, SocialError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    transactions::{entities::Transaction, responses::TransactionListResponse},
};
use crate::utils::money::Money;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 记录一笔转账
    pub async fn create_transaction_impl(
        &self,
        sender_id: i64,
        receiver_id: i64,
        amount: Money,
    ) -> Result<Transaction> {
        let date = today();
        let model = ActiveModel {
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            amount: Set(amount.cents()),
            created_at: Set(chrono::Utc::now().timestamp()),
            active: Set(true),
            created_date: Set(date),
            updated_date: Set(date),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("创建转账失败: {e}")))?;

        Ok(result.into_transaction())
    }

    /// 分页列出用户作为发送方或接收方的转账，最新的在前
    pub async fn list_transactions_for_user_impl(
        &self,
        user_id: i64,
        query: PaginationQuery,
    ) -> Result<TransactionListResponse> {
        let (page, size) = query.normalized();

        let paginator = Transactions::find()
            .filter(
                Condition::any()
                    .add(Column::SenderId.eq(user_id))
                    .add(Column::ReceiverId.eq(user_id)),
            )
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| SocialError::database_operation(format!("查询转账总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SocialError::database_operation(format!("查询转账页数失败: {e}")))?;
        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询转账列表失败: {e}")))?;

        Ok(TransactionListResponse {
            items: rows.into_iter().map(|m| m.into_transaction()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
