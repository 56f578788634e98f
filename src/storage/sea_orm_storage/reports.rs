//! 举报存储操作

use super::{SeaOrmStorage, today};
use crate::entity::reports::{ActiveModel, Column, Entity as Reports};
use crate::errors::{Result, SocialError};
use crate::models::{
    PaginationInfo, PaginationQuery,
    reports::{
        entities::{Report, ReportReason},
        requests::ReportListQuery,
        responses::ReportListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建举报
    pub async fn create_report_impl(
        &self,
        user_id: i64,
        post_id: i64,
        reason: ReportReason,
    ) -> Result<Report> {
        let date = today();
        let model = ActiveModel {
            user_id: Set(user_id),
            post_id: Set(post_id),
            reason: Set(reason.to_string()),
            active: Set(true),
            created_date: Set(date),
            updated_date: Set(date),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| SocialError::database_operation(format!("创建举报失败: {e}")))?;

        Ok(result.into_report())
    }

    /// 分页列出举报，最新的在前
    pub async fn list_reports_impl(&self, query: ReportListQuery) -> Result<ReportListResponse> {
        let (page, size) = PaginationQuery {
            page: query.page.unwrap_or(1),
            size: query.size.unwrap_or(10),
        }
        .normalized();

        let mut select = Reports::find();

        if let Some(post_id) = query.post_id {
            select = select.filter(Column::PostId.eq(post_id));
        }
        if let Some(reason) = query.reason {
            select = select.filter(Column::Reason.eq(reason.as_str()));
        }

        let paginator = select.order_by_desc(Column::Id).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SocialError::database_operation(format!("查询举报总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SocialError::database_operation(format!("查询举报页数失败: {e}")))?;
        let reports = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SocialError::database_operation(format!("查询举报列表失败: {e}")))?;

        Ok(ReportListResponse {
            items: reports.into_iter().map(|m| m.into_report()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }
}
