pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::reports::requests::{CreateReportRequest, ReportListQuery};
use crate::storage::Storage;

pub struct ReportService {
    storage: Option<Arc<dyn Storage>>,
}

impl ReportService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 举报帖子
    pub async fn create_report(
        &self,
        report: CreateReportRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_report(self, report, request).await
    }

    // 举报列表（管理员）
    pub async fn list_reports(
        &self,
        query: ReportListQuery,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        list::list_reports(self, query, request).await
    }
}
