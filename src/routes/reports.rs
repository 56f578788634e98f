use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::reports::requests::{CreateReportRequest, ReportListQuery};
use crate::services::ReportService;

static REPORT_SERVICE: Lazy<ReportService> = Lazy::new(ReportService::new_lazy);

pub async fn create_report(
    req: HttpRequest,
    report: web::Json<CreateReportRequest>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.create_report(report.into_inner(), &req).await
}

pub async fn list_reports(
    req: HttpRequest,
    query: web::Query<ReportListQuery>,
) -> ActixResult<HttpResponse> {
    REPORT_SERVICE.list_reports(query.into_inner(), &req).await
}

// 配置路由：提交举报只需登录，查看举报需要管理员
pub fn configure_report_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/reports")
            .wrap(middlewares::RequireAuth)
            .service(
                web::resource("/")
                    .guard(guard::Post())
                    .route(web::post().to(create_report)),
            )
            .service(
                web::resource("/")
                    .guard(guard::Get())
                    .wrap(middlewares::RequireStaff)
                    .route(web::get().to(list_reports)),
            ),
    );
}
