use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, guard, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::categories::requests::CreateCategoryRequest;
use crate::services::CategoryService;
use crate::utils::SafeIDI64;

static CATEGORY_SERVICE: Lazy<CategoryService> = Lazy::new(CategoryService::new_lazy);

pub async fn list_categories(req: HttpRequest) -> ActixResult<HttpResponse> {
    CATEGORY_SERVICE.list_categories(&req).await
}

pub async fn create_category(
    req: HttpRequest,
    category: web::Json<CreateCategoryRequest>,
) -> ActixResult<HttpResponse> {
    CATEGORY_SERVICE
        .create_category(category.into_inner(), &req)
        .await
}

pub async fn delete_category(req: HttpRequest, category_id: SafeIDI64) -> ActixResult<HttpResponse> {
    CATEGORY_SERVICE.delete_category(category_id.0, &req).await
}

// 配置路由：列表只需登录，增删需要管理员
pub fn configure_category_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/categories")
            .wrap(middlewares::RequireAuth)
            .service(
                web::resource("/")
                    .guard(guard::Get())
                    .route(web::get().to(list_categories)),
            )
            .service(
                web::resource("/")
                    .guard(guard::Post())
                    .wrap(middlewares::RequireStaff)
                    .route(web::post().to(create_category)),
            )
            .service(
                web::resource("/{id}/")
                    .wrap(middlewares::RequireStaff)
                    .route(web::delete().to(delete_category)),
            ),
    );
}
