use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::comments::requests::{CommentContentRequest, CommentListQuery};
use crate::services::CommentService;
use crate::utils::SafeIDI64;

static COMMENT_SERVICE: Lazy<CommentService> = Lazy::new(CommentService::new_lazy);

pub async fn list_comments(
    req: HttpRequest,
    query: web::Query<CommentListQuery>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE.list_comments(query.into_inner(), &req).await
}

pub async fn update_comment(
    req: HttpRequest,
    comment_id: SafeIDI64,
    update_data: web::Json<CommentContentRequest>,
) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE
        .update_comment(comment_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_comment(req: HttpRequest, comment_id: SafeIDI64) -> ActixResult<HttpResponse> {
    COMMENT_SERVICE.delete_comment(comment_id.0, &req).await
}

// 配置路由
pub fn configure_comment_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/comments")
            .wrap(middlewares::RequireAuth)
            .route("/", web::get().to(list_comments))
            .route("/{id}/", web::put().to(update_comment))
            .route("/{id}/", web::patch().to(update_comment))
            .route("/{id}/", web::delete().to(delete_comment)),
    );
}
