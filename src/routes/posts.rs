use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::PaginationQuery;
use crate::models::comments::requests::CommentContentRequest;
use crate::models::hashtags::requests::AddHashtagsRequest;
use crate::models::posts::requests::{CreatePostRequest, UpdatePostRequest};
use crate::services::PostService;
use crate::utils::SafeIDI64;

// 懒加载的全局 PostService 实例
static POST_SERVICE: Lazy<PostService> = Lazy::new(PostService::new_lazy);

// HTTP处理程序
pub async fn create_post(
    req: HttpRequest,
    post_data: web::Json<CreatePostRequest>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE.create_post(post_data.into_inner(), &req).await
}

pub async fn get_post(req: HttpRequest, post_id: SafeIDI64) -> ActixResult<HttpResponse> {
    POST_SERVICE.get_post(post_id.0, &req).await
}

pub async fn update_post(
    req: HttpRequest,
    post_id: SafeIDI64,
    update_data: web::Json<UpdatePostRequest>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE
        .update_post(post_id.0, update_data.into_inner(), &req)
        .await
}

pub async fn delete_post(req: HttpRequest, post_id: SafeIDI64) -> ActixResult<HttpResponse> {
    POST_SERVICE.delete_post(post_id.0, &req).await
}

pub async fn add_comment(
    req: HttpRequest,
    post_id: SafeIDI64,
    comment: web::Json<CommentContentRequest>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE
        .add_comment(post_id.0, comment.into_inner(), &req)
        .await
}

pub async fn toggle_like(req: HttpRequest, post_id: SafeIDI64) -> ActixResult<HttpResponse> {
    POST_SERVICE.toggle_like(post_id.0, &req).await
}

pub async fn add_hashtags(
    req: HttpRequest,
    post_id: SafeIDI64,
    hashtags: web::Json<AddHashtagsRequest>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE
        .add_hashtags(post_id.0, hashtags.into_inner(), &req)
        .await
}

pub async fn get_statistics(req: HttpRequest, post_id: SafeIDI64) -> ActixResult<HttpResponse> {
    POST_SERVICE.get_statistics(post_id.0, &req).await
}

pub async fn list_posts(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    POST_SERVICE.list_posts(query.into_inner(), &req).await
}

pub async fn get_stats(req: HttpRequest) -> ActixResult<HttpResponse> {
    POST_SERVICE.get_stats(&req).await
}

// 配置路由
pub fn configure_post_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/posts")
            .wrap(middlewares::RequireAuth)
            .route("/", web::post().to(create_post))
            .route("/{id}/", web::get().to(get_post))
            .route("/{id}/update_post/", web::patch().to(update_post))
            .route("/{id}/delete_post/", web::delete().to(delete_post))
            .route("/{id}/comments/", web::post().to(add_comment))
            .route("/{id}/likes/", web::post().to(toggle_like))
            .route("/{id}/add_hashtag/", web::post().to(add_hashtags))
            .route("/{id}/statistics/", web::get().to(get_statistics)),
    );
}

pub fn configure_post_list_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/post-list")
            .wrap(middlewares::RequireAuth)
            .route("/", web::get().to(list_posts))
            .route("/stats/", web::get().to(get_stats)),
    );
}
