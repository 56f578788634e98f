use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::MediaService;

static MEDIA_SERVICE: Lazy<MediaService> = Lazy::new(MediaService::new_lazy);

pub async fn serve_media(req: HttpRequest, key: web::Path<String>) -> ActixResult<HttpResponse> {
    MEDIA_SERVICE.serve(&key, &req).await
}

// 媒体文件公开访问
pub fn configure_media_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/media/{key}", web::get().to(serve_media));
}
