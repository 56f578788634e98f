use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::MediaService;
use crate::media::is_valid_key;
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::file_magic::content_type_for;

pub async fn serve_media(
    service: &MediaService,
    key: &str,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let not_found = || {
        HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::FileNotFound,
            "File not found",
        ))
    };

    if !is_valid_key(key) {
        return Ok(not_found());
    }

    let store = service.get_media_store(request);
    match store.load(key).await {
        Ok(Some(bytes)) => {
            let extension = key.rfind('.').map(|i| &key[i..]).unwrap_or_default();
            Ok(HttpResponse::Ok()
                .content_type(content_type_for(extension))
                .insert_header((header::CACHE_CONTROL, "public, max-age=86400"))
                .body(bytes))
        }
        Ok(None) => Ok(not_found()),
        Err(e) => Ok(e.to_response(ErrorCode::FileNotFound)),
    }
}
