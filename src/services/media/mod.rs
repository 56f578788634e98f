pub mod serve;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::media::MediaStore;

pub struct MediaService {
    store: Option<Arc<dyn MediaStore>>,
}

impl MediaService {
    pub fn new_lazy() -> Self {
        Self { store: None }
    }

    pub(crate) fn get_media_store(&self, request: &HttpRequest) -> Arc<dyn MediaStore> {
        if let Some(store) = &self.store {
            store.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn MediaStore>>>()
                .expect("MediaStore not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 读取已上传的媒体文件
    pub async fn serve(&self, key: &str, request: &HttpRequest) -> ActixResult<HttpResponse> {
        serve::serve_media(self, key, request).await
    }
}
