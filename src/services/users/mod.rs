pub mod current;
pub mod register;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::media::MediaStore;
use crate::models::users::requests::UpdateUserRequest;
use crate::storage::Storage;

pub struct UserService {
    storage: Option<Arc<dyn Storage>>,
}

impl UserService {
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

    pub(crate) fn get_media_store(&self, request: &HttpRequest) -> Arc<dyn MediaStore> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn MediaStore>>>()
            .expect("MediaStore not found in app data")
            .get_ref()
            .clone()
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    // 注册（multipart，可附带头像）
    pub async fn register(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        register::handle_register(self, request, payload).await
    }

    // 获取当前用户
    pub async fn current_user(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        current::get_current_user(self, request).await
    }

    // 更新当前用户资料
    pub async fn update_current_user(
        &self,
        update: UpdateUserRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        current::update_current_user(self, update, request).await
    }
}
