pub mod oauth;
pub mod token;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::auth::requests::{
    OAuthTokenRequest, RevokeTokenRequest, TokenObtainRequest, TokenRefreshRequest,
};
use crate::storage::Storage;

pub struct AuthService {
    storage: Option<Arc<dyn Storage>>,
}

impl AuthService {
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

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> Option<Arc<dyn ObjectCache>> {
        request
            .app_data::<actix_web::web::Data<Arc<dyn ObjectCache>>>()
            .map(|cache| cache.get_ref().clone())
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // JWT：用户名密码换取 access + refresh
    pub async fn obtain_token(
        &self,
        login: TokenObtainRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        token::handle_obtain_token(self, login, request).await
    }

    // JWT：refresh 换取新的 access
    pub async fn refresh_token(
        &self,
        refresh: TokenRefreshRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        token::handle_refresh_token(self, refresh, request).await
    }

    // OAuth2：password / refresh_token 授权
    pub async fn oauth_token(
        &self,
        token_request: OAuthTokenRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        oauth::handle_token(self, token_request, request).await
    }

    // OAuth2：撤销令牌
    pub async fn revoke_token(
        &self,
        revoke: RevokeTokenRequest,
        request: &HttpRequest,
    ) -> ActixResult<HttpResponse> {
        oauth::handle_revoke(self, revoke, request).await
    }
}
