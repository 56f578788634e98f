use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::requests::{
    OAuthTokenRequest, RevokeTokenRequest, TokenObtainRequest, TokenRefreshRequest,
};
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

pub async fn obtain_token(
    req: HttpRequest,
    login: web::Json<TokenObtainRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.obtain_token(login.into_inner(), &req).await
}

pub async fn refresh_token(
    req: HttpRequest,
    refresh: web::Json<TokenRefreshRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(refresh.into_inner(), &req).await
}

pub async fn oauth_token(
    req: HttpRequest,
    token_request: web::Json<OAuthTokenRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.oauth_token(token_request.into_inner(), &req).await
}

pub async fn revoke_token(
    req: HttpRequest,
    revoke: web::Json<RevokeTokenRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.revoke_token(revoke.into_inner(), &req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/token")
            .service(
                web::resource("/")
                    .wrap(middlewares::RateLimit::login())
                    .route(web::post().to(obtain_token)),
            )
            .service(
                web::resource("/refresh/")
                    .wrap(middlewares::RateLimit::refresh_token())
                    .route(web::post().to(refresh_token)),
            ),
    )
    .service(
        web::scope("/o")
            .service(
                web::resource("/token/")
                    .wrap(middlewares::RateLimit::oauth_token())
                    .route(web::post().to(oauth_token)),
            )
            .route("/revoke_token/", web::post().to(revoke_token)),
    );
}
