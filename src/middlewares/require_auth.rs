/*!
 * 认证中间件
 *
 * 接受 `Authorization: Bearer <token>`，token 可以是 JWT access token，
 * 也可以是仍在有效期内的 OAuth2 access token。解析出的用户按 token 缓存，
 * 并写入请求扩展供处理程序使用：
 *
 * ```rust,ignore
 * web::scope("/posts")
 *     .wrap(RequireAuth)
 *     .route("/", web::post().to(create_post));
 *
 * async fn create_post(req: HttpRequest) -> Result<HttpResponse> {
 *     let user = RequireAuth::extract_user(&req);
 *     ...
 * }
 * ```
 */

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::{ErrorCode, users::entities::User};
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{StatusCode, header::HeaderMap},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireAuth;

/// 用户缓存键，吊销 OAuth2 令牌时需要同步删除
pub fn user_cache_key(token: &str) -> String {
    format!("user:{token}")
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

// 依次尝试 JWT 与 OAuth2 令牌，返回用户 ID
async fn resolve_user_id(storage: &Arc<dyn Storage>, token: &str) -> Result<i64, String> {
    if let Ok(claims) = JwtUtils::verify_access_token(token) {
        return claims
            .user_id()
            .ok_or_else(|| "Invalid user ID in token".to_string());
    }

    let oauth_token = storage
        .get_oauth_token_by_access(token)
        .await
        .map_err(|e| {
            tracing::error!("查询 OAuth2 令牌失败: {e}");
            "Failed to validate token".to_string()
        })?
        .ok_or_else(|| "Invalid token".to_string())?;

    if oauth_token.is_expired(chrono::Utc::now().timestamp()) {
        return Err("Token has expired".to_string());
    }

    Ok(oauth_token.user_id)
}

async fn authenticate(req: &ServiceRequest) -> Result<User, String> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| "Authentication credentials were not provided".to_string())?;

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .ok_or_else(|| "Storage not configured".to_string())?
        .get_ref()
        .clone();
    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|c| c.get_ref().clone());

    let user_id = resolve_user_id(&storage, token).await?;
    let cache_key = user_cache_key(token);

    // 从缓存中获取用户信息
    if let Some(cache) = &cache {
        match cache.get_json::<User>(&cache_key).await {
            CacheResult::Found(user) if user.id == user_id => return Ok(user),
            CacheResult::NotFound => debug!("User not found in cache"),
            _ => {
                cache.remove(&cache_key).await;
                debug!("Discarding stale cached user for token");
            }
        }
    }

    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            tracing::error!("查询用户失败: {e}");
            "Failed to retrieve user".to_string()
        })?
        .ok_or_else(|| "User not found".to_string())?;

    if !user.is_active {
        return Err("User is inactive".to_string());
    }

    if let Some(cache) = &cache {
        cache
            .insert_json(cache_key, &user, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        Box::pin(async move {
            // 预检请求直接放行
            if req.method() == actix_web::http::Method::OPTIONS {
                return Ok(req.into_response(
                    create_error_response(StatusCode::NO_CONTENT, ErrorCode::Success, "")
                        .map_into_right_body(),
                ));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("Authentication successful for user ID: {}", user.id);
                    req.extensions_mut().insert(user);
                    let res = srv.call(req).await?.map_into_left_body();
                    Ok(res)
                }
                Err(err) => {
                    info!("Authentication failed for request to {}: {}", req.path(), err);
                    Ok(req.into_response(
                        create_error_response(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, &err)
                            .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireAuth {
    /// 从请求扩展中提取当前用户，只能在 RequireAuth 保护的路由中使用
    pub fn extract_user(req: &actix_web::HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    /// 当前请求携带的 Bearer token
    pub fn extract_token(req: &actix_web::HttpRequest) -> Option<String> {
        bearer_token(req.headers()).map(str::to_string)
    }
}
