//! OAuth2 令牌端点（password 与 refresh_token 授权）

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::config::OAuth2Config;
use crate::middlewares::require_auth::user_cache_key;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        entities::OAuthToken,
        requests::{OAuthTokenRequest, RevokeTokenRequest},
        responses::OAuthTokenResponse,
    },
};
use crate::utils::password::verify_password;
use crate::utils::random_code::generate_random_code;

const TOKEN_LENGTH: usize = 40;

fn error(status: actix_web::http::StatusCode, code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiResponse::error_empty(code, message))
}

fn bad_request(code: ErrorCode, message: &str) -> HttpResponse {
    error(actix_web::http::StatusCode::BAD_REQUEST, code, message)
}

/// 校验请求的 scope，未指定时授予全部 scope
pub(crate) fn resolve_scope(requested: Option<&str>, config: &OAuth2Config) -> Option<String> {
    let requested: Vec<&str> = requested
        .map(|s| s.split_whitespace().collect())
        .unwrap_or_default();

    if requested.is_empty() {
        return Some(config.scopes.join(" "));
    }
    requested
        .iter()
        .all(|scope| config.scopes.iter().any(|s| s == scope))
        .then(|| requested.join(" "))
}

fn new_token(user_id: i64, client_id: &str, scope: String, config: &OAuth2Config) -> OAuthToken {
    OAuthToken {
        access_token: generate_random_code(TOKEN_LENGTH),
        refresh_token: generate_random_code(TOKEN_LENGTH),
        user_id,
        client_id: client_id.to_string(),
        scope,
        expires_at: chrono::Utc::now().timestamp() + config.access_token_expiry,
    }
}

pub async fn handle_token(
    service: &AuthService,
    token_request: OAuthTokenRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    // 1. 校验客户端
    if config
        .find_oauth2_client(&token_request.client_id, token_request.client_secret.as_deref())
        .is_none()
    {
        tracing::info!("OAuth2 token request from invalid client {}", token_request.client_id);
        return Ok(error(
            actix_web::http::StatusCode::UNAUTHORIZED,
            ErrorCode::InvalidClient,
            "invalid_client",
        ));
    }

    let storage = service.get_storage(request);

    // 2. 按授权类型确定用户与 scope，refresh_token 授权同时带出被替换的旧令牌
    let (user_id, scope, previous) = match token_request.grant_type.as_str() {
        "password" => {
            let (Some(username), Some(password)) =
                (token_request.username.as_deref(), token_request.password.as_deref())
            else {
                return Ok(bad_request(
                    ErrorCode::BadRequest,
                    "username and password are required",
                ));
            };

            let Some(scope) = resolve_scope(token_request.scope.as_deref(), &config.oauth2) else {
                return Ok(bad_request(ErrorCode::InvalidScope, "invalid_scope"));
            };

            let user = match storage.get_user_by_username(username).await {
                Ok(user) => user,
                Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
            };
            match user {
                Some(user) if user.is_active && verify_password(password, &user.password_hash) => {
                    if let Err(e) = storage.update_last_login(user.id).await {
                        tracing::warn!("Failed to update last login for user {}: {e}", user.id);
                    }
                    (user.id, scope, None)
                }
                _ => {
                    tracing::info!("OAuth2 password grant rejected for {}", username);
                    return Ok(bad_request(ErrorCode::AuthFailed, "Invalid credentials given."));
                }
            }
        }
        "refresh_token" => {
            let Some(refresh_token) = token_request.refresh_token.as_deref() else {
                return Ok(bad_request(ErrorCode::BadRequest, "refresh_token is required"));
            };

            let existing = match storage.get_oauth_token_by_refresh(refresh_token).await {
                Ok(token) => token.filter(|t| t.client_id == token_request.client_id),
                Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
            };
            let Some(existing) = existing else {
                return Ok(bad_request(ErrorCode::TokenInvalid, "invalid_grant"));
            };
            (existing.user_id, existing.scope.clone(), Some(existing))
        }
        _ => {
            return Ok(bad_request(
                ErrorCode::UnsupportedGrantType,
                "unsupported_grant_type",
            ));
        }
    };

    // 3. 签发新令牌，refresh 时旧令牌在同一事务中作废
    let token = new_token(user_id, &token_request.client_id, scope, &config.oauth2);
    let issued = match &previous {
        Some(old) => storage.rotate_oauth_token(&old.refresh_token, token).await,
        None => storage.create_oauth_token(token).await.map(Some),
    };

    if issued.as_ref().is_ok_and(Option::is_some)
        && let Some(old) = &previous
        && let Some(cache) = service.get_cache(request)
    {
        cache.remove(&user_cache_key(&old.access_token)).await;
    }

    match issued {
        Ok(Some(token)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            OAuthTokenResponse {
                access_token: token.access_token,
                token_type: "Bearer",
                expires_in: config.oauth2.access_token_expiry,
                refresh_token: token.refresh_token,
                scope: token.scope,
            },
            "Token issued successfully",
        ))),
        // 旧令牌已被并发的刷新请求用掉
        Ok(None) => Ok(bad_request(ErrorCode::TokenInvalid, "invalid_grant")),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}

pub async fn handle_revoke(
    service: &AuthService,
    revoke: RevokeTokenRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    if config
        .find_oauth2_client(&revoke.client_id, revoke.client_secret.as_deref())
        .is_none()
    {
        return Ok(error(
            actix_web::http::StatusCode::UNAUTHORIZED,
            ErrorCode::InvalidClient,
            "invalid_client",
        ));
    }

    let storage = service.get_storage(request);

    // token 可以是 access 也可以是 refresh
    let existing = match storage.get_oauth_token_by_access(&revoke.token).await {
        Ok(Some(token)) => Some(token),
        Ok(None) => match storage.get_oauth_token_by_refresh(&revoke.token).await {
            Ok(token) => token,
            Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
        },
        Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
    };

    // 未知令牌或属于其他客户端时同样返回成功
    if let Some(existing) = existing.filter(|t| t.client_id == revoke.client_id) {
        if let Err(e) = storage.delete_oauth_token(&existing.access_token).await {
            return Ok(e.to_response(ErrorCode::InternalServerError));
        }
        if let Some(cache) = service.get_cache(request) {
            cache.remove(&user_cache_key(&existing.access_token)).await;
        }
        tracing::info!("Revoked OAuth2 token for user {}", existing.user_id);
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Token revoked")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OAuth2Config {
        OAuth2Config {
            access_token_expiry: 36000,
            scopes: vec!["read".into(), "write".into(), "groups".into()],
            clients: vec![],
        }
    }

    #[test]
    fn test_resolve_scope() {
        assert_eq!(resolve_scope(None, &config()).as_deref(), Some("read write groups"));
        assert_eq!(resolve_scope(Some("  "), &config()).as_deref(), Some("read write groups"));
        assert_eq!(resolve_scope(Some("read write"), &config()).as_deref(), Some("read write"));
        assert_eq!(resolve_scope(Some("read admin"), &config()), None);
    }

    #[test]
    fn test_new_token_expiry() {
        let token = new_token(3, "web", "read".into(), &config());
        assert_eq!(token.access_token.len(), TOKEN_LENGTH);
        assert_ne!(token.access_token, token.refresh_token);
        assert!(!token.is_expired(chrono::Utc::now().timestamp()));
    }
}
