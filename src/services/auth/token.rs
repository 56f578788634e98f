use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AuthService;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{
        requests::{TokenObtainRequest, TokenRefreshRequest},
        responses::{AccessTokenResponse, TokenPairResponse},
    },
};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::verify_password;

const INVALID_CREDENTIALS: &str = "No active account found with the given credentials";
const INVALID_TOKEN: &str = "Token is invalid or expired";

pub async fn handle_obtain_token(
    service: &AuthService,
    login: TokenObtainRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 1. 根据用户名获取用户
    let user = match storage.get_user_by_username(&login.username).await {
        Ok(Some(user)) => user,
        Ok(None) => {
            tracing::info!("Token request for unknown user {}", login.username);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                INVALID_CREDENTIALS,
            )));
        }
        Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
    };

    // 2. 验证密码与账户状态
    if !user.is_active || !verify_password(&login.password, &user.password_hash) {
        tracing::info!("Token request rejected for user {}", user.username);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            INVALID_CREDENTIALS,
        )));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for user {}: {e}", user.id);
    }

    // 4. 生成令牌对
    match user.generate_token_pair() {
        Ok(pair) => {
            tracing::info!("User {} obtained a token pair", user.username);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TokenPairResponse {
                    access: pair.access_token,
                    refresh: pair.refresh_token,
                },
                "Token obtained successfully",
            )))
        }
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to generate token",
                )),
            )
        }
    }
}

pub async fn handle_refresh_token(
    service: &AuthService,
    refresh: TokenRefreshRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let claims = match JwtUtils::verify_refresh_token(&refresh.refresh) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::info!("Refresh token validation failed: {}", e);
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::TokenInvalid,
                INVALID_TOKEN,
            )));
        }
    };

    // 以数据库中的用户为准，停用账户不能续期
    let storage = service.get_storage(request);
    let user = match claims.user_id() {
        Some(user_id) => match storage.get_user_by_id(user_id).await {
            Ok(user) => user.filter(|u| u.is_active),
            Err(e) => return Ok(e.to_response(ErrorCode::InternalServerError)),
        },
        None => None,
    };
    let Some(user) = user else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::TokenInvalid,
            INVALID_TOKEN,
        )));
    };

    match JwtUtils::generate_access_token(user.id, user.role_name()) {
        Ok(access) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            AccessTokenResponse { access },
            "Token refreshed successfully",
        ))),
        Err(e) => {
            tracing::error!("Failed to generate JWT token: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Unable to generate token",
                )),
            )
        }
    }
}
