use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::UserService;
use crate::middlewares::require_auth::{RequireAuth, user_cache_key};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::UpdateUserRequest, responses::UserResponse},
};
use crate::services::require_user;
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_max_len, validate_password_simple};

pub async fn get_current_user(
    service: &UserService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    // 缓存中的用户可能过期，以数据库为准
    let storage = service.get_storage(request);
    match storage.get_user_by_id(user.id).await {
        Ok(Some(user)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserResponse::from(user),
            "User information retrieved successfully",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::InternalServerError)),
    }
}

pub async fn update_current_user(
    service: &UserService,
    mut update: UpdateUserRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let user = match require_user(request) {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    if let Some(email) = &update.email
        && let Err(msg) = validate_email(email)
    {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }
    for (field, value) in [
        ("first_name", &update.first_name),
        ("last_name", &update.last_name),
    ] {
        if let Some(value) = value
            && let Err(msg) = validate_max_len(field, value, 150)
        {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::ValidationFailed, msg)));
        }
    }

    if let Some(password) = update.password.take() {
        if let Err(msg) = validate_password_simple(&password) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
        }
        match hash_password(&password) {
            Ok(hash) => update.password = Some(hash),
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::UserUpdateFailed,
                        format!("Password hashing failed: {e}"),
                    )),
                );
            }
        }
    }

    let storage = service.get_storage(request);
    match storage.update_user(user.id, update).await {
        Ok(Some(updated)) => {
            // 丢弃当前 token 缓存的旧用户信息
            if let (Some(cache), Some(token)) =
                (service.get_cache(request), RequireAuth::extract_token(request))
            {
                cache.remove(&user_cache_key(&token)).await;
            }
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                UserResponse::from(updated),
                "User information updated successfully",
            )))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => Ok(e.to_response(ErrorCode::UserUpdateFailed)),
    }
}
