use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::TryStreamExt;

use super::UserService;
use crate::config::AppConfig;
use crate::media::avatar::{read_field_limited, validate_avatar};
use crate::models::{
    ApiResponse, ErrorCode,
    users::{requests::CreateUserRequest, responses::UserResponse},
};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_password_simple, validate_username};

const TEXT_FIELD_LIMIT: usize = 4096;

// 注册表单
#[derive(Debug, Default)]
struct RegisterForm {
    username: String,
    password: String,
    email: String,
    first_name: String,
    last_name: String,
    avatar: Option<(String, Vec<u8>)>,
}

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

async fn read_form(mut payload: Multipart, avatar_limit: usize) -> Result<RegisterForm, HttpResponse> {
    let mut form = RegisterForm::default();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| bad_request(ErrorCode::BadRequest, format!("Invalid multipart body: {e}")))?
    {
        let content_disposition = field.content_disposition().cloned();
        let name = content_disposition
            .as_ref()
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();

        if name == "avatar" {
            let filename = content_disposition
                .as_ref()
                .and_then(|cd| cd.get_filename())
                .unwrap_or_default()
                .to_string();
            // 多读一个字节，超限由 validate_avatar 统一判定
            let bytes = read_field_limited(&mut field, avatar_limit + 1)
                .await
                .map_err(|rejected| bad_request(rejected.code, rejected.message))?;
            if !filename.is_empty() || !bytes.is_empty() {
                form.avatar = Some((filename, bytes));
            }
            continue;
        }

        let bytes = read_field_limited(&mut field, TEXT_FIELD_LIMIT)
            .await
            .map_err(|_| bad_request(ErrorCode::ValidationFailed, format!("Field {name} is too long")))?;
        let value = String::from_utf8(bytes)
            .map_err(|_| bad_request(ErrorCode::ValidationFailed, format!("Field {name} is not valid UTF-8")))?;

        match name.as_str() {
            "username" => form.username = value.trim().to_string(),
            "password" => form.password = value,
            "email" => form.email = value.trim().to_string(),
            "first_name" => form.first_name = value.trim().to_string(),
            "last_name" => form.last_name = value.trim().to_string(),
            // 其余字段（包括 is_staff / is_superuser）一律忽略
            _ => {}
        }
    }

    Ok(form)
}

pub async fn handle_register(
    service: &UserService,
    request: &HttpRequest,
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    let config = AppConfig::get();
    let form = match read_form(payload, config.media.max_avatar_size).await {
        Ok(form) => form,
        Err(response) => return Ok(response),
    };

    // 1. 校验字段
    if let Err(msg) = validate_username(&form.username) {
        return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
    }
    if let Err(msg) = validate_email(&form.email) {
        return Ok(bad_request(ErrorCode::UserEmailInvalid, msg));
    }
    if let Err(msg) = validate_password_simple(&form.password) {
        return Ok(bad_request(ErrorCode::UserPasswordInvalid, msg));
    }

    let storage = service.get_storage(request);

    // 2. 检查用户名是否已存在
    match storage.get_user_by_username(&form.username).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::UserNameAlreadyExists,
                "A user with that username already exists.",
            )));
        }
        Ok(None) => {}
        Err(e) => return Ok(e.to_response(ErrorCode::RegisterFailed)),
    }

    // 3. 校验头像
    let avatar = match &form.avatar {
        Some((filename, bytes)) => match validate_avatar(filename, bytes, &config.media) {
            Ok(extension) => Some((extension, bytes)),
            Err(rejected) => return Ok(bad_request(rejected.code, rejected.message)),
        },
        None => None,
    };

    // 4. 哈希密码
    let password_hash = match hash_password(&form.password) {
        Ok(hash) => hash,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    format!("Password hashing failed: {e}"),
                )),
            );
        }
    };

    // 5. 保存头像
    let avatar_key = match avatar {
        Some((extension, bytes)) => {
            match service.get_media_store(request).save(&extension, bytes).await {
                Ok(key) => Some(key),
                Err(e) => return Ok(e.to_response(ErrorCode::FileUploadFailed)),
            }
        }
        None => None,
    };

    // 6. 创建用户
    let create_request = CreateUserRequest {
        username: form.username,
        email: form.email,
        password: password_hash,
        first_name: form.first_name,
        last_name: form.last_name,
        avatar: avatar_key.clone(),
        is_staff: false,
        is_superuser: false,
    };

    match storage.create_user(create_request).await {
        Ok(user) => {
            tracing::info!("User {} registered", user.username);
            Ok(HttpResponse::Created().json(ApiResponse::success(
                UserResponse::from(user),
                "User registered successfully",
            )))
        }
        Err(e) => {
            // 用户未创建，删除已保存的头像
            if let Some(key) = avatar_key
                && let Err(cleanup) = service.get_media_store(request).delete(&key).await
            {
                tracing::warn!("Failed to remove orphaned avatar {}: {}", key, cleanup);
            }
            Ok(e.to_response(ErrorCode::UserCreationFailed))
        }
    }
}
