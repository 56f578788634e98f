//! 路由层 HTTP 测试（内存 SQLite + moka 缓存 + 临时目录媒体存储）

use std::path::PathBuf;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::{Value, json};

use super::configure_routes;
use crate::cache::{CacheResult, ObjectCache};
use crate::cache::object_cache::moka::MokaCacheWrapper;
use crate::media::{LocalMediaStore, MediaStore};
use crate::middlewares::require_auth::user_cache_key;
use crate::models::auth::entities::OAuthToken;
use crate::models::users::{entities::User, requests::CreateUserRequest};
use crate::storage::Storage;
use crate::storage::sea_orm_storage::SeaOrmStorage;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::hash_password;
use crate::utils::{json_error_handler, query_error_handler};

const PASSWORD: &str = "Correct-Horse-9";
const CLIENT_ID: &str = "social-media-app";
const CLIENT_SECRET: &str = "change-me-in-production";

struct TestContext {
    storage: Arc<dyn Storage>,
    cache: Arc<dyn ObjectCache>,
    media: Arc<dyn MediaStore>,
    media_dir: PathBuf,
}

impl TestContext {
    async fn new() -> Self {
        Self::with_storage(SeaOrmStorage::connect_memory().await.unwrap())
    }

    fn with_storage(storage: SeaOrmStorage) -> Self {
        let media_dir = std::env::temp_dir().join(format!("social-media-test-{}", uuid::Uuid::new_v4()));
        Self {
            storage: Arc::new(storage),
            cache: Arc::new(MokaCacheWrapper::new().unwrap()),
            media: Arc::new(LocalMediaStore::new(&media_dir).unwrap()),
            media_dir,
        }
    }

    async fn user(&self, username: &str, is_staff: bool) -> (User, String) {
        let user = self
            .storage
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: format!("{username}@example.com"),
                password: hash_password(PASSWORD).unwrap(),
                first_name: String::new(),
                last_name: String::new(),
                avatar: None,
                is_staff,
                is_superuser: false,
            })
            .await
            .unwrap();
        let token = JwtUtils::generate_access_token(user.id, user.role_name()).unwrap();
        (user, format!("Bearer {token}"))
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::Data::new($ctx.storage.clone()))
                .app_data(web::Data::new($ctx.cache.clone()))
                .app_data(web::Data::new($ctx.media.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_protected_routes_require_token() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri("/post-list/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/post-list/")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_post_lifecycle() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let (_, bob) = ctx.user("bob", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/posts/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"title": "Hello", "content": "first post", "hashtag": [{"name": "rust"}]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let post_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["hashtag"][0]["name"], "rust");

    // 非作者不能修改
    let req = test::TestRequest::patch()
        .uri(&format!("/posts/{post_id}/update_post/"))
        .insert_header(("Authorization", bob.as_str()))
        .set_json(json!({"content": "hijacked"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/likes/"))
        .insert_header(("Authorization", bob.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["liked"], true);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/statistics/"))
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["like_count"], 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/posts/{post_id}/delete_post/"))
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/"))
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_invalid_path_id_is_rejected() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/posts/abc/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_comment_list_requires_post_id() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/comments/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Parameter post_id is missing.");
}

#[actix_web::test]
async fn test_reports_validation_and_staff_listing() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let (_, moderator) = ctx.user("moderator", true).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/posts/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"content": "report me"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let post_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/reports/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"reason": "spam"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "post_id and reason are required fields");

    let req = test::TestRequest::post()
        .uri("/reports/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"post_id": post_id, "reason": "boring"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Invalid reason");

    let req = test::TestRequest::post()
        .uri("/reports/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"post_id": post_id, "reason": "spam"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/reports/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::get()
        .uri("/reports/?reason=spam")
        .insert_header(("Authorization", moderator.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(1));
}

#[actix_web::test]
async fn test_category_in_use_cannot_be_deleted() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let (_, moderator) = ctx.user("moderator", true).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/categories/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"name": "news"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/categories/")
        .insert_header(("Authorization", moderator.as_str()))
        .set_json(json!({"name": "news"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let category_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/posts/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"content": "in a category", "category": category_id}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = test::TestRequest::delete()
        .uri(&format!("/categories/{category_id}/"))
        .insert_header(("Authorization", moderator.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::get()
        .uri("/categories/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["name"], "news");
}

#[actix_web::test]
async fn test_auction_bidding_rules() {
    let ctx = TestContext::new().await;
    let (_, seller) = ctx.user("seller", false).await;
    let (_, buyer) = ctx.user("buyer", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/posts/")
        .insert_header(("Authorization", seller.as_str()))
        .set_json(json!({"content": "vintage lamp"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let post_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/auctions/")
        .insert_header(("Authorization", seller.as_str()))
        .set_json(json!({"post_id": post_id, "bid_price": "10.00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri("/auctions/")
        .insert_header(("Authorization", buyer.as_str()))
        .set_json(json!({"post_id": post_id, "bid_price": "10.00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let auction_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/auctions/")
        .insert_header(("Authorization", buyer.as_str()))
        .set_json(json!({"post_id": post_id, "bid_price": "9.50"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // 只有卖家可以选择中标者
    let req = test::TestRequest::post()
        .uri(&format!("/auctions/{auction_id}/winner/"))
        .insert_header(("Authorization", buyer.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&format!("/auctions/{auction_id}/winner/"))
        .insert_header(("Authorization", seller.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["winner"], body["data"]["participant"]);
}

#[actix_web::test]
async fn test_transactions_reject_self_transfer() {
    let ctx = TestContext::new().await;
    let (alice_user, alice) = ctx.user("alice", false).await;
    let (bob_user, _) = ctx.user("bob", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/transactions/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"receiver_id": alice_user.id, "amount": "5.00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/transactions/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"receiver_id": bob_user.id, "amount": "5.00"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["amount"], "5.00");

    let req = test::TestRequest::get()
        .uri("/transactions/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["pagination"]["total"], 1);
}

#[actix_web::test]
async fn test_obtain_token_and_current_user() {
    let ctx = TestContext::new().await;
    ctx.user("alice", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/token/")
        .peer_addr("10.20.0.1:5000".parse().unwrap())
        .set_json(json!({"username": "alice", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/token/")
        .peer_addr("10.20.0.1:5000".parse().unwrap())
        .set_json(json!({"username": "alice", "password": PASSWORD}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let access = body["data"]["access"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "alice");
    assert!(body["data"].get("password").is_none());
}

#[actix_web::test]
async fn test_register_ignores_privilege_fields() {
    let ctx = TestContext::new().await;
    let app = init_app!(ctx);

    let boundary = "XBOUNDARYX";
    let mut body = String::new();
    for (name, value) in [
        ("username", "carol"),
        ("password", PASSWORD),
        ("email", "carol@example.com"),
        ("is_staff", "true"),
    ] {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));

    let req = test::TestRequest::post()
        .uri("/users/")
        .peer_addr("10.20.0.2:5000".parse().unwrap())
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created = ctx
        .storage
        .get_user_by_username("carol")
        .await
        .unwrap()
        .unwrap();
    assert!(!created.is_staff);
}

#[actix_web::test]
async fn test_media_is_served_from_store() {
    let ctx = TestContext::new().await;
    let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00];
    let key = ctx.media.save(".png", &png).await.unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/media/{key}"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "image/png"
    );

    let req = test::TestRequest::get()
        .uri("/media/missing.png")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

fn multipart_body(boundary: &str, fields: &[(&str, &str)], avatar: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }
    if let Some((filename, bytes)) = avatar {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}

#[actix_web::test]
async fn test_register_removes_avatar_when_user_creation_fails() {
    use sea_orm::ConnectionTrait;

    let storage = SeaOrmStorage::connect_memory().await.unwrap();
    // 查询正常，写入用户失败
    storage
        .db
        .execute_unprepared(
            "CREATE TRIGGER reject_users BEFORE INSERT ON users BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
        )
        .await
        .unwrap();
    let ctx = TestContext::with_storage(storage);
    let app = init_app!(ctx);

    let png = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];
    let boundary = "XBOUNDARYX";
    let body = multipart_body(
        boundary,
        &[("username", "dave"), ("password", PASSWORD), ("email", "dave@example.com")],
        Some(("face.png", &png)),
    );

    let req = test::TestRequest::post()
        .uri("/users/")
        .peer_addr("10.20.0.5:5000".parse().unwrap())
        .insert_header((
            "Content-Type",
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_server_error());

    let leftover = std::fs::read_dir(&ctx.media_dir).unwrap().count();
    assert_eq!(leftover, 0);
}

#[actix_web::test]
async fn test_oauth_password_refresh_and_revoke() {
    let ctx = TestContext::new().await;
    ctx.user("alice", false).await;
    let app = init_app!(ctx);
    let peer = "10.20.0.3:5000";

    let req = test::TestRequest::post()
        .uri("/o/token/")
        .peer_addr(peer.parse().unwrap())
        .set_json(json!({
            "grant_type": "password",
            "username": "alice",
            "password": PASSWORD,
            "client_id": CLIENT_ID,
            "client_secret": "wrong-secret",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/o/token/")
        .peer_addr(peer.parse().unwrap())
        .set_json(json!({
            "grant_type": "password",
            "username": "alice",
            "password": PASSWORD,
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["token_type"], "Bearer");
    assert_eq!(body["data"]["scope"], "read write groups");
    let access = body["data"]["access_token"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh_token"].as_str().unwrap().to_string();

    // 不透明令牌可直接访问受保护接口
    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["username"], "alice");

    let req = test::TestRequest::post()
        .uri("/o/token/")
        .peer_addr(peer.parse().unwrap())
        .set_json(json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh,
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let new_access = body["data"]["access_token"].as_str().unwrap().to_string();
    assert_ne!(new_access, access);

    // 旧的 access token 随刷新失效
    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", format!("Bearer {access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // refresh token 只能使用一次
    let req = test::TestRequest::post()
        .uri("/o/token/")
        .peer_addr(peer.parse().unwrap())
        .set_json(json!({
            "grant_type": "refresh_token",
            "refresh_token": refresh,
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/o/revoke_token/")
        .set_json(json!({
            "token": new_access,
            "client_id": CLIENT_ID,
            "client_secret": CLIENT_SECRET,
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", format!("Bearer {new_access}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_oauth_token_is_rejected() {
    let ctx = TestContext::new().await;
    let (alice, _) = ctx.user("alice", false).await;
    ctx.storage
        .create_oauth_token(OAuthToken {
            access_token: "expired-access".into(),
            refresh_token: "expired-refresh".into(),
            user_id: alice.id,
            client_id: CLIENT_ID.into(),
            scope: "read".into(),
            expires_at: chrono::Utc::now().timestamp() - 60,
        })
        .await
        .unwrap();
    let app = init_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", "Bearer expired-access"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_jwt_refresh_issues_access_token() {
    let ctx = TestContext::new().await;
    ctx.user("alice", false).await;
    let app = init_app!(ctx);
    let peer = "10.20.0.4:5000";

    let req = test::TestRequest::post()
        .uri("/api/token/")
        .peer_addr(peer.parse().unwrap())
        .set_json(json!({"username": "alice", "password": PASSWORD}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let access = body["data"]["access"].as_str().unwrap().to_string();
    let refresh = body["data"]["refresh"].as_str().unwrap().to_string();

    // access token 不能用于刷新
    let req = test::TestRequest::post()
        .uri("/api/token/refresh/")
        .peer_addr(peer.parse().unwrap())
        .set_json(json!({"refresh": access}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/token/refresh/")
        .peer_addr(peer.parse().unwrap())
        .set_json(json!({"refresh": refresh}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let refreshed = body["data"]["access"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", format!("Bearer {refreshed}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_comments_are_owner_only() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let (_, bob) = ctx.user("bob", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/posts/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"content": "discuss"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let post_id = body["data"]["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comments/"))
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"content": ""}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comments/"))
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"content": "first!"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["user"]["username"], "alice");
    let comment_id = body["data"]["id"].as_i64().unwrap();

    for req in [
        test::TestRequest::put()
            .uri(&format!("/comments/{comment_id}/"))
            .insert_header(("Authorization", bob.as_str()))
            .set_json(json!({"content": "not mine"})),
        test::TestRequest::patch()
            .uri(&format!("/comments/{comment_id}/"))
            .insert_header(("Authorization", bob.as_str()))
            .set_json(json!({"content": "not mine"})),
        test::TestRequest::delete()
            .uri(&format!("/comments/{comment_id}/"))
            .insert_header(("Authorization", bob.as_str())),
    ] {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    let req = test::TestRequest::patch()
        .uri(&format!("/comments/{comment_id}/"))
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"content": "edited"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/comments/?post_id={post_id}"))
        .insert_header(("Authorization", bob.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["content"], "edited");

    let req = test::TestRequest::delete()
        .uri(&format!("/comments/{comment_id}/"))
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/comments/?post_id={post_id}"))
        .insert_header(("Authorization", bob.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "No comments found for the specified post.");
}

#[actix_web::test]
async fn test_add_hashtag_and_post_list_stats() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let (_, bob) = ctx.user("bob", false).await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/posts/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"content": "tag me", "hashtag": [{"name": "rust"}]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let post_id = body["data"]["id"].as_i64().unwrap();

    // 重复添加已有标签不产生重复关联
    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/posts/{post_id}/add_hashtag/"))
            .insert_header(("Authorization", bob.as_str()))
            .set_json(json!({"hashtags": ["rust", "actix"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Hashtags added to the post successfully");
    }

    let req = test::TestRequest::get()
        .uri(&format!("/posts/{post_id}/"))
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let mut names: Vec<String> = body["data"]["hashtag"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["name"].as_str().unwrap().to_string())
        .collect();
    names.sort();
    assert_eq!(names, vec!["actix", "rust"]);

    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/likes/"))
        .insert_header(("Authorization", bob.as_str()))
        .to_request();
    test::call_service(&app, req).await;
    let req = test::TestRequest::post()
        .uri(&format!("/posts/{post_id}/comments/"))
        .insert_header(("Authorization", bob.as_str()))
        .set_json(json!({"content": "nice"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/post-list/stats/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    let by_time = &body["data"]["stats_by_time"][0];
    assert_eq!(by_time["post_count"], 1);
    assert_eq!(by_time["likes_count"], 1);
    assert_eq!(by_time["comments_count"], 1);
    let by_category = &body["data"]["stats_by_category"][0];
    assert!(by_category["category"].is_null());
    assert_eq!(by_category["post_count"], 1);

    let req = test::TestRequest::get()
        .uri("/post-list/?page=9223372036854775807")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["items"].as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn test_update_current_user_refreshes_cached_user() {
    let ctx = TestContext::new().await;
    let (_, alice) = ctx.user("alice", false).await;
    let app = init_app!(ctx);
    let cache_key = user_cache_key(alice.trim_start_matches("Bearer "));

    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    test::call_service(&app, req).await;
    assert!(matches!(ctx.cache.get_raw(&cache_key).await, CacheResult::Found(_)));

    let req = test::TestRequest::patch()
        .uri("/users/current_user/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"email": "not-an-email"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri("/users/current_user/")
        .insert_header(("Authorization", alice.as_str()))
        .set_json(json!({"first_name": "Alice", "email": "alice@social.test"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["first_name"], "Alice");
    assert!(matches!(ctx.cache.get_raw(&cache_key).await, CacheResult::NotFound));

    let req = test::TestRequest::get()
        .uri("/users/current_user/")
        .insert_header(("Authorization", alice.as_str()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["email"], "alice@social.test");
}
