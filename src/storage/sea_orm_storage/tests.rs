//! SeaOrmStorage 集成测试（内存 SQLite）

use super::SeaOrmStorage;
use crate::models::{
    PaginationQuery,
    hashtags::requests::HashtagInput,
    posts::requests::{CreatePostRequest, UpdatePostRequest},
    reports::{entities::ReportReason, requests::ReportListQuery},
    users::{entities::User, requests::{CreateUserRequest, UpdateUserRequest}},
};
use crate::utils::money::Money;

async fn storage() -> SeaOrmStorage {
    SeaOrmStorage::connect_memory().await.unwrap()
}

async fn user(storage: &SeaOrmStorage, username: &str) -> User {
    storage
        .create_user_impl(CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password: "hashed".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            avatar: None,
            is_staff: false,
            is_superuser: false,
        })
        .await
        .unwrap()
}

fn post_request(content: &str, category: Option<i64>, tags: &[&str]) -> CreatePostRequest {
    CreatePostRequest {
        title: Some("title".to_string()),
        content: content.to_string(),
        category,
        hashtag: tags
            .iter()
            .map(|name| HashtagInput {
                name: name.to_string(),
            })
            .collect(),
    }
}

#[tokio::test]
async fn test_user_lookup_and_update() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;

    let found = storage.get_user_by_username_impl("alice").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(alice.id));
    assert_eq!(storage.count_users_impl().await.unwrap(), 1);

    let updated = storage
        .update_user_impl(
            alice.id,
            UpdateUserRequest {
                first_name: Some("Alice".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.first_name, "Alice");
    assert_eq!(updated.email, "alice@example.com");

    assert!(storage.update_user_impl(999, UpdateUserRequest::default()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_post_with_hashtags_and_statistics() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;

    let post = storage
        .create_post_impl(alice.id, post_request("hello", None, &["rust", " rust ", "web"]))
        .await
        .unwrap();
    let names: Vec<_> = post.hashtags.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["rust", "web"]);

    let stats = storage
        .get_post_statistics_impl(post.post.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!((stats.comment_count, stats.like_count), (0, 0));

    // 再次添加已有标签不会重复关联
    storage
        .add_hashtags_to_post_impl(post.post.id, vec!["web".into(), "actix".into()])
        .await
        .unwrap();
    let reloaded = storage.get_active_post_impl(post.post.id).await.unwrap().unwrap();
    assert_eq!(reloaded.hashtags.len(), 3);
}

#[tokio::test]
async fn test_update_post_replaces_hashtags() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let post = storage
        .create_post_impl(alice.id, post_request("hello", None, &["a", "b"]))
        .await
        .unwrap();

    let updated = storage
        .update_post_impl(
            post.post.id,
            UpdatePostRequest {
                content: Some("edited".into()),
                hashtag: Some(vec![HashtagInput { name: "c".into() }]),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.post.content, "edited");
    assert_eq!(updated.post.title.as_deref(), Some("title"));
    let names: Vec<_> = updated.hashtags.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["c"]);
}

#[tokio::test]
async fn test_update_post_clears_category_on_null() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let category = storage.create_category_impl("news").await.unwrap();
    let post = storage
        .create_post_impl(alice.id, post_request("hello", Some(category.id), &[]))
        .await
        .unwrap();

    let keep: UpdatePostRequest = serde_json::from_str(r#"{"content": "edited"}"#).unwrap();
    let updated = storage.update_post_impl(post.post.id, keep).await.unwrap().unwrap();
    assert_eq!(updated.post.category_id, Some(category.id));

    let clear: UpdatePostRequest = serde_json::from_str(r#"{"category": null}"#).unwrap();
    let updated = storage.update_post_impl(post.post.id, clear).await.unwrap().unwrap();
    assert_eq!(updated.post.category_id, None);
    assert_eq!(updated.post.content, "edited");
}

#[tokio::test]
async fn test_toggle_like_updates_counter() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let bob = user(&storage, "bob").await;
    let post = storage
        .create_post_impl(alice.id, post_request("hello", None, &[]))
        .await
        .unwrap();
    let post_id = post.post.id;

    let like = storage.toggle_like_impl(bob.id, post_id).await.unwrap();
    assert!(like.active);
    assert!(storage.is_post_liked_by_impl(bob.id, post_id).await.unwrap());

    let like = storage.toggle_like_impl(bob.id, post_id).await.unwrap();
    assert!(!like.active);
    assert!(!storage.is_post_liked_by_impl(bob.id, post_id).await.unwrap());

    storage.toggle_like_impl(bob.id, post_id).await.unwrap();
    let stats = storage.get_post_statistics_impl(post_id).await.unwrap().unwrap();
    assert_eq!(stats.like_count, 1);
}

#[tokio::test]
async fn test_comment_lifecycle() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let post = storage
        .create_post_impl(alice.id, post_request("hello", None, &[]))
        .await
        .unwrap();
    let post_id = post.post.id;

    let comment = storage.create_comment_impl(alice.id, post_id, "first").await.unwrap();
    storage.create_comment_impl(alice.id, post_id, "second").await.unwrap();

    let listed = storage.list_comments_for_post_impl(post_id).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].1.username, "alice");

    let edited = storage.update_comment_impl(comment.id, "edited").await.unwrap().unwrap();
    assert_eq!(edited.content, "edited");

    assert!(storage.delete_comment_impl(comment.id).await.unwrap());
    assert!(!storage.delete_comment_impl(comment.id).await.unwrap());

    let stats = storage.get_post_statistics_impl(post_id).await.unwrap().unwrap();
    assert_eq!(stats.comment_count, 1);
}

#[tokio::test]
async fn test_delete_post_cascades() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let post = storage
        .create_post_impl(alice.id, post_request("hello", None, &["tag"]))
        .await
        .unwrap();
    let post_id = post.post.id;
    let comment = storage.create_comment_impl(alice.id, post_id, "c").await.unwrap();

    assert!(storage.delete_post_impl(post_id).await.unwrap());
    assert!(storage.get_active_post_impl(post_id).await.unwrap().is_none());
    assert!(storage.get_comment_by_id_impl(comment.id).await.unwrap().is_none());
    assert!(!storage.delete_post_impl(post_id).await.unwrap());
}

#[tokio::test]
async fn test_category_in_use_cannot_be_deleted() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let category = storage.create_category_impl("news").await.unwrap();
    let post = storage
        .create_post_impl(alice.id, post_request("hello", Some(category.id), &[]))
        .await
        .unwrap();

    let err = storage.delete_category_impl(category.id).await.unwrap_err();
    assert_eq!(err.code(), "E014");

    storage.delete_post_impl(post.post.id).await.unwrap();
    assert!(storage.delete_category_impl(category.id).await.unwrap());
    assert!(storage.get_category_by_id_impl(category.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_posts_paginates() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    for i in 0..5 {
        storage
            .create_post_impl(alice.id, post_request(&format!("post {i}"), None, &[]))
            .await
            .unwrap();
    }

    let page = storage
        .list_active_posts_impl(PaginationQuery { page: 2, size: 2 })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.pagination.total, 5);
    assert_eq!(page.pagination.total_pages, 3);

    let beyond = storage
        .list_active_posts_impl(PaginationQuery { page: i64::MAX, size: 100 })
        .await
        .unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.pagination.total, 5);
}

#[tokio::test]
async fn test_reports_filter_by_reason() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let post = storage
        .create_post_impl(alice.id, post_request("hello", None, &[]))
        .await
        .unwrap();

    storage
        .create_report_impl(alice.id, post.post.id, ReportReason::Spam)
        .await
        .unwrap();
    storage
        .create_report_impl(alice.id, post.post.id, ReportReason::Other)
        .await
        .unwrap();

    let spam = storage
        .list_reports_impl(ReportListQuery {
            reason: Some(ReportReason::Spam),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(spam.items.len(), 1);
    assert_eq!(spam.items[0].reason, ReportReason::Spam);
}

#[tokio::test]
async fn test_post_stats_counts() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let bob = user(&storage, "bob").await;
    let category = storage.create_category_impl("tech").await.unwrap();

    let first = storage
        .create_post_impl(alice.id, post_request("one", Some(category.id), &[]))
        .await
        .unwrap();
    storage
        .create_post_impl(alice.id, post_request("two", None, &[]))
        .await
        .unwrap();

    storage.toggle_like_impl(alice.id, first.post.id).await.unwrap();
    storage.toggle_like_impl(bob.id, first.post.id).await.unwrap();
    storage.create_comment_impl(bob.id, first.post.id, "hi").await.unwrap();

    let stats = storage.get_post_stats_impl().await.unwrap();
    assert_eq!(stats.stats_by_time.len(), 1);
    let today = &stats.stats_by_time[0];
    assert_eq!((today.post_count, today.likes_count, today.comments_count), (2, 2, 1));

    let tech = stats
        .stats_by_category
        .iter()
        .find(|s| s.category == Some(category.id))
        .unwrap();
    assert_eq!((tech.post_count, tech.likes_count, tech.comments_count), (1, 2, 1));
    let uncategorized = stats
        .stats_by_category
        .iter()
        .find(|s| s.category.is_none())
        .unwrap();
    assert_eq!(uncategorized.post_count, 1);
}

#[tokio::test]
async fn test_auction_bids_and_winner() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let bob = user(&storage, "bob").await;
    let carol = user(&storage, "carol").await;
    let post_id = storage
        .create_post_impl(alice.id, post_request("lot", None, &[]))
        .await
        .unwrap()
        .post
        .id;

    let first = storage
        .create_auction_impl(post_id, bob.id, Money::from_cents(1000))
        .await
        .unwrap();
    assert!(
        storage
            .create_auction_impl(post_id, carol.id, Money::from_cents(1000))
            .await
            .is_err()
    );
    let second = storage
        .create_auction_impl(post_id, carol.id, Money::from_cents(1250))
        .await
        .unwrap();

    let bids = storage.list_auctions_for_post_impl(post_id).await.unwrap();
    assert_eq!(bids.len(), 2);
    assert_eq!(bids[0].id, second.id);

    // 帖子不存在时不能出价
    let err = storage
        .create_auction_impl(post_id + 1000, bob.id, Money::from_cents(5000))
        .await
        .unwrap_err();
    assert_eq!(err.code(), "E008");

    storage.set_auction_winner_impl(first.id).await.unwrap();
    let won = storage.set_auction_winner_impl(second.id).await.unwrap().unwrap();
    assert_eq!(won.winner_id, Some(carol.id));
    let cleared = storage.get_auction_by_id_impl(first.id).await.unwrap().unwrap();
    assert_eq!(cleared.winner_id, None);
}

#[tokio::test]
async fn test_transactions_listed_for_both_sides() {
    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let bob = user(&storage, "bob").await;
    let carol = user(&storage, "carol").await;

    storage
        .create_transaction_impl(alice.id, bob.id, Money::from_cents(500))
        .await
        .unwrap();
    storage
        .create_transaction_impl(bob.id, carol.id, Money::from_cents(200))
        .await
        .unwrap();

    let bobs = storage
        .list_transactions_for_user_impl(bob.id, PaginationQuery::default())
        .await
        .unwrap();
    assert_eq!(bobs.pagination.total, 2);
    assert_eq!(bobs.items[0].amount, Money::from_cents(200));

    let carols = storage
        .list_transactions_for_user_impl(carol.id, PaginationQuery::default())
        .await
        .unwrap();
    assert_eq!(carols.items.len(), 1);
}

#[tokio::test]
async fn test_oauth_token_roundtrip_and_revoke() {
    use crate::models::auth::entities::OAuthToken;

    let storage = storage().await;
    let alice = user(&storage, "alice").await;

    storage
        .create_oauth_token_impl(OAuthToken {
            access_token: "access-1".into(),
            refresh_token: "refresh-1".into(),
            user_id: alice.id,
            client_id: "web".into(),
            scope: "read write".into(),
            expires_at: 4_000_000_000,
        })
        .await
        .unwrap();

    let by_refresh = storage
        .get_oauth_token_by_refresh_impl("refresh-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_refresh.access_token, "access-1");

    assert!(storage.delete_oauth_token_impl("refresh-1").await.unwrap());
    assert!(storage.get_oauth_token_by_access_impl("access-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_rotate_oauth_token_replaces_pair_once() {
    use crate::models::auth::entities::OAuthToken;

    let storage = storage().await;
    let alice = user(&storage, "alice").await;
    let token = |access: &str, refresh: &str| OAuthToken {
        access_token: access.into(),
        refresh_token: refresh.into(),
        user_id: alice.id,
        client_id: "web".into(),
        scope: "read".into(),
        expires_at: 4_000_000_000,
    };

    storage.create_oauth_token_impl(token("access-1", "refresh-1")).await.unwrap();

    let rotated = storage
        .rotate_oauth_token_impl("refresh-1", token("access-2", "refresh-2"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(rotated.access_token, "access-2");
    assert!(storage.get_oauth_token_by_access_impl("access-1").await.unwrap().is_none());

    // 旧 refresh token 只能用一次
    let again = storage
        .rotate_oauth_token_impl("refresh-1", token("access-3", "refresh-3"))
        .await
        .unwrap();
    assert!(again.is_none());
    assert!(storage.get_oauth_token_by_access_impl("access-3").await.unwrap().is_none());

    // 新令牌写入失败时旧令牌保留
    storage.create_oauth_token_impl(token("access-4", "refresh-4")).await.unwrap();
    let conflict = storage
        .rotate_oauth_token_impl("refresh-4", token("access-2", "refresh-5"))
        .await;
    assert!(conflict.is_err());
    assert!(storage.get_oauth_token_by_refresh_impl("refresh-4").await.unwrap().is_some());
}
