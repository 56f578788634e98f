//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod auctions;
mod categories;
mod comments;
mod likes;
mod oauth_tokens;
mod posts;
mod reports;
mod stats;
mod transactions;
mod users;

#[cfg(test)]
mod tests;

use crate::config::AppConfig;
use crate::errors::{SocialError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// 内容表的 created_date / updated_date 取当天日期
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Utc::now().date_naive()
}

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::migrated(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 内存 SQLite，单连接以保证所有查询看到同一个库（测试使用）
    pub async fn connect_memory() -> Result<Self> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| SocialError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| SocialError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Self::migrated(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool)).await
    }

    /// 运行迁移
    async fn migrated(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SocialError::database_operation(format!("数据库迁移失败: {e}")))?;
        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SocialError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SocialError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SocialError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SocialError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}


// Storage trait 实现
use crate::models::{
    PaginationQuery,
    auctions::entities::Auction,
    auth::entities::OAuthToken,
    categories::entities::Category,
    comments::entities::Comment,
    hashtags::entities::Hashtag,
    likes::entities::Like,
    posts::{
        entities::{PostStatistics, PostWithHashtags},
        requests::{CreatePostRequest, UpdatePostRequest},
        responses::PostListResponse,
    },
    reports::{
        entities::{Report, ReportReason},
        requests::ReportListQuery,
        responses::ReportListResponse,
    },
    stats::responses::PostStatsResponse,
    transactions::{entities::Transaction, responses::TransactionListResponse},
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest},
    },
};
use crate::storage::Storage;
use crate::utils::money::Money;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 分类模块
    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.list_categories_impl().await
    }

    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>> {
        self.get_category_by_id_impl(id).await
    }

    async fn create_category(&self, name: &str) -> Result<Category> {
        self.create_category_impl(name).await
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        self.delete_category_impl(id).await
    }

    // 帖子模块
    async fn create_post(&self, user_id: i64, post: CreatePostRequest) -> Result<PostWithHashtags> {
        self.create_post_impl(user_id, post).await
    }

    async fn get_active_post(&self, id: i64) -> Result<Option<PostWithHashtags>> {
        self.get_active_post_impl(id).await
    }

    async fn update_post(
        &self,
        id: i64,
        update: UpdatePostRequest,
    ) -> Result<Option<PostWithHashtags>> {
        self.update_post_impl(id, update).await
    }

    async fn delete_post(&self, id: i64) -> Result<bool> {
        self.delete_post_impl(id).await
    }

    async fn list_active_posts(&self, query: PaginationQuery) -> Result<PostListResponse> {
        self.list_active_posts_impl(query).await
    }

    async fn add_hashtags_to_post(
        &self,
        post_id: i64,
        names: Vec<String>,
    ) -> Result<Vec<Hashtag>> {
        self.add_hashtags_to_post_impl(post_id, names).await
    }

    async fn get_post_statistics(&self, post_id: i64) -> Result<Option<PostStatistics>> {
        self.get_post_statistics_impl(post_id).await
    }

    async fn get_post_stats(&self) -> Result<PostStatsResponse> {
        self.get_post_stats_impl().await
    }

    // 点赞模块
    async fn toggle_like(&self, user_id: i64, post_id: i64) -> Result<Like> {
        self.toggle_like_impl(user_id, post_id).await
    }

    async fn is_post_liked_by(&self, user_id: i64, post_id: i64) -> Result<bool> {
        self.is_post_liked_by_impl(user_id, post_id).await
    }

    // 评论模块
    async fn create_comment(&self, user_id: i64, post_id: i64, content: &str) -> Result<Comment> {
        self.create_comment_impl(user_id, post_id, content).await
    }

    async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>> {
        self.get_comment_by_id_impl(id).await
    }

    async fn list_comments_for_post(&self, post_id: i64) -> Result<Vec<(Comment, User)>> {
        self.list_comments_for_post_impl(post_id).await
    }

    async fn update_comment(&self, id: i64, content: &str) -> Result<Option<Comment>> {
        self.update_comment_impl(id, content).await
    }

    async fn delete_comment(&self, id: i64) -> Result<bool> {
        self.delete_comment_impl(id).await
    }

    // 举报模块
    async fn create_report(
        &self,
        user_id: i64,
        post_id: i64,
        reason: ReportReason,
    ) -> Result<Report> {
        self.create_report_impl(user_id, post_id, reason).await
    }

    async fn list_reports(&self, query: ReportListQuery) -> Result<ReportListResponse> {
        self.list_reports_impl(query).await
    }

    // 竞拍模块
    async fn create_auction(
        &self,
        post_id: i64,
        participant_id: i64,
        bid_price: Money,
    ) -> Result<Auction> {
        self.create_auction_impl(post_id, participant_id, bid_price)
            .await
    }

    async fn get_auction_by_id(&self, id: i64) -> Result<Option<Auction>> {
        self.get_auction_by_id_impl(id).await
    }

    async fn list_auctions_for_post(&self, post_id: i64) -> Result<Vec<Auction>> {
        self.list_auctions_for_post_impl(post_id).await
    }

    async fn set_auction_winner(&self, id: i64) -> Result<Option<Auction>> {
        self.set_auction_winner_impl(id).await
    }

    // 转账模块
    async fn create_transaction(
        &self,
        sender_id: i64,
        receiver_id: i64,
        amount: Money,
    ) -> Result<Transaction> {
        self.create_transaction_impl(sender_id, receiver_id, amount)
            .await
    }

    async fn list_transactions_for_user(
        &self,
        user_id: i64,
        query: PaginationQuery,
    ) -> Result<TransactionListResponse> {
        self.list_transactions_for_user_impl(user_id, query).await
    }

    // OAuth2 令牌模块
    async fn create_oauth_token(&self, token: OAuthToken) -> Result<OAuthToken> {
        self.create_oauth_token_impl(token).await
    }

    async fn rotate_oauth_token(
        &self,
        refresh_token: &str,
        token: OAuthToken,
    ) -> Result<Option<OAuthToken>> {
        self.rotate_oauth_token_impl(refresh_token, token).await
    }

    async fn get_oauth_token_by_access(&self, access_token: &str) -> Result<Option<OAuthToken>> {
        self.get_oauth_token_by_access_impl(access_token).await
    }

    async fn get_oauth_token_by_refresh(
        &self,
        refresh_token: &str,
    ) -> Result<Option<OAuthToken>> {
        self.get_oauth_token_by_refresh_impl(refresh_token).await
    }

    async fn delete_oauth_token(&self, token: &str) -> Result<bool> {
        self.delete_oauth_token_impl(token).await
    }
}
