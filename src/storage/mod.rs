use std::sync::Arc;

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
use crate::utils::money::Money;

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码须已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 用户总数
    async fn count_users(&self) -> Result<u64>;

    /// 分类管理方法
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn get_category_by_id(&self, id: i64) -> Result<Option<Category>>;
    async fn create_category(&self, name: &str) -> Result<Category>;
    // 删除分类，仍有帖子引用时返回 Conflict
    async fn delete_category(&self, id: i64) -> Result<bool>;

    /// 帖子管理方法
    // 创建帖子，同时创建标签关联和统计行
    async fn create_post(&self, user_id: i64, post: CreatePostRequest) -> Result<PostWithHashtags>;
    // 获取有效（active）帖子
    async fn get_active_post(&self, id: i64) -> Result<Option<PostWithHashtags>>;
    // 部分更新帖子
    async fn update_post(
        &self,
        id: i64,
        update: UpdatePostRequest,
    ) -> Result<Option<PostWithHashtags>>;
    // 删除帖子（级联删除互动记录）
    async fn delete_post(&self, id: i64) -> Result<bool>;
    // 分页列出有效帖子，按创建日期倒序
    async fn list_active_posts(&self, query: PaginationQuery) -> Result<PostListResponse>;
    // 给帖子追加标签（幂等）
    async fn add_hashtags_to_post(&self, post_id: i64, names: Vec<String>)
    -> Result<Vec<Hashtag>>;
    // 帖子统计
    async fn get_post_statistics(&self, post_id: i64) -> Result<Option<PostStatistics>>;
    // 按日期与分类汇总
    async fn get_post_stats(&self) -> Result<PostStatsResponse>;

    /// 点赞方法
    // 不存在则创建，已存在则切换 active
    async fn toggle_like(&self, user_id: i64, post_id: i64) -> Result<Like>;
    async fn is_post_liked_by(&self, user_id: i64, post_id: i64) -> Result<bool>;

    /// 评论方法
    async fn create_comment(&self, user_id: i64, post_id: i64, content: &str) -> Result<Comment>;
    async fn get_comment_by_id(&self, id: i64) -> Result<Option<Comment>>;
    async fn list_comments_for_post(&self, post_id: i64) -> Result<Vec<(Comment, User)>>;
    async fn update_comment(&self, id: i64, content: &str) -> Result<Option<Comment>>;
    async fn delete_comment(&self, id: i64) -> Result<bool>;

    /// 举报方法
    async fn create_report(
        &self,
        user_id: i64,
        post_id: i64,
        reason: ReportReason,
    ) -> Result<Report>;
    async fn list_reports(&self, query: ReportListQuery) -> Result<ReportListResponse>;

    /// 竞拍方法
    async fn create_auction(
        &self,
        post_id: i64,
        participant_id: i64,
        bid_price: Money,
    ) -> Result<Auction>;
    async fn get_auction_by_id(&self, id: i64) -> Result<Option<Auction>>;
    // 按出价从高到低
    async fn list_auctions_for_post(&self, post_id: i64) -> Result<Vec<Auction>>;
    // 设置中标者，同一帖子的其他出价清除中标标记
    async fn set_auction_winner(&self, id: i64) -> Result<Option<Auction>>;

    /// 转账方法
    async fn create_transaction(
        &self,
        sender_id: i64,
        receiver_id: i64,
        amount: Money,
    ) -> Result<Transaction>;
    async fn list_transactions_for_user(
        &self,
        user_id: i64,
        query: PaginationQuery,
    ) -> Result<TransactionListResponse>;

    /// OAuth2 令牌方法
    async fn create_oauth_token(&self, token: OAuthToken) -> Result<OAuthToken>;
    // 原子地以新令牌替换 refresh token 对应的旧令牌，旧令牌不存在时返回 None
    async fn rotate_oauth_token(
        &self,
        refresh_token: &str,
        token: OAuthToken,
    ) -> Result<Option<OAuthToken>>;
    async fn get_oauth_token_by_access(&self, access_token: &str) -> Result<Option<OAuthToken>>;
    async fn get_oauth_token_by_refresh(&self, refresh_token: &str)
    -> Result<Option<OAuthToken>>;
    // 按 access 或 refresh token 删除
    async fn delete_oauth_token(&self, token: &str) -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
