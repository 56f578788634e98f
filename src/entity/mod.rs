//! SeaORM 实体定义
//!
//! 这些实体用于数据库操作，与 models 模块中的业务实体分离。
//! Storage 层使用这些实体进行 CRUD 操作，然后转换为 models 中的业务实体。

pub mod prelude;

pub mod auctions;
pub mod categories;
pub mod comments;
pub mod hashtags;
pub mod likes;
pub mod oauth_tokens;
pub mod post_hashtags;
pub mod post_statistics;
pub mod posts;
pub mod reports;
pub mod transactions;
pub mod users;
