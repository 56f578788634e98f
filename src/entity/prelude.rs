//! 预导入模块，方便使用

pub use super::auctions::{
    ActiveModel as AuctionActiveModel, Entity as Auctions, Model as AuctionModel,
};
pub use super::categories::{
    ActiveModel as CategoryActiveModel, Entity as Categories, Model as CategoryModel,
};
pub use super::comments::{
    ActiveModel as CommentActiveModel, Entity as Comments, Model as CommentModel,
};
pub use super::hashtags::{
    ActiveModel as HashtagActiveModel, Entity as Hashtags, Model as HashtagModel,
};
pub use super::likes::{ActiveModel as LikeActiveModel, Entity as Likes, Model as LikeModel};
pub use super::oauth_tokens::{
    ActiveModel as OAuthTokenActiveModel, Entity as OAuthTokens, Model as OAuthTokenModel,
};
pub use super::post_hashtags::{
    ActiveModel as PostHashtagActiveModel, Entity as PostHashtags, Model as PostHashtagModel,
};
pub use super::post_statistics::{
    ActiveModel as PostStatisticsActiveModel, Entity as PostStatistics,
    Model as PostStatisticsModel,
};
pub use super::posts::{ActiveModel as PostActiveModel, Entity as Posts, Model as PostModel};
pub use super::reports::{
    ActiveModel as ReportActiveModel, Entity as Reports, Model as ReportModel,
};
pub use super::transactions::{
    ActiveModel as TransactionActiveModel, Entity as Transactions, Model as TransactionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
