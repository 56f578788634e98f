pub mod auctions;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod media;
pub mod posts;
pub mod reports;
pub mod transactions;
pub mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

pub use auctions::configure_auction_routes;
pub use auth::configure_auth_routes;
pub use categories::configure_category_routes;
pub use comments::configure_comment_routes;
pub use media::configure_media_routes;
pub use posts::{configure_post_list_routes, configure_post_routes};
pub use reports::configure_report_routes;
pub use transactions::configure_transaction_routes;
pub use users::configure_user_routes;

/// 注册全部 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_user_routes)
        .configure(configure_post_routes)
        .configure(configure_post_list_routes)
        .configure(configure_comment_routes)
        .configure(configure_report_routes)
        .configure(configure_category_routes)
        .configure(configure_auction_routes)
        .configure(configure_transaction_routes)
        .configure(configure_media_routes);
}
