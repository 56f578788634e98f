//! 业务数据模型
//!
//! 每个资源按 entities / requests / responses 拆分，
//! 公共的响应结构、分页和错误码位于 `common`。

pub mod common;

pub mod auctions {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod auth {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod categories {
    pub mod entities;
    pub mod requests;
}

pub mod comments {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod hashtags {
    pub mod entities;
    pub mod requests;
}

pub mod likes {
    pub mod entities;
}

pub mod posts {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod reports {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod stats {
    pub mod entities;
    pub mod responses;
}

pub mod transactions {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub mod users {
    pub mod entities;
    pub mod requests;
    pub mod responses;
}

pub use common::{
    ApiResponse, ErrorCode, PaginatedResponse, PaginationInfo, PaginationQuery,
};

// 程序启动时间
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
