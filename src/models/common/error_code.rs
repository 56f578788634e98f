use serde::{Deserialize, Serialize};

/// 业务错误码，随 `ApiResponse.code` 返回
///
/// 0 表示成功，其余按模块分段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误 1000-1999
    BadRequest = 1000,
    ValidationFailed = 1001,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // 认证错误 2000-2999
    Unauthorized = 2000,
    Forbidden = 2001,
    AuthFailed = 2002,
    TokenInvalid = 2003,
    InvalidClient = 2005,
    UnsupportedGrantType = 2006,
    InvalidScope = 2007,

    // 用户错误 3000-3999
    UserNotFound = 3000,
    UserNameInvalid = 3001,
    UserEmailInvalid = 3002,
    UserPasswordInvalid = 3003,
    UserNameAlreadyExists = 3004,
    UserCreationFailed = 3005,
    UserUpdateFailed = 3006,
    RegisterFailed = 3007,

    // 帖子错误 4000-4999
    PostNotFound = 4000,
    PostCreationFailed = 4001,
    PostUpdateFailed = 4002,
    PostDeleteFailed = 4003,
    PostPermissionDenied = 4004,
    PostContentInvalid = 4005,
    LikeFailed = 4006,
    HashtagInvalid = 4007,
    HashtagAddFailed = 4008,
    PostStatsFailed = 4009,

    // 评论错误 5000-5999
    CommentNotFound = 5000,
    CommentContentInvalid = 5001,
    CommentCreationFailed = 5002,
    CommentUpdateFailed = 5003,
    CommentDeleteFailed = 5004,
    CommentPermissionDenied = 5005,
    CommentPostIdMissing = 5006,

    // 举报错误 6000-6999
    ReportFieldsMissing = 6000,
    ReportPostInvalid = 6001,
    ReportReasonInvalid = 6002,
    ReportCreationFailed = 6003,

    // 分类错误 7000-7999
    CategoryNotFound = 7000,
    CategoryNameInvalid = 7001,
    CategoryInUse = 7002,
    CategoryCreationFailed = 7003,
    CategoryDeleteFailed = 7004,

    // 竞拍与转账错误 8000-8999
    AuctionNotFound = 8000,
    AuctionBidInvalid = 8001,
    AuctionBidTooLow = 8002,
    AuctionOwnPost = 8003,
    AuctionPermissionDenied = 8004,
    TransactionInvalid = 8100,
    TransactionReceiverNotFound = 8101,
    TransactionCreationFailed = 8102,

    // 媒体文件错误 9000-9999
    FileNotFound = 9000,
    FileUploadFailed = 9001,
    FileTypeNotAllowed = 9002,
    FileSizeExceeded = 9003,
}

impl From<ErrorCode> for i32 {
    fn from(code: ErrorCode) -> Self {
        code as i32
    }
}
