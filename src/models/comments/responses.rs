use serde::Serialize;

use super::entities::Comment;
use crate::models::users::{entities::User, responses::UserResponse};

#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub content: String,
    pub user: UserResponse,
}

impl CommentResponse {
    pub fn new(comment: Comment, user: User) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            user: user.into(),
        }
    }
}
