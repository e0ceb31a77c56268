/// Data models for twitter-service
///
/// Row types map one-to-one onto the `users`, `posts` and `likes` tables.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type UserId = i32;
pub type PostId = i32;
pub type LikeId = i32;

/// A post row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: PostId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// A like row
///
/// Unliking clears `active` instead of deleting the row, so a later like on
/// the same pair reuses this id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: LikeId,
    pub user_id: UserId,
    pub post_id: PostId,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// A user currently liking a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Liker {
    pub username: String,
    pub user_id: UserId,
    pub likes_id: LikeId,
}

/// Request body for `POST /posts`, also the insert payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: Option<String>,
    pub content: Option<String>,
    pub user_id: UserId,
}

/// Outcome of a post insert guarded by the user existence check
#[derive(Debug, Clone, PartialEq)]
pub enum PostCreation {
    Created(Post),
    UserMissing,
}

/// Outcome of a like call
#[derive(Debug, Clone, PartialEq)]
pub struct LikeActivation {
    pub like: Like,
    /// True when no row existed for the pair and one was inserted
    pub inserted: bool,
}

/// Request body for `POST /likes`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRequest {
    pub user_id: UserId,
    pub post_id: PostId,
}

/// Confirmation body for unlike and delete
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
