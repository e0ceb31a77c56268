/// Post service - handles post creation and per-user listing
use crate::db::PostStore;
use crate::error::{AppError, Result};
use crate::metrics::POSTS_CREATED_TOTAL;
use crate::models::{NewPost, Post, PostCreation, UserId};
use std::sync::Arc;

#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    /// Create a post for an existing user
    ///
    /// Fails with `ValidationError` when the user does not exist.
    pub async fn create_post(&self, post: NewPost) -> Result<Post> {
        let user_id = post.user_id;
        match self.store.create_post(post).await? {
            PostCreation::Created(post) => {
                POSTS_CREATED_TOTAL.inc();
                tracing::info!(post_id = post.id, user_id, "post created");
                Ok(post)
            }
            PostCreation::UserMissing => {
                tracing::debug!(user_id, "post rejected: user does not exist");
                Err(AppError::ValidationError("User does not exist".to_string()))
            }
        }
    }

    /// Get every post of a user
    ///
    /// An empty result is reported as `NotFound`, not as an empty list.
    pub async fn get_user_posts(&self, user_id: UserId) -> Result<Vec<Post>> {
        let posts = self.store.posts_by_user(user_id).await?;
        if posts.is_empty() {
            return Err(AppError::NotFound(
                "No posts found for this user".to_string(),
            ));
        }
        Ok(posts)
    }
}
