/// Like service - soft like/unlike toggle
///
/// Per `(user_id, post_id)` pair a like is NONE (no row), INACTIVE or ACTIVE:
///
/// | Current       | Event      | Next      |
/// |---------------|------------|-----------|
/// | NONE          | like       | ACTIVE (new row) |
/// | INACTIVE      | like       | ACTIVE (same row) |
/// | ACTIVE        | like       | ACTIVE (same row) |
/// | ACTIVE        | unlike     | INACTIVE  |
/// | NONE/INACTIVE | unlike     | unchanged |
/// | any           | delete(id) | NONE      |
use crate::db::LikeStore;
use crate::error::Result;
use crate::metrics::record_like_action;
use crate::models::{Like, LikeId, Liker, PostId, UserId};
use std::sync::Arc;

#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn LikeStore>,
}

impl LikeService {
    pub fn new(store: Arc<dyn LikeStore>) -> Self {
        Self { store }
    }

    /// Like a post, reactivating an earlier like of the same pair if one exists
    pub async fn like_post(&self, user_id: UserId, post_id: PostId) -> Result<Like> {
        let activation = self.store.activate_like(user_id, post_id).await?;
        let action = if activation.inserted {
            "inserted"
        } else {
            "reactivated"
        };
        record_like_action(action);
        tracing::info!(like_id = activation.like.id, user_id, post_id, action, "like active");
        Ok(activation.like)
    }

    /// Unlike a post; a pair without an active like is left as is
    pub async fn unlike_post(&self, user_id: UserId, post_id: PostId) -> Result<()> {
        let affected = self.store.deactivate_like(user_id, post_id).await?;
        if affected > 0 {
            record_like_action("deactivated");
        }
        tracing::info!(user_id, post_id, affected, "like deactivated");
        Ok(())
    }

    /// Users currently liking a post
    pub async fn get_post_likers(&self, post_id: PostId) -> Result<Vec<Liker>> {
        Ok(self.store.active_likers(post_id).await?)
    }

    /// Remove a like row outright; deleting a missing id is not an error
    pub async fn delete_like(&self, like_id: LikeId) -> Result<()> {
        let affected = self.store.delete_like(like_id).await?;
        if affected > 0 {
            record_like_action("deleted");
        }
        tracing::info!(like_id, affected, "like deleted");
        Ok(())
    }
}
