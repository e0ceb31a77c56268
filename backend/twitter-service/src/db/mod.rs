/// Database access layer
///
/// Services talk to the store through the [`PostStore`] and [`LikeStore`]
/// traits. `PgPostStore`/`PgLikeStore` run parameterized SQL over the shared
/// pool; [`InMemoryStore`] backs tests and local runs without PostgreSQL.
use crate::models::{LikeActivation, LikeId, Liker, NewPost, Post, PostCreation, PostId, UserId};
use async_trait::async_trait;

pub mod like_repo;
pub mod memory;
pub mod post_repo;

pub use like_repo::PgLikeStore;
pub use memory::InMemoryStore;
pub use post_repo::PgPostStore;

/// Post persistence
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a post if `post.user_id` references an existing user.
    ///
    /// The existence check and the insert run on the same leased connection.
    /// When the user is missing the posts table is not touched.
    async fn create_post(&self, post: NewPost) -> Result<PostCreation, sqlx::Error>;

    /// All posts owned by `user_id`, in store order
    async fn posts_by_user(&self, user_id: UserId) -> Result<Vec<Post>, sqlx::Error>;
}

/// Like persistence with soft toggling
#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Make the like for `(user_id, post_id)` active in one conditional write.
    ///
    /// Inserts a row when the pair has none, otherwise flips the existing row
    /// back to active and returns it with its original id.
    async fn activate_like(
        &self,
        user_id: UserId,
        post_id: PostId,
    ) -> Result<LikeActivation, sqlx::Error>;

    /// Clear `active` on the pair's active row. Returns rows affected.
    async fn deactivate_like(&self, user_id: UserId, post_id: PostId) -> Result<u64, sqlx::Error>;

    /// Active likers of a post joined with their usernames
    async fn active_likers(&self, post_id: PostId) -> Result<Vec<Liker>, sqlx::Error>;

    /// Remove a like row by id whatever its flag. Returns rows affected.
    async fn delete_like(&self, like_id: LikeId) -> Result<u64, sqlx::Error>;
}
