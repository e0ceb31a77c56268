use super::{LikeStore, PostStore};
use crate::models::{
    Like, LikeActivation, LikeId, Liker, NewPost, Post, PostCreation, PostId, UserId,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct MemoryState {
    users: HashMap<UserId, String>,
    posts: Vec<Post>,
    likes: Vec<Like>,
    next_post_id: PostId,
    next_like_id: LikeId,
}

/// In-memory store with the same toggle semantics as the PostgreSQL tables
///
/// Rows live in insertion order, which stands in for the store default order.
/// One pair never owns more than one like row, mirroring the unique
/// constraint the PostgreSQL store relies on.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<MemoryState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the users table
    pub fn with_users<I, S>(users: I) -> Self
    where
        I: IntoIterator<Item = (UserId, S)>,
        S: Into<String>,
    {
        let state = MemoryState {
            users: users
                .into_iter()
                .map(|(id, name)| (id, name.into()))
                .collect(),
            ..MemoryState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    pub async fn add_user(&self, id: UserId, username: impl Into<String>) {
        self.state.lock().await.users.insert(id, username.into());
    }

    /// Number of post rows stored
    pub async fn post_count(&self) -> usize {
        self.state.lock().await.posts.len()
    }

    /// Snapshot of every like row, active or not
    pub async fn like_rows(&self) -> Vec<Like> {
        self.state.lock().await.likes.clone()
    }
}

#[async_trait]
impl PostStore for InMemoryStore {
    async fn create_post(&self, post: NewPost) -> Result<PostCreation, sqlx::Error> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&post.user_id) {
            return Ok(PostCreation::UserMissing);
        }

        state.next_post_id += 1;
        let created = Post {
            id: state.next_post_id,
            title: post.title,
            content: post.content,
            user_id: post.user_id,
            created_at: Utc::now(),
        };
        state.posts.push(created.clone());
        Ok(PostCreation::Created(created))
    }

    async fn posts_by_user(&self, user_id: UserId) -> Result<Vec<Post>, sqlx::Error> {
        let state = self.state.lock().await;
        Ok(state
            .posts
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl LikeStore for InMemoryStore {
    async fn activate_like(
        &self,
        user_id: UserId,
        post_id: PostId,
    ) -> Result<LikeActivation, sqlx::Error> {
        let mut state = self.state.lock().await;

        if let Some(existing) = state
            .likes
            .iter_mut()
            .find(|l| l.user_id == user_id && l.post_id == post_id)
        {
            existing.active = true;
            return Ok(LikeActivation {
                like: existing.clone(),
                inserted: false,
            });
        }

        state.next_like_id += 1;
        let like = Like {
            id: state.next_like_id,
            user_id,
            post_id,
            created_at: Utc::now(),
            active: true,
        };
        state.likes.push(like.clone());
        Ok(LikeActivation {
            like,
            inserted: true,
        })
    }

    async fn deactivate_like(&self, user_id: UserId, post_id: PostId) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().await;
        let mut affected = 0;
        for like in state
            .likes
            .iter_mut()
            .filter(|l| l.user_id == user_id && l.post_id == post_id && l.active)
        {
            like.active = false;
            affected += 1;
        }
        Ok(affected)
    }

    async fn active_likers(&self, post_id: PostId) -> Result<Vec<Liker>, sqlx::Error> {
        let state = self.state.lock().await;
        Ok(state
            .likes
            .iter()
            .filter(|l| l.post_id == post_id && l.active)
            .filter_map(|l| {
                state.users.get(&l.user_id).map(|username| Liker {
                    username: username.clone(),
                    user_id: l.user_id,
                    likes_id: l.id,
                })
            })
            .collect())
    }

    async fn delete_like(&self, like_id: LikeId) -> Result<u64, sqlx::Error> {
        let mut state = self.state.lock().await;
        let before = state.likes.len();
        state.likes.retain(|l| l.id != like_id);
        Ok((before - state.likes.len()) as u64)
    }
}
