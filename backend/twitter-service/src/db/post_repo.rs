use super::PostStore;
use crate::models::{NewPost, Post, PostCreation, UserId};
use crate::SERVICE_NAME;
use async_trait::async_trait;
use db_pool::lease;
use sqlx::PgPool;

/// PostgreSQL-backed post store
#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn create_post(&self, post: NewPost) -> Result<PostCreation, sqlx::Error> {
        let mut conn = lease(&self.pool, SERVICE_NAME, "create_post").await?;

        let user_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(post.user_id)
                .fetch_one(&mut *conn)
                .await?;

        if !user_exists {
            return Ok(PostCreation::UserMissing);
        }

        let created = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id, created_at)
            VALUES ($1, $2, $3, CURRENT_TIMESTAMP)
            RETURNING id, title, content, user_id, created_at
            "#,
        )
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.user_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(PostCreation::Created(created))
    }

    async fn posts_by_user(&self, user_id: UserId) -> Result<Vec<Post>, sqlx::Error> {
        let mut conn = lease(&self.pool, SERVICE_NAME, "posts_by_user").await?;

        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, title, content, user_id, created_at
            FROM posts
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(posts)
    }
}
