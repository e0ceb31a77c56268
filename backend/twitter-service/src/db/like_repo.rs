use super::LikeStore;
use crate::models::{Like, LikeActivation, LikeId, Liker, PostId, UserId};
use crate::SERVICE_NAME;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use db_pool::lease;
use sqlx::PgPool;

/// PostgreSQL-backed like store
///
/// Relies on `UNIQUE (user_id, post_id)` on `likes`: each pair owns a single
/// row for its whole history and toggling only moves the `active` flag.
#[derive(Clone)]
pub struct PgLikeStore {
    pool: PgPool,
}

impl PgLikeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ActivatedLikeRow {
    id: LikeId,
    user_id: UserId,
    post_id: PostId,
    created_at: DateTime<Utc>,
    active: bool,
    inserted: bool,
}

impl From<ActivatedLikeRow> for LikeActivation {
    fn from(row: ActivatedLikeRow) -> Self {
        LikeActivation {
            like: Like {
                id: row.id,
                user_id: row.user_id,
                post_id: row.post_id,
                created_at: row.created_at,
                active: row.active,
            },
            inserted: row.inserted,
        }
    }
}

#[async_trait]
impl LikeStore for PgLikeStore {
    async fn activate_like(
        &self,
        user_id: UserId,
        post_id: PostId,
    ) -> Result<LikeActivation, sqlx::Error> {
        let mut conn = lease(&self.pool, SERVICE_NAME, "activate_like").await?;

        // xmax is 0 only for a freshly inserted tuple
        let row = sqlx::query_as::<_, ActivatedLikeRow>(
            r#"
            INSERT INTO likes (user_id, post_id, created_at, active)
            VALUES ($1, $2, CURRENT_TIMESTAMP, TRUE)
            ON CONFLICT (user_id, post_id) DO UPDATE
            SET active = TRUE
            RETURNING id, user_id, post_id, created_at, active, (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .fetch_one(&mut *conn)
        .await?;

        Ok(row.into())
    }

    async fn deactivate_like(&self, user_id: UserId, post_id: PostId) -> Result<u64, sqlx::Error> {
        let mut conn = lease(&self.pool, SERVICE_NAME, "deactivate_like").await?;

        let result = sqlx::query(
            r#"
            UPDATE likes
            SET active = FALSE
            WHERE user_id = $1 AND post_id = $2 AND active = TRUE
            "#,
        )
        .bind(user_id)
        .bind(post_id)
        .execute(&mut *conn)
        .await?;

        Ok(result.rows_affected())
    }

    async fn active_likers(&self, post_id: PostId) -> Result<Vec<Liker>, sqlx::Error> {
        let mut conn = lease(&self.pool, SERVICE_NAME, "active_likers").await?;

        let likers = sqlx::query_as::<_, Liker>(
            r#"
            SELECT users.username, likes.user_id, likes.id AS likes_id
            FROM likes
            INNER JOIN users ON likes.user_id = users.id
            WHERE likes.post_id = $1 AND likes.active = TRUE
            "#,
        )
        .bind(post_id)
        .fetch_all(&mut *conn)
        .await?;

        Ok(likers)
    }

    async fn delete_like(&self, like_id: LikeId) -> Result<u64, sqlx::Error> {
        let mut conn = lease(&self.pool, SERVICE_NAME, "delete_like").await?;

        let result = sqlx::query("DELETE FROM likes WHERE id = $1")
            .bind(like_id)
            .execute(&mut *conn)
            .await?;

        Ok(result.rows_affected())
    }
}
