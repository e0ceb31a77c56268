/// Twitter Service Library
///
/// Posts and likes over a PostgreSQL store.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route table
/// - `models`: Rows and request bodies for users, posts, likes
/// - `services`: Business rules (user existence guard, like toggle)
/// - `db`: Store traits with PostgreSQL and in-memory implementations
/// - `error`: Error types and their HTTP mapping
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors and the `/metrics` handler
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use db::{InMemoryStore, LikeStore, PgLikeStore, PgPostStore, PostStore};
use services::{LikeService, PostService};
use sqlx::PgPool;
use std::sync::Arc;

/// Service name used for metrics labels and log fields
pub const SERVICE_NAME: &str = "twitter-service";

/// Shared handler state
///
/// Holds the services built over injected stores; there is no process-wide
/// store singleton.
#[derive(Clone)]
pub struct AppState {
    pub posts: PostService,
    pub likes: LikeService,
}

impl AppState {
    pub fn new(post_store: Arc<dyn PostStore>, like_store: Arc<dyn LikeStore>) -> Self {
        Self {
            posts: PostService::new(post_store),
            likes: LikeService::new(like_store),
        }
    }

    /// State backed by the PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgPostStore::new(pool.clone())),
            Arc::new(PgLikeStore::new(pool)),
        )
    }

    /// State backed by one in-memory store serving both posts and likes
    pub fn in_memory(store: Arc<InMemoryStore>) -> Self {
        Self::new(store.clone(), store)
    }
}
