/// Business logic layer for twitter-service
///
/// - Post service: user existence guard on create, per-user listing
/// - Like service: soft like/unlike toggle, active likers, hard delete
pub mod likes;
pub mod posts;

pub use likes::LikeService;
pub use posts::PostService;
