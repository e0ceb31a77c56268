/// Post handlers - HTTP endpoints for post operations
use crate::error::Result;
use crate::models::{NewPost, UserId};
use crate::AppState;
use actix_web::{web, HttpResponse};

/// Create a new post
/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    req: web::Json<NewPost>,
) -> Result<HttpResponse> {
    let post = state.posts.create_post(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// Get posts for a user
/// GET /posts/user/{user_id}
pub async fn get_user_posts(
    state: web::Data<AppState>,
    user_id: web::Path<UserId>,
) -> Result<HttpResponse> {
    let posts = state.posts.get_user_posts(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(posts))
}
