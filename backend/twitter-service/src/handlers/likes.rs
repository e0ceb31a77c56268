/// Like handlers - HTTP endpoints for the like toggle
use crate::error::Result;
use crate::models::{LikeId, LikeRequest, MessageResponse, PostId, UserId};
use crate::AppState;
use actix_web::{web, HttpResponse};

/// Like a post (inserts or reactivates)
/// POST /likes
pub async fn like_post(
    state: web::Data<AppState>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    let like = state.likes.like_post(req.user_id, req.post_id).await?;
    Ok(HttpResponse::Ok().json(like))
}

/// Unlike a post
/// PUT /likes/{user_id}/{post_id}
pub async fn unlike_post(
    state: web::Data<AppState>,
    path: web::Path<(UserId, PostId)>,
) -> Result<HttpResponse> {
    let (user_id, post_id) = path.into_inner();
    state.likes.unlike_post(user_id, post_id).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Like removed successfully")))
}

/// Delete a like row by id
/// DELETE /likes/{id}
pub async fn delete_like(
    state: web::Data<AppState>,
    like_id: web::Path<LikeId>,
) -> Result<HttpResponse> {
    state.likes.delete_like(like_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Like Deleted Successfully")))
}

/// Get active likers of a post
/// GET /likes/post/{post_id}
pub async fn get_post_likers(
    state: web::Data<AppState>,
    post_id: web::Path<PostId>,
) -> Result<HttpResponse> {
    let likers = state.likes.get_post_likers(post_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(likers))
}
