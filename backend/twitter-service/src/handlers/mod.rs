/// HTTP handlers for twitter-service
///
/// - Posts: create a post, list a user's posts
/// - Likes: like, unlike, delete, list active likers
pub mod likes;
pub mod posts;

use crate::error::AppError;
use crate::models::MessageResponse;
use actix_web::{web, HttpResponse};

pub use likes::{delete_like, get_post_likers, like_post, unlike_post};
pub use posts::{create_post, get_user_posts};

/// Register the public routes
///
/// Shared by the binary and the HTTP tests so both serve the same table.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .route("/", web::get().to(welcome))
        .service(
            web::scope("/posts")
                .service(web::resource("").route(web::post().to(create_post)))
                .service(web::resource("/user/{user_id}").route(web::get().to(get_user_posts))),
        )
        .service(
            web::scope("/likes")
                .service(web::resource("").route(web::post().to(like_post)))
                .service(web::resource("/post/{post_id}").route(web::get().to(get_post_likers)))
                .service(web::resource("/{user_id}/{post_id}").route(web::put().to(unlike_post)))
                .service(web::resource("/{id}").route(web::delete().to(delete_like))),
        );
}

/// Malformed JSON bodies become the flat 400 error body
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

/// Path segments that do not parse as ids are request errors, not missing routes
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}

pub async fn welcome() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse::new("Welcome to the twitter API!"))
}
