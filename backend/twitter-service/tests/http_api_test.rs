//! HTTP API tests
//!
//! Drive the full route table over the in-memory store, plus a store that
//! always fails to check the 500 contract.

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use twitter_service::db::{InMemoryStore, LikeStore, PostStore};
use twitter_service::error::INTERNAL_ERROR_MESSAGE;
use twitter_service::handlers;
use twitter_service::models::{
    LikeActivation, LikeId, Liker, NewPost, Post, PostCreation, PostId, UserId,
};
use twitter_service::AppState;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(handlers::configure),
        )
        .await
    };
}

fn seeded_store() -> Arc<InMemoryStore> {
    Arc::new(InMemoryStore::with_users([(1, "alice"), (2, "bob")]))
}

/// Store whose every call fails like a dropped connection
struct UnavailableStore;

#[async_trait]
impl PostStore for UnavailableStore {
    async fn create_post(&self, _post: NewPost) -> Result<PostCreation, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn posts_by_user(&self, _user_id: UserId) -> Result<Vec<Post>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

#[async_trait]
impl LikeStore for UnavailableStore {
    async fn activate_like(
        &self,
        _user_id: UserId,
        _post_id: PostId,
    ) -> Result<LikeActivation, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn deactivate_like(
        &self,
        _user_id: UserId,
        _post_id: PostId,
    ) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn active_likers(&self, _post_id: PostId) -> Result<Vec<Liker>, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }

    async fn delete_like(&self, _like_id: LikeId) -> Result<u64, sqlx::Error> {
        Err(sqlx::Error::PoolTimedOut)
    }
}

#[actix_web::test]
async fn welcome_message() {
    let app = init_app!(AppState::in_memory(seeded_store()));

    let req = test::TestRequest::get().uri("/").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body, json!({"message": "Welcome to the twitter API!"}));
}

#[actix_web::test]
async fn post_like_unlike_scenario() {
    let app = init_app!(AppState::in_memory(seeded_store()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "t", "content": "c", "user_id": 1}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let post: Value = test::read_body_json(resp).await;
    assert_eq!(post["title"], "t");
    assert_eq!(post["content"], "c");
    assert_eq!(post["user_id"], 1);
    assert!(post["created_at"].is_string());
    let post_id = post["id"].as_i64().expect("post id");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/likes")
            .set_json(json!({"user_id": 1, "post_id": post_id}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let like: Value = test::read_body_json(resp).await;
    assert_eq!(like["active"], true);
    assert_eq!(like["post_id"], post_id);

    let likers: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri(&format!("/likes/post/{}", post_id))
            .to_request(),
    )
    .await;
    assert_eq!(
        likers,
        json!([{"username": "alice", "user_id": 1, "likes_id": like["id"]}])
    );

    let resp = test::call_service(
        &app,
        test::TestRequest::put()
            .uri(&format!("/likes/1/{}", post_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].is_string());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/likes/post/{}", post_id))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let likers: Value = test::read_body_json(resp).await;
    assert_eq!(likers, json!([]));
}

#[actix_web::test]
async fn relike_returns_original_row() {
    let app = init_app!(AppState::in_memory(seeded_store()));
    let like_req = || {
        test::TestRequest::post()
            .uri("/likes")
            .set_json(json!({"user_id": 2, "post_id": 7}))
            .to_request()
    };

    let first: Value = test::call_and_read_body_json(&app, like_req()).await;
    test::call_service(&app, test::TestRequest::put().uri("/likes/2/7").to_request()).await;
    let second: Value = test::call_and_read_body_json(&app, like_req()).await;

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["active"], true);
}

#[actix_web::test]
async fn create_post_for_missing_user_is_400() {
    let store = seeded_store();
    let app = init_app!(AppState::in_memory(store.clone()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "t", "content": "c", "user_id": 99}))
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "User does not exist");
    assert_eq!(store.post_count().await, 0);
}

#[actix_web::test]
async fn malformed_post_body_is_400_json() {
    let app = init_app!(AppState::in_memory(seeded_store()));

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/posts")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], 400);
}

#[actix_web::test]
async fn unparsable_path_ids_are_400_json() {
    let app = init_app!(AppState::in_memory(seeded_store()));

    let requests = [
        test::TestRequest::get().uri("/likes/post/abc"),
        test::TestRequest::get().uri("/posts/user/abc"),
        test::TestRequest::put().uri("/likes/1/99999999999"),
        test::TestRequest::delete().uri("/likes/x"),
    ];

    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 400);
        assert!(body["error"].is_string());
    }
}

#[actix_web::test]
async fn user_without_posts_is_404() {
    let app = init_app!(AppState::in_memory(seeded_store()));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/posts/user/2").to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "No posts found for this user");
}

#[actix_web::test]
async fn list_user_posts() {
    let app = init_app!(AppState::in_memory(seeded_store()));
    for title in ["first", "second"] {
        test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/posts")
                .set_json(json!({"title": title, "content": "c", "user_id": 1}))
                .to_request(),
        )
        .await;
    }

    let posts: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/posts/user/1").to_request(),
    )
    .await;

    let posts = posts.as_array().expect("array body");
    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p["user_id"] == 1));
}

#[actix_web::test]
async fn unlike_without_like_succeeds() {
    let app = init_app!(AppState::in_memory(seeded_store()));

    let req = test::TestRequest::put().uri("/likes/1/5").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn delete_missing_like_succeeds() {
    let app = init_app!(AppState::in_memory(seeded_store()));

    let req = test::TestRequest::delete().uri("/likes/12345").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"message": "Like Deleted Successfully"}));
}

#[actix_web::test]
async fn delete_removes_like_from_likers() {
    let store = seeded_store();
    let app = init_app!(AppState::in_memory(store.clone()));

    let like: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::post()
            .uri("/likes")
            .set_json(json!({"user_id": 1, "post_id": 3}))
            .to_request(),
    )
    .await;

    test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/likes/{}", like["id"]))
            .to_request(),
    )
    .await;

    assert!(store.like_rows().await.is_empty());
}

#[actix_web::test]
async fn store_failures_are_generic_500() {
    let store = Arc::new(UnavailableStore);
    let app = init_app!(AppState::new(store.clone(), store));

    let requests = vec![
        test::TestRequest::post()
            .uri("/posts")
            .set_json(json!({"title": "t", "content": "c", "user_id": 1})),
        test::TestRequest::get().uri("/posts/user/1"),
        test::TestRequest::post()
            .uri("/likes")
            .set_json(json!({"user_id": 1, "post_id": 1})),
        test::TestRequest::put().uri("/likes/1/1"),
        test::TestRequest::delete().uri("/likes/1"),
        test::TestRequest::get().uri("/likes/post/1"),
    ];

    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], INTERNAL_ERROR_MESSAGE);
    }
}
