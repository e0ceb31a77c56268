//! Prometheus metrics for twitter-service.
//!
//! Exposes post/like collectors and an HTTP handler for the `/metrics` endpoint.

use crate::error::{AppError, Result};
use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    /// Posts successfully inserted.
    pub static ref POSTS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "posts_created_total",
        "Total posts created"
    )
    .expect("failed to register posts_created_total");

    /// Like state changes by action (inserted, reactivated, deactivated, deleted).
    pub static ref LIKE_TOGGLES_TOTAL: IntCounterVec = register_int_counter_vec!(
        "likes_toggled_total",
        "Like state changes segmented by action",
        &["action"]
    )
    .expect("failed to register likes_toggled_total");
}

pub fn record_like_action(action: &str) {
    LIKE_TOGGLES_TOTAL.with_label_values(&[action]).inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> Result<HttpResponse> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| AppError::Internal(format!("metrics encoding failed: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer))
}
