use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::storage::Storage;

use super::handlers::{
    create_url, delete_url, health_check, list_urls, url_qr, url_stats, AppState,
};

pub fn create_api_router(storage: Arc<dyn Storage>, base_url: String) -> Router {
    let state = Arc::new(AppState { storage, base_url });

    Router::new()
        .route("/health", get(health_check))
        .route("/api/shorten", post(create_url))
        .route("/api/urls", get(list_urls))
        .route("/api/urls/{code}", delete(delete_url))
        .route("/api/urls/{code}/qr", get(url_qr))
        .route("/api/stats/{code}", get(url_stats))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
