use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::limit::RequestBodyLimitLayer;

use crate::middleware;
use crate::state::AppState;

pub mod actions;
pub mod downloads;
pub mod health;
pub mod history;
pub mod index;

pub fn router(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_check))
        .route("/", get(index::show_page))
        .route("/analyze", post(actions::analyze_symptoms))
        .route("/report", post(actions::generate_report))
        .route("/scan", post(actions::upload_scan))
        .route("/report/latest/{format}", get(downloads::download_latest))
        .route(
            "/history/{position}/{format}",
            get(downloads::download_record),
        )
        .route("/api/history", get(history::list_history))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .with_state(state)
}
