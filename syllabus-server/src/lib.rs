//! syllabus-server library
//!
//! Expands a short course description into a full syllabus: topics,
//! modules, learning outcomes, an assessment blueprint, sample questions
//! and an outcome/assessment alignment matrix. Served over HTTP by the
//! `syllabus-server` binary and run offline by `syllabus-batch`.

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod export;
pub mod extractors;
pub mod models;
pub mod services;
pub mod validators;

use services::SyllabusPipeline;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Pipeline components, built once at startup
    pub pipeline: Arc<SyllabusPipeline>,
    /// Seed pinned by configuration; requests may still pass their own
    pub seed: Option<u64>,
}

impl AppState {
    /// Create new application state
    pub fn new(pipeline: SyllabusPipeline, seed: Option<u64>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            seed,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    let api_routes = Router::new()
        .route("/api/process", post(api::process_course))
        .route("/api/report", post(api::process_report))
        .route("/api/buildinfo", get(api::get_build_info));

    let public_routes = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api_routes)
        .merge(public_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
