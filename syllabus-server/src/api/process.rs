//! Syllabus processing endpoints
//!
//! Both endpoints accept the same course request and run the full pipeline;
//! `/api/process` returns the JSON result, `/api/report` the text report.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use std::sync::Arc;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::export::text_report;
use crate::models::{ProcessRequest, SyllabusResult};
use crate::services::pipeline::resolve_seed;
use crate::AppState;

/// POST /api/process
pub async fn process_course(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> ApiResult<Json<SyllabusResult>> {
    let result = run_pipeline(&state, payload).await?;
    Ok(Json(result))
}

/// POST /api/report
pub async fn process_report(
    State(state): State<AppState>,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> ApiResult<Response> {
    let result = run_pipeline(&state, payload).await?;
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        text_report(&result),
    )
        .into_response())
}

async fn run_pipeline(
    state: &AppState,
    payload: Result<Json<ProcessRequest>, JsonRejection>,
) -> ApiResult<SyllabusResult> {
    let Json(request) = payload?;
    let spec = request.into_spec()?;
    let seed = resolve_seed(spec.seed, state.seed);
    info!(course = %spec.title, seed, "Processing course");

    // Pipeline is CPU-bound; keep it off the async workers
    let pipeline = Arc::clone(&state.pipeline);
    let result = tokio::task::spawn_blocking(move || pipeline.run(&spec, seed))
        .await
        .map_err(|e| ApiError::Internal(format!("Pipeline task failed: {}", e)))??;
    Ok(result)
}
