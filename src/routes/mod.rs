pub mod assessments;
pub mod candidates;
pub mod health;
pub mod jobs;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::AppState;

/// The simulated API surface. The router is driven either in-process by
/// [`crate::client::ApiClient`] or over HTTP by the demo binary.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/jobs", get(jobs::list_jobs).post(jobs::create_job))
        .route("/api/jobs/:id", get(jobs::get_job).patch(jobs::update_job))
        .route("/api/jobs/:id/reorder", patch(jobs::reorder_job))
        .route(
            "/api/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(candidates::get_candidate).patch(candidates::update_candidate),
        )
        .route(
            "/api/assessments",
            get(assessments::list_assessments).post(assessments::create_assessment),
        )
        .route(
            "/api/assessments/:id",
            get(assessments::get_assessment).put(assessments::upsert_assessment),
        )
        .route(
            "/api/assessments/:id/submit",
            post(assessments::submit_assessment),
        )
        .with_state(state)
}
