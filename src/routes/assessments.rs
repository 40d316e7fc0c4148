use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::assessment_dto::{
        AssessmentListQuery, CreateAssessmentPayload, SubmitAssessmentPayload,
        SubmitAssessmentResponse, UpsertAssessmentPayload,
    },
    error::{Error, Result},
    AppState,
};

pub async fn list_assessments(
    State(state): State<AppState>,
    Query(query): Query<AssessmentListQuery>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    let result = state.assessment_service.list(query).await?;
    Ok(Json(result))
}

pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let assessment = state.assessment_service.get(id).await?;
    Ok(Json(assessment))
}

pub async fn create_assessment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    if state.chaos.should_fail() {
        return Err(Error::Internal("Failed to create assessment".to_string()));
    }
    payload.validate()?;
    let assessment = state.assessment_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// PUT upserts the assessment owned by the job in the path.
pub async fn upsert_assessment(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
    Json(payload): Json<UpsertAssessmentPayload>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    if state.chaos.should_fail() {
        return Err(Error::Internal("Failed to update assessment".to_string()));
    }
    payload.validate()?;
    let assessment = state.assessment_service.upsert_for_job(job_id, payload).await?;
    Ok(Json(assessment))
}

pub async fn submit_assessment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitAssessmentPayload>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    if state.chaos.should_fail() {
        return Err(Error::Internal("Failed to submit assessment".to_string()));
    }
    state.assessment_service.submit(id, payload).await?;
    Ok(Json(SubmitAssessmentResponse { success: true }))
}
