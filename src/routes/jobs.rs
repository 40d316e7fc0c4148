use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::job_dto::{CreateJobPayload, JobListQuery, ReorderJobPayload, UpdateJobPayload},
    error::{Error, Result},
    AppState,
};

pub async fn list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobListQuery>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    let result = state.job_service.list(query).await?;
    Ok(Json(result))
}

pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let job = state.job_service.get(id).await?;
    Ok(Json(job))
}

pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobPayload>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    if state.chaos.should_fail() {
        return Err(Error::Internal("Internal server error".to_string()));
    }
    payload.validate()?;
    let job = state.job_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub async fn update_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateJobPayload>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    if state.chaos.should_fail() {
        return Err(Error::Internal("Internal server error".to_string()));
    }
    payload.validate()?;
    let job = state.job_service.update(id, payload).await?;
    Ok(Json(job))
}

pub async fn reorder_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ReorderJobPayload>,
) -> Result<impl IntoResponse> {
    state.chaos.latency().await;
    if state.chaos.should_fail() {
        return Err(Error::Internal("Failed to reorder jobs".to_string()));
    }
    let job = state.job_service.reorder(id, payload.order).await?;
    Ok(Json(job))
}
