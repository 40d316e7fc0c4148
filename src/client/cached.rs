use serde_json::{json, Value as JsonValue};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cache::{CacheKey, QueryCache};
use crate::dto::assessment_dto::{
    AssessmentListQuery, CreateAssessmentPayload, SubmitAssessmentPayload, UpsertAssessmentPayload,
};
use crate::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::dto::PageResponse;
use crate::error::Result;
use crate::models::assessment::Assessment;
use crate::models::candidate::{Candidate, Stage};
use crate::models::job::Job;
use crate::services::{assessment_service, candidate_service, job_service};
use crate::store::DurableStore;
use crate::AppState;

use super::ApiClient;

const JOBS_PATH: &str = "/api/jobs";
const CANDIDATES_PATH: &str = "/api/candidates";
const ASSESSMENTS_PATH: &str = "/api/assessments";

/// Cache-first client over the simulated backend.
///
/// Reads serve from the query cache when a fresh entry exists; fetches
/// replace entries verbatim. Mutations either invalidate on success or run
/// optimistically with snapshot rollback on failure.
#[derive(Clone)]
pub struct CachedClient {
    api: ApiClient,
    cache: QueryCache,
}

impl CachedClient {
    pub fn new(state: AppState) -> Self {
        Self::with_cache(state, QueryCache::new())
    }

    pub fn with_cache(state: AppState, cache: QueryCache) -> Self {
        Self {
            api: ApiClient::new(state),
            cache,
        }
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    async fn fetch(&self, key: &CacheKey) -> Result<JsonValue> {
        if let Some(value) = self.cache.get(key) {
            debug!(key = %key, "cache hit");
            return Ok(value);
        }
        let value = self.api.get(&key.uri()).await?;
        self.cache.insert(key.clone(), value.clone());
        Ok(value)
    }

    /// Pre-populate the default first-page query shape of each entity
    /// type from the durable store, so reads resolve before the first
    /// simulated round-trip.
    pub async fn seed_from_store(&self, store: &DurableStore) -> Result<()> {
        let jobs = store.load_jobs().await?;
        if !jobs.is_empty() {
            self.seed_list(JOBS_PATH, &jobs, job_service::DEFAULT_PAGE_SIZE)?;
        }

        let mut candidates = store.load_candidates().await?;
        if !candidates.is_empty() {
            candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
            self.seed_list(
                CANDIDATES_PATH,
                &candidates,
                candidate_service::DEFAULT_PAGE_SIZE,
            )?;
        }

        let mut assessments = store.load_assessments().await?;
        if !assessments.is_empty() {
            assessments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
            self.seed_list(
                ASSESSMENTS_PATH,
                &assessments,
                assessment_service::DEFAULT_PAGE_SIZE,
            )?;
        }

        info!(
            jobs = jobs.len(),
            candidates = candidates.len(),
            assessments = assessments.len(),
            "cache seeded from durable store"
        );
        Ok(())
    }

    fn seed_list<T: serde::Serialize + Clone>(
        &self,
        path: &str,
        records: &[T],
        page_size: i64,
    ) -> Result<()> {
        let items: Vec<T> = records.iter().take(page_size as usize).cloned().collect();
        let response = PageResponse {
            items,
            total: records.len() as i64,
            page: 1,
            page_size,
        };
        self.cache
            .insert(CacheKey::detail(path), serde_json::to_value(response)?);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Jobs
    // ------------------------------------------------------------------

    pub async fn list_jobs(&self, query: &JobListQuery) -> Result<PageResponse<Job>> {
        let key = CacheKey::new(JOBS_PATH, query.params());
        let value = self.fetch(&key).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_job(&self, id: Uuid) -> Result<Job> {
        let key = CacheKey::detail(format!("{}/{}", JOBS_PATH, id));
        let value = self.fetch(&key).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn create_job(&self, payload: &CreateJobPayload) -> Result<Job> {
        let value = self.api.post(JOBS_PATH, &serde_json::to_value(payload)?).await?;
        self.cache.invalidate_prefix(JOBS_PATH);
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_job(&self, id: Uuid, payload: &UpdateJobPayload) -> Result<Job> {
        let value = self
            .api
            .patch(
                &format!("{}/{}", JOBS_PATH, id),
                &serde_json::to_value(payload)?,
            )
            .await?;
        self.cache.invalidate_prefix(JOBS_PATH);
        Ok(serde_json::from_value(value)?)
    }

    /// Optimistic reorder: cached job views show the new order before the
    /// call resolves and revert verbatim if it fails.
    pub async fn reorder_job(&self, id: Uuid, order: i64) -> Result<Job> {
        let keys = self.cache.keys_with_prefix(JOBS_PATH);
        let txn = self.cache.begin("job-reorder", &keys);
        self.cache.patch(&keys, |key, value| {
            patch_job_order(key, value, id, order);
        });

        let result = self
            .api
            .patch(
                &format!("{}/{}/reorder", JOBS_PATH, id),
                &json!({ "order": order }),
            )
            .await;

        match result {
            Ok(value) => {
                self.cache.commit(txn);
                Ok(serde_json::from_value(value)?)
            }
            Err(err) => {
                self.cache.rollback(txn);
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Candidates
    // ------------------------------------------------------------------

    pub async fn list_candidates(
        &self,
        query: &CandidateListQuery,
    ) -> Result<PageResponse<Candidate>> {
        let key = CacheKey::new(CANDIDATES_PATH, query.params());
        let value = self.fetch(&key).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_candidate(&self, id: Uuid) -> Result<Candidate> {
        let key = CacheKey::detail(format!("{}/{}", CANDIDATES_PATH, id));
        let value = self.fetch(&key).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn create_candidate(&self, payload: &CreateCandidatePayload) -> Result<Candidate> {
        let value = self
            .api
            .post(CANDIDATES_PATH, &serde_json::to_value(payload)?)
            .await?;
        self.cache.invalidate_prefix(CANDIDATES_PATH);
        Ok(serde_json::from_value(value)?)
    }

    pub async fn update_candidate(
        &self,
        id: Uuid,
        payload: &UpdateCandidatePayload,
    ) -> Result<Candidate> {
        let value = self
            .api
            .patch(
                &format!("{}/{}", CANDIDATES_PATH, id),
                &serde_json::to_value(payload)?,
            )
            .await?;
        self.cache.invalidate_prefix(CANDIDATES_PATH);
        Ok(serde_json::from_value(value)?)
    }

    /// Optimistic stage change: every cached candidate view reflects the
    /// new stage immediately; on failure every touched entry is restored
    /// to its pre-mutation snapshot.
    pub async fn update_candidate_stage(&self, id: Uuid, stage: Stage) -> Result<Candidate> {
        let stage_value = serde_json::to_value(stage)?;
        let keys = self.cache.keys_with_prefix(CANDIDATES_PATH);
        let txn = self.cache.begin("candidate-stage-change", &keys);
        self.cache.patch(&keys, |_, value| {
            patch_candidate_stage(value, id, &stage_value);
        });

        let result = self
            .api
            .patch(
                &format!("{}/{}", CANDIDATES_PATH, id),
                &json!({ "stage": stage }),
            )
            .await;

        match result {
            Ok(value) => {
                self.cache.commit(txn);
                Ok(serde_json::from_value(value)?)
            }
            Err(err) => {
                self.cache.rollback(txn);
                Err(err)
            }
        }
    }

    // ------------------------------------------------------------------
    // Assessments
    // ------------------------------------------------------------------

    pub async fn list_assessments(
        &self,
        query: &AssessmentListQuery,
    ) -> Result<PageResponse<Assessment>> {
        let key = CacheKey::new(ASSESSMENTS_PATH, query.params());
        let value = self.fetch(&key).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn get_assessment(&self, id: Uuid) -> Result<Assessment> {
        let key = CacheKey::detail(format!("{}/{}", ASSESSMENTS_PATH, id));
        let value = self.fetch(&key).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn create_assessment(&self, payload: &CreateAssessmentPayload) -> Result<Assessment> {
        let value = self
            .api
            .post(ASSESSMENTS_PATH, &serde_json::to_value(payload)?)
            .await?;
        self.cache.invalidate_prefix(ASSESSMENTS_PATH);
        Ok(serde_json::from_value(value)?)
    }

    pub async fn upsert_assessment(
        &self,
        job_id: Uuid,
        payload: &UpsertAssessmentPayload,
    ) -> Result<Assessment> {
        let value = self
            .api
            .put(
                &format!("{}/{}", ASSESSMENTS_PATH, job_id),
                &serde_json::to_value(payload)?,
            )
            .await?;
        self.cache.invalidate_prefix(ASSESSMENTS_PATH);
        Ok(serde_json::from_value(value)?)
    }

    pub async fn submit_assessment(
        &self,
        assessment_id: Uuid,
        payload: &SubmitAssessmentPayload,
    ) -> Result<()> {
        self.api
            .post(
                &format!("{}/{}/submit", ASSESSMENTS_PATH, assessment_id),
                &serde_json::to_value(payload)?,
            )
            .await?;
        Ok(())
    }
}

fn patch_candidate_stage(value: &mut JsonValue, id: Uuid, stage: &JsonValue) {
    let id = id.to_string();
    if let Some(items) = value.get_mut("items").and_then(JsonValue::as_array_mut) {
        for item in items {
            if item.get("id").and_then(JsonValue::as_str) == Some(id.as_str()) {
                item["stage"] = stage.clone();
            }
        }
    } else if value.get("id").and_then(JsonValue::as_str) == Some(id.as_str()) {
        value["stage"] = stage.clone();
    }
}

fn patch_job_order(key: &CacheKey, value: &mut JsonValue, id: Uuid, order: i64) {
    let id = id.to_string();
    if let Some(items) = value.get_mut("items").and_then(JsonValue::as_array_mut) {
        for item in items.iter_mut() {
            if item.get("id").and_then(JsonValue::as_str) == Some(id.as_str()) {
                item["order"] = json!(order);
            }
        }
        // Entries sorted by display order are re-sorted in place so the
        // view moves immediately.
        let natural = key.param("sort").map_or(true, |s| s.starts_with("order"));
        if natural {
            items.sort_by_key(|item| item.get("order").and_then(JsonValue::as_i64).unwrap_or(0));
        }
    } else if value.get("id").and_then(JsonValue::as_str) == Some(id.as_str()) {
        value["order"] = json!(order);
    }
}
