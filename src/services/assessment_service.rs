use chrono::Utc;
use uuid::Uuid;

use crate::dataset::Dataset;
use crate::dto::assessment_dto::{
    AssessmentListQuery, CreateAssessmentPayload, SubmitAssessmentPayload, UpsertAssessmentPayload,
};
use crate::dto::PageResponse;
use crate::error::{Error, Result};
use crate::models::assessment::{Assessment, AssessmentResponse};
use crate::store::DurableStore;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Clone)]
pub struct AssessmentService {
    dataset: Dataset,
    store: DurableStore,
}

impl AssessmentService {
    pub fn new(dataset: Dataset, store: DurableStore) -> Self {
        Self { dataset, store }
    }

    pub async fn list(&self, query: AssessmentListQuery) -> Result<PageResponse<Assessment>> {
        let mut assessments = self.dataset.assessments().await;

        if let Some(job_id) = query.job_id {
            assessments.retain(|a| a.job_id == Some(job_id));
        }

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            assessments.retain(|a| a.title.to_lowercase().contains(&needle));
        }

        let (field, desc) = super::parse_sort(query.sort.as_deref())
            .unwrap_or_else(|| ("createdAt".to_string(), false));
        assessments.sort_by(|a, b| {
            let cmp = match field.as_str() {
                "title" => a.title.cmp(&b.title),
                _ => a.created_at.cmp(&b.created_at),
            };
            let cmp = if desc { cmp.reverse() } else { cmp };
            cmp.then_with(|| a.id.cmp(&b.id))
        });

        let total = assessments.len() as i64;
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let items = super::paginate(&assessments, page, page_size);

        self.store.bulk_upsert_assessments(&items).await?;

        Ok(PageResponse {
            items,
            total,
            page,
            page_size,
        })
    }

    /// Lookup by assessment id, falling back to lookup by owning job id.
    pub async fn get(&self, id: Uuid) -> Result<Assessment> {
        let assessment = match self.dataset.assessment(id).await {
            Some(a) => a,
            None => self
                .dataset
                .assessment_for_job(id)
                .await
                .ok_or_else(|| Error::NotFound("Not found".to_string()))?,
        };
        self.store.upsert_assessment(&assessment).await?;
        Ok(assessment)
    }

    pub async fn create(&self, payload: CreateAssessmentPayload) -> Result<Assessment> {
        let assessment = Assessment {
            id: Uuid::new_v4(),
            job_id: payload.job_id,
            title: payload.title,
            description: payload.description,
            sections: payload.sections,
            created_at: Utc::now(),
        };

        self.dataset.put_assessment(assessment.clone()).await;
        self.store.upsert_assessment(&assessment).await?;
        Ok(assessment)
    }

    /// Create-or-update the single assessment owned by a job.
    pub async fn upsert_for_job(
        &self,
        job_id: Uuid,
        payload: UpsertAssessmentPayload,
    ) -> Result<Assessment> {
        let assessment = match self.dataset.assessment_for_job(job_id).await {
            Some(mut existing) => {
                if let Some(title) = payload.title {
                    existing.title = title;
                }
                if let Some(description) = payload.description {
                    existing.description = Some(description);
                }
                if let Some(sections) = payload.sections {
                    existing.sections = sections;
                }
                existing
            }
            None => {
                let title = payload
                    .title
                    .ok_or_else(|| Error::BadRequest("Title is required".to_string()))?;
                Assessment {
                    id: Uuid::new_v4(),
                    job_id: Some(job_id),
                    title,
                    description: payload.description,
                    sections: payload.sections.unwrap_or_default(),
                    created_at: Utc::now(),
                }
            }
        };

        self.dataset.put_assessment(assessment.clone()).await;
        self.store.upsert_assessment(&assessment).await?;
        Ok(assessment)
    }

    /// Persists the response as-is; answers are never checked against the
    /// assessment's question constraints.
    pub async fn submit(
        &self,
        assessment_id: Uuid,
        payload: SubmitAssessmentPayload,
    ) -> Result<AssessmentResponse> {
        if self.dataset.assessment(assessment_id).await.is_none() {
            return Err(Error::NotFound("Not found".to_string()));
        }

        let response = AssessmentResponse {
            id: Uuid::new_v4(),
            assessment_id,
            candidate_id: payload.candidate_id,
            responses: payload.responses,
            submitted_at: Utc::now(),
        };

        self.dataset.put_response(response.clone()).await;
        self.store.upsert_response(&response).await?;
        Ok(response)
    }
}
