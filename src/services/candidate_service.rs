use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::dataset::Dataset;
use crate::dto::candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
use crate::dto::PageResponse;
use crate::error::{Error, Result};
use crate::models::candidate::{Candidate, Stage, TimelineEvent};
use crate::store::DurableStore;

pub const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct CandidateService {
    dataset: Dataset,
    store: DurableStore,
}

impl CandidateService {
    pub fn new(dataset: Dataset, store: DurableStore) -> Self {
        Self { dataset, store }
    }

    pub async fn list(&self, query: CandidateListQuery) -> Result<PageResponse<Candidate>> {
        let mut candidates = self.dataset.candidates().await;

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            candidates.retain(|c| {
                c.name.to_lowercase().contains(&needle) || c.email.to_lowercase().contains(&needle)
            });
        }

        if let Some(stage) = super::filter_value(query.stage.as_deref()) {
            candidates.retain(|c| c.stage.as_str() == stage);
        }

        if let Some(job_id) = query.job_id {
            candidates.retain(|c| c.job_id == Some(job_id));
        }

        match super::parse_sort(query.sort.as_deref()) {
            Some((field, desc)) => sort_candidates(&mut candidates, &field, desc),
            // Natural order for the pipeline view is newest first.
            None => sort_candidates(&mut candidates, "createdAt", true),
        }

        let total = candidates.len() as i64;
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let items = super::paginate(&candidates, page, page_size);

        self.store.bulk_upsert_candidates(&items).await?;
        let unfiltered = query.search.as_deref().unwrap_or("").is_empty()
            && super::filter_value(query.stage.as_deref()).is_none()
            && query.job_id.is_none();
        if unfiltered && page == 1 {
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(e) = store.bulk_upsert_candidates(&candidates).await {
                    warn!(error = %e, "deferred candidate persistence failed");
                }
            });
        }

        Ok(PageResponse {
            items,
            total,
            page,
            page_size,
        })
    }

    pub async fn get(&self, id: Uuid) -> Result<Candidate> {
        let candidate = self
            .dataset
            .candidate(id)
            .await
            .ok_or_else(|| Error::NotFound("Not found".to_string()))?;
        self.store.upsert_candidate(&candidate).await?;
        Ok(candidate)
    }

    pub async fn create(&self, payload: CreateCandidatePayload) -> Result<Candidate> {
        let id = Uuid::new_v4();
        let stage = payload.stage.unwrap_or(Stage::Applied);
        let avatar = payload.avatar.unwrap_or_else(|| {
            format!("https://api.dicebear.com/7.x/avataaars/svg?seed={}", id)
        });

        let candidate = Candidate {
            id,
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            avatar: Some(avatar),
            job_id: payload.job_id,
            stage,
            resume_url: payload.resume_url,
            linkedin_url: payload.linkedin_url,
            notes: payload.notes,
            timeline: vec![TimelineEvent::stage_change(stage)],
            created_at: Utc::now(),
        };

        self.dataset.put_candidate(candidate.clone()).await;
        self.store.upsert_candidate(&candidate).await?;
        Ok(candidate)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateCandidatePayload) -> Result<Candidate> {
        let mut candidate = self
            .dataset
            .candidate(id)
            .await
            .ok_or_else(|| Error::NotFound("Candidate not found".to_string()))?;

        // Timeline events are appended before the record is persisted, so
        // history and current state never diverge.
        if let Some(stage) = payload.stage {
            if stage != candidate.stage {
                candidate.timeline.push(TimelineEvent::stage_change(stage));
                candidate.stage = stage;
            }
        }
        if let Some(notes) = payload.notes {
            if candidate.notes.as_deref() != Some(notes.as_str()) {
                candidate.timeline.push(TimelineEvent::note_added(&notes));
                candidate.notes = Some(notes);
            }
        }

        if let Some(name) = payload.name {
            candidate.name = name;
        }
        if let Some(email) = payload.email {
            candidate.email = email;
        }
        if let Some(phone) = payload.phone {
            candidate.phone = Some(phone);
        }
        if let Some(avatar) = payload.avatar {
            candidate.avatar = Some(avatar);
        }
        if let Some(job_id) = payload.job_id {
            candidate.job_id = Some(job_id);
        }
        if let Some(resume_url) = payload.resume_url {
            candidate.resume_url = Some(resume_url);
        }
        if let Some(linkedin_url) = payload.linkedin_url {
            candidate.linkedin_url = Some(linkedin_url);
        }

        self.dataset.put_candidate(candidate.clone()).await;
        self.store.upsert_candidate(&candidate).await?;
        Ok(candidate)
    }
}

fn sort_candidates(candidates: &mut [Candidate], field: &str, desc: bool) {
    candidates.sort_by(|a, b| {
        let cmp = match field {
            "name" => a.name.cmp(&b.name),
            "email" => a.email.cmp(&b.email),
            "stage" => a.stage.as_str().cmp(b.stage.as_str()),
            _ => a.created_at.cmp(&b.created_at),
        };
        let cmp = if desc { cmp.reverse() } else { cmp };
        cmp.then_with(|| a.id.cmp(&b.id))
    });
}
