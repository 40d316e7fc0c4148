use chrono::Utc;
use tracing::warn;
use uuid::Uuid;

use crate::dataset::Dataset;
use crate::dto::job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};
use crate::dto::PageResponse;
use crate::error::{Error, Result};
use crate::models::job::{Job, JobStatus};
use crate::store::DurableStore;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Clone)]
pub struct JobService {
    dataset: Dataset,
    store: DurableStore,
}

impl JobService {
    pub fn new(dataset: Dataset, store: DurableStore) -> Self {
        Self { dataset, store }
    }

    pub async fn list(&self, query: JobListQuery) -> Result<PageResponse<Job>> {
        let mut jobs = self.dataset.jobs().await;

        if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
            let needle = search.to_lowercase();
            jobs.retain(|j| j.title.to_lowercase().contains(&needle));
        }

        if let Some(status) = super::filter_value(query.status.as_deref()) {
            jobs.retain(|j| j.status.as_str() == status);
        }

        if let Some(tags) = query.tags.as_deref() {
            let wanted: Vec<String> = tags
                .split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect();
            if !wanted.is_empty() {
                jobs.retain(|j| j.has_any_tag(&wanted));
            }
        }

        match super::parse_sort(query.sort.as_deref()) {
            Some((field, desc)) => sort_jobs(&mut jobs, &field, desc),
            None => jobs.sort_by_key(|j| j.order),
        }

        let total = jobs.len() as i64;
        let page = query.page.unwrap_or(1).max(1);
        let page_size = query.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
        let items = super::paginate(&jobs, page, page_size);

        // Returned page is written through synchronously; the full dataset
        // is flushed in the background on the unfiltered first-page fetch.
        self.store.bulk_upsert_jobs(&items).await?;
        let unfiltered = query.search.as_deref().unwrap_or("").is_empty()
            && super::filter_value(query.status.as_deref()).is_none()
            && query.tags.as_deref().unwrap_or("").is_empty();
        if unfiltered && page == 1 {
            let store = self.store.clone();
            tokio::spawn(async move {
                if let Err(e) = store.bulk_upsert_jobs(&jobs).await {
                    warn!(error = %e, "deferred job persistence failed");
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

    pub async fn get(&self, id: Uuid) -> Result<Job> {
        let job = self
            .dataset
            .job(id)
            .await
            .ok_or_else(|| Error::NotFound("Not found".to_string()))?;
        self.store.upsert_job(&job).await?;
        Ok(job)
    }

    pub async fn create(&self, payload: CreateJobPayload) -> Result<Job> {
        if self.dataset.slug_taken(&payload.slug, None).await {
            return Err(Error::BadRequest("Slug must be unique".to_string()));
        }

        let order = match payload.order {
            Some(order) => order,
            None => {
                self.dataset
                    .jobs()
                    .await
                    .iter()
                    .map(|j| j.order)
                    .max()
                    .unwrap_or(-1)
                    + 1
            }
        };

        let job = Job {
            id: Uuid::new_v4(),
            title: payload.title,
            slug: payload.slug,
            description: payload.description,
            department: payload.department,
            location: payload.location,
            employment_type: payload.employment_type,
            tags: payload.tags,
            status: payload.status.unwrap_or(JobStatus::Active),
            order,
            created_at: Utc::now(),
        };

        self.dataset.put_job(job.clone()).await;
        self.store.upsert_job(&job).await?;
        Ok(job)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateJobPayload) -> Result<Job> {
        let mut job = self
            .dataset
            .job(id)
            .await
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;

        if let Some(slug) = &payload.slug {
            if self.dataset.slug_taken(slug, Some(id)).await {
                return Err(Error::BadRequest("Slug must be unique".to_string()));
            }
            job.slug = slug.clone();
        }
        if let Some(title) = payload.title {
            job.title = title;
        }
        if let Some(description) = payload.description {
            job.description = Some(description);
        }
        if let Some(department) = payload.department {
            job.department = Some(department);
        }
        if let Some(location) = payload.location {
            job.location = Some(location);
        }
        if let Some(employment_type) = payload.employment_type {
            job.employment_type = Some(employment_type);
        }
        if let Some(tags) = payload.tags {
            job.tags = tags;
        }
        if let Some(status) = payload.status {
            job.status = status;
        }

        self.dataset.put_job(job.clone()).await;
        self.store.upsert_job(&job).await?;
        Ok(job)
    }

    /// Sets the order field directly. Consistency of the surrounding set
    /// is the caller's responsibility.
    pub async fn reorder(&self, id: Uuid, order: i64) -> Result<Job> {
        let mut job = self
            .dataset
            .job(id)
            .await
            .ok_or_else(|| Error::NotFound("Job not found".to_string()))?;
        job.order = order;
        self.dataset.put_job(job.clone()).await;
        self.store.upsert_job(&job).await?;
        Ok(job)
    }
}

fn sort_jobs(jobs: &mut [Job], field: &str, desc: bool) {
    jobs.sort_by(|a, b| {
        let cmp = match field {
            "title" => a.title.cmp(&b.title),
            "slug" => a.slug.cmp(&b.slug),
            "status" => a.status.as_str().cmp(b.status.as_str()),
            "createdAt" | "created_at" => a.created_at.cmp(&b.created_at),
            _ => a.order.cmp(&b.order),
        };
        let cmp = if desc { cmp.reverse() } else { cmp };
        // Tie-break on id keeps pagination gap-free under equal keys.
        cmp.then_with(|| a.id.cmp(&b.id))
    });
}
