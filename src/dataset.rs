//! The simulated backend's authoritative in-session state.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::assessment::{Assessment, AssessmentResponse};
use crate::models::candidate::Candidate;
use crate::models::job::Job;

/// In-memory record collections, owned for the lifetime of the process and
/// passed by handle to every service. The durable store mirrors this data
/// but is never consulted to serve a live request.
#[derive(Clone, Default)]
pub struct Dataset {
    inner: Arc<RwLock<Collections>>,
}

#[derive(Default)]
struct Collections {
    jobs: HashMap<Uuid, Job>,
    candidates: HashMap<Uuid, Candidate>,
    assessments: HashMap<Uuid, Assessment>,
    responses: HashMap<Uuid, AssessmentResponse>,
}

impl Dataset {
    pub async fn jobs(&self) -> Vec<Job> {
        self.inner.read().await.jobs.values().cloned().collect()
    }

    pub async fn job(&self, id: Uuid) -> Option<Job> {
        self.inner.read().await.jobs.get(&id).cloned()
    }

    pub async fn put_job(&self, job: Job) {
        self.inner.write().await.jobs.insert(job.id, job);
    }

    /// True when another job already claims `slug`.
    pub async fn slug_taken(&self, slug: &str, excluding: Option<Uuid>) -> bool {
        self.inner
            .read()
            .await
            .jobs
            .values()
            .any(|j| j.slug == slug && Some(j.id) != excluding)
    }

    pub async fn candidates(&self) -> Vec<Candidate> {
        self.inner
            .read()
            .await
            .candidates
            .values()
            .cloned()
            .collect()
    }

    pub async fn candidate(&self, id: Uuid) -> Option<Candidate> {
        self.inner.read().await.candidates.get(&id).cloned()
    }

    pub async fn put_candidate(&self, candidate: Candidate) {
        self.inner
            .write()
            .await
            .candidates
            .insert(candidate.id, candidate);
    }

    pub async fn assessments(&self) -> Vec<Assessment> {
        self.inner
            .read()
            .await
            .assessments
            .values()
            .cloned()
            .collect()
    }

    pub async fn assessment(&self, id: Uuid) -> Option<Assessment> {
        self.inner.read().await.assessments.get(&id).cloned()
    }

    pub async fn assessment_for_job(&self, job_id: Uuid) -> Option<Assessment> {
        self.inner
            .read()
            .await
            .assessments
            .values()
            .find(|a| a.job_id == Some(job_id))
            .cloned()
    }

    pub async fn put_assessment(&self, assessment: Assessment) {
        self.inner
            .write()
            .await
            .assessments
            .insert(assessment.id, assessment);
    }

    pub async fn put_response(&self, response: AssessmentResponse) {
        self.inner
            .write()
            .await
            .responses
            .insert(response.id, response);
    }

    pub async fn responses_for_assessment(&self, assessment_id: Uuid) -> Vec<AssessmentResponse> {
        self.inner
            .read()
            .await
            .responses
            .values()
            .filter(|r| r.assessment_id == assessment_id)
            .cloned()
            .collect()
    }
}
