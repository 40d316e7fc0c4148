use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::candidate::Stage;

use super::push_param;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub job_id: Option<Uuid>,
    pub stage: Option<Stage>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub job_id: Option<Uuid>,
    pub stage: Option<Stage>,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub stage: Option<String>,
    pub job_id: Option<Uuid>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl CandidateListQuery {
    pub fn params(&self) -> Vec<(String, String)> {
        let mut p = Vec::new();
        push_param(&mut p, "search", self.search.clone());
        push_param(&mut p, "stage", self.stage.clone());
        push_param(&mut p, "jobId", self.job_id.map(|v| v.to_string()));
        push_param(&mut p, "sort", self.sort.clone());
        push_param(&mut p, "page", self.page.map(|v| v.to_string()));
        push_param(&mut p, "pageSize", self.page_size.map(|v| v.to_string()));
        p
    }
}
