use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::job::JobStatus;

use super::push_param;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub slug: String,
    pub description: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<JobStatus>,
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub slug: Option<String>,
    pub description: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub employment_type: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderJobPayload {
    pub order: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    /// Comma-separated tag list, matched any-of.
    pub tags: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl JobListQuery {
    /// Wire parameters in declaration order, absent and empty values
    /// omitted. Used both for request URLs and cache keys.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut p = Vec::new();
        push_param(&mut p, "search", self.search.clone());
        push_param(&mut p, "status", self.status.clone());
        push_param(&mut p, "tags", self.tags.clone());
        push_param(&mut p, "sort", self.sort.clone());
        push_param(&mut p, "page", self.page.map(|v| v.to_string()));
        push_param(&mut p, "pageSize", self.page_size.map(|v| v.to_string()));
        p
    }
}
