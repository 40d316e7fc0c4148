use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use uuid::Uuid;
use validator::Validate;

use crate::models::assessment::AssessmentSection;

use super::push_param;

/// Sections and questions arrive fully formed from the builder, client
/// ids included; only the assessment's own id is server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAssessmentPayload {
    pub job_id: Option<Uuid>,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub sections: Vec<AssessmentSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertAssessmentPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub sections: Option<Vec<AssessmentSection>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentPayload {
    pub candidate_id: Uuid,
    pub responses: HashMap<Uuid, JsonValue>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAssessmentResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssessmentListQuery {
    pub job_id: Option<Uuid>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl AssessmentListQuery {
    pub fn params(&self) -> Vec<(String, String)> {
        let mut p = Vec::new();
        push_param(&mut p, "jobId", self.job_id.map(|v| v.to_string()));
        push_param(&mut p, "search", self.search.clone());
        push_param(&mut p, "sort", self.sort.clone());
        push_param(&mut p, "page", self.page.map(|v| v.to_string()));
        push_param(&mut p, "pageSize", self.page_size.map(|v| v.to_string()));
        p
    }
}
