pub mod assessment_dto;
pub mod candidate_dto;
pub mod job_dto;

use serde::{Deserialize, Serialize};

/// Common list-endpoint envelope. `total` is the post-filter,
/// pre-pagination count.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

pub(crate) fn push_param(params: &mut Vec<(String, String)>, name: &str, value: Option<String>) {
    if let Some(v) = value {
        if !v.is_empty() {
            params.push((name.to_string(), v));
        }
    }
}
