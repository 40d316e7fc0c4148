use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub job_id: Option<Uuid>,
    pub stage: Stage,
    pub resume_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub timeline: Vec<TimelineEvent>,
    pub created_at: DateTime<Utc>,
}

/// The fixed hiring funnel. Transitions are unconstrained; every change is
/// recorded on the candidate's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Applied,
    Screening,
    Interview,
    Assessment,
    Offer,
    Rejected,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Applied,
        Stage::Screening,
        Stage::Interview,
        Stage::Assessment,
        Stage::Offer,
        Stage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "applied",
            Stage::Screening => "screening",
            Stage::Interview => "interview",
            Stage::Assessment => "assessment",
            Stage::Offer => "offer",
            Stage::Rejected => "rejected",
        }
    }
}

/// Immutable, timestamped entry in a candidate's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TimelineEventKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<Stage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineEventKind {
    StageChange,
    NoteAdded,
}

impl TimelineEvent {
    pub fn stage_change(stage: Stage) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: TimelineEventKind::StageChange,
            stage: Some(stage),
            note: None,
            timestamp: Utc::now(),
        }
    }

    pub fn note_added(note: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: TimelineEventKind::NoteAdded,
            stage: None,
            note: Some(note.into()),
            timestamp: Utc::now(),
        }
    }
}
