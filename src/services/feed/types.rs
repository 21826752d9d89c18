use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Comment,
    Reaction,
}

#[derive(Clone, Debug, Serialize)]
pub struct ActivityActor {
    pub id: Uuid,
    pub username: String,
}

/// Denormalized slice of the submission an event happened on, so feed
/// consumers need no second lookup.
#[derive(Clone, Debug, Serialize)]
pub struct SubmissionSummary {
    pub id: Uuid,
    pub prompt: String,
    pub image_url: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct ActivityEntry {
    /// Composite id: `comment-<id>` or `reaction-<id>`.
    pub id: String,

    pub kind: ActivityKind,

    pub actor: ActivityActor,

    pub submission: SubmissionSummary,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reaction_id: Option<String>,

    pub created_at: DateTime<Utc>,

    pub is_read: bool,
}
