use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw event from `GET /users/{username}/events`.
///
/// The listing mixes many event kinds; only pushes carry commits. Unknown
/// kinds deserialize fine (the type stays a plain string and the payload
/// commits default to empty) and are filtered out during aggregation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEvent {
    #[serde(rename = "type")]
    pub kind: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(default)]
    pub commits: Vec<PushCommit>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushCommit {
    pub sha: String,
    #[serde(default)]
    pub message: String,
}

impl UserEvent {
    pub const PUSH: &'static str = "PushEvent";

    pub fn is_push(&self) -> bool {
        self.kind == Self::PUSH
    }

    /// Commits carried by this push; the events API reports one payload
    /// entry per commit.
    pub fn commit_count(&self) -> u64 {
        self.payload.commits.len() as u64
    }
}
