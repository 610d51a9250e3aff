use serde::{Deserialize, Serialize};

/// Raw profile object from `GET /users/{username}`.
///
/// Passed through to the profile card unchanged; `name` is frequently
/// null on GitHub, the frontend falls back to the login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub login: String,
    pub name: Option<String>,
    pub avatar_url: String,
}
