use serde::{Deserialize, Serialize};

/// One entry from `GET /users/{username}/repos`.
///
/// Forked repositories never contribute to language totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub fork: bool,
    pub languages_url: String,
}
