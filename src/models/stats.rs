use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One language's cumulative byte count across all scanned repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageUsage {
    pub language: String,
    pub bytes: u64,
}

/// A repository whose language fetch failed; it contributed zero bytes.
///
/// Carried in the response so the frontend can tell "no usage" apart from
/// "fetch failed".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageFetchFailure {
    pub repo: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStatsResponse {
    pub generation: u64,
    pub languages: Vec<LanguageUsage>,
    pub total_bytes: u64,
    pub failures: Vec<LanguageFetchFailure>,
}

/// Commit count for a single calendar day of the activity window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCommits {
    pub date: NaiveDate,
    /// Short `MM-DD` label for the bar chart axis.
    pub label: String,
    pub commits: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub generation: u64,
    pub days: Vec<DailyCommits>,
}
