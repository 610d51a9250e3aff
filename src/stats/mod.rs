//! Aggregation cores behind the dashboard charts.
//!
//! - `languages`: per-language byte totals across non-fork repositories
//! - `activity`: commits per day over a fixed 30-day window

pub mod activity;
pub mod languages;

pub use activity::aggregate_daily_commits;
pub use languages::{LanguageStats, aggregate_languages, rank_languages};
