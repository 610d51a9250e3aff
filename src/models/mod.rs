//! Data transfer objects (DTOs) for the JSON API.
//!
//! Raw GitHub payloads are deserialized as-is; aggregated shapes are
//! serialized for the dashboard frontend.
//! - `user`: UserProfile (profile card pass-through)
//! - `repo`: Repo (repository listing entry)
//! - `event`: UserEvent and its push payload
//! - `stats`: LanguageUsage, DailyCommits and the chart responses

pub mod event;
pub mod repo;
pub mod stats;
pub mod user;

pub use event::*;
pub use repo::*;
pub use stats::*;
pub use user::*;
