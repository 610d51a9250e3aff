//! API route handlers - maps HTTP endpoints to GitHub queries.
//!
//! Each submodule serves one dashboard component:
//! - `profile`: raw user profile (GET /api/v1/users/{username}/profile)
//! - `languages`: language usage totals for the pie chart
//! - `activity`: 30-day commit counts for the bar chart

pub mod activity;
pub mod languages;
pub mod profile;

use std::sync::Arc;

use axum::Router;
use serde::Deserialize;

use crate::github::GitHubClient;
use crate::query::{QueryCounter, QueryToken};

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    pub github: GitHubClient,
    pub queries: Arc<QueryCounter>,
}

impl AppState {
    pub fn new(github: GitHubClient) -> Self {
        Self {
            github,
            queries: QueryCounter::new(),
        }
    }

    /// Token for an incoming query. The frontend passes the generation it
    /// assigned on submit; plain API consumers get a fresh one.
    pub fn query_token(&self, generation: Option<u64>) -> QueryToken {
        match generation {
            Some(generation) => self.queries.observe(generation),
            None => self.queries.begin(),
        }
    }
}

/// Generation id the frontend attaches to each aggregation request.
#[derive(Debug, Deserialize)]
pub struct GenerationQuery {
    pub generation: Option<u64>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(profile::routes(state.clone()))
        .merge(languages::routes(state.clone()))
        .merge(activity::routes(state))
}
