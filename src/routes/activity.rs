use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use chrono::Utc;
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::ActivityResponse;
use crate::routes::{AppState, GenerationQuery};
use crate::stats::aggregate_daily_commits;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/users/{username}/activity", get(get_activity))
        .with_state(state)
}

async fn get_activity(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<GenerationQuery>,
) -> Result<Json<ActivityResponse>> {
    let token = state.query_token(query.generation);

    let events = state.github.events(&username).await?;
    let days = aggregate_daily_commits(&events, Utc::now().date_naive());

    if !token.is_current() {
        warn!(
            %username,
            generation = token.generation(),
            "discarding superseded activity query"
        );
        return Err(AppError::Superseded);
    }

    Ok(Json(ActivityResponse {
        generation: token.generation(),
        days,
    }))
}
