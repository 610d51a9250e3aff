use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use tracing::warn;

use crate::error::{AppError, Result};
use crate::models::LanguageStatsResponse;
use crate::routes::{AppState, GenerationQuery};
use crate::stats::{aggregate_languages, rank_languages};

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/users/{username}/languages", get(get_languages))
        .with_state(state)
}

async fn get_languages(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<GenerationQuery>,
) -> Result<Json<LanguageStatsResponse>> {
    let token = state.query_token(query.generation);

    let repos = state.github.repos(&username).await?;
    let github = &state.github;
    let stats = aggregate_languages(&repos, |repo| async move {
        github.repo_languages(&repo.languages_url).await
    })
    .await;

    // last request wins: a newer query makes this result stale
    if !token.is_current() {
        warn!(
            %username,
            generation = token.generation(),
            "discarding superseded language query"
        );
        return Err(AppError::Superseded);
    }

    Ok(Json(LanguageStatsResponse {
        generation: token.generation(),
        total_bytes: stats.total_bytes(),
        languages: rank_languages(&stats.totals),
        failures: stats.failures,
    }))
}
