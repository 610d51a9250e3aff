use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use crate::error::Result;
use crate::models::UserProfile;
use crate::routes::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/api/v1/users/{username}/profile", get(get_profile))
        .with_state(state)
}

async fn get_profile(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<UserProfile>> {
    let profile = state.github.user(&username).await?;
    Ok(Json(profile))
}
