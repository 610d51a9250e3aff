//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for all failure conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP
//! responses with JSON error bodies.
//!
//! Error mappings:
//! - `UserNotFound` → 404
//! - `Superseded` → 409
//! - `Transport`, `UpstreamStatus` → 502
//! - `Internal` → 500

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("GitHub request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub returned {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Query superseded by a newer one")]
    Superseded,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Transport(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
            AppError::UpstreamStatus { status, url } => (
                StatusCode::BAD_GATEWAY,
                format!("GitHub returned {} for {}", status, url),
            ),
            AppError::UserNotFound(login) => {
                (StatusCode::NOT_FOUND, format!("User not found: {}", login))
            }
            AppError::Superseded => (
                StatusCode::CONFLICT,
                "Query superseded by a newer one".to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
