use axum::http::StatusCode;
use thiserror::Error;

/// Crate-wide error taxonomy. Each variant maps to exactly one HTTP status
/// at the server boundary; see [`RadarError::status`].
#[derive(Debug, Error)]
pub enum RadarError {
    /// Required credential or configuration is absent. The message stays
    /// generic at the boundary so no secret material leaks.
    #[error("server configuration error: {0}")]
    Config(String),

    /// Malformed request body.
    #[error("Invalid request: {0}")]
    Request(String),

    /// AuthGate denied the caller.
    #[error("unauthorized")]
    Auth,

    /// The model call failed, timed out, or returned empty content.
    #[error("upstream model error: {0}")]
    Upstream(String),

    /// Model output is not syntactically valid JSON. The raw text is kept
    /// for server-side diagnostics and never returned to the caller.
    #[error("failed to parse scanner output: {message}")]
    Parse { message: String, raw: String },

    /// Parsed value failed schema checks; names the offending field.
    #[error("invalid scanner report: {0}")]
    Validation(String),

    /// Persistence insert/select failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl RadarError {
    pub fn status(&self) -> StatusCode {
        match self {
            RadarError::Request(_) => StatusCode::BAD_REQUEST,
            RadarError::Auth => StatusCode::UNAUTHORIZED,
            RadarError::Config(_)
            | RadarError::Upstream(_)
            | RadarError::Parse { .. }
            | RadarError::Validation(_)
            | RadarError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The user-facing error string. Config errors are collapsed to a fixed
    /// message and parse errors drop the raw model text.
    pub fn public_message(&self) -> String {
        match self {
            RadarError::Config(_) => "Server configuration error".to_string(),
            RadarError::Parse { message, .. } => {
                format!("Failed to parse scanner output: {}", message)
            }
            other => other.to_string(),
        }
    }
}
