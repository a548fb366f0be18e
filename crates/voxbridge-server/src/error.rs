use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use voxbridge::errors::{AgentError, ErrorKind};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {env_var}: {reason}")]
    InvalidValue { env_var: String, reason: String },
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

// Convert a configuration key like `server.port` into its environment variable `SERVER__PORT`
pub fn to_env_var(field_path: &str) -> String {
    field_path.replace('.', "__").to_uppercase()
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Errors returned from HTTP handlers, always rendered as `{"error": message}`
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    InternalServerError(String),
}

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        match err.kind() {
            ErrorKind::Validation => ApiError::BadRequest(err.to_string()),
            ErrorKind::Configuration | ErrorKind::Upstream => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse { error })).into_response()
    }
}
