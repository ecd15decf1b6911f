use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Startup-time configuration failure. Raised while building the engine or loading
/// its tables, never while scoring.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Scoring weights must sum to 1.0 (got {sum:.4})")]
    WeightSum { sum: f64 },

    #[error("{name} must be within [0, 1] (got {value})")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("Score thresholds must satisfy min <= medium <= high (got {min} / {medium} / {high})")]
    ThresholdOrder { min: f64, medium: f64, high: f64 },

    #[error("Experience thresholds must not decrease from junior to senior")]
    ExperienceOrder,

    #[error("max_skill_recommendations must be at least 1")]
    NoSkillRecommendations,

    #[error("Skill taxonomy is malformed: {0}")]
    Taxonomy(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
