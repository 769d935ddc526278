use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::core::retrieval::RetrievalError;
use crate::models::ErrorResponse;

/// Errors that can occur when talking to the data store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Conflict: {0}")]
    Conflict(String),
}

/// Request-terminal errors, rendered as JSON `ErrorResponse`s
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    #[error("student profile not found")]
    ProfileNotFound,

    #[error("student profile has no skills")]
    ProfileIncomplete,

    #[error("candidate retrieval unavailable")]
    RetrievalUnavailable,

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("rate limit exceeded")]
    RateLimited,

    #[error("job not found or inactive")]
    JobNotFound,

    #[error("already applied")]
    AlreadyApplied,

    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "unauthorized",
            ApiError::ProfileNotFound => "profile_not_found",
            ApiError::ProfileIncomplete => "profile_incomplete",
            ApiError::RetrievalUnavailable => "retrieval_unavailable",
            ApiError::Validation(_) => "validation_failed",
            ApiError::RateLimited => "rate_limited",
            ApiError::JobNotFound => "job_not_found",
            ApiError::AlreadyApplied => "already_applied",
            ApiError::Storage(_) => "internal_error",
        }
    }

    /// Message shown to the caller. Internal details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Unauthenticated(_) => "Unauthorized".to_string(),
            ApiError::ProfileNotFound => {
                "Student profile not found. Please upload a resume first.".to_string()
            }
            ApiError::ProfileIncomplete => {
                "No skills found in profile. Please upload a resume first.".to_string()
            }
            ApiError::RetrievalUnavailable => "Failed to fetch job matches".to_string(),
            ApiError::Validation(msg) => msg.clone(),
            ApiError::RateLimited => {
                "Rate limit exceeded. Please wait before applying again.".to_string()
            }
            ApiError::JobNotFound => "Job not found or inactive".to_string(),
            ApiError::AlreadyApplied => "Already applied to this job".to_string(),
            ApiError::Storage(_) => "Internal server error".to_string(),
        }
    }
}

impl From<RetrievalError> for ApiError {
    fn from(_: RetrievalError) -> Self {
        ApiError::RetrievalUnavailable
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::ProfileNotFound | ApiError::JobNotFound => StatusCode::NOT_FOUND,
            ApiError::ProfileIncomplete | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::AlreadyApplied => StatusCode::CONFLICT,
            ApiError::RetrievalUnavailable | ApiError::Storage(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            ApiError::Storage(e) => tracing::error!("Storage error: {}", e),
            ApiError::Unauthenticated(reason) => tracing::debug!("Rejected request: {}", reason),
            _ => {}
        }

        HttpResponse::build(status).json(ErrorResponse {
            error: self.kind().to_string(),
            message: self.public_message(),
            status_code: status.as_u16(),
        })
    }
}
