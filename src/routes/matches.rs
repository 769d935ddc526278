use actix_web::{web, HttpResponse, Responder};

use crate::error::ApiError;
use crate::models::{HealthResponse, JobMatch, MatchesResponse};
use crate::routes::{AppState, AuthenticatedUser};
use crate::services::{ApplicationStore, ProfileStore};

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/matches", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let db_healthy = state.store.health_check().await.unwrap_or(false);

    let status = if db_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find internship matches for the caller
///
/// POST /api/v1/matches
///
/// No body. The student is identified by the bearer token and the response is
/// `{"jobs": [...]}` sorted by `hireScore`, highest first.
async fn find_matches(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.user_id;

    let profile = state
        .store
        .get_student(user_id)
        .await?
        .ok_or(ApiError::ProfileNotFound)?;

    if !profile.has_skills() {
        tracing::info!("Student {} has no skills on file", user_id);
        return Err(ApiError::ProfileIncomplete);
    }

    tracing::info!(
        "Finding matches for student {} ({} skills, international: {})",
        user_id,
        profile.skills.len(),
        profile.is_international
    );

    let today = chrono::Utc::now().date_naive();
    let result = state
        .matcher
        .find_matches(state.store.as_ref(), &profile, today)
        .await?;

    let response = MatchesResponse {
        jobs: result.matches.into_iter().map(JobMatch::from).collect(),
    };

    tracing::info!(
        "Returning {} matches for student {} ({} candidates, ranked: {})",
        response.jobs.len(),
        user_id,
        result.total_candidates,
        result.ranked
    );

    Ok(HttpResponse::Ok().json(response))
}
