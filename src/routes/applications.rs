use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::{ApiError, StoreError};
use crate::models::{ApplyRequest, ApplyResponse};
use crate::routes::{AppState, AuthenticatedUser};
use crate::services::{ApplicationStore, RateLimitKey};

/// Configure application routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/applications", web::post().to(apply));
}

/// Record an application to an active job
///
/// POST /api/v1/applications
///
/// Request body:
/// ```json
/// {
///   "job_id": "uuid",
///   "hire_score": 72,
///   "apply_url": "https://..."
/// }
/// ```
///
/// Limited per user. The response carries the URL the client should open,
/// preferring the one sent in the request over the job's own.
async fn apply(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<ApplyRequest>,
) -> Result<HttpResponse, ApiError> {
    let user_id = user.user_id;

    if !state
        .apply_limiter
        .check(&RateLimitKey::apply(&user_id.to_string()))
        .await
    {
        tracing::info!("Apply rate limit hit for student {}", user_id);
        return Err(ApiError::RateLimited);
    }

    req.validate()?;

    let job = state
        .store
        .get_active_job(req.job_id)
        .await?
        .ok_or(ApiError::JobNotFound)?;

    if state.store.has_applied(user_id, job.id).await? {
        return Err(ApiError::AlreadyApplied);
    }

    // A concurrent request can still win the race; the unique key catches it
    let application_id = match state
        .store
        .insert_application(user_id, job.id, req.hire_score)
        .await
    {
        Ok(id) => id,
        Err(StoreError::Conflict(_)) => return Err(ApiError::AlreadyApplied),
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        "Student {} applied to job {} (application {})",
        user_id,
        job.id,
        application_id
    );

    let apply_url = req.apply_url.clone().or(job.apply_url);

    Ok(HttpResponse::Ok().json(ApplyResponse {
        success: true,
        application_id,
        apply_url,
        message: "Application recorded".to_string(),
    }))
}
