use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::error::ApiError;
use crate::models::{
    CompleteProfileRequest, ExtractSkillsRequest, ProfileCompletion, ProfileResponse,
    SkillsResponse,
};
use crate::routes::{AppState, AuthenticatedUser};
use crate::services::ProfileStore;

/// Configure student profile routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/students/profile", web::put().to(complete_profile))
        .route("/students/skills", web::post().to(extract_skills));
}

/// Complete the caller's profile
///
/// PUT /api/v1/students/profile
///
/// Request body:
/// ```json
/// {
///   "gpa": 3.6,
///   "has_prev_intern": true,
///   "github": "octocat"
/// }
/// ```
///
/// Project depth is recomputed from the GitHub account on every call and is
/// 0 when no username is given.
async fn complete_profile(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<CompleteProfileRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let github = req.github_username();
    let project_depth = match &github {
        Some(username) => state.github.fetch_project_depth(username).await,
        None => 0.0,
    };

    let completion = ProfileCompletion {
        gpa: req.gpa,
        has_prev_intern: req.has_prev_intern,
        github,
        project_depth,
    };

    let updated = state
        .store
        .complete_profile(user.user_id, &completion)
        .await?;

    if !updated {
        return Err(ApiError::ProfileNotFound);
    }

    tracing::info!(
        "Completed profile for student {} (project depth {:.2})",
        user.user_id,
        completion.project_depth
    );

    Ok(HttpResponse::Ok().json(ProfileResponse {
        success: true,
        gpa: completion.gpa,
        has_prev_intern: completion.has_prev_intern,
        github: completion.github,
        project_depth: completion.project_depth,
    }))
}

/// Replace the caller's skills with those found in résumé text
///
/// POST /api/v1/students/skills
///
/// Request body:
/// ```json
/// { "text": "Built REST APIs in Python and PostgreSQL..." }
/// ```
async fn extract_skills(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    req: web::Json<ExtractSkillsRequest>,
) -> Result<HttpResponse, ApiError> {
    req.validate()?;

    let skills = state.skill_extractor.extract(&req.text);

    let updated = state.store.set_skills(user.user_id, &skills).await?;
    if !updated {
        return Err(ApiError::ProfileNotFound);
    }

    tracing::info!("Extracted {} skills for student {}", skills.len(), user.user_id);

    let message = if skills.is_empty() {
        "No known skills found in résumé text".to_string()
    } else {
        format!("Found {} skills", skills.len())
    };

    Ok(HttpResponse::Ok().json(SkillsResponse {
        success: true,
        skills,
        message,
    }))
}
