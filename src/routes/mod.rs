// Route exports
pub mod applications;
pub mod auth;
pub mod matches;
pub mod students;

use actix_web::web;
use std::sync::Arc;

use crate::core::{Matcher, SkillExtractor};
use crate::services::{GithubClient, RateLimiter, Store};

pub use auth::{AuthenticatedUser, JwtVerifier};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub github: Arc<GithubClient>,
    pub matcher: Matcher,
    pub apply_limiter: Arc<RateLimiter>,
    pub skill_extractor: Arc<SkillExtractor>,
    pub auth: Arc<JwtVerifier>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(students::configure)
            .configure(applications::configure),
    );
}
