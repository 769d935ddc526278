use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::models::domain::{Explanation, ScoredMatch};

/// One ranked job in the match response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMatch {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub city: String,
    pub description: String,
    pub skills: Vec<String>,
    #[serde(rename = "hireScore")]
    pub hire_score: u8,
    pub apply_url: Option<String>,
    pub explanation: Explanation,
}

impl From<ScoredMatch> for JobMatch {
    fn from(scored: ScoredMatch) -> Self {
        let job = scored.job;
        Self {
            id: job.id,
            title: job.title,
            company: job.company,
            city: job.city,
            description: job.description,
            skills: job.skills,
            hire_score: scored.hire_score,
            apply_url: job.apply_url,
            explanation: scored.explanation,
        }
    }
}

/// Response for the matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub jobs: Vec<JobMatch>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Profile completion response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub gpa: Option<f64>,
    pub has_prev_intern: bool,
    pub github: Option<String>,
    pub project_depth: f64,
}

/// Skill extraction response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsResponse {
    pub success: bool,
    pub skills: Vec<String>,
    pub message: String,
}

/// Application response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub success: bool,
    pub application_id: Uuid,
    pub apply_url: Option<String>,
    pub message: String,
}
