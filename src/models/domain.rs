use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Student attributes the matcher reads from the `students` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentProfile {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(rename = "hasPrevIntern", default)]
    pub has_prev_intern: bool,
    #[serde(rename = "projectDepth", default)]
    pub project_depth: f64,
    #[serde(rename = "isInternational", default)]
    pub is_international: bool,
    #[serde(default)]
    pub github: Option<String>,
}

impl StudentProfile {
    /// A profile without a single non-blank skill cannot be matched
    pub fn has_skills(&self) -> bool {
        self.skills.iter().any(|s| !s.trim().is_empty())
    }
}

/// Internship posting as returned by either retrieval path
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobPosting {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub city: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(rename = "applyUrl", default)]
    pub apply_url: Option<String>,
    #[serde(rename = "sponsorsVisa", default)]
    pub sponsors_visa: bool,
    #[serde(rename = "opensAt", default)]
    pub opens_at: Option<NaiveDate>,
    #[serde(rename = "closesAt", default)]
    pub closes_at: Option<NaiveDate>,
    /// Only set by the ranked (similarity search) path
    #[serde(default)]
    pub similarity: Option<f64>,
}

/// Per-factor contributions as integer percentages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributions {
    pub overlap: u8,
    pub gpa: u8,
    #[serde(rename = "prevIntern")]
    pub prev_intern: u8,
    #[serde(rename = "projectDepth")]
    pub project_depth: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    pub contributions: Contributions,
    #[serde(rename = "missingSkills")]
    pub missing_skills: Vec<String>,
    pub lines: Vec<String>,
}

/// Scored match result, built fresh for every request
#[derive(Debug, Clone)]
pub struct ScoredMatch {
    pub job: JobPosting,
    pub hire_score: u8,
    pub explanation: Explanation,
}

/// Fields written by profile completion
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCompletion {
    pub gpa: Option<f64>,
    pub has_prev_intern: bool,
    pub github: Option<String>,
    pub project_depth: f64,
}

/// The slice of a job row the apply path needs
#[derive(Debug, Clone)]
pub struct ActiveJob {
    pub id: Uuid,
    pub apply_url: Option<String>,
}
