//! RaiderMatch - internship matching service
//!
//! Ranks open internship postings for a student by HireScore, a weighted
//! blend of skill overlap, GPA, prior internship experience and GitHub
//! project depth, and explains each score in plain sentences.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{compute_hire_score, normalize_gpa, skill_overlap, Matcher};
pub use error::{ApiError, StoreError};
pub use models::{Explanation, JobPosting, ScoredMatch, StudentProfile};
