// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{StudentProfile, JobPosting, Contributions, Explanation, ScoredMatch, ProfileCompletion, ActiveJob};
pub use requests::{CompleteProfileRequest, ExtractSkillsRequest, ApplyRequest};
pub use responses::{JobMatch, MatchesResponse, HealthResponse, ErrorResponse, ProfileResponse, SkillsResponse, ApplyResponse};
