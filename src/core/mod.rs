// Core algorithm exports
pub mod explain;
pub mod filters;
pub mod matcher;
pub mod resume;
pub mod retrieval;
pub mod scoring;
pub mod skills;
pub mod weights;

pub use explain::build_explanation;
pub use filters::{is_internship_title, is_open_internship, is_open_on, is_visible_to};
pub use matcher::{Matcher, MatchResult};
pub use resume::SkillExtractor;
pub use retrieval::{retrieve_candidates, CandidateQuery, Candidates, JobSource, RetrievalError};
pub use scoring::{compute_hire_score, normalize_gpa, StudentFeatures};
pub use skills::{missing_skills, skill_overlap, skills_match};
pub use weights::HIRE_SCORE_WEIGHTS;
