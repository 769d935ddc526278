//! Fixed constants of the HireScore model.
//!
//! These are deliberately not part of the runtime configuration: every
//! deployment must turn the same inputs into the same integer score.

/// Linear weights of the HireScore. They sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HireScoreWeights {
    pub skill_overlap: f64,
    pub gpa: f64,
    pub prev_intern: f64,
    pub project_depth: f64,
}

pub const HIRE_SCORE_WEIGHTS: HireScoreWeights = HireScoreWeights {
    skill_overlap: 0.40,
    gpa: 0.25,
    prev_intern: 0.20,
    project_depth: 0.15,
};

/// GPA at or below which the GPA factor is 0
pub const GPA_FLOOR: f64 = 2.0;
/// GPA at or above which the GPA factor is 1
pub const GPA_CEILING: f64 = 4.0;

// Explanation buckets. Overlap uses strict `>`, the rest use `>=`.
pub const OVERLAP_MOST: f64 = 0.8;
pub const OVERLAP_SOME: f64 = 0.5;
pub const GPA_STRONG: f64 = 0.9;
pub const GPA_SOLID: f64 = 0.7;
pub const DEPTH_SUBSTANTIAL: f64 = 0.7;
pub const DEPTH_SOME: f64 = 0.3;

/// How many missing skills the explanation names
pub const MISSING_SKILLS_SHOWN: usize = 3;
