use crate::core::weights::{GPA_CEILING, GPA_FLOOR, HIRE_SCORE_WEIGHTS};
use crate::models::{Contributions, StudentProfile};

/// Map a raw GPA onto the [0, 1] contribution range
///
/// Below 2.0 is 0, above 4.0 is 1, linear in between. Non-finite input is 0.
#[inline]
pub fn normalize_gpa(gpa: f64) -> f64 {
    if !gpa.is_finite() || gpa < GPA_FLOOR {
        return 0.0;
    }
    if gpa > GPA_CEILING {
        return 1.0;
    }
    (gpa - GPA_FLOOR) / (GPA_CEILING - GPA_FLOOR)
}

/// Clamp a factor to [0, 1], mapping NaN to 0
#[inline]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Calculate the HireScore (0-100)
///
/// Scoring formula:
/// score = round(100 * (
///     skill_overlap * 0.40 +
///     gpa * 0.25 +             # already normalized
///     prev_intern * 0.20 +     # 1 or 0
///     project_depth * 0.15
/// ))
///
/// Inputs are clamped to [0, 1] first. Rounding is half-up.
pub fn compute_hire_score(
    skill_overlap: f64,
    gpa: f64,
    prev_intern: bool,
    project_depth: f64,
) -> u8 {
    let w = HIRE_SCORE_WEIGHTS;
    let intern = if prev_intern { 1.0 } else { 0.0 };

    let score = clamp_unit(skill_overlap) * w.skill_overlap
        + clamp_unit(gpa) * w.gpa
        + intern * w.prev_intern
        + clamp_unit(project_depth) * w.project_depth;

    to_percent(score)
}

/// Scale a [0, 1] factor to an integer percentage
#[inline]
pub fn to_percent(value: f64) -> u8 {
    // f64::round is half away from zero, which is half-up for non-negative input
    (clamp_unit(value) * 100.0).round() as u8
}

/// Normalized, request-scoped view of a student profile
#[derive(Debug, Clone, PartialEq)]
pub struct StudentFeatures {
    pub gpa: f64,
    pub prev_intern: bool,
    pub project_depth: f64,
}

impl StudentFeatures {
    /// Absent GPA counts as 0
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self {
            gpa: normalize_gpa(profile.gpa.unwrap_or(0.0)),
            prev_intern: profile.has_prev_intern,
            project_depth: clamp_unit(profile.project_depth),
        }
    }

    pub fn hire_score(&self, skill_overlap: f64) -> u8 {
        compute_hire_score(skill_overlap, self.gpa, self.prev_intern, self.project_depth)
    }

    pub fn contributions(&self, skill_overlap: f64) -> Contributions {
        Contributions {
            overlap: to_percent(skill_overlap),
            gpa: to_percent(self.gpa),
            prev_intern: if self.prev_intern { 100 } else { 0 },
            project_depth: to_percent(self.project_depth),
        }
    }
}
