use chrono::NaiveDate;

use crate::core::{
    explain::build_explanation,
    retrieval::{retrieve_candidates, CandidateQuery, Candidates, JobSource, RetrievalError},
    scoring::{clamp_unit, StudentFeatures},
    skills::{missing_skills, skill_overlap},
};
use crate::models::{Explanation, JobPosting, ScoredMatch, StudentProfile};

/// Default row cap for the fallback table scan
pub const DEFAULT_FALLBACK_LIMIT: i64 = 10;

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
    pub ranked: bool,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Candidate retrieval (similarity search, or fallback scan)
/// 2. Feature normalization of the student profile
/// 3. HireScore per posting
/// 4. Explanation per posting
/// 5. Ranking by HireScore
#[derive(Debug, Clone)]
pub struct Matcher {
    fallback_limit: i64,
}

impl Matcher {
    pub fn new(fallback_limit: i64) -> Self {
        Self {
            fallback_limit: fallback_limit.max(1),
        }
    }

    pub fn fallback_limit(&self) -> i64 {
        self.fallback_limit
    }

    /// Find and rank internship matches for a student
    ///
    /// # Arguments
    /// * `source` - Where candidate postings come from
    /// * `profile` - The student's profile snapshot
    /// * `today` - Date used for the open/close window
    pub async fn find_matches<S>(
        &self,
        source: &S,
        profile: &StudentProfile,
        today: NaiveDate,
    ) -> Result<MatchResult, RetrievalError>
    where
        S: JobSource + ?Sized,
    {
        let query = CandidateQuery {
            skills: &profile.skills,
            is_international: profile.is_international,
            today,
            fallback_limit: self.fallback_limit,
        };

        let candidates = retrieve_candidates(source, &query).await?;
        let total_candidates = candidates.len();
        let ranked = candidates.is_ranked();

        Ok(MatchResult {
            matches: self.score_candidates(profile, candidates),
            total_candidates,
            ranked,
        })
    }

    /// Score, explain and rank already-retrieved candidates
    ///
    /// Sorting is stable, so equal HireScores keep retrieval order.
    pub fn score_candidates(
        &self,
        profile: &StudentProfile,
        candidates: Candidates,
    ) -> Vec<ScoredMatch> {
        let features = StudentFeatures::from_profile(profile);

        let mut scored: Vec<ScoredMatch> = match candidates {
            Candidates::Ranked(jobs) => jobs
                .into_iter()
                .map(|job| {
                    let overlap = clamp_unit(job.similarity.unwrap_or(0.0));
                    score_job(&features, &profile.skills, job, overlap)
                })
                .collect(),
            Candidates::Unranked(jobs) => jobs
                .into_iter()
                .map(|job| {
                    let overlap = skill_overlap(&profile.skills, &job.skills);
                    score_job(&features, &profile.skills, job, overlap)
                })
                .collect(),
        };

        scored.sort_by(|a, b| b.hire_score.cmp(&a.hire_score));
        scored
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_LIMIT)
    }
}

/// Score and explain a single posting given its skill overlap
pub fn score_job(
    features: &StudentFeatures,
    student_skills: &[String],
    job: JobPosting,
    overlap: f64,
) -> ScoredMatch {
    let missing = missing_skills(student_skills, &job.skills);
    let lines = build_explanation(
        overlap,
        features.gpa,
        features.prev_intern,
        features.project_depth,
        &missing,
    );

    ScoredMatch {
        hire_score: features.hire_score(overlap),
        explanation: Explanation {
            contributions: features.contributions(overlap),
            missing_skills: missing,
            lines,
        },
        job,
    }
}
