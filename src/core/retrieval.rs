use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::core::filters::is_open_internship;
use crate::error::StoreError;
use crate::models::JobPosting;

/// Errors from candidate retrieval
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("both retrieval paths failed (primary: {primary}; fallback: {fallback})")]
    Unavailable {
        primary: StoreError,
        fallback: StoreError,
    },
}

/// Source of internship postings
///
/// Implementations apply the internship-title, open-window and visa filters
/// server-side. The core re-applies them to whatever comes back.
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Ranked path: similarity search over job skills, `similarity` set on each posting
    async fn match_internships(
        &self,
        student_skills: &[String],
        is_international: bool,
        today: NaiveDate,
    ) -> Result<Vec<JobPosting>, StoreError>;

    /// Fallback path: plain scan of open internships, `similarity` unset
    async fn scan_open_internships(
        &self,
        is_international: bool,
        today: NaiveDate,
        limit: i64,
    ) -> Result<Vec<JobPosting>, StoreError>;
}

/// Retrieved postings, tagged by how their skill overlap must be obtained
#[derive(Debug, Clone)]
pub enum Candidates {
    /// Overlap is the external similarity score
    Ranked(Vec<JobPosting>),
    /// Overlap must be computed locally from skill lists
    Unranked(Vec<JobPosting>),
}

impl Candidates {
    pub fn len(&self) -> usize {
        self.jobs().len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs().is_empty()
    }

    pub fn jobs(&self) -> &[JobPosting] {
        match self {
            Candidates::Ranked(jobs) | Candidates::Unranked(jobs) => jobs,
        }
    }

    pub fn is_ranked(&self) -> bool {
        matches!(self, Candidates::Ranked(_))
    }
}

/// Inputs to candidate retrieval
#[derive(Debug, Clone)]
pub struct CandidateQuery<'a> {
    pub skills: &'a [String],
    pub is_international: bool,
    pub today: NaiveDate,
    pub fallback_limit: i64,
}

/// Fetch candidate postings, falling back to a table scan when the
/// similarity search fails
///
/// Each path is attempted once; there are no retries.
pub async fn retrieve_candidates<S>(
    source: &S,
    query: &CandidateQuery<'_>,
) -> Result<Candidates, RetrievalError>
where
    S: JobSource + ?Sized,
{
    let primary = source
        .match_internships(query.skills, query.is_international, query.today)
        .await;

    let primary_err = match primary {
        Ok(jobs) => {
            let jobs = retain_eligible(jobs, query);
            tracing::debug!("Similarity search returned {} candidates", jobs.len());
            return Ok(Candidates::Ranked(jobs));
        }
        Err(e) => e,
    };

    tracing::warn!("Similarity search failed, falling back to table scan: {}", primary_err);

    match source
        .scan_open_internships(query.is_international, query.today, query.fallback_limit)
        .await
    {
        Ok(jobs) => {
            let jobs = retain_eligible(jobs, query);
            tracing::debug!("Fallback scan returned {} candidates", jobs.len());
            Ok(Candidates::Unranked(jobs))
        }
        Err(fallback_err) => {
            tracing::error!("Fallback scan failed: {}", fallback_err);
            Err(RetrievalError::Unavailable {
                primary: primary_err,
                fallback: fallback_err,
            })
        }
    }
}

fn retain_eligible(mut jobs: Vec<JobPosting>, query: &CandidateQuery<'_>) -> Vec<JobPosting> {
    let before = jobs.len();
    jobs.retain(|job| is_open_internship(job, query.today, query.is_international));
    if jobs.len() != before {
        tracing::warn!(
            "Dropped {} postings that failed the internship filters",
            before - jobs.len()
        );
    }
    jobs
}
