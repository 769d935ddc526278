use chrono::NaiveDate;
use crate::models::JobPosting;

/// Title substring that marks a posting as an internship (matched case-insensitively)
pub const INTERNSHIP_PATTERN: &str = "intern";

/// Check if a posting title looks like an internship
#[inline]
pub fn is_internship_title(title: &str) -> bool {
    title.to_lowercase().contains(INTERNSHIP_PATTERN)
}

/// Check if a posting is open on `today`
///
/// A posting without an open date is never open. A missing close date
/// means the posting stays open indefinitely.
#[inline]
pub fn is_open_on(job: &JobPosting, today: NaiveDate) -> bool {
    let opened = matches!(job.opens_at, Some(opens) if opens <= today);
    let not_closed = job.closes_at.map_or(true, |closes| closes >= today);
    opened && not_closed
}

/// International students only see postings that sponsor visas
#[inline]
pub fn is_visible_to(job: &JobPosting, is_international: bool) -> bool {
    !is_international || job.sponsors_visa
}

/// Full candidate filter applied to both retrieval paths
#[inline]
pub fn is_open_internship(job: &JobPosting, today: NaiveDate, is_international: bool) -> bool {
    is_internship_title(&job.title)
        && is_open_on(job, today)
        && is_visible_to(job, is_international)
}
