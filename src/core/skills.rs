//! Skill matching shared by the fallback overlap and the missing-skill list.
//!
//! Both must go through [`skills_match`] so that an explanation never
//! disagrees with the score it explains.

/// Fuzzy skill relation: case-insensitive substring containment in either
/// direction. Blank skills never match.
#[inline]
pub fn skills_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Whether any skill in `pool` matches `skill`
#[inline]
pub fn has_matching_skill(skill: &str, pool: &[String]) -> bool {
    pool.iter().any(|other| skills_match(skill, other))
}

/// Local surrogate for similarity when the ranked search is unavailable
///
/// Counts student skills that match at least one job skill and divides by
/// the larger of the two list sizes. Returns 0.0 when both are empty.
pub fn skill_overlap(student_skills: &[String], job_skills: &[String]) -> f64 {
    let max_skills = student_skills.len().max(job_skills.len());
    if max_skills == 0 {
        return 0.0;
    }

    let matched = student_skills
        .iter()
        .filter(|skill| has_matching_skill(skill, job_skills))
        .count();

    matched as f64 / max_skills as f64
}

/// Job skills no student skill covers, in job order
///
/// Blank job skills are not something a student can add, so they are skipped.
pub fn missing_skills(student_skills: &[String], job_skills: &[String]) -> Vec<String> {
    job_skills
        .iter()
        .filter(|skill| !skill.trim().is_empty())
        .filter(|skill| !has_matching_skill(skill, student_skills))
        .cloned()
        .collect()
}
