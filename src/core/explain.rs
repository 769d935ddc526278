use crate::core::weights::{
    DEPTH_SOME, DEPTH_SUBSTANTIAL, GPA_SOLID, GPA_STRONG, MISSING_SKILLS_SHOWN, OVERLAP_MOST,
    OVERLAP_SOME,
};

/// Build the human-readable rationale for a HireScore
///
/// Always emits lines in this order, each bucket evaluated independently:
/// skill coverage, missing-skill tip (only when skills are missing), GPA,
/// internship history, project depth. The result therefore has 4 lines, or
/// 5 when `missing_skills` is non-empty.
///
/// All factors are expected in normalized form (0-1).
pub fn build_explanation(
    overlap: f64,
    gpa: f64,
    prev_intern: bool,
    project_depth: f64,
    missing_skills: &[String],
) -> Vec<String> {
    let mut lines = Vec::with_capacity(5);

    lines.push(skill_line(overlap).to_string());

    if !missing_skills.is_empty() {
        let shown = missing_skills
            .iter()
            .take(MISSING_SKILLS_SHOWN)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("Try adding: {}.", shown));
    }

    lines.push(gpa_line(gpa).to_string());

    lines.push(
        if prev_intern {
            "Prior internship experience is a big plus."
        } else {
            "No prior internship—companies may prefer proven interns."
        }
        .to_string(),
    );

    lines.push(depth_line(project_depth).to_string());

    lines
}

fn skill_line(overlap: f64) -> &'static str {
    if overlap > OVERLAP_MOST {
        "Your résumé covers most core skills listed."
    } else if overlap > OVERLAP_SOME {
        "You match some key skills, but could highlight more."
    } else {
        "Few required skills appear in your résumé."
    }
}

fn gpa_line(gpa: f64) -> &'static str {
    if gpa >= GPA_STRONG {
        "Strong GPA boosts your score."
    } else if gpa >= GPA_SOLID {
        "GPA is solid but not standout."
    } else {
        "Low GPA lowers your match quality."
    }
}

fn depth_line(depth: f64) -> &'static str {
    if depth >= DEPTH_SUBSTANTIAL {
        "Your GitHub shows substantial, starred projects—great signal."
    } else if depth >= DEPTH_SOME {
        "Some repos detected; adding larger projects would improve visibility."
    } else {
        "Few public GitHub projects found—consider open-sourcing work."
    }
}
