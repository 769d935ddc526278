//! Skill extraction from plain résumé text

use regex::Regex;

/// Skills recognised by name, in the order they are reported
pub const KNOWN_SKILLS: &[&str] = &[
    "JavaScript", "TypeScript", "React", "Angular", "Vue", "Node.js", "Express",
    "Python", "Java", "C++", "C#", "PHP", "Ruby", "Go", "Rust", "Swift",
    "HTML", "CSS", "SQL", "MongoDB", "PostgreSQL", "MySQL", "Redis",
    "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Git", "Linux",
    "Machine Learning", "AI", "Data Science", "TensorFlow", "PyTorch",
    "REST APIs", "GraphQL", "Microservices", "CI/CD", "Agile", "Scrum",
    "Figma", "Adobe Creative Suite", "Photoshop", "Illustrator",
    "Network Security", "Cybersecurity", "Penetration Testing", "SIEM",
    "Tableau", "Power BI", "R", "Statistics", "Analytics",
];

/// Spellings that map onto a canonical skill name
const ALIASES: &[(&str, &str)] = &[
    (r"\b(?:javascript|js)\b", "JavaScript"),
    (r"\b(?:typescript|ts)\b", "TypeScript"),
    (r"\bnode\.?js\b", "Node.js"),
    (r"\breact\.?js\b", "React"),
    (r"\bc\+\+(?:[^\w+]|$)", "C++"),
    (r"\bc#(?:[^\w#]|$)", "C#"),
];

/// Extracts known skills from résumé text
///
/// A dictionary skill matches when it appears as a whole token, so "R"
/// does not match inside "React" and "Java" does not match "JavaScript".
pub struct SkillExtractor {
    known: Vec<(Regex, &'static str)>,
    aliases: Vec<(Regex, &'static str)>,
}

impl SkillExtractor {
    pub fn new() -> Result<Self, regex::Error> {
        let known = KNOWN_SKILLS
            .iter()
            .map(|skill| {
                let pattern = format!(
                    r"(?i)(?:^|[^a-z0-9]){}(?:$|[^a-z0-9])",
                    regex::escape(skill)
                );
                Regex::new(&pattern).map(|re| (re, *skill))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let aliases = ALIASES
            .iter()
            .map(|(pattern, skill)| Regex::new(&format!("(?i){}", pattern)).map(|re| (re, *skill)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { known, aliases })
    }

    /// Return the distinct skills mentioned in `text`
    ///
    /// Dictionary hits come first in dictionary order, followed by any
    /// skill found only through an alias.
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found: Vec<String> = Vec::new();

        let hits = self
            .known
            .iter()
            .chain(self.aliases.iter())
            .filter(|(re, _)| re.is_match(text))
            .map(|(_, skill)| *skill);

        for skill in hits {
            if !found.iter().any(|existing| existing == skill) {
                found.push(skill.to_string());
            }
        }

        found
    }
}
