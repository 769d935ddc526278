use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Profile completion request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CompleteProfileRequest {
    #[validate(range(min = 0.0, max = 4.0, message = "GPA must be between 0.0 and 4.0"))]
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(alias = "hasPrevIntern", default)]
    pub has_prev_intern: bool,
    #[validate(length(max = 39, message = "GitHub usernames are at most 39 characters"))]
    #[serde(default)]
    pub github: Option<String>,
}

impl CompleteProfileRequest {
    /// GitHub username with surrounding whitespace removed, `None` when blank
    pub fn github_username(&self) -> Option<String> {
        self.github
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
    }
}

/// Plain résumé text to extract skills from
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExtractSkillsRequest {
    #[validate(length(min = 1, max = 200000, message = "Résumé text must not be empty"))]
    pub text: String,
}

/// Application request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ApplyRequest {
    #[validate(custom(function = "validate_job_id"))]
    #[serde(alias = "jobId")]
    pub job_id: Uuid,
    #[validate(range(min = 0, max = 100))]
    #[serde(alias = "hireScore", default)]
    pub hire_score: Option<i32>,
    #[validate(url)]
    #[serde(alias = "applyUrl", default)]
    pub apply_url: Option<String>,
}

fn validate_job_id(job_id: &Uuid) -> Result<(), ValidationError> {
    if job_id.is_nil() {
        return Err(ValidationError::new("nil_job_id"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_github_username_is_trimmed() {
        let req = CompleteProfileRequest {
            gpa: Some(3.1),
            has_prev_intern: false,
            github: Some("  octocat ".to_string()),
        };
        assert_eq!(req.github_username().as_deref(), Some("octocat"));

        let blank = CompleteProfileRequest {
            github: Some("   ".to_string()),
            ..req
        };
        assert_eq!(blank.github_username(), None);
    }

    #[test]
    fn test_gpa_range() {
        let req: CompleteProfileRequest =
            serde_json::from_str(r#"{"gpa": 4.2, "hasPrevIntern": true}"#).unwrap();
        assert!(req.has_prev_intern);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_apply_rejects_nil_job() {
        let req = ApplyRequest {
            job_id: Uuid::nil(),
            hire_score: Some(50),
            apply_url: None,
        };
        assert!(req.validate().is_err());
    }
}
