use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Combined stars + forks that earn the full community share
const COMMUNITY_DIVISOR: f64 = 50.0;
const COMMUNITY_CAP: f64 = 0.7;
/// Repository size (KB) above which a repo counts as substantial
const LARGE_REPO_KB: u64 = 100;
const LARGE_REPO_DIVISOR: f64 = 10.0;
const LARGE_REPO_CAP: f64 = 0.3;

/// Errors that can occur when fetching repository data.
///
/// These never leave the client: any failure degrades to a depth of 0.
#[derive(Debug, Error)]
pub enum GithubError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Repository counters used for project depth
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RepoStats {
    #[serde(default)]
    pub stargazers_count: Option<u64>,
    #[serde(default)]
    pub forks_count: Option<u64>,
    /// Size in KB
    #[serde(default)]
    pub size: Option<u64>,
}

/// Project depth (0-1) from a public repository listing
///
/// depth = min((stars + forks) / 50, 0.7) + min(repos_over_100kb / 10, 0.3)
pub fn project_depth_from_repos(repos: &[RepoStats]) -> f64 {
    if repos.is_empty() {
        return 0.0;
    }

    let mut community = 0u64;
    let mut large = 0u64;
    for repo in repos {
        community += repo.stargazers_count.unwrap_or(0) + repo.forks_count.unwrap_or(0);
        if repo.size.unwrap_or(0) > LARGE_REPO_KB {
            large += 1;
        }
    }

    let score = (community as f64 / COMMUNITY_DIVISOR).min(COMMUNITY_CAP)
        + (large as f64 / LARGE_REPO_DIVISOR).min(LARGE_REPO_CAP);

    score.min(1.0)
}

/// Unauthenticated GitHub REST client
///
/// One request per call, no retries and no caching.
pub struct GithubClient {
    base_url: String,
    user_agent: String,
    client: Client,
}

impl GithubClient {
    /// Create a new GitHub client
    pub fn new(
        base_url: String,
        user_agent: String,
        timeout: Duration,
    ) -> Result<Self, GithubError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            user_agent,
            client,
        })
    }

    /// Project depth for a GitHub user, 0.0 when it cannot be determined
    pub async fn fetch_project_depth(&self, username: &str) -> f64 {
        let username = username.trim();
        if username.is_empty() {
            return 0.0;
        }

        match self.list_repos(username).await {
            Ok(repos) => {
                let depth = project_depth_from_repos(&repos);
                tracing::debug!(
                    "GitHub user {} has {} public repos, project depth {:.2}",
                    username,
                    repos.len(),
                    depth
                );
                depth
            }
            Err(e) => {
                tracing::warn!("Failed to fetch GitHub repos for {}: {}", username, e);
                0.0
            }
        }
    }

    /// Fetch up to 100 most recently updated public repositories
    pub async fn list_repos(&self, username: &str) -> Result<Vec<RepoStats>, GithubError> {
        let url = format!(
            "{}/users/{}/repos?per_page=100&sort=updated",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(username)
        );

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github.v3+json")
            .header("User-Agent", &self.user_agent)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GithubError::ApiError(format!(
                "Failed to list repos: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let repos = json
            .as_array()
            .ok_or_else(|| GithubError::InvalidResponse("Expected a list of repositories".into()))?;

        // An unreadable entry counts as an empty repo rather than failing the listing
        Ok(repos
            .iter()
            .map(|repo| {
                serde_json::from_value(repo.clone()).unwrap_or_else(|e| {
                    tracing::debug!("Skipping unreadable repo entry for {}: {}", username, e);
                    RepoStats::default()
                })
            })
            .collect())
    }
}
