// Service exports
pub mod github;
pub mod postgres;
pub mod rate_limit;
pub mod store;

pub use github::{GithubClient, GithubError, RepoStats, project_depth_from_repos};
pub use postgres::PostgresClient;
pub use rate_limit::{RateLimiter, RateLimitKey};
pub use store::{ApplicationStore, ProfileStore, Store};
