use async_trait::async_trait;
use uuid::Uuid;

use crate::core::retrieval::JobSource;
use crate::error::StoreError;
use crate::models::{ActiveJob, ProfileCompletion, StudentProfile};

/// Read/write access to student profiles
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// `None` when the user has no student row
    async fn get_student(&self, user_id: Uuid) -> Result<Option<StudentProfile>, StoreError>;

    /// Returns `false` when the user has no student row
    async fn complete_profile(
        &self,
        user_id: Uuid,
        completion: &ProfileCompletion,
    ) -> Result<bool, StoreError>;

    /// Returns `false` when the user has no student row
    async fn set_skills(&self, user_id: Uuid, skills: &[String]) -> Result<bool, StoreError>;
}

/// Writes behind the apply endpoint
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn get_active_job(&self, job_id: Uuid) -> Result<Option<ActiveJob>, StoreError>;

    async fn has_applied(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, StoreError>;

    /// Fails with `StoreError::Conflict` when the application already exists
    async fn insert_application(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        hire_score: Option<i32>,
    ) -> Result<Uuid, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Everything the HTTP layer needs from storage
pub trait Store: ProfileStore + ApplicationStore + JobSource {}

impl<T> Store for T where T: ProfileStore + ApplicationStore + JobSource {}
