use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

use crate::core::retrieval::JobSource;
use crate::error::StoreError;
use crate::models::{ActiveJob, JobPosting, ProfileCompletion, StudentProfile};
use crate::services::store::{ApplicationStore, ProfileStore};

/// Columns shared by both retrieval queries
const JOB_COLUMNS: &str =
    "id, title, company, city, description, skills, apply_url, sponsors_visa, opens_at, closes_at";

/// PostgreSQL client for students, jobs and applications
///
/// The similarity search lives server-side in the `match_internships`
/// function (pg_trgm), created by the migrations.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }
}

fn job_from_row(row: &PgRow, with_similarity: bool) -> Result<JobPosting, sqlx::Error> {
    let similarity = if with_similarity {
        row.try_get::<Option<f64>, _>("similarity")?
    } else {
        None
    };

    Ok(JobPosting {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        company: row.try_get("company")?,
        city: row.try_get("city")?,
        description: row.try_get("description")?,
        skills: row
            .try_get::<Option<Vec<String>>, _>("skills")?
            .unwrap_or_default(),
        apply_url: row.try_get("apply_url")?,
        sponsors_visa: row
            .try_get::<Option<bool>, _>("sponsors_visa")?
            .unwrap_or(false),
        opens_at: row.try_get::<Option<NaiveDate>, _>("opens_at")?,
        closes_at: row.try_get::<Option<NaiveDate>, _>("closes_at")?,
        similarity,
    })
}

fn student_from_row(row: &PgRow) -> Result<StudentProfile, sqlx::Error> {
    Ok(StudentProfile {
        user_id: row.try_get("user_id")?,
        skills: row
            .try_get::<Option<Vec<String>>, _>("skills")?
            .unwrap_or_default(),
        gpa: row.try_get("gpa")?,
        has_prev_intern: row
            .try_get::<Option<bool>, _>("has_prev_intern")?
            .unwrap_or(false),
        project_depth: row
            .try_get::<Option<f64>, _>("project_depth")?
            .unwrap_or(0.0),
        is_international: row
            .try_get::<Option<bool>, _>("is_international")?
            .unwrap_or(false),
        github: row.try_get("github")?,
    })
}

#[async_trait]
impl JobSource for PostgresClient {
    async fn match_internships(
        &self,
        student_skills: &[String],
        is_international: bool,
        today: NaiveDate,
    ) -> Result<Vec<JobPosting>, StoreError> {
        let query = format!(
            "SELECT {}, similarity FROM match_internships($1, $2, $3)",
            JOB_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(student_skills)
            .bind(is_international)
            .bind(today)
            .fetch_all(&self.pool)
            .await?;

        let jobs = rows
            .iter()
            .map(|row| job_from_row(row, true))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("match_internships returned {} rows", jobs.len());

        Ok(jobs)
    }

    async fn scan_open_internships(
        &self,
        is_international: bool,
        today: NaiveDate,
        limit: i64,
    ) -> Result<Vec<JobPosting>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM jobs
            WHERE title ILIKE '%intern%'
              AND COALESCE(is_active, TRUE)
              AND opens_at <= $1
              AND (closes_at IS NULL OR closes_at >= $1)
              AND ($2 = FALSE OR sponsors_visa = TRUE)
            LIMIT $3
            "#,
            JOB_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(today)
            .bind(is_international)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        let jobs = rows
            .iter()
            .map(|row| job_from_row(row, false))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Fallback scan returned {} rows", jobs.len());

        Ok(jobs)
    }
}

#[async_trait]
impl ProfileStore for PostgresClient {
    async fn get_student(&self, user_id: Uuid) -> Result<Option<StudentProfile>, StoreError> {
        let query = r#"
            SELECT user_id, skills, gpa, has_prev_intern, project_depth, is_international, github
            FROM students
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(student_from_row).transpose()?)
    }

    async fn complete_profile(
        &self,
        user_id: Uuid,
        completion: &ProfileCompletion,
    ) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE students
            SET gpa = $2,
                has_prev_intern = $3,
                github = $4,
                project_depth = $5,
                updated_at = NOW()
            WHERE user_id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(completion.gpa)
            .bind(completion.has_prev_intern)
            .bind(completion.github.as_deref())
            .bind(completion.project_depth)
            .execute(&self.pool)
            .await?;

        tracing::debug!(
            "Completed profile for {} (project depth {:.2})",
            user_id,
            completion.project_depth
        );

        Ok(result.rows_affected() > 0)
    }

    async fn set_skills(&self, user_id: Uuid, skills: &[String]) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE students
            SET skills = $2,
                updated_at = NOW()
            WHERE user_id = $1
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(skills)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl ApplicationStore for PostgresClient {
    async fn get_active_job(&self, job_id: Uuid) -> Result<Option<ActiveJob>, StoreError> {
        let query = r#"
            SELECT id, apply_url
            FROM jobs
            WHERE id = $1 AND is_active = TRUE
        "#;

        let row = sqlx::query(query)
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;

        let job = row
            .map(|row| -> Result<ActiveJob, sqlx::Error> {
                Ok(ActiveJob {
                    id: row.try_get("id")?,
                    apply_url: row.try_get("apply_url")?,
                })
            })
            .transpose()?;

        Ok(job)
    }

    async fn has_applied(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, StoreError> {
        let query = r#"
            SELECT EXISTS (
                SELECT 1 FROM applications WHERE user_id = $1 AND job_id = $2
            ) AS applied
        "#;

        let row = sqlx::query(query)
            .bind(user_id)
            .bind(job_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.try_get("applied")?)
    }

    /// Uses the (user_id, job_id) unique constraint to catch concurrent duplicates
    async fn insert_application(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        hire_score: Option<i32>,
    ) -> Result<Uuid, StoreError> {
        let query = r#"
            INSERT INTO applications (user_id, job_id, hire_score, status, applied_at)
            VALUES ($1, $2, $3, 'applied', NOW())
            RETURNING id
        "#;

        let result = sqlx::query(query)
            .bind(user_id)
            .bind(job_id)
            .bind(hire_score)
            .fetch_one(&self.pool)
            .await;

        let row = match result {
            Ok(row) => row,
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(StoreError::Conflict(format!(
                    "application for job {} already exists",
                    job_id
                )));
            }
            Err(e) => return Err(e.into()),
        };

        let id: Uuid = row.try_get("id")?;

        tracing::debug!("Recorded application {}: {} -> {}", id, user_id, job_id);

        Ok(id)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
