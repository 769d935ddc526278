// Integration tests for RaiderMatch

use actix_web::{http::StatusCode, test, web, App};
use async_trait::async_trait;
use chrono::NaiveDate;
use jsonwebtoken::{encode, EncodingKey, Header};
use raider_match::core::{JobSource, Matcher, SkillExtractor};
use raider_match::error::StoreError;
use raider_match::models::{ActiveJob, JobPosting, ProfileCompletion, StudentProfile};
use raider_match::routes::{self, AppState, JwtVerifier};
use raider_match::services::{ApplicationStore, GithubClient, ProfileStore, RateLimiter};
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

const SECRET: &str = "integration-secret";

#[derive(Default)]
struct MemoryStore {
    students: Mutex<HashMap<Uuid, StudentProfile>>,
    jobs: Vec<JobPosting>,
    applications: Mutex<Vec<(Uuid, Uuid)>>,
    primary_down: bool,
    fallback_down: bool,
}

impl MemoryStore {
    fn with_student(self, profile: StudentProfile) -> Self {
        self.students.lock().unwrap().insert(profile.user_id, profile);
        self
    }

    fn student(&self, user_id: Uuid) -> Option<StudentProfile> {
        self.students.lock().unwrap().get(&user_id).cloned()
    }
}

#[async_trait]
impl JobSource for MemoryStore {
    async fn match_internships(
        &self,
        _student_skills: &[String],
        _is_international: bool,
        _today: NaiveDate,
    ) -> Result<Vec<JobPosting>, StoreError> {
        if self.primary_down {
            return Err(StoreError::SqlxError(sqlx::Error::Protocol("match_internships missing".into())));
        }
        Ok(self.jobs.clone())
    }

    async fn scan_open_internships(
        &self,
        _is_international: bool,
        _today: NaiveDate,
        limit: i64,
    ) -> Result<Vec<JobPosting>, StoreError> {
        if self.fallback_down {
            return Err(StoreError::SqlxError(sqlx::Error::Protocol("jobs table unreachable".into())));
        }
        Ok(self
            .jobs
            .iter()
            .take(limit as usize)
            .cloned()
            .map(|mut job| {
                job.similarity = None;
                job
            })
            .collect())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn get_student(&self, user_id: Uuid) -> Result<Option<StudentProfile>, StoreError> {
        Ok(self.student(user_id))
    }

    async fn complete_profile(
        &self,
        user_id: Uuid,
        completion: &ProfileCompletion,
    ) -> Result<bool, StoreError> {
        let mut students = self.students.lock().unwrap();
        match students.get_mut(&user_id) {
            Some(profile) => {
                profile.gpa = completion.gpa;
                profile.has_prev_intern = completion.has_prev_intern;
                profile.github = completion.github.clone();
                profile.project_depth = completion.project_depth;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_skills(&self, user_id: Uuid, skills: &[String]) -> Result<bool, StoreError> {
        let mut students = self.students.lock().unwrap();
        match students.get_mut(&user_id) {
            Some(profile) => {
                profile.skills = skills.to_vec();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl ApplicationStore for MemoryStore {
    async fn get_active_job(&self, job_id: Uuid) -> Result<Option<ActiveJob>, StoreError> {
        Ok(self.jobs.iter().find(|job| job.id == job_id).map(|job| ActiveJob {
            id: job.id,
            apply_url: job.apply_url.clone(),
        }))
    }

    async fn has_applied(&self, user_id: Uuid, job_id: Uuid) -> Result<bool, StoreError> {
        Ok(self.applications.lock().unwrap().contains(&(user_id, job_id)))
    }

    async fn insert_application(
        &self,
        user_id: Uuid,
        job_id: Uuid,
        _hire_score: Option<i32>,
    ) -> Result<Uuid, StoreError> {
        let mut applications = self.applications.lock().unwrap();
        if applications.contains(&(user_id, job_id)) {
            return Err(StoreError::Conflict("duplicate application".into()));
        }
        applications.push((user_id, job_id));
        Ok(Uuid::new_v4())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}

#[derive(Serialize)]
struct Claims {
    sub: String,
    aud: String,
    exp: usize,
}

fn bearer(user_id: Uuid) -> (&'static str, String) {
    let claims = Claims {
        sub: user_id.to_string(),
        aud: "authenticated".to_string(),
        exp: (chrono::Utc::now().timestamp() + 3600) as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .unwrap();
    ("Authorization", format!("Bearer {}", token))
}

fn create_test_job(title: &str, skills: &[&str], similarity: f64, sponsors_visa: bool) -> JobPosting {
    let today = chrono::Utc::now().date_naive();
    JobPosting {
        id: Uuid::new_v4(),
        title: title.to_string(),
        company: "Acme".to_string(),
        city: "Lubbock".to_string(),
        description: "Summer internship".to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        apply_url: Some(format!("https://jobs.example/{}", title.replace(' ', "-"))),
        sponsors_visa,
        opens_at: today.pred_opt(),
        closes_at: today.succ_opt(),
        similarity: Some(similarity),
    }
}

fn create_test_student(skills: &[&str]) -> StudentProfile {
    StudentProfile {
        user_id: Uuid::new_v4(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        gpa: Some(3.6),
        has_prev_intern: true,
        project_depth: 0.2,
        is_international: false,
        github: None,
    }
}

fn app_state(store: MemoryStore, github_base: String) -> web::Data<AppState> {
    web::Data::new(AppState {
        store: Arc::new(store),
        github: Arc::new(
            GithubClient::new(github_base, "HireScore-App".to_string(), Duration::from_secs(5))
                .unwrap(),
        ),
        matcher: Matcher::default(),
        apply_limiter: Arc::new(RateLimiter::new(5, Duration::from_secs(60))),
        skill_extractor: Arc::new(SkillExtractor::new().unwrap()),
        auth: Arc::new(JwtVerifier::new(SECRET, Some("authenticated"))),
    })
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .configure(routes::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn test_health_endpoint() {
    let state = app_state(MemoryStore::default(), "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "healthy");
}

#[actix_web::test]
async fn test_matches_requires_token() {
    let state = app_state(MemoryStore::default(), "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::post().uri("/api/v1/matches").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_matches_unknown_student_is_not_found() {
    let state = app_state(MemoryStore::default(), "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status_code"], 404);
}

#[actix_web::test]
async fn test_matches_without_skills_is_bad_request() {
    let student = create_test_student(&[]);
    let user_id = student.user_id;
    let state = app_state(
        MemoryStore::default().with_student(student),
        "http://127.0.0.1:9".to_string(),
    );
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .insert_header(bearer(user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_ranked_matches_sorted_by_hire_score() {
    let student = create_test_student(&["Python", "SQL"]);
    let user_id = student.user_id;
    let store = MemoryStore {
        jobs: vec![
            create_test_job("Frontend Intern", &["React"], 0.1, true),
            create_test_job("Data Intern", &["Python", "SQL"], 1.0, true),
        ],
        ..Default::default()
    }
    .with_student(student);

    let state = app_state(store, "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .insert_header(bearer(user_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0]["title"], "Data Intern");
    // 0.40 + 0.8 * 0.25 + 0.20 + 0.2 * 0.15
    assert_eq!(jobs[0]["hireScore"], 83);
    assert_eq!(jobs[0]["explanation"]["contributions"]["overlap"], 100);
    assert_eq!(jobs[1]["explanation"]["missingSkills"], json!(["React"]));
    assert!(jobs[0]["hireScore"].as_u64() >= jobs[1]["hireScore"].as_u64());
}

#[actix_web::test]
async fn test_matches_fall_back_to_local_overlap() {
    let student = create_test_student(&["Python", "SQL"]);
    let user_id = student.user_id;
    let store = MemoryStore {
        jobs: vec![create_test_job("Data Intern", &["Python", "AWS", "SQL"], 0.9, true)],
        primary_down: true,
        ..Default::default()
    }
    .with_student(student);

    let state = app_state(store, "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .insert_header(bearer(user_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let job = &body["jobs"][0];
    assert_eq!(job["hireScore"], 70);
    assert_eq!(job["explanation"]["missingSkills"], json!(["AWS"]));
    assert_eq!(job["explanation"]["lines"][1], "Try adding: AWS.");
}

#[actix_web::test]
async fn test_matches_fail_when_both_paths_fail() {
    let student = create_test_student(&["Python"]);
    let user_id = student.user_id;
    let store = MemoryStore {
        primary_down: true,
        fallback_down: true,
        ..Default::default()
    }
    .with_student(student);

    let state = app_state(store, "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .insert_header(bearer(user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Failed to fetch job matches");
}

#[actix_web::test]
async fn test_international_student_only_sees_sponsoring_jobs() {
    let mut student = create_test_student(&["Python"]);
    student.is_international = true;
    let user_id = student.user_id;
    let store = MemoryStore {
        jobs: vec![
            create_test_job("Backend Intern", &["Python"], 0.9, false),
            create_test_job("ML Intern", &["Python"], 0.8, true),
        ],
        ..Default::default()
    }
    .with_student(student);

    let state = app_state(store, "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/matches")
        .insert_header(bearer(user_id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let jobs = body["jobs"].as_array().unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0]["title"], "ML Intern");
}

#[actix_web::test]
async fn test_complete_profile_rejects_out_of_range_gpa() {
    let student = create_test_student(&["Python"]);
    let user_id = student.user_id;
    let state = app_state(
        MemoryStore::default().with_student(student),
        "http://127.0.0.1:9".to_string(),
    );
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/v1/students/profile")
        .insert_header(bearer(user_id))
        .set_json(json!({ "gpa": 5.0, "has_prev_intern": false }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_complete_profile_fetches_project_depth() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users/octocat/repos")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"stargazers_count": 25, "forks_count": 0, "size": 10}]"#)
        .create_async()
        .await;

    let student = create_test_student(&["Python"]);
    let user_id = student.user_id;
    let state = app_state(MemoryStore::default().with_student(student), server.url());
    let app = init_app!(state);

    let req = test::TestRequest::put()
        .uri("/api/v1/students/profile")
        .insert_header(bearer(user_id))
        .set_json(json!({ "gpa": 3.2, "has_prev_intern": true, "github": " octocat " }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["github"], "octocat");
    assert!((body["project_depth"].as_f64().unwrap() - 0.5).abs() < 1e-9);
}

#[actix_web::test]
async fn test_extract_skills_replaces_profile_skills() {
    let student = create_test_student(&[]);
    let user_id = student.user_id;
    let state = app_state(
        MemoryStore::default().with_student(student),
        "http://127.0.0.1:9".to_string(),
    );
    let app = init_app!(state);

    let req = test::TestRequest::post()
        .uri("/api/v1/students/skills")
        .insert_header(bearer(user_id))
        .set_json(json!({ "text": "Interned at a startup writing Python and SQL on AWS." }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["skills"], json!(["Python", "SQL", "AWS"]));
}

#[actix_web::test]
async fn test_apply_conflict_and_rate_limit() {
    let student = create_test_student(&["Python"]);
    let user_id = student.user_id;
    let job = create_test_job("Data Intern", &["Python"], 0.9, true);
    let job_id = job.id;
    let store = MemoryStore {
        jobs: vec![job],
        ..Default::default()
    }
    .with_student(student);

    let state = app_state(store, "http://127.0.0.1:9".to_string());
    let app = init_app!(state);

    let apply = |id: Uuid| {
        test::TestRequest::post()
            .uri("/api/v1/applications")
            .insert_header(bearer(user_id))
            .set_json(json!({ "job_id": id, "hire_score": 72 }))
            .to_request()
    };

    let resp = test::call_service(&app, apply(job_id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["apply_url"], "https://jobs.example/Data-Intern");

    let resp = test::call_service(&app, apply(job_id)).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    for _ in 0..3 {
        let resp = test::call_service(&app, apply(Uuid::new_v4())).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    let resp = test::call_service(&app, apply(job_id)).await;
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
}
