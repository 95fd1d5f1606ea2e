#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio::sync::mpsc;
use tower::ServiceExt;

use golf_api::auth::JwtService;
use golf_api::database::models::{GolfClub, GolfCourse, GolfRound, Hole, TeeBox};
use golf_api::database::{
    DatabaseError, GolfCourseRepository, GolfRoundRepository, HoleRepository, MemoryRepository,
    Model, Repositories, Repository, TeeBoxRepository,
};
use golf_api::queue::{HandicapJob, HandicapQueue};
use golf_api::{app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret";

/// In-memory repository that records every call made through it
pub struct RecordingRepository<M: Model> {
    inner: MemoryRepository<M>,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<M::New>>,
    requested_ids: Mutex<Vec<Vec<String>>>,
}

impl<M: Model> RecordingRepository<M> {
    pub fn new() -> Self {
        Self {
            inner: MemoryRepository::new(),
            calls: Mutex::new(vec![]),
            created: Mutex::new(vec![]),
            requested_ids: Mutex::new(vec![]),
        }
    }

    /// Insert without recording the call
    pub async fn seed(&self, data: M::New) -> M {
        self.inner.create(data).await.expect("seed record")
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<M::New> {
        self.created.lock().unwrap().clone()
    }

    pub fn requested_ids(&self) -> Vec<Vec<String>> {
        self.requested_ids.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

#[async_trait]
impl<M: Model> Repository<M> for RecordingRepository<M> {
    async fn get(&self, model_id: i32) -> Result<Option<M>, DatabaseError> {
        self.record("get");
        self.inner.get(model_id).await
    }

    async fn get_by_ids(&self, ids: &[String]) -> Result<Vec<M>, DatabaseError> {
        self.record("get_by_ids");
        self.requested_ids.lock().unwrap().push(ids.to_vec());
        self.inner.get_by_ids(ids).await
    }

    async fn get_all(&self) -> Result<Vec<M>, DatabaseError> {
        self.record("get_all");
        self.inner.get_all().await
    }

    async fn create(&self, data: M::New) -> Result<M, DatabaseError> {
        self.record("create");
        self.created.lock().unwrap().push(data.clone());
        self.inner.create(data).await
    }

    async fn bulk_create(&self, records: Vec<M::New>) -> Result<Vec<M>, DatabaseError> {
        self.record("bulk_create");
        self.created.lock().unwrap().extend(records.iter().cloned());
        self.inner.bulk_create(records).await
    }

    async fn delete(&self, model_id: i32) -> Result<bool, DatabaseError> {
        self.record("delete");
        self.inner.delete(model_id).await
    }
}

#[async_trait]
impl GolfCourseRepository for RecordingRepository<GolfCourse> {
    async fn get_by_golf_club_id(&self, golf_club_id: i32) -> Result<Vec<GolfCourse>, DatabaseError> {
        self.record("get_by_golf_club_id");
        self.inner.get_by_golf_club_id(golf_club_id).await
    }
}

#[async_trait]
impl TeeBoxRepository for RecordingRepository<TeeBox> {
    async fn get_by_golf_course_id(&self, golf_course_id: i32) -> Result<Vec<TeeBox>, DatabaseError> {
        self.record("get_by_golf_course_id");
        self.inner.get_by_golf_course_id(golf_course_id).await
    }
}

#[async_trait]
impl HoleRepository for RecordingRepository<Hole> {
    async fn get_by_tee_box_id(&self, tee_box_id: i32) -> Result<Vec<Hole>, DatabaseError> {
        self.record("get_by_tee_box_id");
        self.inner.get_by_tee_box_id(tee_box_id).await
    }
}

#[async_trait]
impl GolfRoundRepository for RecordingRepository<GolfRound> {
    async fn get_by_user_id(&self, user_id: i32) -> Result<Vec<GolfRound>, DatabaseError> {
        self.record("get_by_user_id");
        self.inner.get_by_user_id(user_id).await
    }
}

/// Router over recording repositories plus the receiving end of the handicap queue
pub struct TestApp {
    pub router: Router,
    pub golf_clubs: Arc<RecordingRepository<GolfClub>>,
    pub golf_courses: Arc<RecordingRepository<GolfCourse>>,
    pub tee_boxes: Arc<RecordingRepository<TeeBox>>,
    pub holes: Arc<RecordingRepository<Hole>>,
    pub golf_rounds: Arc<RecordingRepository<GolfRound>>,
    pub jobs: mpsc::Receiver<HandicapJob>,
    pub jwt: JwtService,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_queue_capacity(16)
    }

    pub fn with_queue_capacity(capacity: usize) -> Self {
        let golf_clubs = Arc::new(RecordingRepository::<GolfClub>::new());
        let golf_courses = Arc::new(RecordingRepository::<GolfCourse>::new());
        let tee_boxes = Arc::new(RecordingRepository::<TeeBox>::new());
        let holes = Arc::new(RecordingRepository::<Hole>::new());
        let golf_rounds = Arc::new(RecordingRepository::<GolfRound>::new());

        let repos = Repositories {
            golf_clubs: golf_clubs.clone(),
            golf_courses: golf_courses.clone(),
            tee_boxes: tee_boxes.clone(),
            holes: holes.clone(),
            golf_rounds: golf_rounds.clone(),
        };

        let (queue, jobs) = HandicapQueue::channel(capacity);
        let jwt = JwtService::new(TEST_SECRET, 1).expect("jwt service");
        let state = AppState::new(repos, queue, jwt.clone(), None);

        Self {
            router: app(state),
            golf_clubs,
            golf_courses,
            tee_boxes,
            holes,
            golf_rounds,
            jobs,
            jwt,
        }
    }

    pub fn token(&self, user_id: i32) -> String {
        self.jwt.issue(user_id).expect("issue token")
    }

    /// Drive one request through the router; the body is `Null` when empty
    pub async fn send(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, body))
    }

    /// Handicap jobs enqueued so far
    pub fn drain_jobs(&mut self) -> Vec<HandicapJob> {
        let mut jobs = vec![];
        while let Ok(job) = self.jobs.try_recv() {
            jobs.push(job);
        }
        jobs
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn post_raw(uri: &str, content_type: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(content_type) = content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn with_token(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {}", token).parse().unwrap(),
    );
    request
}
