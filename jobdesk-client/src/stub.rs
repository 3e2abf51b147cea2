//! In-process stub backend for client tests
//!
//! Serves the four Jobdesk endpoints from memory on an ephemeral port.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use jobdesk_core::domain::job::{Job, JobStatus};
use jobdesk_core::domain::task::TaskId;
use jobdesk_core::dto::envelope::Envelope;
use jobdesk_core::dto::job::{DeltaQuery, JobPageQuery};
use jobdesk_core::dto::task::{CreateTask, PendingCount, TaskCreated};

#[derive(Default)]
struct StubState {
    jobs: Vec<Job>,
    tasks: Vec<CreateTask>,
    rejection: Option<String>,
    plain_failure: bool,
}

type Shared = Arc<Mutex<StubState>>;

/// Handle to a running stub backend
pub struct StubBackend {
    addr: SocketAddr,
    state: Shared,
}

impl StubBackend {
    /// Bind to an ephemeral port and start serving
    pub async fn spawn() -> anyhow::Result<Self> {
        let state: Shared = Arc::default();

        let app = Router::new()
            .route("/jobs", get(list_jobs))
            .route("/jobs/deltas", get(job_deltas))
            .route("/tasks", post(add_task))
            .route("/tasks/pending-count", get(pending_count))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, state })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn insert_job(&self, job: Job) {
        self.state.lock().unwrap().jobs.push(job);
    }

    pub fn received_tasks(&self) -> Vec<CreateTask> {
        self.state.lock().unwrap().tasks.clone()
    }

    /// Answer every request with a 500 and an error envelope
    pub fn reject_with(&self, message: &str) {
        self.state.lock().unwrap().rejection = Some(message.to_string());
    }

    /// Answer every request with a 502 and a plain-text body
    pub fn fail_plain(&self) {
        self.state.lock().unwrap().plain_failure = true;
    }
}

/// A job last updated at `at`
pub fn job_at(job_id: &str, at: DateTime<Utc>) -> Job {
    Job {
        job_id: job_id.to_string(),
        title: format!("Job {}", job_id),
        budget: "$100".to_string(),
        status: JobStatus::New,
        job_fit: None,
        last_updated_at: at,
    }
}

fn failure(state: &StubState) -> Option<Response> {
    if state.plain_failure {
        return Some((StatusCode::BAD_GATEWAY, "bad gateway").into_response());
    }

    state.rejection.as_ref().map(|message| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(Envelope::<()>::error(message.clone())),
        )
            .into_response()
    })
}

async fn list_jobs(State(state): State<Shared>, Query(query): Query<JobPageQuery>) -> Response {
    let state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    let skip = (query.page.saturating_sub(1) * query.page_size) as usize;
    let page: Vec<Job> = state
        .jobs
        .iter()
        .skip(skip)
        .take(query.page_size as usize)
        .cloned()
        .collect();

    Json(Envelope::success(page)).into_response()
}

async fn job_deltas(State(state): State<Shared>, Query(query): Query<DeltaQuery>) -> Response {
    let state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    let Some(cursor) = query.cursor() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(Envelope::<()>::error("invalid since cursor")),
        )
            .into_response();
    };

    let changed: Vec<Job> = state
        .jobs
        .iter()
        .filter(|job| job.last_updated_at > cursor)
        .cloned()
        .collect();

    Json(Envelope::success(changed)).into_response()
}

async fn add_task(State(state): State<Shared>, Json(task): Json<CreateTask>) -> Response {
    let mut state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    state.tasks.push(task);

    Json(Envelope::success(TaskCreated {
        task_id: TaskId(uuid::Uuid::new_v4().to_string()),
    }))
    .into_response()
}

async fn pending_count(State(state): State<Shared>) -> Response {
    let state = state.lock().unwrap();
    if let Some(response) = failure(&state) {
        return response;
    }

    Json(Envelope::success(PendingCount {
        pending_count: state.tasks.len() as u64,
    }))
    .into_response()
}
