//! Test doubles shared by the console's unit tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use jobdesk_client::ClientError;
use jobdesk_core::domain::job::{Job, JobStatus};
use jobdesk_core::domain::task::TaskId;
use tokio::sync::Notify;

use crate::service::{JobFeed, TaskQueue};
use crate::status::{BannerView, StatusMessage};
use crate::store::{JobRow, TableView};

pub fn job(job_id: &str) -> Job {
    job_with_status(job_id, JobStatus::New)
}

pub fn job_with_status(job_id: &str, status: JobStatus) -> Job {
    Job {
        job_id: job_id.to_string(),
        title: format!("Job {}", job_id),
        budget: "$250".to_string(),
        status,
        job_fit: None,
        last_updated_at: fixed_time(),
    }
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerEvent {
    Show(StatusMessage),
    Hide,
    Badge(u64),
}

#[derive(Clone, Default)]
pub struct RecordingBanner {
    events: Arc<Mutex<Vec<BannerEvent>>>,
}

impl RecordingBanner {
    pub fn events(&self) -> Vec<BannerEvent> {
        self.events.lock().unwrap().clone()
    }

    /// How many times a message with this text was shown
    pub fn shown_count(&self, message: &str) -> usize {
        self.events
            .lock()
            .unwrap()
            .iter()
            .filter(|e| matches!(e, BannerEvent::Show(s) if s.message == message))
            .count()
    }
}

impl BannerView for RecordingBanner {
    fn show(&self, status: &StatusMessage) {
        self.events
            .lock()
            .unwrap()
            .push(BannerEvent::Show(status.clone()));
    }

    fn hide(&self) {
        self.events.lock().unwrap().push(BannerEvent::Hide);
    }

    fn badge(&self, count: u64) {
        self.events.lock().unwrap().push(BannerEvent::Badge(count));
    }
}

#[derive(Clone, Default)]
pub struct RecordingTable {
    renders: Arc<Mutex<Vec<Vec<JobRow>>>>,
}

impl RecordingTable {
    pub fn renders(&self) -> Vec<Vec<JobRow>> {
        self.renders.lock().unwrap().clone()
    }
}

impl TableView for RecordingTable {
    fn render(&self, rows: &[JobRow]) {
        self.renders.lock().unwrap().push(rows.to_vec());
    }
}

/// Holds one delta request open until released
#[derive(Clone, Default)]
pub struct DeltaGate {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl DeltaGate {
    /// Wait until the gated request is in flight
    pub async fn entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.release.notify_one();
    }
}

/// Backend answering from queued responses
///
/// Once a queue runs dry it answers `0` pending tasks and no deltas.
#[derive(Default)]
pub struct ScriptedBackend {
    pending: Mutex<VecDeque<Result<u64, ClientError>>>,
    deltas: Mutex<VecDeque<Result<Vec<Job>, ClientError>>>,
    gate: Mutex<Option<DeltaGate>>,
    cursors: Mutex<Vec<DateTime<Utc>>>,
    enqueued: AtomicUsize,
    delta_calls: AtomicUsize,
}

impl ScriptedBackend {
    pub fn push_pending(&self, response: Result<u64, ClientError>) {
        self.pending.lock().unwrap().push_back(response);
    }

    pub fn push_deltas(&self, response: Result<Vec<Job>, ClientError>) {
        self.deltas.lock().unwrap().push_back(response);
    }

    /// Gate the next delta request
    pub fn gate_next_delta(&self) -> DeltaGate {
        let gate = DeltaGate::default();
        *self.gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn delta_calls(&self) -> usize {
        self.delta_calls.load(Ordering::SeqCst)
    }

    /// Cursors the delta requests were made with, in order
    pub fn cursors(&self) -> Vec<DateTime<Utc>> {
        self.cursors.lock().unwrap().clone()
    }
}

#[async_trait]
impl TaskQueue for ScriptedBackend {
    async fn enqueue(
        &self,
        _task_type: &str,
        _payload: serde_json::Value,
    ) -> Result<TaskId, ClientError> {
        let n = self.enqueued.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(TaskId(format!("task-{}", n)))
    }

    async fn pending_count(&self) -> Result<u64, ClientError> {
        self.pending.lock().unwrap().pop_front().unwrap_or(Ok(0))
    }
}

#[async_trait]
impl JobFeed for ScriptedBackend {
    async fn deltas_since(&self, since: DateTime<Utc>) -> Result<Vec<Job>, ClientError> {
        self.delta_calls.fetch_add(1, Ordering::SeqCst);
        self.cursors.lock().unwrap().push(since);
        let response = self
            .deltas
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()));

        let gate = self.gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.entered.notify_one();
            gate.release.notified().await;
        }

        response
    }
}
