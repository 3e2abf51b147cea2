//! Jobs table store
//!
//! In-memory rows behind the rendered jobs table. Full loads append rows;
//! polling deltas patch them in place by `job_id`.

use chrono::{DateTime, Utc};
use jobdesk_core::domain::job::{Job, JobStatus};
use tracing::debug;

/// One rendered row
#[derive(Debug, Clone, PartialEq)]
pub struct JobRow {
    pub job_id: String,
    pub title: String,
    pub budget: String,
    pub status: JobStatus,
    pub job_fit: Option<f64>,
    pub last_updated_at: DateTime<Utc>,
}

impl JobRow {
    /// Overwrite the fields a delta may change
    fn apply(&mut self, job: &Job) {
        self.status = job.status;
        self.job_fit = job.job_fit;
        self.last_updated_at = job.last_updated_at;
    }
}

impl From<Job> for JobRow {
    fn from(job: Job) -> Self {
        Self {
            job_id: job.job_id,
            title: job.title,
            budget: job.budget,
            status: job.status,
            job_fit: job.job_fit,
            last_updated_at: job.last_updated_at,
        }
    }
}

/// Rendering target for the table
pub trait TableView: Send + Sync {
    fn render(&self, rows: &[JobRow]);
}

/// Called with each delta that matched no row
pub type MissObserver = Box<dyn Fn(&Job) + Send + Sync>;

pub struct JobsTableStore {
    rows: Vec<JobRow>,
    view: Box<dyn TableView>,
    on_miss: Option<MissObserver>,
}

impl JobsTableStore {
    pub fn new(view: impl TableView + 'static) -> Self {
        Self {
            rows: Vec::new(),
            view: Box::new(view),
            on_miss: None,
        }
    }

    /// Register an observer for deltas that matched no row
    pub fn on_miss(&mut self, observer: impl Fn(&Job) + Send + Sync + 'static) {
        self.on_miss = Some(Box::new(observer));
    }

    /// Append rows from a full load
    ///
    /// Rows are not checked against existing ids; callers wanting a clean
    /// slate call [`clear`](Self::clear) first.
    pub fn insert_or_append(&mut self, jobs: impl IntoIterator<Item = Job>) -> usize {
        let before = self.rows.len();
        self.rows.extend(jobs.into_iter().map(JobRow::from));
        self.rows.len() - before
    }

    /// Patch existing rows in place
    ///
    /// Only `status`, `job_fit` and `last_updated_at` change. Deltas for ids
    /// not in the table are dropped and reported to the miss observer.
    ///
    /// # Returns
    /// How many jobs matched a row
    pub fn patch_by_key(&mut self, jobs: &[Job]) -> usize {
        let mut applied = 0;

        for job in jobs {
            let mut matched = false;
            for row in self.rows.iter_mut().filter(|r| r.job_id == job.job_id) {
                row.apply(job);
                matched = true;
            }

            if matched {
                applied += 1;
            } else {
                debug!(job_id = %job.job_id, "Delta for unknown job dropped");
                if let Some(observer) = &self.on_miss {
                    observer(job);
                }
            }
        }

        applied
    }

    /// Re-render every row
    pub fn redraw(&self) {
        self.view.render(&self.rows);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn get(&self, job_id: &str) -> Option<&JobRow> {
        self.rows.iter().find(|r| r.job_id == job_id)
    }

    pub fn rows(&self) -> &[JobRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
