//! Polling controller
//!
//! Keeps the jobs table in sync with the backend. Each cycle asks for the
//! pending task count and the jobs changed since the last cursor, both at
//! once, then merges the deltas into the table and updates the banner.
//!
//! Cycles never overlap: the next one is scheduled only after both requests
//! of the current one have resolved. After `idle_ceiling` cycles in a row
//! without activity the loop stops itself; a failed cycle stops it too, and
//! only an explicit `start()` resumes it.
//!
//! `stop()` cannot abort a request already on the wire. Every continuation
//! instead checks the generation it was started under and drops its results
//! if `stop()` or a later `start()` has moved the generation on.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use jobdesk_client::ClientError;
use jobdesk_core::domain::job::Job;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::service::{JobFeed, TaskQueue};
use crate::status::{StatusBroadcaster, StatusLevel};
use crate::store::JobsTableStore;

/// Message shown when the loop gives up for lack of activity
pub const IDLE_STOP_MESSAGE: &str = "Polling stopped: no recent updates";

/// Polling tunables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub idle_ceiling: u32,
    pub status_timeout: Duration,
}

impl From<&Config> for PollSettings {
    fn from(config: &Config) -> Self {
        Self {
            interval: config.poll_interval,
            idle_ceiling: config.idle_ceiling,
            status_timeout: config.status_timeout,
        }
    }
}

/// Whether the loop is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Polling,
}

/// Point-in-time view of the cycle state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollSnapshot {
    pub phase: PollPhase,
    pub last_sync: Option<DateTime<Utc>>,
    pub empty_streak: u32,
    pub timer_pending: bool,
}

#[derive(Default)]
struct PollCycleState {
    generation: u64,
    active: bool,
    last_sync: Option<DateTime<Utc>>,
    empty_streak: u32,
    timer: Option<JoinHandle<()>>,
}

impl PollCycleState {
    fn is_current(&self, generation: u64) -> bool {
        self.active && self.generation == generation
    }

    /// Leave the polling phase, invalidating every in-flight continuation
    fn deactivate(&mut self) {
        self.active = false;
        self.generation += 1;
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

struct Shared {
    settings: PollSettings,
    tasks: Arc<dyn TaskQueue>,
    feed: Arc<dyn JobFeed>,
    store: Arc<Mutex<JobsTableStore>>,
    status: StatusBroadcaster,
    state: Mutex<PollCycleState>,
    phase: watch::Sender<PollPhase>,
}

type CycleFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Drives the poll loop
///
/// Cheap to clone; clones control the same loop.
#[derive(Clone)]
pub struct PollingController {
    shared: Arc<Shared>,
}

impl PollingController {
    pub fn new(
        settings: PollSettings,
        tasks: Arc<dyn TaskQueue>,
        feed: Arc<dyn JobFeed>,
        store: Arc<Mutex<JobsTableStore>>,
        status: StatusBroadcaster,
    ) -> Self {
        let (phase, _) = watch::channel(PollPhase::Idle);
        Self {
            shared: Arc::new(Shared {
                settings,
                tasks,
                feed,
                store,
                status,
                state: Mutex::new(PollCycleState::default()),
                phase,
            }),
        }
    }

    /// Start polling; no-op if already polling
    ///
    /// The cursor starts at the current time and cycle 0 runs without delay.
    pub fn start(&self) {
        let generation = {
            let mut state = self.shared.state.lock().unwrap();
            if state.active {
                debug!("Polling already active");
                return;
            }

            state.generation += 1;
            state.active = true;
            state.empty_streak = 0;
            state.last_sync = Some(Utc::now());
            state.generation
        };

        self.shared.phase.send_replace(PollPhase::Polling);
        info!(
            "Starting job polling (interval: {:?}, idle ceiling: {})",
            self.shared.settings.interval, self.shared.settings.idle_ceiling
        );

        tokio::spawn(Arc::clone(&self.shared).run_cycle(generation));
    }

    /// Stop polling; no-op if already idle
    ///
    /// Cancels the pending timer and clears the sticky status. A request
    /// already in flight completes, but its results are discarded.
    pub fn stop(&self) {
        {
            let mut state = self.shared.state.lock().unwrap();
            if !state.active {
                debug!("Polling already stopped");
                return;
            }
            state.deactivate();
        }

        self.shared.phase.send_replace(PollPhase::Idle);
        self.shared.status.clear_sticky();
        self.shared.status.show_transient(
            "Polling stopped",
            StatusLevel::Info,
            0,
            self.shared.settings.status_timeout,
        );
        info!("Job polling stopped");
    }

    pub fn is_polling(&self) -> bool {
        *self.shared.phase.borrow() == PollPhase::Polling
    }

    /// Watch phase transitions
    pub fn subscribe(&self) -> watch::Receiver<PollPhase> {
        self.shared.phase.subscribe()
    }

    pub fn snapshot(&self) -> PollSnapshot {
        let state = self.shared.state.lock().unwrap();
        PollSnapshot {
            phase: if state.active {
                PollPhase::Polling
            } else {
                PollPhase::Idle
            },
            last_sync: state.last_sync,
            empty_streak: state.empty_streak,
            timer_pending: state.timer.is_some(),
        }
    }
}

impl Shared {
    /// One poll cycle
    ///
    /// Boxed because the cycle schedules its own successor.
    fn run_cycle(self: Arc<Self>, generation: u64) -> CycleFuture {
        Box::pin(async move {
            let since = {
                let state = self.state.lock().unwrap();
                if !state.is_current(generation) {
                    return;
                }
                state.last_sync.unwrap_or_else(Utc::now)
            };
            let dispatched_at = Utc::now();

            debug!(generation, %since, "Polling task count and job deltas");

            let (pending, deltas) =
                tokio::join!(self.tasks.pending_count(), self.feed.deltas_since(since));

            match (pending, deltas) {
                (Ok(pending), Ok(deltas)) => {
                    self.apply_cycle(generation, dispatched_at, pending, deltas)
                }
                (Err(e), _) | (_, Err(e)) => self.fail_cycle(generation, e),
            }
        })
    }

    fn apply_cycle(
        self: &Arc<Self>,
        generation: u64,
        dispatched_at: DateTime<Utc>,
        pending: u64,
        deltas: Vec<Job>,
    ) {
        let exhausted = {
            let mut state = self.state.lock().unwrap();
            if !state.is_current(generation) {
                debug!(generation, "Discarding results of a stopped poll cycle");
                return;
            }

            let changed = deltas.len();
            if changed > 0 {
                let applied = {
                    let mut store = self.store.lock().unwrap();
                    let applied = store.patch_by_key(&deltas);
                    store.redraw();
                    applied
                };
                state.last_sync = Some(dispatched_at);
                debug!(changed, applied, "Merged job deltas");
            }

            let total_activity = pending + changed as u64;
            if total_activity == 0 {
                state.empty_streak += 1;
            } else {
                state.empty_streak = 0;
            }

            self.status.update_task_count(pending);
            if pending > 0 {
                self.status.set_sticky(
                    format!("{} task(s) pending", pending),
                    StatusLevel::Loading,
                    pending,
                );
            } else {
                // Drained queue: nothing left for transients to revert to.
                self.status.clear_sticky();
            }
            if changed > 0 {
                self.status.show_transient(
                    format!("{} job(s) updated", changed),
                    StatusLevel::Success,
                    pending,
                    self.settings.status_timeout,
                );
            }

            if state.empty_streak >= self.settings.idle_ceiling {
                state.deactivate();
                self.status.set_sticky(IDLE_STOP_MESSAGE, StatusLevel::Info, 0);
                true
            } else {
                state.timer = Some(self.schedule(generation));
                false
            }
        };

        if exhausted {
            self.phase.send_replace(PollPhase::Idle);
            info!(
                "No activity for {} poll cycles, stopping",
                self.settings.idle_ceiling
            );
        }
    }

    fn fail_cycle(&self, generation: u64, e: ClientError) {
        {
            let mut state = self.state.lock().unwrap();
            if !state.is_current(generation) {
                debug!(generation, "Ignoring failure of a stopped poll cycle: {}", e);
                return;
            }

            state.deactivate();
            self.status
                .set_sticky(format!("Polling failed: {}", e), StatusLevel::Error, 0);
        }

        self.phase.send_replace(PollPhase::Idle);
        if e.is_protocol() {
            warn!("Backend rejected poll request, polling stopped: {}", e);
        } else {
            error!("Poll cycle failed, polling stopped: {}", e);
        }
    }

    /// Arm the timer for the next cycle
    fn schedule(self: &Arc<Self>, generation: u64) -> JoinHandle<()> {
        let shared = Arc::clone(self);
        let delay = self.settings.interval;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut state = shared.state.lock().unwrap();
                if !state.is_current(generation) {
                    return;
                }
                // Fired: from here on the cycle is in flight, not cancellable.
                state.timer = None;
            }

            shared.run_cycle(generation).await;
        })
    }
}
