//! Status banner
//!
//! A single banner shows either a transient message or the sticky status it
//! falls back to once the transient message expires. A task-count badge sits
//! next to it.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::trace;

/// How long a transient message stays up before reverting
pub const DEFAULT_TRANSIENT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Severity of a banner message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Loading,
    Success,
    Error,
    Info,
}

/// What the banner displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
    pub level: StatusLevel,
    pub task_count: u64,
}

/// Rendering target for the banner
pub trait BannerView: Send + Sync {
    /// Display `status`, replacing whatever is shown
    fn show(&self, status: &StatusMessage);

    /// Hide the banner
    fn hide(&self);

    /// Update the task-count badge
    fn badge(&self, count: u64);
}

#[derive(Default)]
struct BannerState {
    visible: Option<StatusMessage>,
    sticky: Option<StatusMessage>,
    badge: u64,
    /// Bumped by every message so only the latest one may revert the banner
    epoch: u64,
}

struct Inner {
    view: Box<dyn BannerView>,
    state: Mutex<BannerState>,
}

/// Owner of the banner and its sticky status
///
/// Cheap to clone; all clones drive the same banner.
#[derive(Clone)]
pub struct StatusBroadcaster {
    inner: Arc<Inner>,
}

impl StatusBroadcaster {
    pub fn new(view: impl BannerView + 'static) -> Self {
        Self {
            inner: Arc::new(Inner {
                view: Box::new(view),
                state: Mutex::new(BannerState::default()),
            }),
        }
    }

    /// Show a message now and revert after `timeout`
    ///
    /// On expiry the banner falls back to the sticky status, or hides when
    /// there is none. A zero `timeout` makes the message the new sticky
    /// status instead.
    pub fn show_transient(
        &self,
        message: impl Into<String>,
        level: StatusLevel,
        task_count: u64,
        timeout: Duration,
    ) {
        let status = StatusMessage {
            message: message.into(),
            level,
            task_count,
        };

        let mut state = self.inner.state.lock().unwrap();
        state.epoch += 1;
        self.inner.view.show(&status);
        state.visible = Some(status.clone());

        if timeout.is_zero() {
            state.sticky = Some(status);
            return;
        }

        let epoch = state.epoch;
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            inner.revert(epoch);
        });
    }

    /// Replace the sticky status and display it
    pub fn set_sticky(&self, message: impl Into<String>, level: StatusLevel, task_count: u64) {
        self.show_transient(message, level, task_count, Duration::ZERO);
    }

    /// Update the badge, and the sticky status's count
    ///
    /// Zero pending tasks hides the banner whatever the sticky state.
    pub fn update_task_count(&self, count: u64) {
        let mut state = self.inner.state.lock().unwrap();
        state.badge = count;
        self.inner.view.badge(count);

        if let Some(sticky) = state.sticky.as_mut() {
            sticky.task_count = count;
        }

        if count == 0 {
            state.visible = None;
            self.inner.view.hide();
        } else if let Some(sticky) = state.sticky.clone() {
            self.inner.view.show(&sticky);
            state.visible = Some(sticky);
        }
    }

    /// Forget the sticky status; what is on screen stays until it expires
    pub fn clear_sticky(&self) {
        self.inner.state.lock().unwrap().sticky = None;
    }

    pub fn visible(&self) -> Option<StatusMessage> {
        self.inner.state.lock().unwrap().visible.clone()
    }

    pub fn sticky(&self) -> Option<StatusMessage> {
        self.inner.state.lock().unwrap().sticky.clone()
    }

    pub fn badge(&self) -> u64 {
        self.inner.state.lock().unwrap().badge
    }
}

impl Inner {
    fn revert(&self, epoch: u64) {
        let mut state = self.state.lock().unwrap();
        if state.epoch != epoch {
            trace!("Transient message superseded, skipping revert");
            return;
        }

        match state.sticky.clone() {
            Some(sticky) => {
                self.view.show(&sticky);
                state.visible = Some(sticky);
            }
            None => {
                self.view.hide();
                state.visible = None;
            }
        }
    }
}
