//! Scheduler layer for the console
//!
//! Runs the poll loop that keeps the jobs table and the status banner in
//! step with the backend.

pub mod poller;

pub use poller::{PollPhase, PollSettings, PollingController};
