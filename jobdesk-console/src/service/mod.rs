//! Service layer for the console
//!
//! Trait seams between the polling controller and the backend, with the
//! HTTP-backed implementations used by the binary.

pub mod job_feed;
pub mod task_queue;

pub use job_feed::JobFeed;
pub use task_queue::{TaskQueue, TaskQueueClient};
