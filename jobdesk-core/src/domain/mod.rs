//! Core domain types
//!
//! These types mirror the entities the backend exposes. The client only ever
//! holds read-only projections of them; all mutation happens server-side.

pub mod job;
pub mod task;
