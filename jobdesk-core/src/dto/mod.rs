//! Data Transfer Objects for backend communication
//!
//! Every backend response is wrapped in an [`envelope::Envelope`]; the
//! payload types for each endpoint live next to it.

pub mod envelope;
pub mod job;
pub mod task;
