//! Jobdesk Core
//!
//! Core types shared by the Jobdesk client and console.
//!
//! This crate contains:
//! - Domain types: Jobs as the backend reports them
//! - DTOs: Request bodies and the response envelope used on the wire

pub mod domain;
pub mod dto;
