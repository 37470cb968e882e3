//! Core domain types
//!
//! Read-only projections of the state reported by the Atmos CLI.
//! Nothing here is persisted: every value is rebuilt from the tool's output
//! on each request.

pub mod component;
pub mod config;
pub mod metrics;
pub mod stack;
pub mod validation;
pub mod workflow;
