//! Data Transfer Objects for the HTTP API
//!
//! Request and response bodies exchanged between the service and its
//! clients. Field names are camelCase on the wire.

pub mod error;
pub mod health;
pub mod service;
pub mod validation;
pub mod workflow;
