//! Keel Core
//!
//! Core types shared by the Keel service, client and CLI.
//!
//! This crate contains:
//! - Domain types: projections of Atmos state (Stack, Component, Workflow, ...)
//! - DTOs: request and response bodies of the HTTP API

pub mod domain;
pub mod dto;
