//! Core library for the veridoc onboarding document verification service.
//!
//! The `screening` module holds the deterministic fraud-scoring engine and
//! the collaborator contracts around it; `config` and `telemetry` carry the
//! process-level plumbing shared by the api service.

pub mod config;
pub mod error;
pub mod screening;
pub mod telemetry;
