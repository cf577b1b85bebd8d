//! # Sync Orchestration Module
//!
//! Runs the registered vendor adapters and aggregates their results.
//!
//! ## Overview
//!
//! The [`SyncOrchestrator`] owns the adapter set built once at startup. It
//! invokes adapters sequentially, isolates each one's failures (including
//! panics from a misbehaving implementation), and always yields exactly one
//! `SyncResult` per adapter, so a single vendor outage never degrades the
//! rest of a sync pass.

pub mod error;
pub mod orchestrator;

pub use error::{Result, SyncError};
pub use orchestrator::{ConnectionTest, SyncOrchestrator};
