//! # Stride Sync Engine
//!
//! Server-side reconciliation engine for the stride sync protocol.
//!
//! This crate provides:
//! - `SyncEngine`, applying push batches under last-writer-wins semantics
//! - The per-entity rule set (validation, dependency, uniqueness)
//! - Completion-timestamp derivation for goals and check-ins
//! - The incremental pull change feed
//! - An injectable `Clock` so behavior is deterministic and testable

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod clock;
mod config;
mod engine;
mod entity;
mod error;
mod rules;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::EngineConfig;
pub use engine::SyncEngine;
pub use error::{EngineError, EngineResult};
