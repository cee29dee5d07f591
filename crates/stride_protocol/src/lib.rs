//! # Stride Sync Protocol
//!
//! Wire types for the stride sync protocol.
//!
//! This crate provides:
//! - Per-entity change payloads submitted by offline clients
//! - Push/pull request and response messages
//! - The conflict descriptor returned alongside accepted records
//!
//! This is a pure data crate with no I/O operations.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod change;
mod conflict;
mod messages;

pub use change::{ApplicationChange, CheckInChange, GoalChange, RoutineChange};
pub use conflict::{ChangeRecord, Conflict, ConflictReason, ConflictRecord};
pub use messages::{PullRequest, PullResponse, PushRequest, PushResponse};
