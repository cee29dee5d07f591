//! # Stride Core
//!
//! Domain records and record stores for the stride sync service.
//!
//! This crate provides:
//! - The four syncable record types (goals, routines, check-ins, job applications)
//! - Sync metadata (`SyncMeta`) and the `Syncable` capability trait
//! - The weekday schedule codec (`ScheduleMask`)
//! - Record-store traits and an in-memory reference implementation

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod entity;
mod id;
pub mod memory;
pub mod schedule;
pub mod store;
mod sync;

pub use entity::{
    ApplicationSource, ApplicationStatus, CheckIn, Goal, GoalStatus, JobApplication, Routine,
};
pub use id::{RecordId, UserId};
pub use memory::MemoryStores;
pub use schedule::{ScheduleMask, Weekday};
pub use store::{RecordStore, StoreError, StoreResult, StoreSet, Stores};
pub use sync::{EntityKind, SyncMeta, Syncable};
