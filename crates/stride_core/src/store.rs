//! Record-store traits and errors.
//!
//! Storage is a seam: the reconciliation engine only sees these traits.
//! Implementations must serialize overlapping writes to the same record so
//! the engine's write-clock comparison never runs against a stale read.

use crate::entity::{CheckIn, Goal, JobApplication, Routine};
use crate::id::{RecordId, UserId};
use crate::sync::Syncable;
use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a record store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The storage backend failed to read or write.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Creates a backend failure error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}

/// Durable keyed storage for one syncable record type.
///
/// Stores hold the authoritative server version of every record of one
/// user, soft-deleted records included. Records are never physically
/// removed; deletion happens only through the tombstone field.
pub trait RecordStore<T: Syncable> {
    /// Looks up a record by owner and id, including soft-deleted records.
    fn find_by_id(&self, owner: UserId, id: RecordId) -> StoreResult<Option<T>>;

    /// Persists a record, replacing any previous version, and returns the
    /// stored form.
    fn save(&mut self, record: T) -> StoreResult<T>;

    /// Returns every record of the owner whose server write clock is at or
    /// after `since`, soft-deleted records included.
    fn changed_since(&self, owner: UserId, since: DateTime<Utc>) -> StoreResult<Vec<T>>;
}

/// One store per entity type, plus the discriminator lookups the
/// reconciliation rules need.
pub trait Stores {
    /// Goal store.
    fn goals(&mut self) -> &mut dyn RecordStore<Goal>;

    /// Routine store.
    fn routines(&mut self) -> &mut dyn RecordStore<Routine>;

    /// Check-in store.
    fn check_ins(&mut self) -> &mut dyn RecordStore<CheckIn>;

    /// Job application store.
    fn applications(&mut self) -> &mut dyn RecordStore<JobApplication>;

    /// Looks up a routine that has not been soft-deleted.
    fn find_live_routine(&mut self, owner: UserId, id: RecordId) -> StoreResult<Option<Routine>> {
        Ok(self
            .routines()
            .find_by_id(owner, id)?
            .filter(|routine| !routine.is_deleted()))
    }

    /// Looks up the non-deleted check-in for `(owner, routine, date)`.
    fn find_check_in_for_day(
        &mut self,
        owner: UserId,
        routine_id: RecordId,
        date: NaiveDate,
    ) -> StoreResult<Option<CheckIn>>;
}

/// A set of entity stores with an atomic transaction boundary.
pub trait StoreSet {
    /// Transaction view over all entity stores.
    type Txn<'a>: Stores
    where
        Self: 'a;

    /// Runs `f` against the stores inside one transaction.
    ///
    /// Every write performed by `f` commits together when it returns `Ok`
    /// and is discarded entirely when it returns `Err`. Writes made earlier
    /// inside the transaction are visible to later reads, so a batch can
    /// depend on records it accepted moments before.
    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self::Txn<'_>) -> Result<T, E>,
        E: From<StoreError>;
}
