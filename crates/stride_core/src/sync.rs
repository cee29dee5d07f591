//! Sync metadata shared by every syncable record.

use crate::id::{RecordId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of record involved in a sync outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    /// A goal record.
    Goal,
    /// A routine record.
    Routine,
    /// A check-in record.
    CheckIn,
    /// A job application record.
    JobApplication,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Goal => "GOAL",
            EntityKind::Routine => "ROUTINE",
            EntityKind::CheckIn => "CHECK_IN",
            EntityKind::JobApplication => "JOB_APPLICATION",
        };
        f.write_str(name)
    }
}

/// Conflict-resolution metadata embedded in every syncable record.
///
/// Records compose this value instead of inheriting it, so one generic
/// reconciliation algorithm can operate on all entity types through the
/// [`Syncable`] trait.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMeta {
    /// Timestamp asserted by the device that produced the current field
    /// values. This is the version the conflict comparison runs against.
    pub client_updated_at: DateTime<Utc>,
    /// Timestamp assigned by the server when it accepted the last write.
    /// Authoritative write clock, non-decreasing across the record's life.
    pub server_updated_at: DateTime<Utc>,
    /// Tombstone timestamp. Once set the record is soft-deleted; it stays
    /// in storage and keeps flowing through the change feed so clients can
    /// purge their local copy.
    pub deleted_at: Option<DateTime<Utc>>,
}

impl SyncMeta {
    /// Creates metadata for a record first seen from a client device.
    ///
    /// The server write clock starts at the client's timestamp; the engine
    /// overwrites it the moment the record is accepted.
    #[must_use]
    pub fn new(client_updated_at: DateTime<Utc>) -> Self {
        Self {
            client_updated_at,
            server_updated_at: client_updated_at,
            deleted_at: None,
        }
    }
}

/// Capability trait for records that participate in offline reconciliation.
pub trait Syncable {
    /// Kind tag used in conflicts and errors.
    const KIND: EntityKind;

    /// Stable, client-chosen identifier.
    fn id(&self) -> RecordId;

    /// The user that exclusively owns this record.
    fn owner(&self) -> UserId;

    /// Shared sync metadata.
    fn meta(&self) -> &SyncMeta;

    /// Mutable access to the sync metadata.
    fn meta_mut(&mut self) -> &mut SyncMeta;

    /// Returns true once the record has been tombstoned.
    fn is_deleted(&self) -> bool {
        self.meta().deleted_at.is_some()
    }
}
