//! Check-in records.

use crate::id::{RecordId, UserId};
use crate::sync::{EntityKind, SyncMeta, Syncable};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A daily completion snapshot for a routine.
///
/// The triple `(owner, routine_id, date)` is unique among non-deleted
/// check-ins, which keeps repeated syncs of the same day idempotent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    /// Stable, client-chosen identifier.
    pub id: RecordId,
    /// Owning user.
    #[serde(rename = "ownerId")]
    pub owner: UserId,
    /// The routine this check-in belongs to. Must reference a non-deleted
    /// routine owned by the same user.
    pub routine_id: RecordId,
    /// Calendar day the check-in is for.
    pub date: NaiveDate,
    /// Whether the routine was completed on that day.
    pub completed: bool,
    /// Completion timestamp, derived from `completed` by the engine.
    pub completed_at: Option<DateTime<Utc>>,
    /// Sync metadata.
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Syncable for CheckIn {
    const KIND: EntityKind = EntityKind::CheckIn;

    fn id(&self) -> RecordId {
        self.id
    }

    fn owner(&self) -> UserId {
        self.owner
    }

    fn meta(&self) -> &SyncMeta {
        &self.sync
    }

    fn meta_mut(&mut self) -> &mut SyncMeta {
        &mut self.sync
    }
}
