//! Routine records.

use crate::id::{RecordId, UserId};
use crate::schedule::ScheduleMask;
use crate::sync::{EntityKind, SyncMeta, Syncable};
use serde::{Deserialize, Serialize};

/// A recurring routine with a weekday cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Routine {
    /// Stable, client-chosen identifier.
    pub id: RecordId,
    /// Owning user.
    #[serde(rename = "ownerId")]
    pub owner: UserId,
    /// Short title, never empty.
    pub title: String,
    /// Optional UI color tag.
    pub color_tag: Option<String>,
    /// Scheduled weekdays, stored as a bitmask and serialized as a day
    /// list. Never empty for a live routine.
    #[serde(rename = "scheduleDays")]
    pub schedule: ScheduleMask,
    /// Whether the routine is currently active.
    pub active: bool,
    /// Sync metadata.
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Syncable for Routine {
    const KIND: EntityKind = EntityKind::Routine;

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
