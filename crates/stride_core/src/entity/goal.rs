//! Goal records.

use crate::id::{RecordId, UserId};
use crate::sync::{EntityKind, SyncMeta, Syncable};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle states for a goal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalStatus {
    /// The goal is being worked on.
    #[default]
    Active,
    /// The goal has been reached.
    Completed,
    /// The goal was shelved without being completed.
    Archived,
}

/// A personal goal with progress state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Stable, client-chosen identifier.
    pub id: RecordId,
    /// Owning user.
    #[serde(rename = "ownerId")]
    pub owner: UserId,
    /// Short title, never empty.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Date the goal should be reached by.
    pub target_date: Option<NaiveDate>,
    /// Lifecycle status.
    pub status: GoalStatus,
    /// Completion timestamp, derived from `status` by the engine rather
    /// than trusted verbatim from clients.
    pub completed_at: Option<DateTime<Utc>>,
    /// Sync metadata.
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Syncable for Goal {
    const KIND: EntityKind = EntityKind::Goal;

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
