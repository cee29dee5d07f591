//! Conflict descriptors.
//!
//! A conflict is a normal reconciliation outcome, not an error: the engine
//! returns the server's current version next to the client's submitted
//! payload so the device can re-merge and resubmit.
//!
//! `server` and `client` are serialized untagged; the `entityType` field
//! discriminates them, so deserialization goes through [`Conflict`], which
//! reads that field first and picks the payload type from it. Untagged
//! resolution alone cannot tell the payloads apart: every change type is a
//! superset of the mandatory id + clock pair.

use crate::change::{ApplicationChange, CheckInChange, GoalChange, RoutineChange};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use stride_core::{CheckIn, EntityKind, Goal, JobApplication, RecordId, Routine};

/// Why a change was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictReason {
    /// The server's write clock is strictly newer than the client's
    /// asserted timestamp; applying would lose a later write.
    ServerNewer,
    /// The change references a record that does not exist or is
    /// soft-deleted; syncing the dependency first resolves it.
    MissingDependency,
    /// Another live record already occupies the same uniqueness slot.
    Duplicate,
}

/// Server-side record attached to a conflict.
///
/// Serialized untagged; deserialized through [`Conflict`], keyed on its
/// `entityType`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConflictRecord {
    /// A goal record.
    Goal(Goal),
    /// A routine record.
    Routine(Routine),
    /// A check-in record.
    CheckIn(CheckIn),
    /// A job application record.
    Application(JobApplication),
}

impl From<Goal> for ConflictRecord {
    fn from(record: Goal) -> Self {
        Self::Goal(record)
    }
}

impl From<Routine> for ConflictRecord {
    fn from(record: Routine) -> Self {
        Self::Routine(record)
    }
}

impl From<CheckIn> for ConflictRecord {
    fn from(record: CheckIn) -> Self {
        Self::CheckIn(record)
    }
}

impl From<JobApplication> for ConflictRecord {
    fn from(record: JobApplication) -> Self {
        Self::Application(record)
    }
}

impl ConflictRecord {
    fn from_value(kind: EntityKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            EntityKind::Goal => Self::Goal(serde_json::from_value(value)?),
            EntityKind::Routine => Self::Routine(serde_json::from_value(value)?),
            EntityKind::CheckIn => Self::CheckIn(serde_json::from_value(value)?),
            EntityKind::JobApplication => Self::Application(serde_json::from_value(value)?),
        })
    }
}

/// Client-side change payload attached to a conflict.
///
/// Serialized untagged; deserialized through [`Conflict`], keyed on its
/// `entityType`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ChangeRecord {
    /// A goal change.
    Goal(GoalChange),
    /// A routine change.
    Routine(RoutineChange),
    /// A check-in change.
    CheckIn(CheckInChange),
    /// A job application change.
    Application(ApplicationChange),
}

impl From<GoalChange> for ChangeRecord {
    fn from(change: GoalChange) -> Self {
        Self::Goal(change)
    }
}

impl From<RoutineChange> for ChangeRecord {
    fn from(change: RoutineChange) -> Self {
        Self::Routine(change)
    }
}

impl From<CheckInChange> for ChangeRecord {
    fn from(change: CheckInChange) -> Self {
        Self::CheckIn(change)
    }
}

impl From<ApplicationChange> for ChangeRecord {
    fn from(change: ApplicationChange) -> Self {
        Self::Application(change)
    }
}

impl ChangeRecord {
    fn from_value(kind: EntityKind, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match kind {
            EntityKind::Goal => Self::Goal(serde_json::from_value(value)?),
            EntityKind::Routine => Self::Routine(serde_json::from_value(value)?),
            EntityKind::CheckIn => Self::CheckIn(serde_json::from_value(value)?),
            EntityKind::JobApplication => Self::Application(serde_json::from_value(value)?),
        })
    }
}

/// A rejected change, carrying both sides for client-side resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conflict {
    /// Kind of record involved. Discriminates `server` and `client` on the
    /// wire, where both are serialized untagged.
    pub entity_type: EntityKind,
    /// Id of the record the change targeted.
    pub id: RecordId,
    /// Why the change was rejected.
    pub reason: ConflictReason,
    /// The server's current version, when one exists.
    pub server: Option<ConflictRecord>,
    /// The payload the client submitted.
    pub client: ChangeRecord,
}

impl Conflict {
    /// Creates a conflict descriptor.
    #[must_use]
    pub fn new(
        entity_type: EntityKind,
        id: RecordId,
        reason: ConflictReason,
        server: Option<ConflictRecord>,
        client: ChangeRecord,
    ) -> Self {
        Self {
            entity_type,
            id,
            reason,
            server,
            client,
        }
    }
}

impl<'de> Deserialize<'de> for Conflict {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            entity_type: EntityKind,
            id: RecordId,
            reason: ConflictReason,
            #[serde(default)]
            server: Option<serde_json::Value>,
            client: serde_json::Value,
        }

        let raw = Raw::deserialize(deserializer)?;
        let server = raw
            .server
            .map(|value| ConflictRecord::from_value(raw.entity_type, value))
            .transpose()
            .map_err(de::Error::custom)?;
        let client =
            ChangeRecord::from_value(raw.entity_type, raw.client).map_err(de::Error::custom)?;
        Ok(Self {
            entity_type: raw.entity_type,
            id: raw.id,
            reason: raw.reason,
            server,
            client,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use stride_core::{ScheduleMask, SyncMeta, UserId, Weekday};

    #[test]
    fn conflict_wire_shape() {
        let change = GoalChange {
            id: RecordId::new(),
            title: Some("Read".into()),
            description: None,
            target_date: None,
            status: None,
            completed_at: None,
            client_updated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            deleted_at: None,
        };
        let conflict = Conflict::new(
            EntityKind::Goal,
            change.id,
            ConflictReason::ServerNewer,
            None,
            change.into(),
        );

        let value = serde_json::to_value(&conflict).unwrap();
        assert_eq!(value["entityType"], "GOAL");
        assert_eq!(value["reason"], "SERVER_NEWER");
        assert!(value["server"].is_null());
        assert_eq!(value["client"]["title"], "Read");
    }

    #[test]
    fn routine_conflict_round_trips_typed() {
        let at = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let change = RoutineChange {
            id: RecordId::new(),
            title: Some("Stretch".into()),
            color_tag: None,
            schedule_days: vec![Weekday::Monday, Weekday::Friday],
            active: Some(true),
            client_updated_at: at,
            deleted_at: None,
        };
        let server = Routine {
            id: change.id,
            owner: UserId::new(),
            title: "Stretch".into(),
            color_tag: Some("teal".into()),
            schedule: ScheduleMask::from_days([Weekday::Monday]),
            active: true,
            sync: SyncMeta::new(at),
        };
        let conflict = Conflict::new(
            EntityKind::Routine,
            change.id,
            ConflictReason::ServerNewer,
            Some(server.clone().into()),
            change.clone().into(),
        );

        let json = serde_json::to_string(&conflict).unwrap();
        let back: Conflict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conflict);
        match &back.client {
            ChangeRecord::Routine(client) => {
                assert_eq!(client.schedule_days, change.schedule_days);
                assert_eq!(client.active, Some(true));
            }
            other => panic!("expected a routine change, got {other:?}"),
        }
        match &back.server {
            Some(ConflictRecord::Routine(record)) => assert_eq!(record, &server),
            other => panic!("expected the server routine, got {other:?}"),
        }
    }

    #[test]
    fn check_in_conflict_without_server_round_trips_typed() {
        let change = CheckInChange {
            id: RecordId::new(),
            routine_id: Some(RecordId::new()),
            date: Some("2024-03-15".parse().unwrap()),
            completed: Some(true),
            completed_at: None,
            client_updated_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            deleted_at: None,
        };
        let conflict = Conflict::new(
            EntityKind::CheckIn,
            change.id,
            ConflictReason::MissingDependency,
            None,
            change.clone().into(),
        );

        let json = serde_json::to_string(&conflict).unwrap();
        let back: Conflict = serde_json::from_str(&json).unwrap();
        assert_eq!(back, conflict);
        assert!(back.server.is_none());
        match &back.client {
            ChangeRecord::CheckIn(client) => {
                assert_eq!(client.routine_id, change.routine_id);
                assert_eq!(client.date, change.date);
            }
            other => panic!("expected a check-in change, got {other:?}"),
        }
    }

    #[test]
    fn reason_wire_names_are_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ConflictReason::MissingDependency).unwrap(),
            "\"MISSING_DEPENDENCY\""
        );
        assert_eq!(
            serde_json::to_string(&ConflictReason::Duplicate).unwrap(),
            "\"DUPLICATE\""
        );
    }
}
