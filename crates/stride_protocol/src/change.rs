//! Per-entity change payloads submitted by offline clients.
//!
//! A change is a whole-record snapshot as the device last saw it. Only the
//! id and the client write clock are mandatory at the wire level; required
//! domain fields are enforced by the engine's rule set so a malformed
//! payload can be reported per record instead of failing deserialization.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stride_core::{ApplicationSource, ApplicationStatus, GoalStatus, RecordId, Weekday};

/// A goal change coming from an offline client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalChange {
    /// Client-chosen record id.
    pub id: RecordId,
    /// Goal title. Required unless the change is a tombstone.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Target date.
    #[serde(default)]
    pub target_date: Option<NaiveDate>,
    /// Lifecycle status. Required unless the change is a tombstone.
    #[serde(default)]
    pub status: Option<GoalStatus>,
    /// Explicit completion timestamp; the engine derives the stored value.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Device timestamp of this snapshot.
    pub client_updated_at: DateTime<Utc>,
    /// Tombstone timestamp; when set, the change is a soft delete.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A routine change coming from an offline client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineChange {
    /// Client-chosen record id.
    pub id: RecordId,
    /// Routine title. Required unless the change is a tombstone.
    #[serde(default)]
    pub title: Option<String>,
    /// Optional UI color tag.
    #[serde(default)]
    pub color_tag: Option<String>,
    /// Scheduled weekdays. At least one is required unless the change is a
    /// tombstone.
    #[serde(default)]
    pub schedule_days: Vec<Weekday>,
    /// Active flag. Required unless the change is a tombstone.
    #[serde(default)]
    pub active: Option<bool>,
    /// Device timestamp of this snapshot.
    pub client_updated_at: DateTime<Utc>,
    /// Tombstone timestamp; when set, the change is a soft delete.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A check-in change coming from an offline client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInChange {
    /// Client-chosen record id.
    pub id: RecordId,
    /// Routine the check-in belongs to. Required unless the change is a
    /// tombstone.
    #[serde(default)]
    pub routine_id: Option<RecordId>,
    /// Calendar day. Required unless the change is a tombstone.
    #[serde(default)]
    pub date: Option<NaiveDate>,
    /// Completion flag. Required unless the change is a tombstone.
    #[serde(default)]
    pub completed: Option<bool>,
    /// Explicit completion timestamp; the engine derives the stored value.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Device timestamp of this snapshot.
    pub client_updated_at: DateTime<Utc>,
    /// Tombstone timestamp; when set, the change is a soft delete.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

/// A job application change coming from an offline client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationChange {
    /// Client-chosen record id.
    pub id: RecordId,
    /// Company name. Required unless the change is a tombstone.
    #[serde(default)]
    pub company: Option<String>,
    /// Role applied for. Required unless the change is a tombstone.
    #[serde(default)]
    pub role: Option<String>,
    /// Job location.
    #[serde(default)]
    pub location: Option<String>,
    /// Application source. Required unless the change is a tombstone.
    #[serde(default)]
    pub source: Option<ApplicationSource>,
    /// Application status. Required unless the change is a tombstone.
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
    /// Date the application was submitted.
    #[serde(default)]
    pub applied_date: Option<NaiveDate>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: Option<String>,
    /// Posting or tracking URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Device timestamp of this snapshot.
    pub client_updated_at: DateTime<Utc>,
    /// Tombstone timestamp; when set, the change is a soft delete.
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_goal_change_deserializes() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "clientUpdatedAt": "2024-03-15T08:00:00Z"
        }"#;
        let change: GoalChange = serde_json::from_str(json).unwrap();
        assert!(change.title.is_none());
        assert!(change.deleted_at.is_none());
    }

    #[test]
    fn routine_change_accepts_day_names() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "title": "Stretch",
            "scheduleDays": ["MONDAY", "FRIDAY"],
            "active": true,
            "clientUpdatedAt": "2024-03-15T08:00:00Z"
        }"#;
        let change: RoutineChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.schedule_days, vec![Weekday::Monday, Weekday::Friday]);
    }

    #[test]
    fn application_change_accepts_wire_enum_names() {
        let json = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "company": "Acme",
            "role": "Engineer",
            "source": "LINKEDIN",
            "status": "APPLIED",
            "clientUpdatedAt": "2024-03-15T08:00:00Z"
        }"#;
        let change: ApplicationChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.source, Some(ApplicationSource::LinkedIn));
        assert_eq!(change.status, Some(ApplicationStatus::Applied));
    }
}
