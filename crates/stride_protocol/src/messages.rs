//! Push and pull messages.

use crate::change::{ApplicationChange, CheckInChange, GoalChange, RoutineChange};
use crate::conflict::Conflict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stride_core::{CheckIn, Goal, JobApplication, Routine};

/// A batch of client-side changes for one push.
///
/// Lists are independent; absent lists read as empty. A single push may
/// carry changes for all four entity types and is applied as one atomic
/// storage transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PushRequest {
    /// Goal changes.
    pub goals: Vec<GoalChange>,
    /// Routine changes.
    pub routines: Vec<RoutineChange>,
    /// Check-in changes.
    pub check_ins: Vec<CheckInChange>,
    /// Job application changes.
    pub applications: Vec<ApplicationChange>,
}

impl PushRequest {
    /// Total number of records in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.goals.len() + self.routines.len() + self.check_ins.len() + self.applications.len()
    }

    /// Returns true if the batch carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accepted canonical records plus the unified conflict list for a push.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushResponse {
    /// Accepted goals, in their canonical server form.
    pub goals: Vec<Goal>,
    /// Accepted routines.
    pub routines: Vec<Routine>,
    /// Accepted check-ins.
    pub check_ins: Vec<CheckIn>,
    /// Accepted job applications.
    pub applications: Vec<JobApplication>,
    /// Changes that could not be applied, with both sides attached.
    pub conflicts: Vec<Conflict>,
    /// The server clock value stamped on every accepted write; the anchor
    /// for the client's next pull watermark.
    pub server_time: DateTime<Utc>,
}

/// A pull request with an optional watermark.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequest {
    /// Lower bound (inclusive) on the server write clock of returned
    /// records. Absent means the epoch, i.e. a full resync.
    pub since: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// A full-resync pull.
    #[must_use]
    pub fn full() -> Self {
        Self { since: None }
    }

    /// An incremental pull from the given watermark.
    #[must_use]
    pub fn since(watermark: DateTime<Utc>) -> Self {
        Self {
            since: Some(watermark),
        }
    }
}

/// Everything changed since the watermark, soft-deleted records included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullResponse {
    /// Changed goals.
    pub goals: Vec<Goal>,
    /// Changed routines.
    pub routines: Vec<Routine>,
    /// Changed check-ins.
    pub check_ins: Vec<CheckIn>,
    /// Changed job applications.
    pub applications: Vec<JobApplication>,
    /// Server clock at response time, intended as the next watermark.
    pub server_time: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_lists_read_as_empty() {
        let request: PushRequest = serde_json::from_str("{}").unwrap();
        assert!(request.is_empty());

        let request: PushRequest =
            serde_json::from_str(r#"{"goals": [], "checkIns": []}"#).unwrap();
        assert_eq!(request.len(), 0);
    }

    #[test]
    fn pull_request_defaults_to_full_resync() {
        let request: PullRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, PullRequest::full());
        assert!(request.since.is_none());
    }
}
