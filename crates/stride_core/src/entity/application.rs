//! Job application records.

use crate::id::{RecordId, UserId};
use crate::sync::{EntityKind, SyncMeta, Syncable};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inbound channel a job application came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationSource {
    /// Found via LinkedIn.
    #[serde(rename = "LINKEDIN")]
    LinkedIn,
    /// Found via Indeed.
    Indeed,
    /// Applied through the company website.
    Website,
    /// Referred by a contact.
    Referral,
    /// Anything else.
    #[default]
    Other,
}

/// Lifecycle stages of a job application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    /// Not submitted yet.
    #[default]
    Draft,
    /// Application sent.
    Applied,
    /// Interviewing.
    Interview,
    /// Offer received.
    Offer,
    /// Rejected by the company.
    Rejected,
    /// No longer pursued.
    Archived,
}

/// A tracked job application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobApplication {
    /// Stable, client-chosen identifier.
    pub id: RecordId,
    /// Owning user.
    #[serde(rename = "ownerId")]
    pub owner: UserId,
    /// Company name, never empty.
    pub company: String,
    /// Role applied for, never empty.
    pub role: String,
    /// Job location, if known.
    pub location: Option<String>,
    /// Where the application originated.
    pub source: ApplicationSource,
    /// Current stage.
    pub status: ApplicationStatus,
    /// Date the application was submitted.
    pub applied_date: Option<NaiveDate>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Posting or tracking URL.
    pub url: Option<String>,
    /// Sync metadata.
    #[serde(flatten)]
    pub sync: SyncMeta,
}

impl Syncable for JobApplication {
    const KIND: EntityKind = EntityKind::JobApplication;

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
