//! Entity adapters for the generic reconciliation algorithm.
//!
//! Each record type plugs into the engine through `SyncEntity`: accessors
//! for the change payload, a fresh-record constructor, the field overwrite,
//! completion derivation, and the constraint hooks. The engine itself runs
//! one algorithm for all four entity types.

use crate::error::EngineResult;
use crate::rules;
use chrono::{DateTime, NaiveDate, Utc};
use stride_core::{
    ApplicationSource, ApplicationStatus, CheckIn, Goal, GoalStatus, JobApplication, RecordId,
    RecordStore, Routine, ScheduleMask, Stores, SyncMeta, Syncable, UserId,
};
use stride_protocol::{
    ApplicationChange, ChangeRecord, CheckInChange, ConflictReason, ConflictRecord, GoalChange,
    RoutineChange,
};

/// A constraint violation surfaced as a per-record conflict.
pub(crate) struct ConstraintConflict {
    /// Why the change was rejected.
    pub reason: ConflictReason,
    /// The server record involved, when there is one.
    pub server: Option<ConflictRecord>,
}

/// Ties one record type to its change payload so the engine can reconcile
/// every entity type with the same code path.
pub(crate) trait SyncEntity: Syncable + Clone + Into<ConflictRecord> {
    /// Client change payload for this record type.
    type Change: Clone + Into<ChangeRecord>;

    /// Store accessor for this record type.
    fn store<'a>(stores: &'a mut dyn Stores) -> &'a mut dyn RecordStore<Self>;

    /// Id targeted by the change.
    fn change_id(change: &Self::Change) -> RecordId;

    /// Device write clock of the change.
    fn client_updated_at(change: &Self::Change) -> DateTime<Utc>;

    /// Tombstone timestamp, when the change is a soft delete.
    fn deleted_at(change: &Self::Change) -> Option<DateTime<Utc>>;

    /// Required-field validation for a non-tombstone change.
    fn validate(change: &Self::Change) -> Result<(), &'static str>;

    /// Builds a record shell for a first-seen id. Field values are
    /// placeholders; `apply` overwrites them from the validated change.
    fn create(owner: UserId, change: &Self::Change) -> Self;

    /// Overwrites the mutable fields from the change snapshot. Required
    /// fields are only written when present; optional fields are replaced
    /// unconditionally so clients can clear them.
    fn apply(&mut self, change: &Self::Change);

    /// Recomputes timestamps derived from the record's own state. Most
    /// entity types derive nothing.
    fn derive_completion(&mut self, change: &Self::Change) {
        let _ = change;
    }

    /// Cross-reference checks, run before the write-clock comparison so a
    /// dangling reference is reported even for stale changes.
    fn check_dependencies(
        stores: &mut dyn Stores,
        owner: UserId,
        change: &Self::Change,
    ) -> EngineResult<Option<ConstraintConflict>> {
        let _ = (stores, owner, change);
        Ok(None)
    }

    /// Uniqueness checks, run once the change has won the write-clock
    /// comparison but before it is applied.
    fn check_uniqueness(
        stores: &mut dyn Stores,
        owner: UserId,
        change: &Self::Change,
        existing: Option<&Self>,
    ) -> EngineResult<Option<ConstraintConflict>> {
        let _ = (stores, owner, change, existing);
        Ok(None)
    }
}

impl SyncEntity for Goal {
    type Change = GoalChange;

    fn store<'a>(stores: &'a mut dyn Stores) -> &'a mut dyn RecordStore<Self> {
        stores.goals()
    }

    fn change_id(change: &GoalChange) -> RecordId {
        change.id
    }

    fn client_updated_at(change: &GoalChange) -> DateTime<Utc> {
        change.client_updated_at
    }

    fn deleted_at(change: &GoalChange) -> Option<DateTime<Utc>> {
        change.deleted_at
    }

    fn validate(change: &GoalChange) -> Result<(), &'static str> {
        rules::validate_goal(change)
    }

    fn create(owner: UserId, change: &GoalChange) -> Self {
        Self {
            id: change.id,
            owner,
            title: String::new(),
            description: None,
            target_date: None,
            status: GoalStatus::default(),
            completed_at: None,
            sync: SyncMeta::new(change.client_updated_at),
        }
    }

    fn apply(&mut self, change: &GoalChange) {
        if let Some(title) = &change.title {
            self.title = title.clone();
        }
        self.description = change.description.clone();
        self.target_date = change.target_date;
        if let Some(status) = change.status {
            self.status = status;
        }
        // completed_at is owned by derive_completion, never copied verbatim.
    }

    fn derive_completion(&mut self, change: &GoalChange) {
        match self.status {
            GoalStatus::Completed => {
                self.completed_at =
                    Some(change.completed_at.unwrap_or(change.client_updated_at));
            }
            GoalStatus::Archived => {
                // An archived goal keeps whatever completion it already had;
                // only an explicit payload value replaces it.
                if let Some(at) = change.completed_at {
                    self.completed_at = Some(at);
                }
            }
            GoalStatus::Active => {
                self.completed_at = None;
            }
        }
    }
}

impl SyncEntity for Routine {
    type Change = RoutineChange;

    fn store<'a>(stores: &'a mut dyn Stores) -> &'a mut dyn RecordStore<Self> {
        stores.routines()
    }

    fn change_id(change: &RoutineChange) -> RecordId {
        change.id
    }

    fn client_updated_at(change: &RoutineChange) -> DateTime<Utc> {
        change.client_updated_at
    }

    fn deleted_at(change: &RoutineChange) -> Option<DateTime<Utc>> {
        change.deleted_at
    }

    fn validate(change: &RoutineChange) -> Result<(), &'static str> {
        rules::validate_routine(change)
    }

    fn create(owner: UserId, change: &RoutineChange) -> Self {
        Self {
            id: change.id,
            owner,
            title: String::new(),
            color_tag: None,
            schedule: ScheduleMask::EMPTY,
            active: false,
            sync: SyncMeta::new(change.client_updated_at),
        }
    }

    fn apply(&mut self, change: &RoutineChange) {
        if let Some(title) = &change.title {
            self.title = title.clone();
        }
        self.color_tag = change.color_tag.clone();
        if !change.schedule_days.is_empty() {
            self.schedule = ScheduleMask::from_days(change.schedule_days.iter().copied());
        }
        if let Some(active) = change.active {
            self.active = active;
        }
    }
}

impl SyncEntity for CheckIn {
    type Change = CheckInChange;

    fn store<'a>(stores: &'a mut dyn Stores) -> &'a mut dyn RecordStore<Self> {
        stores.check_ins()
    }

    fn change_id(change: &CheckInChange) -> RecordId {
        change.id
    }

    fn client_updated_at(change: &CheckInChange) -> DateTime<Utc> {
        change.client_updated_at
    }

    fn deleted_at(change: &CheckInChange) -> Option<DateTime<Utc>> {
        change.deleted_at
    }

    fn validate(change: &CheckInChange) -> Result<(), &'static str> {
        rules::validate_check_in(change)
    }

    fn create(owner: UserId, change: &CheckInChange) -> Self {
        Self {
            id: change.id,
            owner,
            // Placeholders; validation guarantees the change carries both.
            routine_id: change.routine_id.unwrap_or(RecordId::nil()),
            date: change.date.unwrap_or(NaiveDate::MIN),
            completed: false,
            completed_at: None,
            sync: SyncMeta::new(change.client_updated_at),
        }
    }

    fn apply(&mut self, change: &CheckInChange) {
        if let Some(routine_id) = change.routine_id {
            self.routine_id = routine_id;
        }
        if let Some(date) = change.date {
            self.date = date;
        }
        if let Some(completed) = change.completed {
            self.completed = completed;
        }
    }

    fn derive_completion(&mut self, change: &CheckInChange) {
        if self.completed {
            self.completed_at = Some(change.completed_at.unwrap_or(change.client_updated_at));
        } else {
            self.completed_at = None;
        }
    }

    fn check_dependencies(
        stores: &mut dyn Stores,
        owner: UserId,
        change: &CheckInChange,
    ) -> EngineResult<Option<ConstraintConflict>> {
        let Some(routine_id) = change.routine_id else {
            return Ok(None);
        };
        if stores.find_live_routine(owner, routine_id)?.is_none() {
            return Ok(Some(ConstraintConflict {
                reason: ConflictReason::MissingDependency,
                server: None,
            }));
        }
        Ok(None)
    }

    fn check_uniqueness(
        stores: &mut dyn Stores,
        owner: UserId,
        change: &CheckInChange,
        existing: Option<&Self>,
    ) -> EngineResult<Option<ConstraintConflict>> {
        let (Some(routine_id), Some(date)) = (change.routine_id, change.date) else {
            return Ok(None);
        };
        if let Some(existing) = existing {
            // An update keeping its (routine, day) slot cannot collide with
            // itself; only a moved slot is re-checked.
            if existing.routine_id == routine_id && existing.date == date {
                return Ok(None);
            }
        }
        if let Some(other) = stores.find_check_in_for_day(owner, routine_id, date)? {
            return Ok(Some(ConstraintConflict {
                reason: ConflictReason::Duplicate,
                server: Some(other.into()),
            }));
        }
        Ok(None)
    }
}

impl SyncEntity for JobApplication {
    type Change = ApplicationChange;

    fn store<'a>(stores: &'a mut dyn Stores) -> &'a mut dyn RecordStore<Self> {
        stores.applications()
    }

    fn change_id(change: &ApplicationChange) -> RecordId {
        change.id
    }

    fn client_updated_at(change: &ApplicationChange) -> DateTime<Utc> {
        change.client_updated_at
    }

    fn deleted_at(change: &ApplicationChange) -> Option<DateTime<Utc>> {
        change.deleted_at
    }

    fn validate(change: &ApplicationChange) -> Result<(), &'static str> {
        rules::validate_application(change)
    }

    fn create(owner: UserId, change: &ApplicationChange) -> Self {
        Self {
            id: change.id,
            owner,
            company: String::new(),
            role: String::new(),
            location: None,
            source: ApplicationSource::default(),
            status: ApplicationStatus::default(),
            applied_date: None,
            notes: None,
            url: None,
            sync: SyncMeta::new(change.client_updated_at),
        }
    }

    fn apply(&mut self, change: &ApplicationChange) {
        if let Some(company) = &change.company {
            self.company = company.clone();
        }
        if let Some(role) = &change.role {
            self.role = role.clone();
        }
        self.location = change.location.clone();
        if let Some(source) = change.source {
            self.source = source;
        }
        if let Some(status) = change.status {
            self.status = status;
        }
        self.applied_date = change.applied_date;
        self.notes = change.notes.clone();
        self.url = change.url.clone();
    }
}
