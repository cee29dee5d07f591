//! In-memory record stores.
//!
//! Reference implementation of the store traits, backed by ordered maps
//! under a single `RwLock`. A transaction holds the write lock for its
//! whole duration, so overlapping pushes are fully serialized and the
//! engine's accept/reject decisions always see committed state.

use crate::entity::{CheckIn, Goal, JobApplication, Routine};
use crate::id::{RecordId, UserId};
use crate::store::{RecordStore, StoreError, StoreResult, StoreSet, Stores};
use crate::sync::Syncable;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;
use std::collections::BTreeMap;

type Key = (UserId, RecordId);

#[derive(Debug, Clone, Default)]
struct State {
    goals: BTreeMap<Key, Goal>,
    routines: BTreeMap<Key, Routine>,
    check_ins: BTreeMap<Key, CheckIn>,
    applications: BTreeMap<Key, JobApplication>,
}

impl<T: Syncable + Clone> RecordStore<T> for BTreeMap<Key, T> {
    fn find_by_id(&self, owner: UserId, id: RecordId) -> StoreResult<Option<T>> {
        Ok(self.get(&(owner, id)).cloned())
    }

    fn save(&mut self, record: T) -> StoreResult<T> {
        self.insert((record.owner(), record.id()), record.clone());
        Ok(record)
    }

    fn changed_since(&self, owner: UserId, since: DateTime<Utc>) -> StoreResult<Vec<T>> {
        Ok(self
            .values()
            .filter(|record| record.owner() == owner && record.meta().server_updated_at >= since)
            .cloned()
            .collect())
    }
}

/// In-memory implementation of [`StoreSet`].
#[derive(Debug, Default)]
pub struct MemoryStores {
    state: RwLock<State>,
}

impl MemoryStores {
    /// Creates an empty store set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreSet for MemoryStores {
    type Txn<'a> = MemoryTxn<'a>;

    fn transaction<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut MemoryTxn<'_>) -> Result<T, E>,
        E: From<StoreError>,
    {
        let mut state = self.state.write();
        let snapshot = state.clone();
        let result = f(&mut MemoryTxn { state: &mut state });
        if result.is_err() {
            *state = snapshot;
        }
        result
    }
}

/// Mutable transaction view over [`MemoryStores`].
pub struct MemoryTxn<'a> {
    state: &'a mut State,
}

impl Stores for MemoryTxn<'_> {
    fn goals(&mut self) -> &mut dyn RecordStore<Goal> {
        &mut self.state.goals
    }

    fn routines(&mut self) -> &mut dyn RecordStore<Routine> {
        &mut self.state.routines
    }

    fn check_ins(&mut self) -> &mut dyn RecordStore<CheckIn> {
        &mut self.state.check_ins
    }

    fn applications(&mut self) -> &mut dyn RecordStore<JobApplication> {
        &mut self.state.applications
    }

    fn find_check_in_for_day(
        &mut self,
        owner: UserId,
        routine_id: RecordId,
        date: NaiveDate,
    ) -> StoreResult<Option<CheckIn>> {
        Ok(self
            .state
            .check_ins
            .values()
            .find(|check_in| {
                check_in.owner == owner
                    && check_in.routine_id == routine_id
                    && check_in.date == date
                    && !check_in.is_deleted()
            })
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::{ScheduleMask, Weekday};
    use crate::sync::SyncMeta;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn goal(owner: UserId, secs: i64) -> Goal {
        Goal {
            id: RecordId::new(),
            owner,
            title: "Read more".into(),
            description: None,
            target_date: None,
            status: crate::entity::GoalStatus::Active,
            completed_at: None,
            sync: SyncMeta::new(at(secs)),
        }
    }

    fn routine(owner: UserId, secs: i64) -> Routine {
        Routine {
            id: RecordId::new(),
            owner,
            title: "Morning run".into(),
            color_tag: None,
            schedule: ScheduleMask::from_days([Weekday::Monday]),
            active: true,
            sync: SyncMeta::new(at(secs)),
        }
    }

    fn check_in(owner: UserId, routine_id: RecordId, date: NaiveDate) -> CheckIn {
        CheckIn {
            id: RecordId::new(),
            owner,
            routine_id,
            date,
            completed: true,
            completed_at: None,
            sync: SyncMeta::new(at(10)),
        }
    }

    #[test]
    fn save_and_find_roundtrip() {
        let stores = MemoryStores::new();
        let owner = UserId::new();
        let record = goal(owner, 1);
        let id = record.id;

        stores
            .transaction::<_, StoreError, _>(|txn| {
                txn.goals().save(record.clone())?;
                Ok(())
            })
            .unwrap();

        let found = stores
            .transaction::<_, StoreError, _>(|txn| txn.goals().find_by_id(owner, id))
            .unwrap();
        assert_eq!(found, Some(record));
    }

    #[test]
    fn find_is_scoped_by_owner() {
        let stores = MemoryStores::new();
        let owner = UserId::new();
        let record = goal(owner, 1);
        let id = record.id;

        stores
            .transaction::<_, StoreError, _>(|txn| txn.goals().save(record).map(|_| ()))
            .unwrap();

        let other = stores
            .transaction::<_, StoreError, _>(|txn| txn.goals().find_by_id(UserId::new(), id))
            .unwrap();
        assert!(other.is_none());
    }

    #[test]
    fn changed_since_is_inclusive_and_keeps_tombstones() {
        let stores = MemoryStores::new();
        let owner = UserId::new();
        let mut old = goal(owner, 1);
        old.sync.server_updated_at = at(5);
        let mut deleted = goal(owner, 1);
        deleted.sync.server_updated_at = at(10);
        deleted.sync.deleted_at = Some(at(10));

        stores
            .transaction::<_, StoreError, _>(|txn| {
                txn.goals().save(old)?;
                txn.goals().save(deleted)?;
                Ok(())
            })
            .unwrap();

        let changed = stores
            .transaction::<_, StoreError, _>(|txn| txn.goals().changed_since(owner, at(10)))
            .unwrap();
        assert_eq!(changed.len(), 1);
        assert!(changed[0].is_deleted());

        let all = stores
            .transaction::<_, StoreError, _>(|txn| txn.goals().changed_since(owner, at(5)))
            .unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn failed_transaction_rolls_back_all_writes() {
        let stores = MemoryStores::new();
        let owner = UserId::new();
        let record = goal(owner, 1);
        let id = record.id;

        let result: Result<(), StoreError> = stores.transaction(|txn| {
            txn.goals().save(record)?;
            txn.routines().save(routine(owner, 1))?;
            Err(StoreError::backend("simulated failure"))
        });
        assert!(result.is_err());

        let found = stores
            .transaction::<_, StoreError, _>(|txn| txn.goals().find_by_id(owner, id))
            .unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn writes_are_visible_within_the_transaction() {
        let stores = MemoryStores::new();
        let owner = UserId::new();
        let record = routine(owner, 1);
        let id = record.id;

        stores
            .transaction::<_, StoreError, _>(|txn| {
                txn.routines().save(record)?;
                assert!(txn.find_live_routine(owner, id)?.is_some());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn live_routine_lookup_skips_tombstones() {
        let stores = MemoryStores::new();
        let owner = UserId::new();
        let mut record = routine(owner, 1);
        record.sync.deleted_at = Some(at(2));
        let id = record.id;

        stores
            .transaction::<_, StoreError, _>(|txn| {
                txn.routines().save(record)?;
                assert!(txn.find_live_routine(owner, id)?.is_none());
                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn check_in_day_lookup_skips_tombstones() {
        let stores = MemoryStores::new();
        let owner = UserId::new();
        let routine_id = RecordId::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let live = check_in(owner, routine_id, date);
        let mut dead = check_in(owner, routine_id, date);
        dead.sync.deleted_at = Some(at(20));

        stores
            .transaction::<_, StoreError, _>(|txn| {
                txn.check_ins().save(dead)?;
                let found = txn.find_check_in_for_day(owner, routine_id, date)?;
                assert!(found.is_none());

                txn.check_ins().save(live.clone())?;
                let found = txn.find_check_in_for_day(owner, routine_id, date)?;
                assert_eq!(found.map(|c| c.id), Some(live.id));
                Ok(())
            })
            .unwrap();
    }
}
