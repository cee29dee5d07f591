//! Push/pull reconciliation.

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::entity::{ConstraintConflict, SyncEntity};
use crate::error::{EngineError, EngineResult};
use chrono::{DateTime, Utc};
use stride_core::{CheckIn, Goal, JobApplication, RecordId, Routine, StoreSet, Stores, UserId};
use stride_protocol::{Conflict, ConflictReason, PullRequest, PullResponse, PushRequest, PushResponse};
use tracing::debug;

/// Applies client change batches against the record stores under
/// last-writer-wins semantics and serves the incremental change feed.
///
/// The engine is stateless apart from the stores and the clock; every push
/// and pull runs inside one store transaction.
pub struct SyncEngine<S, C = SystemClock> {
    stores: S,
    clock: C,
    config: EngineConfig,
}

impl<S: StoreSet> SyncEngine<S> {
    /// Creates an engine over the given stores with the system clock.
    pub fn new(stores: S) -> Self {
        Self::with_clock(stores, SystemClock)
    }
}

impl<S: StoreSet, C: Clock> SyncEngine<S, C> {
    /// Creates an engine with an injected clock.
    pub fn with_clock(stores: S, clock: C) -> Self {
        Self {
            stores,
            clock,
            config: EngineConfig::default(),
        }
    }

    /// Replaces the engine configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// The underlying store set.
    pub fn stores(&self) -> &S {
        &self.stores
    }

    /// Applies a batch of client changes for one user.
    ///
    /// Records are reconciled independently, in input order within each
    /// list: goals, then routines, then check-ins, then job applications.
    /// Conflicts never abort the batch; they are collected and returned.
    /// A malformed payload fails the whole push and every write staged for
    /// it is rolled back.
    pub fn push(&self, owner: UserId, request: &PushRequest) -> EngineResult<PushResponse> {
        if request.len() > self.config.max_push_records {
            return Err(EngineError::BatchTooLarge {
                size: request.len(),
                max: self.config.max_push_records,
            });
        }

        let response = self
            .stores
            .transaction(|txn| -> EngineResult<PushResponse> {
                // Sampled under the store lock: two overlapping pushes to
                // the same record must stamp in commit order.
                let now = self.clock.now();
                let mut conflicts = Vec::new();
                let goals =
                    reconcile_batch::<Goal>(txn, owner, &request.goals, now, &mut conflicts)?;
                let routines =
                    reconcile_batch::<Routine>(txn, owner, &request.routines, now, &mut conflicts)?;
                let check_ins = reconcile_batch::<CheckIn>(
                    txn,
                    owner,
                    &request.check_ins,
                    now,
                    &mut conflicts,
                )?;
                let applications = reconcile_batch::<JobApplication>(
                    txn,
                    owner,
                    &request.applications,
                    now,
                    &mut conflicts,
                )?;
                Ok(PushResponse {
                    goals,
                    routines,
                    check_ins,
                    applications,
                    conflicts,
                    server_time: now,
                })
            })?;

        debug!(
            %owner,
            submitted = request.len(),
            accepted = response.goals.len()
                + response.routines.len()
                + response.check_ins.len()
                + response.applications.len(),
            conflicts = response.conflicts.len(),
            "push reconciled"
        );
        Ok(response)
    }

    /// Returns every record of the owner changed at or after the watermark,
    /// soft-deleted records included. An absent watermark means the epoch,
    /// i.e. a full resync.
    pub fn pull(&self, owner: UserId, request: &PullRequest) -> EngineResult<PullResponse> {
        let since = request.since.unwrap_or(DateTime::UNIX_EPOCH);
        let response = self
            .stores
            .transaction(|txn| -> EngineResult<PullResponse> {
                let server_time = self.clock.now();
                Ok(PullResponse {
                    goals: txn.goals().changed_since(owner, since)?,
                    routines: txn.routines().changed_since(owner, since)?,
                    check_ins: txn.check_ins().changed_since(owner, since)?,
                    applications: txn.applications().changed_since(owner, since)?,
                    server_time,
                })
            })?;

        debug!(
            %owner,
            %since,
            records = response.goals.len()
                + response.routines.len()
                + response.check_ins.len()
                + response.applications.len(),
            "pull served"
        );
        Ok(response)
    }
}

/// True when the server's write clock is strictly newer than the client's
/// asserted timestamp. Equal clocks let the client through, which keeps
/// resubmission of an already-accepted change idempotent.
fn server_newer<E: SyncEntity>(record: &E, change: &E::Change) -> bool {
    record.meta().server_updated_at > E::client_updated_at(change)
}

fn conflict<E: SyncEntity>(
    id: RecordId,
    reason: ConflictReason,
    server: Option<E>,
    change: &E::Change,
) -> Conflict {
    Conflict::new(E::KIND, id, reason, server.map(Into::into), change.clone().into())
}

fn constraint_conflict<E: SyncEntity>(
    id: RecordId,
    found: ConstraintConflict,
    change: &E::Change,
) -> Conflict {
    Conflict::new(E::KIND, id, found.reason, found.server, change.clone().into())
}

/// Reconciles one entity type's change list, in input order.
fn reconcile_batch<E: SyncEntity>(
    txn: &mut dyn Stores,
    owner: UserId,
    changes: &[E::Change],
    now: DateTime<Utc>,
    conflicts: &mut Vec<Conflict>,
) -> EngineResult<Vec<E>> {
    let mut accepted = Vec::new();
    for change in changes {
        if let Some(record) = reconcile_one::<E>(txn, owner, change, now, conflicts)? {
            accepted.push(record);
        }
    }
    Ok(accepted)
}

/// Applies one inbound change: either returns the accepted canonical
/// record, records a conflict, or silently drops a tombstone for an id the
/// server never saw.
fn reconcile_one<E: SyncEntity>(
    txn: &mut dyn Stores,
    owner: UserId,
    change: &E::Change,
    now: DateTime<Utc>,
    conflicts: &mut Vec<Conflict>,
) -> EngineResult<Option<E>> {
    let id = E::change_id(change);
    let existing = E::store(txn).find_by_id(owner, id)?;
    let prev_server = existing.as_ref().map(|record| record.meta().server_updated_at);

    // Tombstone: soft-delete unless the server holds a newer write.
    // Deleting an id the server never saw is a no-op, not an error.
    if let Some(deleted_at) = E::deleted_at(change) {
        let Some(mut record) = existing else {
            return Ok(None);
        };
        if server_newer(&record, change) {
            conflicts.push(conflict(id, ConflictReason::ServerNewer, Some(record), change));
            return Ok(None);
        }
        let meta = record.meta_mut();
        meta.deleted_at = Some(deleted_at);
        meta.client_updated_at = E::client_updated_at(change);
        // The write clock never moves backwards, even if the wall clock does.
        meta.server_updated_at = now.max(meta.server_updated_at);
        return Ok(Some(E::store(txn).save(record)?));
    }

    // Upsert: a malformed payload cannot be reconciled and fails the push.
    E::validate(change).map_err(|message| EngineError::validation(E::KIND, id, message))?;

    // Dependencies are checked before the write-clock comparison so a
    // dangling reference is reported even on a stale change.
    if let Some(found) = E::check_dependencies(txn, owner, change)? {
        conflicts.push(constraint_conflict::<E>(id, found, change));
        return Ok(None);
    }

    let mut record = match existing {
        None => {
            if let Some(found) = E::check_uniqueness(txn, owner, change, None)? {
                conflicts.push(constraint_conflict::<E>(id, found, change));
                return Ok(None);
            }
            E::create(owner, change)
        }
        Some(existing) => {
            if server_newer(&existing, change) {
                conflicts.push(conflict(id, ConflictReason::ServerNewer, Some(existing), change));
                return Ok(None);
            }
            if let Some(found) = E::check_uniqueness(txn, owner, change, Some(&existing))? {
                conflicts.push(constraint_conflict::<E>(id, found, change));
                return Ok(None);
            }
            existing
        }
    };

    record.apply(change);
    record.derive_completion(change);
    let meta = record.meta_mut();
    // An accepted upsert always lands live: resurrecting a tombstoned id
    // clears its deletion.
    meta.deleted_at = None;
    meta.client_updated_at = E::client_updated_at(change);
    // The write clock never moves backwards, even if the wall clock does.
    meta.server_updated_at = prev_server.map_or(now, |prev| now.max(prev));
    Ok(Some(E::store(txn).save(record)?))
}
