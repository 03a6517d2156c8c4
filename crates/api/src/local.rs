// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process implementations of the service ports.
//!
//! Both remember the idempotency keys they applied, so a training scope
//! that runs again after a write conflict does not book an hour or move a
//! balance twice.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use gymslot_domain::Hour;
use gymslot_persistence::HourRepository;
use tracing::{debug, info};

use crate::commands::{HourTransition, apply_hour_transition};
use crate::services::{BalanceService, HourService, IdempotencyKey, ServiceError};

/// How long an applied key is remembered.
pub(crate) const KEY_RETENTION: Duration = Duration::from_secs(60 * 60);

/// Minimum time between two sweeps of expired keys.
const PRUNE_INTERVAL: Duration = Duration::from_secs(60);

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// When the side effect of a key committed; `None` while it has not.
type KeySlot = Arc<Mutex<Option<Instant>>>;

#[derive(Debug)]
struct KeyTable {
    slots: HashMap<IdempotencyKey, KeySlot>,
    last_pruned: Instant,
}

/// Keys whose side effect was applied during the last [`KEY_RETENTION`].
///
/// Each key has its own lock, held while its side effect runs; the table
/// lock is only held to look the key up. A key is recorded only after its
/// side effect committed.
#[derive(Debug)]
pub(crate) struct AppliedKeys {
    table: Mutex<KeyTable>,
}

impl Default for AppliedKeys {
    fn default() -> Self {
        Self {
            table: Mutex::new(KeyTable {
                slots: HashMap::new(),
                last_pruned: Instant::now(),
            }),
        }
    }
}

impl AppliedKeys {
    /// Runs `apply` unless `key` was already applied.
    ///
    /// Returns whether `apply` ran.
    pub(crate) fn run_once<E>(
        &self,
        key: &IdempotencyKey,
        apply: impl FnOnce() -> Result<(), E>,
    ) -> Result<bool, E> {
        self.run_once_at(key, Instant::now(), apply)
    }

    pub(crate) fn run_once_at<E>(
        &self,
        key: &IdempotencyKey,
        now: Instant,
        apply: impl FnOnce() -> Result<(), E>,
    ) -> Result<bool, E> {
        let slot: KeySlot = {
            let mut table = lock(&self.table);
            if now.saturating_duration_since(table.last_pruned) >= PRUNE_INTERVAL {
                prune(&mut table.slots, now);
                table.last_pruned = now;
            }
            Arc::clone(table.slots.entry(key.clone()).or_default())
        };

        let mut applied_at = lock(&slot);
        if applied_at.is_some() {
            return Ok(false);
        }
        apply()?;
        *applied_at = Some(now);
        Ok(true)
    }

    /// Number of remembered keys, including ones still being applied.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        lock(&self.table).slots.len()
    }
}

// Slots in use by a caller are kept; they are locked or shared.
fn prune(slots: &mut HashMap<IdempotencyKey, KeySlot>, now: Instant) {
    let before: usize = slots.len();
    slots.retain(|_, slot| {
        if Arc::strong_count(slot) > 1 {
            return true;
        }
        match slot.try_lock().map(|applied_at| *applied_at) {
            Ok(Some(applied_at)) => now.saturating_duration_since(applied_at) < KEY_RETENTION,
            Ok(None) => false,
            Err(_) => true,
        }
    });
    let pruned: usize = before - slots.len();
    if pruned > 0 {
        debug!(pruned, remaining = slots.len(), "Expired idempotency keys pruned");
    }
}

/// [`HourService`] backed by an hour repository of this process.
///
/// Calls with different keys run concurrently; calls with the same key are
/// serialized and the side effect is applied once.
///
/// Over `SQLite` the repository needs its own database file: on the file of
/// the training repository whose commands call this service, the hour update
/// waits on the training transaction and fails once the busy timeout
/// expires.
pub struct LocalHourService<H: HourRepository> {
    hours: Arc<H>,
    applied: AppliedKeys,
}

impl<H: HourRepository> LocalHourService<H> {
    #[must_use]
    pub fn new(hours: Arc<H>) -> Self {
        Self {
            hours,
            applied: AppliedKeys::default(),
        }
    }

    fn apply_once(
        &self,
        key: &IdempotencyKey,
        time: DateTime<Utc>,
        transition: HourTransition,
    ) -> Result<(), ServiceError> {
        let applied: bool = self.applied.run_once(key, || {
            apply_hour_transition(self.hours.as_ref(), time, transition, |source| {
                ServiceError::HourRejected { time, source }
            })
        })?;
        if !applied {
            debug!(%key, %time, "Hour change already applied");
        }
        Ok(())
    }
}

impl<H: HourRepository> HourService for LocalHourService<H> {
    fn schedule_training(
        &self,
        key: &IdempotencyKey,
        time: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        self.apply_once(key, time, Hour::schedule_training)
    }

    fn cancel_training(&self, key: &IdempotencyKey, time: DateTime<Utc>) -> Result<(), ServiceError> {
        self.apply_once(key, time, Hour::cancel_training)
    }

    fn make_hours_available(
        &self,
        key: &IdempotencyKey,
        hours: &[DateTime<Utc>],
    ) -> Result<(), ServiceError> {
        hours.iter().try_for_each(|time| {
            self.apply_once(&key.child(&time.to_rfc3339()), *time, Hour::make_available)
        })
    }

    fn is_hour_available(&self, time: DateTime<Utc>) -> Result<bool, ServiceError> {
        Ok(self.hours.get_or_create_hour(time)?.is_available())
    }
}

/// [`BalanceService`] keeping balances in memory.
///
/// Users without an entry have a balance of 0. Like the memory
/// repositories it is meant for tests and single-process setups.
#[derive(Debug, Default)]
pub struct InMemoryBalanceLedger {
    balances: Mutex<HashMap<String, i64>>,
    applied: AppliedKeys,
}

impl InMemoryBalanceLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the balance of `user_uuid`.
    pub fn set_balance(&self, user_uuid: &str, balance: i64) {
        lock(&self.balances).insert(user_uuid.to_string(), balance);
    }

    /// Returns the balance of `user_uuid`.
    #[must_use]
    pub fn balance(&self, user_uuid: &str) -> i64 {
        lock(&self.balances)
            .get(user_uuid)
            .copied()
            .unwrap_or_default()
    }

    fn apply_delta(&self, user_uuid: &str, delta: i64) -> Result<(), ServiceError> {
        let mut balances = lock(&self.balances);
        let balance: i64 = balances.get(user_uuid).copied().unwrap_or_default();
        let updated: i64 = balance.saturating_add(delta);
        if updated < 0 {
            return Err(ServiceError::InsufficientBalance {
                user_uuid: user_uuid.to_string(),
                balance,
                delta,
            });
        }

        balances.insert(user_uuid.to_string(), updated);
        info!(user_uuid, delta, balance = updated, "Training balance updated");
        Ok(())
    }
}

impl BalanceService for InMemoryBalanceLedger {
    fn update_training_balance(
        &self,
        key: &IdempotencyKey,
        user_uuid: &str,
        delta: i64,
    ) -> Result<(), ServiceError> {
        let applied: bool = self
            .applied
            .run_once(key, || self.apply_delta(user_uuid, delta))?;
        if !applied {
            debug!(%key, user_uuid, "Balance change already applied");
        }
        Ok(())
    }
}
