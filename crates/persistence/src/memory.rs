// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-process repositories.
//!
//! Each repository is an arena keyed by time or UUID behind one mutex.
//! Holding the lock for the whole read-modify-write makes every update
//! atomic, so these backends never report a write conflict.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use gymslot_domain::{Availability, Factory, Hour, Training, User, can_user_see_training};
use tracing::debug;

use crate::error::PersistenceError;
use crate::repository::{
    HourRepository, TrainingRepository, active_since, authorize_and_apply, blocks_time,
};

// Stored values are only replaced after an update function succeeded, so a
// panic while the lock was held cannot leave a half-written entry behind.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Hours kept in process memory.
#[derive(Debug)]
pub struct MemoryHourRepository {
    factory: Factory,
    hours: Mutex<BTreeMap<DateTime<Utc>, Availability>>,
}

impl MemoryHourRepository {
    #[must_use]
    pub const fn new(factory: Factory) -> Self {
        Self {
            factory,
            hours: Mutex::new(BTreeMap::new()),
        }
    }

    fn hour_from(
        &self,
        hours: &BTreeMap<DateTime<Utc>, Availability>,
        hour_time: DateTime<Utc>,
    ) -> Result<Hour, PersistenceError> {
        let hour: Hour = match hours.get(&hour_time) {
            Some(availability) => self
                .factory
                .unmarshal_hour_from_storage(hour_time, *availability)?,
            None => self.factory.new_not_available_hour(hour_time)?,
        };
        Ok(hour)
    }
}

impl HourRepository for MemoryHourRepository {
    fn factory(&self) -> &Factory {
        &self.factory
    }

    fn get_or_create_hour(&self, hour_time: DateTime<Utc>) -> Result<Hour, PersistenceError> {
        let hours = lock(&self.hours);
        self.hour_from(&hours, hour_time)
    }

    fn update_hour<E, F>(&self, hour_time: DateTime<Utc>, mut update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Hour) -> Result<Hour, E>,
    {
        let mut hours = lock(&self.hours);

        let current: Hour = self.hour_from(&hours, hour_time)?;
        let updated: Hour = update_fn(current)?;
        hours.insert(hour_time, updated.availability());

        debug!(%hour_time, availability = %updated.availability(), "Hour updated");
        Ok(())
    }

    fn stored_hours_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, Availability)>, PersistenceError> {
        let hours = lock(&self.hours);
        Ok(hours
            .range(start..=end)
            .map(|(time, availability)| (*time, *availability))
            .collect())
    }
}

/// Trainings kept in process memory.
#[derive(Debug, Default)]
pub struct MemoryTrainingRepository {
    trainings: Mutex<BTreeMap<String, Training>>,
}

impl MemoryTrainingRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn occupant_at(trainings: &BTreeMap<String, Training>, time: DateTime<Utc>) -> Option<&str> {
    trainings
        .values()
        .find(|training| !training.is_canceled() && training.time() == time)
        .map(Training::uuid)
}

impl TrainingRepository for MemoryTrainingRepository {
    fn add_training<E, F>(&self, training: Training, mut create_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(&Training) -> Result<(), E>,
    {
        let mut trainings = lock(&self.trainings);

        if trainings.contains_key(training.uuid()) {
            return Err(PersistenceError::DuplicateTraining(training.uuid().to_string()).into());
        }
        if !training.is_canceled()
            && blocks_time(occupant_at(&trainings, training.time()), training.uuid())
        {
            return Err(PersistenceError::TrainingTimeTaken(training.time()).into());
        }

        create_fn(&training)?;

        debug!(training_uuid = training.uuid(), "Training added");
        trainings.insert(training.uuid().to_string(), training);
        Ok(())
    }

    fn get_training(&self, training_uuid: &str, user: &User) -> Result<Training, PersistenceError> {
        let trainings = lock(&self.trainings);

        let training: &Training = trainings
            .get(training_uuid)
            .ok_or_else(|| PersistenceError::TrainingNotFound(training_uuid.to_string()))?;
        can_user_see_training(user, training)?;
        Ok(training.clone())
    }

    fn update_training<E, F>(&self, training_uuid: &str, user: &User, mut update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Training) -> Result<Training, E>,
    {
        let mut trainings = lock(&self.trainings);

        let current: Training = trainings
            .get(training_uuid)
            .cloned()
            .ok_or_else(|| PersistenceError::TrainingNotFound(training_uuid.to_string()))?;
        let updated: Training = authorize_and_apply(current, user, &mut update_fn)?;

        if !updated.is_canceled()
            && blocks_time(occupant_at(&trainings, updated.time()), training_uuid)
        {
            return Err(PersistenceError::TrainingTimeTaken(updated.time()).into());
        }

        debug!(training_uuid, "Training updated");
        trainings.insert(training_uuid.to_string(), updated);
        Ok(())
    }

    fn all_trainings(&self, since: DateTime<Utc>) -> Result<Vec<Training>, PersistenceError> {
        let trainings = lock(&self.trainings);
        Ok(active_since(trainings.values().cloned(), since))
    }

    fn trainings_for_user(
        &self,
        user_uuid: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Training>, PersistenceError> {
        let trainings = lock(&self.trainings);
        Ok(active_since(
            trainings
                .values()
                .filter(|training| training.user_uuid() == user_uuid)
                .cloned(),
            since,
        ))
    }
}
