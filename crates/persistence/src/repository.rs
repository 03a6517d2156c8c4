// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Repository contracts shared by every backend.
//!
//! Both repositories follow the same update protocol: the caller passes a
//! function that receives the current aggregate, read inside the atomic
//! scope, and returns the replacement. If the function fails, nothing is
//! written and its error is returned unchanged. Concurrent updates of the
//! same key are serialized; each backend decides how.
//!
//! Update functions are `FnMut` because a backend may run them more than
//! once when an attempt loses a write race.

use chrono::{DateTime, Utc};
use gymslot_domain::{
    Availability, DaySchedule, Factory, Hour, Training, User, build_day_schedules,
    can_user_see_training, schedule_bounds,
};

use crate::error::PersistenceError;

/// Atomic read-modify-write access to trainer hours.
pub trait HourRepository: Send + Sync {
    /// The factory used to rebuild and default hours.
    fn factory(&self) -> &Factory;

    /// Returns the stored hour, or a new not available hour when the time
    /// was never stored.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InvalidHour` when `hour_time` lies outside
    /// the scheduling window, or a storage error.
    fn get_or_create_hour(&self, hour_time: DateTime<Utc>) -> Result<Hour, PersistenceError>;

    /// Atomically replaces the hour at `hour_time` with the result of
    /// `update_fn`.
    ///
    /// # Errors
    ///
    /// Returns the error of `update_fn`, or a `PersistenceError` converted
    /// into `E`.
    fn update_hour<E, F>(&self, hour_time: DateTime<Utc>, update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Hour) -> Result<Hour, E>;

    /// Returns the stored hours in `start..=end`, in time order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    fn stored_hours_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, Availability)>, PersistenceError>;

    /// Returns every day of `from..=to` with every configured hour,
    /// back-filling hours that were never stored as not available.
    ///
    /// Days after the end of the scheduling window hold no stored hours and
    /// are left out.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    fn available_hours(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<DaySchedule>, PersistenceError> {
        let config = self.factory().config();
        let to: DateTime<Utc> = config
            .latest_schedulable_at(Utc::now())
            .map_or(to, |latest| to.min(latest));
        if from > to {
            return Ok(Vec::new());
        }

        let (start, end) = schedule_bounds(&config, from, to);
        let stored = self.stored_hours_between(start, end)?;
        Ok(build_day_schedules(&config, from, to, &stored))
    }
}

/// Atomic, authorized read-modify-write access to trainings.
pub trait TrainingRepository: Send + Sync {
    /// Stores a new training after `create_fn` succeeds.
    ///
    /// The time uniqueness check, `create_fn` and the insert run in one
    /// atomic scope.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::DuplicateTraining` if the UUID is taken
    /// - `PersistenceError::TrainingTimeTaken` if an active training
    ///   occupies the same time
    /// - the error of `create_fn`
    fn add_training<E, F>(&self, training: Training, create_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(&Training) -> Result<(), E>;

    /// Returns a training visible to `user`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::TrainingNotFound` or
    /// `PersistenceError::Forbidden`.
    fn get_training(&self, training_uuid: &str, user: &User) -> Result<Training, PersistenceError>;

    /// Atomically replaces a training with the result of `update_fn`.
    ///
    /// Visibility is checked before `update_fn` runs; a forbidden update
    /// never calls it.
    ///
    /// # Errors
    ///
    /// - `PersistenceError::TrainingNotFound` or `PersistenceError::Forbidden`
    /// - `PersistenceError::TrainingTimeTaken` if the training moved onto
    ///   the time of another active training
    /// - the error of `update_fn`
    fn update_training<E, F>(&self, training_uuid: &str, user: &User, update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Training) -> Result<Training, E>;

    /// Returns active trainings at or after `since`, in time order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    fn all_trainings(&self, since: DateTime<Utc>) -> Result<Vec<Training>, PersistenceError>;

    /// Returns the active trainings of one user at or after `since`, in
    /// time order.
    ///
    /// # Errors
    ///
    /// Returns a storage error.
    fn trainings_for_user(
        &self,
        user_uuid: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Training>, PersistenceError>;
}

/// Checks visibility, then runs `update_fn` on the current training.
pub(crate) fn authorize_and_apply<E, F>(
    current: Training,
    user: &User,
    update_fn: &mut F,
) -> Result<Training, E>
where
    E: From<PersistenceError>,
    F: FnMut(Training) -> Result<Training, E>,
{
    can_user_see_training(user, &current)
        .map_err(|err| E::from(PersistenceError::Forbidden(err)))?;
    update_fn(current)
}

/// Returns true when `occupant`, the active training stored at a time,
/// blocks `training_uuid` from using that time.
pub(crate) fn blocks_time(occupant: Option<&str>, training_uuid: &str) -> bool {
    occupant.is_some_and(|occupant| occupant != training_uuid)
}

/// Keeps active trainings at or after `since`, sorted by time.
pub(crate) fn active_since(
    trainings: impl IntoIterator<Item = Training>,
    since: DateTime<Utc>,
) -> Vec<Training> {
    let mut active: Vec<Training> = trainings
        .into_iter()
        .filter(|training| !training.is_canceled() && training.time() >= since)
        .collect();
    active.sort_by_key(Training::time);
    active
}
