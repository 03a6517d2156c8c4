// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trainer-side commands on hours.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gymslot_domain::{Hour, HourError};
use gymslot_persistence::{HourRepository, PersistenceError};

use super::{Command, CommandHandler};
use crate::error::ApiError;

pub(crate) type HourTransition = fn(&mut Hour) -> Result<(), HourError>;

/// Applies `transition` to the hour at `time` in one atomic update.
pub(crate) fn apply_hour_transition<H, E>(
    hours: &H,
    time: DateTime<Utc>,
    transition: HourTransition,
    reject: impl Fn(HourError) -> E,
) -> Result<(), E>
where
    H: HourRepository,
    E: From<PersistenceError>,
{
    hours.update_hour(time, |mut hour: Hour| {
        transition(&mut hour).map_err(&reject)?;
        Ok(hour)
    })
}

/// Opens hours for bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeHoursAvailable {
    pub hours: Vec<DateTime<Utc>>,
}

impl Command for MakeHoursAvailable {
    const NAME: &'static str = "make_hours_available";
}

/// Closes hours for bookings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakeHoursUnavailable {
    pub hours: Vec<DateTime<Utc>>,
}

impl Command for MakeHoursUnavailable {
    const NAME: &'static str = "make_hours_unavailable";
}

/// Books a training on an available hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleHourTraining {
    pub hour: DateTime<Utc>,
}

impl Command for ScheduleHourTraining {
    const NAME: &'static str = "schedule_hour_training";
}

/// Releases the training booked on an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CancelHourTraining {
    pub hour: DateTime<Utc>,
}

impl Command for CancelHourTraining {
    const NAME: &'static str = "cancel_hour_training";
}

macro_rules! hour_handler {
    ($(#[$meta:meta])* $handler:ident) => {
        $(#[$meta])*
        pub struct $handler<H: HourRepository> {
            hours: Arc<H>,
        }

        impl<H: HourRepository> $handler<H> {
            #[must_use]
            pub const fn new(hours: Arc<H>) -> Self {
                Self { hours }
            }
        }
    };
}

hour_handler!(
    /// Handles [`MakeHoursAvailable`].
    MakeHoursAvailableHandler
);
hour_handler!(
    /// Handles [`MakeHoursUnavailable`].
    MakeHoursUnavailableHandler
);
hour_handler!(
    /// Handles [`ScheduleHourTraining`].
    ScheduleHourTrainingHandler
);
hour_handler!(
    /// Handles [`CancelHourTraining`].
    CancelHourTrainingHandler
);

// Hours are updated one at a time; a failure leaves earlier hours changed.
fn apply_to_each<H: HourRepository>(
    hours: &H,
    times: &[DateTime<Utc>],
    transition: HourTransition,
) -> Result<(), ApiError> {
    times
        .iter()
        .try_for_each(|time| apply_hour_transition(hours, *time, transition, ApiError::from))
}

impl<H: HourRepository> CommandHandler<MakeHoursAvailable> for MakeHoursAvailableHandler<H> {
    fn handle(&self, command: &MakeHoursAvailable) -> Result<(), ApiError> {
        apply_to_each(self.hours.as_ref(), &command.hours, Hour::make_available)
    }
}

impl<H: HourRepository> CommandHandler<MakeHoursUnavailable> for MakeHoursUnavailableHandler<H> {
    fn handle(&self, command: &MakeHoursUnavailable) -> Result<(), ApiError> {
        apply_to_each(self.hours.as_ref(), &command.hours, Hour::make_not_available)
    }
}

impl<H: HourRepository> CommandHandler<ScheduleHourTraining> for ScheduleHourTrainingHandler<H> {
    fn handle(&self, command: &ScheduleHourTraining) -> Result<(), ApiError> {
        apply_hour_transition(
            self.hours.as_ref(),
            command.hour,
            Hour::schedule_training,
            ApiError::from,
        )
    }
}

impl<H: HourRepository> CommandHandler<CancelHourTraining> for CancelHourTrainingHandler<H> {
    fn handle(&self, command: &CancelHourTraining) -> Result<(), ApiError> {
        apply_hour_transition(
            self.hours.as_ref(),
            command.hour,
            Hour::cancel_training,
            ApiError::from,
        )
    }
}
