// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Commands and their handlers.
//!
//! Training commands run their whole state change, including the hour and
//! balance service calls, inside one `TrainingRepository` update. Nothing is
//! stored unless every step succeeds.

mod hour;
mod training;

pub use hour::{
    CancelHourTraining, CancelHourTrainingHandler, MakeHoursAvailable, MakeHoursAvailableHandler,
    MakeHoursUnavailable, MakeHoursUnavailableHandler, ScheduleHourTraining,
    ScheduleHourTrainingHandler,
};
pub(crate) use hour::{HourTransition, apply_hour_transition};
pub use training::{
    ApproveTrainingReschedule, ApproveTrainingRescheduleHandler, CancelTraining,
    CancelTrainingHandler, RejectTrainingReschedule, RejectTrainingRescheduleHandler,
    RequestTrainingReschedule, RequestTrainingRescheduleHandler, RescheduleTraining,
    RescheduleTrainingHandler, ScheduleTraining, ScheduleTrainingHandler,
};

use crate::error::ApiError;

/// A request to change state.
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Name used in logs and metric keys.
    const NAME: &'static str;
}

/// Executes one kind of command.
pub trait CommandHandler<C: Command>: Send + Sync {
    /// Runs `command`.
    ///
    /// # Errors
    ///
    /// Returns an `ApiError` describing why the command was refused.
    fn handle(&self, command: &C) -> Result<(), ApiError>;
}
