// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Attendee and trainer commands on trainings.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gymslot_domain::{SCHEDULE_BALANCE_DELTA, Training, User, cancel_balance_delta};
use gymslot_persistence::TrainingRepository;
use tracing::debug;

use super::{Command, CommandHandler};
use crate::error::ApiError;
use crate::services::{BalanceService, HourService, OperationId};

/// Books a new training and debits the attendee's balance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTraining {
    pub operation_id: OperationId,
    pub training_uuid: String,
    pub user_uuid: String,
    pub user_name: String,
    pub training_time: DateTime<Utc>,
    pub notes: String,
}

impl Command for ScheduleTraining {
    const NAME: &'static str = "schedule_training";
}

/// Cancels a training, settling the balance per the cancel policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelTraining {
    pub operation_id: OperationId,
    pub training_uuid: String,
    pub user: User,
}

impl Command for CancelTraining {
    const NAME: &'static str = "cancel_training";
}

/// Moves a training directly; only possible inside the free-cancel window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleTraining {
    pub operation_id: OperationId,
    pub training_uuid: String,
    pub new_time: DateTime<Utc>,
    pub user: User,
    pub new_notes: String,
}

impl Command for RescheduleTraining {
    const NAME: &'static str = "reschedule_training";
}

/// Proposes a new time that the other party must approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTrainingReschedule {
    pub operation_id: OperationId,
    pub training_uuid: String,
    pub new_time: DateTime<Utc>,
    pub user: User,
    pub new_notes: String,
}

impl Command for RequestTrainingReschedule {
    const NAME: &'static str = "request_training_reschedule";
}

/// Accepts a pending reschedule proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApproveTrainingReschedule {
    pub operation_id: OperationId,
    pub training_uuid: String,
    pub user: User,
}

impl Command for ApproveTrainingReschedule {
    const NAME: &'static str = "approve_training_reschedule";
}

/// Drops a pending reschedule proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectTrainingReschedule {
    pub operation_id: OperationId,
    pub training_uuid: String,
    pub user: User,
}

impl Command for RejectTrainingReschedule {
    const NAME: &'static str = "reject_training_reschedule";
}

/// Handles [`ScheduleTraining`].
pub struct ScheduleTrainingHandler<R: TrainingRepository> {
    trainings: Arc<R>,
    balance: Arc<dyn BalanceService>,
    hours: Arc<dyn HourService>,
}

impl<R: TrainingRepository> ScheduleTrainingHandler<R> {
    #[must_use]
    pub const fn new(
        trainings: Arc<R>,
        balance: Arc<dyn BalanceService>,
        hours: Arc<dyn HourService>,
    ) -> Self {
        Self {
            trainings,
            balance,
            hours,
        }
    }
}

impl<R: TrainingRepository> CommandHandler<ScheduleTraining> for ScheduleTrainingHandler<R> {
    fn handle(&self, command: &ScheduleTraining) -> Result<(), ApiError> {
        let mut training: Training = Training::new(
            command.training_uuid.as_str(),
            command.user_uuid.as_str(),
            command.user_name.as_str(),
            command.training_time,
        )?;
        training.update_notes(command.notes.as_str())?;

        let balance_key = command.operation_id.key("balance");
        let hour_key = command.operation_id.key("hour");

        self.trainings
            .add_training(training, |training: &Training| {
                self.balance.update_training_balance(
                    &balance_key,
                    training.user_uuid(),
                    SCHEDULE_BALANCE_DELTA,
                )?;
                self.hours.schedule_training(&hour_key, training.time())?;
                Ok::<_, ApiError>(())
            })
    }
}

/// Handles [`CancelTraining`].
pub struct CancelTrainingHandler<R: TrainingRepository> {
    trainings: Arc<R>,
    balance: Arc<dyn BalanceService>,
    hours: Arc<dyn HourService>,
}

impl<R: TrainingRepository> CancelTrainingHandler<R> {
    #[must_use]
    pub const fn new(
        trainings: Arc<R>,
        balance: Arc<dyn BalanceService>,
        hours: Arc<dyn HourService>,
    ) -> Self {
        Self {
            trainings,
            balance,
            hours,
        }
    }
}

impl<R: TrainingRepository> CommandHandler<CancelTraining> for CancelTrainingHandler<R> {
    fn handle(&self, command: &CancelTraining) -> Result<(), ApiError> {
        let balance_key = command.operation_id.key("balance");
        let hour_key = command.operation_id.key("hour");

        self.trainings.update_training(
            &command.training_uuid,
            &command.user,
            |mut training: Training| {
                training.cancel()?;

                let delta: i64 = cancel_balance_delta(&training, command.user.user_type());
                if delta == 0 {
                    debug!(training_uuid = training.uuid(), "Late cancel, balance unchanged");
                } else {
                    self.balance
                        .update_training_balance(&balance_key, training.user_uuid(), delta)?;
                }

                self.hours.cancel_training(&hour_key, training.time())?;
                Ok(training)
            },
        )
    }
}

/// Handles [`RescheduleTraining`].
pub struct RescheduleTrainingHandler<R: TrainingRepository> {
    trainings: Arc<R>,
    hours: Arc<dyn HourService>,
}

impl<R: TrainingRepository> RescheduleTrainingHandler<R> {
    #[must_use]
    pub const fn new(trainings: Arc<R>, hours: Arc<dyn HourService>) -> Self {
        Self { trainings, hours }
    }
}

impl<R: TrainingRepository> CommandHandler<RescheduleTraining> for RescheduleTrainingHandler<R> {
    fn handle(&self, command: &RescheduleTraining) -> Result<(), ApiError> {
        let hour_key = command.operation_id.key("move");

        self.trainings.update_training(
            &command.training_uuid,
            &command.user,
            |mut training: Training| {
                let original_time: DateTime<Utc> = training.time();

                training.update_notes(command.new_notes.as_str())?;
                training.reschedule_training(command.new_time)?;

                self.hours
                    .move_training(&hour_key, command.new_time, original_time)?;
                Ok(training)
            },
        )
    }
}

/// Handles [`RequestTrainingReschedule`].
pub struct RequestTrainingRescheduleHandler<R: TrainingRepository> {
    trainings: Arc<R>,
}

impl<R: TrainingRepository> RequestTrainingRescheduleHandler<R> {
    #[must_use]
    pub const fn new(trainings: Arc<R>) -> Self {
        Self { trainings }
    }
}

impl<R: TrainingRepository> CommandHandler<RequestTrainingReschedule>
    for RequestTrainingRescheduleHandler<R>
{
    fn handle(&self, command: &RequestTrainingReschedule) -> Result<(), ApiError> {
        self.trainings.update_training(
            &command.training_uuid,
            &command.user,
            |mut training: Training| {
                training.update_notes(command.new_notes.as_str())?;
                training.propose_reschedule(command.new_time, command.user.user_type());
                Ok(training)
            },
        )
    }
}

/// Handles [`ApproveTrainingReschedule`].
pub struct ApproveTrainingRescheduleHandler<R: TrainingRepository> {
    trainings: Arc<R>,
    hours: Arc<dyn HourService>,
}

impl<R: TrainingRepository> ApproveTrainingRescheduleHandler<R> {
    #[must_use]
    pub const fn new(trainings: Arc<R>, hours: Arc<dyn HourService>) -> Self {
        Self { trainings, hours }
    }
}

impl<R: TrainingRepository> CommandHandler<ApproveTrainingReschedule>
    for ApproveTrainingRescheduleHandler<R>
{
    fn handle(&self, command: &ApproveTrainingReschedule) -> Result<(), ApiError> {
        let hour_key = command.operation_id.key("move");

        self.trainings.update_training(
            &command.training_uuid,
            &command.user,
            |mut training: Training| {
                let original_time: DateTime<Utc> = training.time();

                training.approve_reschedule(command.user.user_type())?;

                self.hours
                    .move_training(&hour_key, training.time(), original_time)?;
                Ok(training)
            },
        )
    }
}

/// Handles [`RejectTrainingReschedule`].
pub struct RejectTrainingRescheduleHandler<R: TrainingRepository> {
    trainings: Arc<R>,
}

impl<R: TrainingRepository> RejectTrainingRescheduleHandler<R> {
    #[must_use]
    pub const fn new(trainings: Arc<R>) -> Self {
        Self { trainings }
    }
}

impl<R: TrainingRepository> CommandHandler<RejectTrainingReschedule>
    for RejectTrainingRescheduleHandler<R>
{
    fn handle(&self, command: &RejectTrainingReschedule) -> Result<(), ApiError> {
        self.trainings.update_training(
            &command.training_uuid,
            &command.user,
            |mut training: Training| {
                training.reject_reschedule()?;
                Ok(training)
            },
        )
    }
}
