// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! All handlers of the service, wired and wrapped in middleware.

use std::sync::Arc;

use gymslot_domain::DaySchedule;
use gymslot_persistence::{HourRepository, TrainingRepository};
use tracing::info;

use crate::commands::{
    ApproveTrainingReschedule, ApproveTrainingRescheduleHandler, CancelHourTraining,
    CancelHourTrainingHandler, CancelTraining, CancelTrainingHandler, MakeHoursAvailable,
    MakeHoursAvailableHandler, MakeHoursUnavailable, MakeHoursUnavailableHandler,
    RejectTrainingReschedule, RejectTrainingRescheduleHandler, RequestTrainingReschedule,
    RequestTrainingRescheduleHandler, RescheduleTraining, RescheduleTrainingHandler,
    ScheduleHourTraining, ScheduleHourTrainingHandler, ScheduleTraining, ScheduleTrainingHandler,
};
use crate::middleware::{
    Decorated, MetricsClient, apply_command_middleware, apply_query_middleware,
};
use crate::queries::{
    AllTrainings, AllTrainingsHandler, AvailableHours, AvailableHoursHandler, HourAvailability,
    HourAvailabilityHandler, TrainingView, TrainingsForUser, TrainingsForUserHandler,
};
use crate::services::{BalanceService, HourService};

/// Command handlers.
pub struct Commands<R: TrainingRepository, H: HourRepository> {
    pub schedule_training: Decorated<ScheduleTrainingHandler<R>>,
    pub cancel_training: Decorated<CancelTrainingHandler<R>>,
    pub reschedule_training: Decorated<RescheduleTrainingHandler<R>>,
    pub request_training_reschedule: Decorated<RequestTrainingRescheduleHandler<R>>,
    pub approve_training_reschedule: Decorated<ApproveTrainingRescheduleHandler<R>>,
    pub reject_training_reschedule: Decorated<RejectTrainingRescheduleHandler<R>>,
    pub make_hours_available: Decorated<MakeHoursAvailableHandler<H>>,
    pub make_hours_unavailable: Decorated<MakeHoursUnavailableHandler<H>>,
    pub schedule_hour_training: Decorated<ScheduleHourTrainingHandler<H>>,
    pub cancel_hour_training: Decorated<CancelHourTrainingHandler<H>>,
}

/// Query handlers.
pub struct Queries<R: TrainingRepository, H: HourRepository> {
    pub hour_availability: Decorated<HourAvailabilityHandler<H>>,
    pub available_hours: Decorated<AvailableHoursHandler<H>>,
    pub all_trainings: Decorated<AllTrainingsHandler<R>>,
    pub trainings_for_user: Decorated<TrainingsForUserHandler<R>>,
}

/// Everything the transport layer calls.
pub struct Application<R: TrainingRepository, H: HourRepository> {
    pub commands: Commands<R, H>,
    pub queries: Queries<R, H>,
}

impl<R: TrainingRepository, H: HourRepository> Application<R, H> {
    /// Builds every handler.
    ///
    /// # Arguments
    ///
    /// * `trainings` - Training storage
    /// * `hours` - Hour storage owned by this process, used by the trainer
    ///   commands and hour queries
    /// * `hour_service` - Hour owner called by training commands
    /// * `balance_service` - Balance owner called by training commands
    /// * `metrics` - Counter sink of the metrics middleware
    #[must_use]
    pub fn new(
        trainings: Arc<R>,
        hours: Arc<H>,
        hour_service: Arc<dyn HourService>,
        balance_service: Arc<dyn BalanceService>,
        metrics: Arc<dyn MetricsClient>,
    ) -> Self {
        let commands = Commands {
            schedule_training: apply_command_middleware::<ScheduleTraining, _>(
                ScheduleTrainingHandler::new(
                    Arc::clone(&trainings),
                    Arc::clone(&balance_service),
                    Arc::clone(&hour_service),
                ),
                Arc::clone(&metrics),
            ),
            cancel_training: apply_command_middleware::<CancelTraining, _>(
                CancelTrainingHandler::new(
                    Arc::clone(&trainings),
                    Arc::clone(&balance_service),
                    Arc::clone(&hour_service),
                ),
                Arc::clone(&metrics),
            ),
            reschedule_training: apply_command_middleware::<RescheduleTraining, _>(
                RescheduleTrainingHandler::new(Arc::clone(&trainings), Arc::clone(&hour_service)),
                Arc::clone(&metrics),
            ),
            request_training_reschedule: apply_command_middleware::<RequestTrainingReschedule, _>(
                RequestTrainingRescheduleHandler::new(Arc::clone(&trainings)),
                Arc::clone(&metrics),
            ),
            approve_training_reschedule: apply_command_middleware::<ApproveTrainingReschedule, _>(
                ApproveTrainingRescheduleHandler::new(
                    Arc::clone(&trainings),
                    Arc::clone(&hour_service),
                ),
                Arc::clone(&metrics),
            ),
            reject_training_reschedule: apply_command_middleware::<RejectTrainingReschedule, _>(
                RejectTrainingRescheduleHandler::new(Arc::clone(&trainings)),
                Arc::clone(&metrics),
            ),
            make_hours_available: apply_command_middleware::<MakeHoursAvailable, _>(
                MakeHoursAvailableHandler::new(Arc::clone(&hours)),
                Arc::clone(&metrics),
            ),
            make_hours_unavailable: apply_command_middleware::<MakeHoursUnavailable, _>(
                MakeHoursUnavailableHandler::new(Arc::clone(&hours)),
                Arc::clone(&metrics),
            ),
            schedule_hour_training: apply_command_middleware::<ScheduleHourTraining, _>(
                ScheduleHourTrainingHandler::new(Arc::clone(&hours)),
                Arc::clone(&metrics),
            ),
            cancel_hour_training: apply_command_middleware::<CancelHourTraining, _>(
                CancelHourTrainingHandler::new(Arc::clone(&hours)),
                Arc::clone(&metrics),
            ),
        };

        let queries = Queries {
            hour_availability: apply_query_middleware::<HourAvailability, bool, _>(
                HourAvailabilityHandler::new(Arc::clone(&hours)),
                Arc::clone(&metrics),
            ),
            available_hours: apply_query_middleware::<AvailableHours, Vec<DaySchedule>, _>(
                AvailableHoursHandler::new(hours),
                Arc::clone(&metrics),
            ),
            all_trainings: apply_query_middleware::<AllTrainings, Vec<TrainingView>, _>(
                AllTrainingsHandler::new(Arc::clone(&trainings)),
                Arc::clone(&metrics),
            ),
            trainings_for_user: apply_query_middleware::<TrainingsForUser, Vec<TrainingView>, _>(
                TrainingsForUserHandler::new(trainings),
                metrics,
            ),
        };

        info!("Application handlers initialized");
        Self { commands, queries }
    }
}
