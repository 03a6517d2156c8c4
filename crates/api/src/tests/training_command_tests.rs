// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gymslot_domain::{MAX_NOTES_LENGTH, Training, User, UserType};
use gymslot_persistence::{MemoryTrainingRepository, PersistenceError, TrainingRepository};

use crate::commands::{
    ApproveTrainingReschedule, ApproveTrainingRescheduleHandler, CancelTraining,
    CancelTrainingHandler, CommandHandler, RejectTrainingReschedule,
    RejectTrainingRescheduleHandler, RequestTrainingReschedule, RequestTrainingRescheduleHandler,
    RescheduleTraining, RescheduleTrainingHandler, ScheduleTraining, ScheduleTrainingHandler,
};
use crate::error::ApiError;
use crate::services::OperationId;
use crate::tests::{
    HourCall, RecordingBalanceService, RecordingHourService, attendee, day_at, seed_training,
    soon, trainer, training_repository,
};

struct Setup {
    trainings: Arc<MemoryTrainingRepository>,
    hours: Arc<RecordingHourService>,
    balance: Arc<RecordingBalanceService>,
}

impl Setup {
    fn new() -> Self {
        Self::with(RecordingHourService::default(), RecordingBalanceService::default())
    }

    fn with(hours: RecordingHourService, balance: RecordingBalanceService) -> Self {
        Self {
            trainings: training_repository(),
            hours: Arc::new(hours),
            balance: Arc::new(balance),
        }
    }

    fn schedule_handler(&self) -> ScheduleTrainingHandler<MemoryTrainingRepository> {
        ScheduleTrainingHandler::new(
            self.trainings.clone(),
            self.balance.clone(),
            self.hours.clone(),
        )
    }

    fn cancel_handler(&self) -> CancelTrainingHandler<MemoryTrainingRepository> {
        CancelTrainingHandler::new(
            self.trainings.clone(),
            self.balance.clone(),
            self.hours.clone(),
        )
    }

    fn stored(&self, uuid: &str) -> Result<Training, PersistenceError> {
        self.trainings.get_training(uuid, &trainer())
    }

    fn cancel(&self, uuid: &str, user: User) -> Result<(), ApiError> {
        self.cancel_handler().handle(&CancelTraining {
            operation_id: OperationId::new(),
            training_uuid: uuid.to_string(),
            user,
        })
    }
}

fn schedule_command(uuid: &str, time: DateTime<Utc>, notes: &str) -> ScheduleTraining {
    ScheduleTraining {
        operation_id: OperationId::new(),
        training_uuid: uuid.to_string(),
        user_uuid: String::from("alice"),
        user_name: String::from("Alice Smith"),
        training_time: time,
        notes: notes.to_string(),
    }
}

fn external_service(result: Result<(), ApiError>) -> String {
    match result {
        Err(ApiError::ExternalService { service, .. }) => service,
        other => panic!("expected ExternalService, got {other:?}"),
    }
}

fn violated_rule(result: Result<(), ApiError>) -> String {
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => rule,
        other => panic!("expected DomainRuleViolation, got {other:?}"),
    }
}

#[test]
fn test_schedule_debits_balance_and_books_hour() {
    let setup = Setup::new();
    let time = day_at(3, 13);

    setup
        .schedule_handler()
        .handle(&schedule_command("t-1", time, "bring a towel"))
        .unwrap();

    assert_eq!(setup.balance.calls(), vec![(String::from("alice"), -1)]);
    assert_eq!(setup.hours.calls(), vec![HourCall::Schedule(time)]);

    let stored: Training = setup.stored("t-1").unwrap();
    assert_eq!(stored.user_uuid(), "alice");
    assert_eq!(stored.user_name(), "Alice Smith");
    assert_eq!(stored.time(), time);
    assert_eq!(stored.notes(), "bring a towel");
}

#[test]
fn test_schedule_with_insufficient_balance_stores_nothing() {
    let setup = Setup::with(
        RecordingHourService::default(),
        RecordingBalanceService::failing(),
    );

    let result = setup
        .schedule_handler()
        .handle(&schedule_command("t-1", day_at(3, 13), ""));

    assert_eq!(external_service(result), "balance");
    assert!(setup.hours.calls().is_empty());
    assert!(matches!(
        setup.stored("t-1"),
        Err(PersistenceError::TrainingNotFound(_))
    ));
}

#[test]
fn test_schedule_refused_by_hour_service_stores_nothing() {
    let setup = Setup::with(
        RecordingHourService::failing(),
        RecordingBalanceService::default(),
    );

    let result = setup
        .schedule_handler()
        .handle(&schedule_command("t-1", day_at(3, 13), ""));

    assert_eq!(external_service(result), "hour");
    // The debit is not compensated.
    assert_eq!(setup.balance.calls().len(), 1);
    assert!(setup.stored("t-1").is_err());
}

#[test]
fn test_schedule_on_taken_time_calls_no_service() {
    let setup = Setup::new();
    let time = day_at(3, 13);
    seed_training(&setup.trainings, "t-1", "bob", time);

    let result = setup
        .schedule_handler()
        .handle(&schedule_command("t-2", time, ""));

    assert_eq!(violated_rule(result), "unique_training_time");
    assert!(setup.balance.calls().is_empty());
    assert!(setup.hours.calls().is_empty());
}

#[test]
fn test_schedule_with_too_long_notes_is_invalid_input() {
    let setup = Setup::new();
    let notes: String = "x".repeat(MAX_NOTES_LENGTH + 1);

    let result = setup
        .schedule_handler()
        .handle(&schedule_command("t-1", day_at(3, 13), &notes));

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "notes"
    ));
    assert!(setup.balance.calls().is_empty());
}

#[test]
fn test_early_cancel_by_attendee_returns_credit() {
    let setup = Setup::new();
    let time = day_at(3, 13);
    seed_training(&setup.trainings, "t-1", "alice", time);

    setup.cancel("t-1", attendee("alice")).unwrap();

    assert_eq!(setup.balance.calls(), vec![(String::from("alice"), 1)]);
    assert_eq!(setup.hours.calls(), vec![HourCall::Cancel(time)]);
    assert!(setup.stored("t-1").unwrap().is_canceled());
}

#[test]
fn test_early_cancel_by_trainer_returns_credit() {
    let setup = Setup::new();
    seed_training(&setup.trainings, "t-1", "alice", day_at(3, 13));

    setup.cancel("t-1", trainer()).unwrap();

    assert_eq!(setup.balance.calls(), vec![(String::from("alice"), 1)]);
}

#[test]
fn test_late_cancel_by_trainer_adds_penalty_credit() {
    let setup = Setup::new();
    let time = soon();
    seed_training(&setup.trainings, "t-1", "alice", time);

    setup.cancel("t-1", trainer()).unwrap();

    assert_eq!(setup.balance.calls(), vec![(String::from("alice"), 2)]);
    assert_eq!(setup.hours.calls(), vec![HourCall::Cancel(time)]);
}

#[test]
fn test_late_cancel_by_attendee_keeps_balance_but_frees_hour() {
    let setup = Setup::new();
    let time = soon();
    seed_training(&setup.trainings, "t-1", "alice", time);

    setup.cancel("t-1", attendee("alice")).unwrap();

    assert!(setup.balance.calls().is_empty());
    assert_eq!(setup.hours.calls(), vec![HourCall::Cancel(time)]);
    assert!(setup.stored("t-1").unwrap().is_canceled());
}

#[test]
fn test_cancel_twice_is_rejected() {
    let setup = Setup::new();
    seed_training(&setup.trainings, "t-1", "alice", day_at(3, 13));
    setup.cancel("t-1", attendee("alice")).unwrap();

    let result = setup.cancel("t-1", attendee("alice"));

    assert_eq!(violated_rule(result), "training_not_canceled");
    assert_eq!(setup.balance.calls().len(), 1);
}

#[test]
fn test_cancel_by_other_attendee_is_unauthorized() {
    let setup = Setup::new();
    seed_training(&setup.trainings, "t-1", "alice", day_at(3, 13));

    let result = setup.cancel("t-1", attendee("bob"));

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert!(setup.balance.calls().is_empty());
    assert!(setup.hours.calls().is_empty());
    assert!(!setup.stored("t-1").unwrap().is_canceled());
}

#[test]
fn test_cancel_missing_training_is_not_found() {
    let setup = Setup::new();

    let result = setup.cancel("missing", trainer());

    assert!(matches!(
        result,
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Training"
    ));
}

#[test]
fn test_cancel_refused_by_hour_service_keeps_training_active() {
    let setup = Setup::with(
        RecordingHourService::failing(),
        RecordingBalanceService::default(),
    );
    seed_training(&setup.trainings, "t-1", "alice", day_at(3, 13));

    let result = setup.cancel("t-1", attendee("alice"));

    assert_eq!(external_service(result), "hour");
    assert!(!setup.stored("t-1").unwrap().is_canceled());
}

#[test]
fn test_reschedule_moves_training_and_hour() {
    let setup = Setup::new();
    let original = day_at(3, 13);
    let new_time = day_at(3, 15);
    seed_training(&setup.trainings, "t-1", "alice", original);

    RescheduleTrainingHandler::new(setup.trainings.clone(), setup.hours.clone())
        .handle(&RescheduleTraining {
            operation_id: OperationId::new(),
            training_uuid: String::from("t-1"),
            new_time,
            user: attendee("alice"),
            new_notes: String::from("moved"),
        })
        .unwrap();

    assert_eq!(
        setup.hours.calls(),
        vec![HourCall::Schedule(new_time), HourCall::Cancel(original)]
    );
    let stored: Training = setup.stored("t-1").unwrap();
    assert_eq!(stored.time(), new_time);
    assert_eq!(stored.notes(), "moved");
}

#[test]
fn test_reschedule_inside_notice_period_is_rejected() {
    let setup = Setup::new();
    let original = soon();
    seed_training(&setup.trainings, "t-1", "alice", original);

    let result = RescheduleTrainingHandler::new(setup.trainings.clone(), setup.hours.clone())
        .handle(&RescheduleTraining {
            operation_id: OperationId::new(),
            training_uuid: String::from("t-1"),
            new_time: day_at(3, 15),
            user: attendee("alice"),
            new_notes: String::new(),
        });

    assert_eq!(violated_rule(result), "free_reschedule_notice");
    assert!(setup.hours.calls().is_empty());
    assert_eq!(setup.stored("t-1").unwrap().time(), original);
}

fn request(setup: &Setup, user: User, new_time: DateTime<Utc>) {
    RequestTrainingRescheduleHandler::new(setup.trainings.clone())
        .handle(&RequestTrainingReschedule {
            operation_id: OperationId::new(),
            training_uuid: String::from("t-1"),
            new_time,
            user,
            new_notes: String::from("can we move?"),
        })
        .unwrap();
}

fn approve(setup: &Setup, user: User) -> Result<(), ApiError> {
    ApproveTrainingRescheduleHandler::new(setup.trainings.clone(), setup.hours.clone()).handle(
        &ApproveTrainingReschedule {
            operation_id: OperationId::new(),
            training_uuid: String::from("t-1"),
            user,
        },
    )
}

fn reject(setup: &Setup, user: User) -> Result<(), ApiError> {
    RejectTrainingRescheduleHandler::new(setup.trainings.clone()).handle(
        &RejectTrainingReschedule {
            operation_id: OperationId::new(),
            training_uuid: String::from("t-1"),
            user,
        },
    )
}

#[test]
fn test_requested_reschedule_approved_by_trainer_moves_training() {
    let setup = Setup::new();
    let original = day_at(3, 13);
    let new_time = day_at(4, 14);
    seed_training(&setup.trainings, "t-1", "alice", original);

    request(&setup, attendee("alice"), new_time);

    let pending: Training = setup.stored("t-1").unwrap();
    assert_eq!(pending.time(), original);
    assert_eq!(pending.proposed_new_time(), Some(new_time));
    assert_eq!(pending.move_proposed_by(), Some(UserType::Attendee));
    assert_eq!(pending.notes(), "can we move?");
    assert!(setup.hours.calls().is_empty());

    approve(&setup, trainer()).unwrap();

    let moved: Training = setup.stored("t-1").unwrap();
    assert_eq!(moved.time(), new_time);
    assert!(!moved.is_reschedule_proposed());
    assert_eq!(
        setup.hours.calls(),
        vec![HourCall::Schedule(new_time), HourCall::Cancel(original)]
    );
}

#[test]
fn test_reschedule_cannot_be_approved_by_proposing_party() {
    let setup = Setup::new();
    seed_training(&setup.trainings, "t-1", "alice", day_at(3, 13));
    request(&setup, trainer(), day_at(4, 14));

    let result = approve(&setup, trainer());

    assert_eq!(violated_rule(result), "approve_by_other_party");
    assert!(setup.stored("t-1").unwrap().is_reschedule_proposed());
    assert!(setup.hours.calls().is_empty());
}

#[test]
fn test_approve_without_proposal_is_rejected() {
    let setup = Setup::new();
    seed_training(&setup.trainings, "t-1", "alice", day_at(3, 13));

    assert_eq!(
        violated_rule(approve(&setup, trainer())),
        "reschedule_requested"
    );
}

#[test]
fn test_rejected_reschedule_keeps_time() {
    let setup = Setup::new();
    let original = day_at(3, 13);
    seed_training(&setup.trainings, "t-1", "alice", original);
    request(&setup, trainer(), day_at(4, 14));

    reject(&setup, attendee("alice")).unwrap();

    let stored: Training = setup.stored("t-1").unwrap();
    assert_eq!(stored.time(), original);
    assert!(!stored.is_reschedule_proposed());
    assert_eq!(
        violated_rule(reject(&setup, attendee("alice"))),
        "reschedule_requested"
    );
}
