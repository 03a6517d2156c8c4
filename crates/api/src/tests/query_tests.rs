// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use gymslot_domain::{DaySchedule, Training, UserType};
use gymslot_persistence::TrainingRepository;

use crate::commands::{CommandHandler, MakeHoursAvailable, MakeHoursAvailableHandler};
use crate::error::ApiError;
use crate::queries::{
    AllTrainings, AllTrainingsHandler, AvailableHours, AvailableHoursHandler, HourAvailability,
    HourAvailabilityHandler, QueryHandler, TrainingView, TrainingsForUser,
    TrainingsForUserHandler,
};
use crate::tests::{attendee, day_at, hour_repository, seed_training, soon, training_repository};

#[test]
fn test_training_view_copies_training_fields() {
    let mut training: Training =
        Training::new("t-1", "alice", "Alice Smith", day_at(3, 13)).unwrap();
    training.update_notes("legs day").unwrap();
    training.propose_reschedule(day_at(4, 14), UserType::Trainer);

    let view: TrainingView = TrainingView::from(&training);

    assert_eq!(view.uuid, "t-1");
    assert_eq!(view.user_uuid, "alice");
    assert_eq!(view.user_name, "Alice Smith");
    assert_eq!(view.time, day_at(3, 13));
    assert_eq!(view.notes, "legs day");
    assert_eq!(view.proposed_time, Some(day_at(4, 14)));
    assert_eq!(view.move_proposed_by, Some(UserType::Trainer));
    assert!(view.can_be_canceled);
}

#[test]
fn test_training_view_of_late_training_cannot_be_canceled_for_free() {
    let training: Training = Training::new("t-1", "alice", "Alice Smith", soon()).unwrap();

    let view: TrainingView = TrainingView::from(&training);

    assert!(!view.can_be_canceled);
    assert_eq!(view.proposed_time, None);
    assert_eq!(view.move_proposed_by, None);
}

#[test]
fn test_training_view_serializes_user_type_in_snake_case() {
    let mut training: Training =
        Training::new("t-1", "alice", "Alice Smith", day_at(3, 13)).unwrap();
    training.propose_reschedule(day_at(4, 14), UserType::Attendee);

    let json = serde_json::to_value(TrainingView::from(&training)).unwrap();

    assert_eq!(json["uuid"], "t-1");
    assert_eq!(json["move_proposed_by"], "attendee");
    assert_eq!(json["can_be_canceled"], true);
}

#[test]
fn test_all_trainings_skips_old_and_canceled_trainings() {
    let trainings = training_repository();
    seed_training(&trainings, "old", "alice", day_at(-3, 13));
    seed_training(&trainings, "later", "bob", day_at(4, 13));
    seed_training(&trainings, "sooner", "alice", day_at(3, 13));
    seed_training(&trainings, "canceled", "alice", day_at(3, 14));
    trainings
        .update_training("canceled", &attendee("alice"), |mut training: Training| {
            training.cancel()?;
            Ok::<_, ApiError>(training)
        })
        .unwrap();

    let views: Vec<TrainingView> = AllTrainingsHandler::new(trainings)
        .handle(&AllTrainings)
        .unwrap();

    let uuids: Vec<&str> = views.iter().map(|view| view.uuid.as_str()).collect();
    assert_eq!(uuids, vec!["sooner", "later"]);
}

#[test]
fn test_trainings_for_user_returns_only_own_trainings() {
    let trainings = training_repository();
    seed_training(&trainings, "t-1", "alice", day_at(3, 13));
    seed_training(&trainings, "t-2", "bob", day_at(3, 14));
    seed_training(&trainings, "t-3", "alice", day_at(2, 15));

    let views: Vec<TrainingView> = TrainingsForUserHandler::new(trainings)
        .handle(&TrainingsForUser {
            user: attendee("alice"),
        })
        .unwrap();

    let uuids: Vec<&str> = views.iter().map(|view| view.uuid.as_str()).collect();
    assert_eq!(uuids, vec!["t-3", "t-1"]);
}

#[test]
fn test_hour_availability_reflects_stored_hour() {
    let hours = hour_repository();
    MakeHoursAvailableHandler::new(hours.clone())
        .handle(&MakeHoursAvailable {
            hours: vec![day_at(3, 13)],
        })
        .unwrap();
    let handler = HourAvailabilityHandler::new(hours);

    assert!(handler.handle(&HourAvailability { hour: day_at(3, 13) }).unwrap());
    assert!(!handler.handle(&HourAvailability { hour: day_at(3, 14) }).unwrap());
}

#[test]
fn test_hour_availability_of_invalid_hour_is_invalid_input() {
    let handler = HourAvailabilityHandler::new(hour_repository());

    let result = handler.handle(&HourAvailability { hour: day_at(3, 5) });

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "hour"
    ));
}

#[test]
fn test_available_hours_lists_every_configured_hour() {
    let hours = hour_repository();
    MakeHoursAvailableHandler::new(hours.clone())
        .handle(&MakeHoursAvailable {
            hours: vec![day_at(4, 15)],
        })
        .unwrap();

    let days: Vec<DaySchedule> = AvailableHoursHandler::new(hours)
        .handle(&AvailableHours {
            from: day_at(3, 0),
            to: day_at(4, 0),
        })
        .unwrap();

    assert_eq!(days.len(), 2);
    assert!(days.iter().all(|day| day.hours.len() == 9));
    assert!(!days[0].has_free_hours);
    assert!(days[1].has_free_hours);
    assert!(days[1].hours[3].available);
    assert_eq!(days[1].hours[3].hour, day_at(4, 15));
}

#[test]
fn test_available_hours_with_reversed_range_is_invalid_input() {
    let handler = AvailableHoursHandler::new(hour_repository());

    let result = handler.handle(&AvailableHours {
        from: day_at(4, 0),
        to: day_at(3, 0),
    });

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date_from"
    ));
}

#[test]
fn test_available_hours_range_longer_than_window_is_invalid_input() {
    let handler = AvailableHoursHandler::new(hour_repository());

    let result = handler.handle(&AvailableHours {
        from: day_at(1, 0),
        to: DateTime::<Utc>::MAX_UTC,
    });

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date_to"
    ));
}

#[test]
fn test_available_hours_end_at_window_end() {
    let handler = AvailableHoursHandler::new(hour_repository());

    let days: Vec<DaySchedule> = handler
        .handle(&AvailableHours {
            from: day_at(40, 0),
            to: day_at(45, 0),
        })
        .unwrap();

    let dates: Vec<_> = days.iter().map(|day| day.date).collect();
    assert_eq!(
        dates,
        vec![
            day_at(40, 0).date_naive(),
            day_at(41, 0).date_naive(),
            day_at(42, 0).date_naive(),
        ]
    );
}
