// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{Duration, Utc};

use super::new_training_at;
use crate::{UserType, cancel_balance_delta};

#[test]
fn test_attendee_cancels_with_enough_notice() {
    let training = new_training_at(Utc::now() + Duration::hours(48));

    assert_eq!(cancel_balance_delta(&training, UserType::Attendee), 1);
}

#[test]
fn test_trainer_cancels_with_enough_notice() {
    let training = new_training_at(Utc::now() + Duration::hours(48));

    assert_eq!(cancel_balance_delta(&training, UserType::Trainer), 1);
}

#[test]
fn test_trainer_cancels_late() {
    let training = new_training_at(Utc::now() + Duration::hours(12));

    assert_eq!(cancel_balance_delta(&training, UserType::Trainer), 2);
}

#[test]
fn test_attendee_cancels_late() {
    let training = new_training_at(Utc::now() + Duration::hours(12));

    assert_eq!(cancel_balance_delta(&training, UserType::Attendee), 0);
}
