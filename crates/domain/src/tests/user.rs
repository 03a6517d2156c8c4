// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use chrono::{Duration, Utc};

use super::new_training_at;
use crate::{ForbiddenToSeeTraining, Training, User, UserError, UserType, can_user_see_training};

#[test]
fn test_user_requires_uuid() {
    assert_eq!(
        User::new("", UserType::Attendee),
        Err(UserError::MissingUserUuid)
    );

    let user: User = User::new("user-uuid", UserType::Trainer).unwrap();
    assert_eq!(user.uuid(), "user-uuid");
    assert_eq!(user.user_type(), UserType::Trainer);
}

#[test]
fn test_user_type_from_str() {
    assert_eq!(UserType::from_str("trainer").unwrap(), UserType::Trainer);
    assert_eq!(UserType::from_str("attendee").unwrap(), UserType::Attendee);
    assert_eq!(
        UserType::from_str("admin"),
        Err(UserError::InvalidUserType(String::from("admin")))
    );
}

#[test]
fn test_trainer_can_see_any_training() {
    let training: Training = new_training_at(Utc::now() + Duration::days(2));
    let trainer: User = User::new("trainer-uuid", UserType::Trainer).unwrap();

    assert!(can_user_see_training(&trainer, &training).is_ok());
}

#[test]
fn test_attendee_can_see_own_training() {
    let training: Training = new_training_at(Utc::now() + Duration::days(2));
    let owner: User = User::new("user-uuid", UserType::Attendee).unwrap();

    assert!(can_user_see_training(&owner, &training).is_ok());
}

#[test]
fn test_attendee_cannot_see_other_training() {
    let training: Training = new_training_at(Utc::now() + Duration::days(2));
    let other: User = User::new("other-uuid", UserType::Attendee).unwrap();

    assert_eq!(
        can_user_see_training(&other, &training),
        Err(ForbiddenToSeeTraining {
            requesting_user_uuid: String::from("other-uuid"),
            training_owner_uuid: String::from("user-uuid"),
        })
    );
}
