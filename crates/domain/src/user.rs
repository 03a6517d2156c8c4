// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ForbiddenToSeeTraining, UserError};
use crate::training::Training;

/// Role of an acting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Trainer,
    Attendee,
}

impl UserType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trainer => "trainer",
            Self::Attendee => "attendee",
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = UserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trainer" => Ok(Self::Trainer),
            "attendee" => Ok(Self::Attendee),
            other => Err(UserError::InvalidUserType(other.to_string())),
        }
    }
}

/// The user on whose behalf an operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    uuid: String,
    user_type: UserType,
}

impl User {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns `UserError::MissingUserUuid` if `uuid` is empty.
    pub fn new(uuid: impl Into<String>, user_type: UserType) -> Result<Self, UserError> {
        let uuid: String = uuid.into();
        if uuid.is_empty() {
            return Err(UserError::MissingUserUuid);
        }

        Ok(Self { uuid, user_type })
    }

    #[must_use]
    pub fn uuid(&self) -> &str {
        &self.uuid
    }

    #[must_use]
    pub const fn user_type(&self) -> UserType {
        self.user_type
    }
}

/// Checks whether `user` may see (and therefore act on) `training`.
///
/// Trainers see every training; anyone else only sees their own.
///
/// # Errors
///
/// Returns `ForbiddenToSeeTraining` carrying both user UUIDs on mismatch.
pub fn can_user_see_training(user: &User, training: &Training) -> Result<(), ForbiddenToSeeTraining> {
    match user.user_type() {
        UserType::Trainer => Ok(()),
        UserType::Attendee if user.uuid() == training.user_uuid() => Ok(()),
        UserType::Attendee => Err(ForbiddenToSeeTraining {
            requesting_user_uuid: user.uuid().to_string(),
            training_owner_uuid: training.user_uuid().to_string(),
        }),
    }
}
