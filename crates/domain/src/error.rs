// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};

use crate::user::UserType;

/// Errors raised while building or transitioning an `Hour`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HourError {
    /// The provided time has a sub-hour component.
    NotFullHour {
        /// The rejected time.
        provided_time: DateTime<Utc>,
    },
    /// The provided time is the current hour or earlier.
    PastHour {
        /// The rejected time.
        provided_time: DateTime<Utc>,
    },
    /// The provided date lies beyond the scheduling window.
    TooDistantDate {
        /// The configured window length in weeks.
        max_weeks_in_the_future_to_set: i64,
        /// The rejected date.
        provided_date: DateTime<Utc>,
    },
    /// The provided hour of day is before the configured minimum.
    TooEarlyHour {
        /// The earliest accepted UTC hour.
        min_utc_hour: i64,
        /// The rejected time.
        provided_time: DateTime<Utc>,
    },
    /// The provided hour of day is after the configured maximum.
    TooLateHour {
        /// The latest accepted UTC hour.
        max_utc_hour: i64,
        /// The rejected time.
        provided_time: DateTime<Utc>,
    },
    /// A stored availability value was empty.
    EmptyAvailability,
    /// A stored availability value is not one of the known states.
    UnknownAvailability(String),
    /// The hour cannot be toggled while a training is scheduled on it.
    TrainingScheduled,
    /// Cancelling requires a scheduled training.
    NoTrainingScheduled,
    /// Scheduling requires an available hour.
    HourNotAvailable,
}

impl std::fmt::Display for HourError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFullHour { provided_time } => {
                write!(f, "hour should be a full hour, provided: {provided_time}")
            }
            Self::PastHour { provided_time } => {
                write!(f, "cannot create hour from past: {provided_time}")
            }
            Self::TooDistantDate {
                max_weeks_in_the_future_to_set,
                provided_date,
            } => write!(
                f,
                "schedule can be only set for next {max_weeks_in_the_future_to_set} weeks, provided date: {provided_date}"
            ),
            Self::TooEarlyHour {
                min_utc_hour,
                provided_time,
            } => write!(
                f,
                "too early hour, min UTC hour: {min_utc_hour}, provided time: {provided_time}"
            ),
            Self::TooLateHour {
                max_utc_hour,
                provided_time,
            } => write!(
                f,
                "too late hour, max UTC hour: {max_utc_hour}, provided time: {provided_time}"
            ),
            Self::EmptyAvailability => write!(f, "empty availability"),
            Self::UnknownAvailability(value) => write!(f, "unknown '{value}' availability"),
            Self::TrainingScheduled => {
                write!(f, "unable to modify hour, because scheduled training")
            }
            Self::NoTrainingScheduled => write!(f, "training is not scheduled"),
            Self::HourNotAvailable => write!(f, "hour is not available"),
        }
    }
}

impl std::error::Error for HourError {}

/// A single constraint violated by a `FactoryConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactoryConfigViolation {
    /// The scheduling window must span at least one week.
    MaxWeeksTooSmall {
        /// The configured value.
        max_weeks_in_the_future_to_set: i64,
    },
    /// The minimum hour must lie in `0..=24`.
    MinUtcHourOutOfRange {
        /// The configured value.
        min_utc_hour: i64,
    },
    /// The maximum hour must lie in `0..=24`.
    MaxUtcHourOutOfRange {
        /// The configured value.
        max_utc_hour: i64,
    },
    /// The minimum hour must not come after the maximum hour.
    MinAfterMax {
        /// The configured minimum.
        min_utc_hour: i64,
        /// The configured maximum.
        max_utc_hour: i64,
    },
}

impl std::fmt::Display for FactoryConfigViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxWeeksTooSmall {
                max_weeks_in_the_future_to_set,
            } => write!(
                f,
                "MaxWeeksInTheFutureToSet should be greater than 1, but is {max_weeks_in_the_future_to_set}"
            ),
            Self::MinUtcHourOutOfRange { min_utc_hour } => write!(
                f,
                "MinUtcHour should be value between 0 and 24, but is {min_utc_hour}"
            ),
            Self::MaxUtcHourOutOfRange { max_utc_hour } => write!(
                f,
                "MaxUtcHour should be value between 0 and 24, but is {max_utc_hour}"
            ),
            Self::MinAfterMax {
                min_utc_hour,
                max_utc_hour,
            } => write!(
                f,
                "MaxUtcHour ({max_utc_hour}) can't be after MinUtcHour ({min_utc_hour})"
            ),
        }
    }
}

/// Every constraint a rejected `FactoryConfig` violates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryConfigError {
    violations: Vec<FactoryConfigViolation>,
}

impl FactoryConfigError {
    pub(crate) const fn new(violations: Vec<FactoryConfigViolation>) -> Self {
        Self { violations }
    }

    /// Returns the violated constraints in check order.
    #[must_use]
    pub fn violations(&self) -> &[FactoryConfigViolation] {
        &self.violations
    }
}

impl std::fmt::Display for FactoryConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid hour factory config: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for FactoryConfigError {}

/// Errors raised while building or transitioning a `Training`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrainingError {
    EmptyTrainingUuid,
    EmptyUserUuid,
    EmptyUserName,
    ZeroTrainingTime,
    /// The training was canceled before.
    AlreadyCanceled,
    /// Direct rescheduling needs the free-cancel notice period.
    CantRescheduleBeforeTime {
        /// The current time of the training.
        training_time: DateTime<Utc>,
    },
    /// Approving or rejecting requires a pending proposal.
    NoRescheduleRequested,
    /// The proposer tried to approve its own proposal.
    ApproveBySameUserType {
        /// The role that proposed and tried to approve.
        user_type: UserType,
    },
    /// Notes exceed the maximum length.
    NoteTooLong {
        /// The rejected length in bytes.
        length: usize,
    },
}

impl std::fmt::Display for TrainingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTrainingUuid => write!(f, "empty training uuid"),
            Self::EmptyUserUuid => write!(f, "empty userUUID"),
            Self::EmptyUserName => write!(f, "empty userName"),
            Self::ZeroTrainingTime => write!(f, "zero training time"),
            Self::AlreadyCanceled => write!(f, "training is already canceled"),
            Self::CantRescheduleBeforeTime { training_time } => write!(
                f,
                "can't reschedule training, not enough time before, training time: {training_time}"
            ),
            Self::NoRescheduleRequested => write!(f, "no training reschedule was requested yet"),
            Self::ApproveBySameUserType { user_type } => write!(
                f,
                "trying to approve reschedule by the same user type which proposed reschedule ({user_type})"
            ),
            Self::NoteTooLong { length } => write!(f, "Note too long: {length} bytes"),
        }
    }
}

impl std::error::Error for TrainingError {}

/// Errors raised while building a `User`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    MissingUserUuid,
    /// The role string is not a known user type.
    InvalidUserType(String),
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingUserUuid => write!(f, "missing user UUID"),
            Self::InvalidUserType(value) => write!(f, "invalid '{value}' role"),
        }
    }
}

impl std::error::Error for UserError {}

/// A user tried to see or modify a training owned by someone else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenToSeeTraining {
    pub requesting_user_uuid: String,
    pub training_owner_uuid: String,
}

impl std::fmt::Display for ForbiddenToSeeTraining {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "user '{}' can't see user '{}' training",
            self.requesting_user_uuid, self.training_owner_uuid
        )
    }
}

impl std::error::Error for ForbiddenToSeeTraining {}

/// Any rule violation raised by the domain layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    Hour(HourError),
    FactoryConfig(FactoryConfigError),
    Training(TrainingError),
    User(UserError),
    Forbidden(ForbiddenToSeeTraining),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hour(err) => write!(f, "{err}"),
            Self::FactoryConfig(err) => write!(f, "{err}"),
            Self::Training(err) => write!(f, "{err}"),
            Self::User(err) => write!(f, "{err}"),
            Self::Forbidden(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for DomainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Hour(err) => Some(err),
            Self::FactoryConfig(err) => Some(err),
            Self::Training(err) => Some(err),
            Self::User(err) => Some(err),
            Self::Forbidden(err) => Some(err),
        }
    }
}

impl From<HourError> for DomainError {
    fn from(err: HourError) -> Self {
        Self::Hour(err)
    }
}

impl From<FactoryConfigError> for DomainError {
    fn from(err: FactoryConfigError) -> Self {
        Self::FactoryConfig(err)
    }
}

impl From<TrainingError> for DomainError {
    fn from(err: TrainingError) -> Self {
        Self::Training(err)
    }
}

impl From<UserError> for DomainError {
    fn from(err: UserError) -> Self {
        Self::User(err)
    }
}

impl From<ForbiddenToSeeTraining> for DomainError {
    fn from(err: ForbiddenToSeeTraining) -> Self {
        Self::Forbidden(err)
    }
}
