// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability lifecycle of a single trainer time slot.
//!
//! ## Transitions
//!
//! ```text
//! NotAvailable <-> Available -> TrainingScheduled -> Available
//! ```
//!
//! There is no terminal state. Slots are reused, and an hour that was
//! never stored is treated as `NotAvailable`.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HourError;

/// Availability state of an hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    NotAvailable,
    TrainingScheduled,
}

impl Availability {
    /// Returns the storage representation of the availability.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::NotAvailable => "not_available",
            Self::TrainingScheduled => "training_scheduled",
        }
    }
}

impl std::fmt::Display for Availability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Availability {
    type Err = HourError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" => Err(HourError::EmptyAvailability),
            "available" => Ok(Self::Available),
            "not_available" => Ok(Self::NotAvailable),
            "training_scheduled" => Ok(Self::TrainingScheduled),
            other => Err(HourError::UnknownAvailability(other.to_string())),
        }
    }
}

/// A bookable, exact-hour time slot.
///
/// Instances are only produced by [`crate::Factory`], so every `Hour`
/// passed the scheduling window validation at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hour {
    time: DateTime<Utc>,
    availability: Availability,
}

impl Hour {
    pub(crate) const fn new(time: DateTime<Utc>, availability: Availability) -> Self {
        Self { time, availability }
    }

    #[must_use]
    pub const fn time(&self) -> DateTime<Utc> {
        self.time
    }

    #[must_use]
    pub const fn availability(&self) -> Availability {
        self.availability
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self.availability, Availability::Available)
    }

    #[must_use]
    pub const fn has_training_scheduled(&self) -> bool {
        matches!(self.availability, Availability::TrainingScheduled)
    }

    /// Opens the hour for bookings.
    ///
    /// # Errors
    ///
    /// Returns `HourError::TrainingScheduled` if a training occupies the hour.
    pub const fn make_available(&mut self) -> Result<(), HourError> {
        if self.has_training_scheduled() {
            return Err(HourError::TrainingScheduled);
        }

        self.availability = Availability::Available;
        Ok(())
    }

    /// Closes the hour for bookings.
    ///
    /// # Errors
    ///
    /// Returns `HourError::TrainingScheduled` if a training occupies the hour.
    pub const fn make_not_available(&mut self) -> Result<(), HourError> {
        if self.has_training_scheduled() {
            return Err(HourError::TrainingScheduled);
        }

        self.availability = Availability::NotAvailable;
        Ok(())
    }

    /// Books a training on the hour.
    ///
    /// # Errors
    ///
    /// Returns `HourError::HourNotAvailable` unless the hour is `Available`.
    pub const fn schedule_training(&mut self) -> Result<(), HourError> {
        if !self.is_available() {
            return Err(HourError::HourNotAvailable);
        }

        self.availability = Availability::TrainingScheduled;
        Ok(())
    }

    /// Releases the training booked on the hour, making it available again.
    ///
    /// # Errors
    ///
    /// Returns `HourError::NoTrainingScheduled` unless a training is scheduled.
    pub const fn cancel_training(&mut self) -> Result<(), HourError> {
        if !self.has_training_scheduled() {
            return Err(HourError::NoTrainingScheduled);
        }

        self.availability = Availability::Available;
        Ok(())
    }
}
