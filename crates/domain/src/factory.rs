// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Validated construction of hours against the scheduling window.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FactoryConfigError, FactoryConfigViolation, HourError};
use crate::hour::{Availability, Hour};

/// Scheduling window bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactoryConfig {
    pub max_weeks_in_the_future_to_set: i64,
    pub min_utc_hour: i64,
    pub max_utc_hour: i64,
}

impl Default for FactoryConfig {
    fn default() -> Self {
        Self {
            max_weeks_in_the_future_to_set: 6,
            min_utc_hour: 12,
            max_utc_hour: 20,
        }
    }
}

impl FactoryConfig {
    /// Length of the scheduling window, `None` when it overflows.
    #[must_use]
    pub fn window(&self) -> Option<Duration> {
        Duration::try_weeks(self.max_weeks_in_the_future_to_set)
    }

    /// Latest instant that can be scheduled as seen at `now`.
    ///
    /// `None` means the window reaches past the representable range and
    /// cannot be exceeded.
    #[must_use]
    pub fn latest_schedulable_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.window().and_then(|window| now.checked_add_signed(window))
    }

    /// Validates the window bounds.
    ///
    /// Every constraint is checked; the error lists all of the violated ones.
    ///
    /// # Errors
    ///
    /// Returns `FactoryConfigError` if any constraint is violated.
    pub fn validate(&self) -> Result<(), FactoryConfigError> {
        let mut violations: Vec<FactoryConfigViolation> = Vec::new();

        if self.max_weeks_in_the_future_to_set < 1 {
            violations.push(FactoryConfigViolation::MaxWeeksTooSmall {
                max_weeks_in_the_future_to_set: self.max_weeks_in_the_future_to_set,
            });
        }
        if !(0..=24).contains(&self.min_utc_hour) {
            violations.push(FactoryConfigViolation::MinUtcHourOutOfRange {
                min_utc_hour: self.min_utc_hour,
            });
        }
        if !(0..=24).contains(&self.max_utc_hour) {
            violations.push(FactoryConfigViolation::MaxUtcHourOutOfRange {
                max_utc_hour: self.max_utc_hour,
            });
        }
        if self.min_utc_hour > self.max_utc_hour {
            violations.push(FactoryConfigViolation::MinAfterMax {
                min_utc_hour: self.min_utc_hour,
                max_utc_hour: self.max_utc_hour,
            });
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(FactoryConfigError::new(violations))
        }
    }
}

/// Truncates a time to the start of its hour.
#[must_use]
pub fn truncate_to_hour(time: DateTime<Utc>) -> DateTime<Utc> {
    time - Duration::seconds(i64::from(time.minute() * 60 + time.second()))
        - Duration::nanoseconds(i64::from(time.nanosecond()))
}

/// Builds hours that respect a validated `FactoryConfig`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Factory {
    config: FactoryConfig,
}

impl Factory {
    /// Creates a factory for the given window.
    ///
    /// # Errors
    ///
    /// Returns `FactoryConfigError` listing every violated bound.
    pub fn new(config: FactoryConfig) -> Result<Self, FactoryConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> FactoryConfig {
        self.config
    }

    /// Creates an hour open for bookings.
    ///
    /// # Errors
    ///
    /// Returns an `HourError` if `time` is outside the scheduling window.
    pub fn new_available_hour(&self, time: DateTime<Utc>) -> Result<Hour, HourError> {
        self.validate_time(time)?;
        Ok(Hour::new(time, Availability::Available))
    }

    /// Creates an hour closed for bookings.
    ///
    /// # Errors
    ///
    /// Returns an `HourError` if `time` is outside the scheduling window.
    pub fn new_not_available_hour(&self, time: DateTime<Utc>) -> Result<Hour, HourError> {
        self.validate_time(time)?;
        Ok(Hour::new(time, Availability::NotAvailable))
    }

    /// Rebuilds a stored hour.
    ///
    /// The window is validated again, so hours that slipped into the past
    /// cannot be modified.
    ///
    /// # Errors
    ///
    /// Returns an `HourError` if `time` is outside the scheduling window.
    pub fn unmarshal_hour_from_storage(
        &self,
        time: DateTime<Utc>,
        availability: Availability,
    ) -> Result<Hour, HourError> {
        self.validate_time(time)?;
        Ok(Hour::new(time, availability))
    }

    /// Validates `time` against the window using the current wall clock.
    ///
    /// # Errors
    ///
    /// See [`Factory::validate_time_at`].
    pub fn validate_time(&self, time: DateTime<Utc>) -> Result<(), HourError> {
        self.validate_time_at(time, Utc::now())
    }

    /// Validates `time` against the window as seen at `now`.
    ///
    /// Checks run in a fixed order and the first failure wins: full hour,
    /// distance, past, then the hour-of-day bounds.
    ///
    /// # Errors
    ///
    /// Returns the first `HourError` that applies.
    pub fn validate_time_at(&self, time: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), HourError> {
        if truncate_to_hour(time) != time {
            return Err(HourError::NotFullHour {
                provided_time: time,
            });
        }

        let latest: Option<DateTime<Utc>> = self.config.latest_schedulable_at(now);
        if latest.is_some_and(|latest| time > latest) {
            return Err(HourError::TooDistantDate {
                max_weeks_in_the_future_to_set: self.config.max_weeks_in_the_future_to_set,
                provided_date: time,
            });
        }

        if time <= truncate_to_hour(now) {
            return Err(HourError::PastHour {
                provided_time: time,
            });
        }

        let hour_of_day: i64 = i64::from(time.hour());
        if hour_of_day > self.config.max_utc_hour {
            return Err(HourError::TooLateHour {
                max_utc_hour: self.config.max_utc_hour,
                provided_time: time,
            });
        }
        if hour_of_day < self.config.min_utc_hour {
            return Err(HourError::TooEarlyHour {
                min_utc_hour: self.config.min_utc_hour,
                provided_time: time,
            });
        }

        Ok(())
    }
}
