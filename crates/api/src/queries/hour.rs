// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gymslot_domain::DaySchedule;
use gymslot_persistence::HourRepository;

use super::{Query, QueryHandler};
use crate::error::ApiError;

/// Whether one hour can be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourAvailability {
    pub hour: DateTime<Utc>,
}

impl Query for HourAvailability {
    const NAME: &'static str = "hour_availability";
}

/// Every configured hour of each day in `from..=to`.
///
/// The range may span at most the scheduling window; days after the window
/// end are left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailableHours {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl Query for AvailableHours {
    const NAME: &'static str = "available_hours";
}

/// Handles [`HourAvailability`].
pub struct HourAvailabilityHandler<H: HourRepository> {
    hours: Arc<H>,
}

impl<H: HourRepository> HourAvailabilityHandler<H> {
    #[must_use]
    pub const fn new(hours: Arc<H>) -> Self {
        Self { hours }
    }
}

impl<H: HourRepository> QueryHandler<HourAvailability, bool> for HourAvailabilityHandler<H> {
    fn handle(&self, query: &HourAvailability) -> Result<bool, ApiError> {
        Ok(self.hours.get_or_create_hour(query.hour)?.is_available())
    }
}

/// Handles [`AvailableHours`].
pub struct AvailableHoursHandler<H: HourRepository> {
    hours: Arc<H>,
}

impl<H: HourRepository> AvailableHoursHandler<H> {
    #[must_use]
    pub const fn new(hours: Arc<H>) -> Self {
        Self { hours }
    }
}

impl<H: HourRepository> QueryHandler<AvailableHours, Vec<DaySchedule>> for AvailableHoursHandler<H> {
    fn handle(&self, query: &AvailableHours) -> Result<Vec<DaySchedule>, ApiError> {
        if query.from > query.to {
            return Err(ApiError::InvalidInput {
                field: String::from("date_from"),
                message: format!("Date from ({}) is after date to ({})", query.from, query.to),
            });
        }

        let config = self.hours.factory().config();
        if config
            .window()
            .is_some_and(|window| query.to.signed_duration_since(query.from) > window)
        {
            return Err(ApiError::InvalidInput {
                field: String::from("date_to"),
                message: format!(
                    "Range from {} to {} is longer than {} weeks",
                    query.from, query.to, config.max_weeks_in_the_future_to_set
                ),
            });
        }

        Ok(self.hours.available_hours(query.from, query.to)?)
    }
}
