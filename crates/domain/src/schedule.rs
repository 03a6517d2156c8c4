// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Daily view of trainer hours over a date range.
//!
//! Storage only holds hours that were touched at least once. The view
//! fills every other slot of the configured window as not available.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::factory::FactoryConfig;
use crate::hour::Availability;

/// One slot of a [`DaySchedule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourSlot {
    pub hour: DateTime<Utc>,
    pub available: bool,
    pub has_training_scheduled: bool,
}

/// Every configured slot of one UTC day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub has_free_hours: bool,
    pub hours: Vec<HourSlot>,
}

fn slot_time(date: NaiveDate, hour_of_day: i64) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc() + Duration::hours(hour_of_day)
}

/// Returns the inclusive range of hour instants covered by the days of
/// `from..=to`.
///
/// A `max_utc_hour` of 24 maps to midnight of the following day.
#[must_use]
pub fn schedule_bounds(
    config: &FactoryConfig,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> (DateTime<Utc>, DateTime<Utc>) {
    (
        slot_time(from.date_naive(), config.min_utc_hour),
        slot_time(to.date_naive(), config.max_utc_hour),
    )
}

/// Builds the schedule of each UTC day between `from` and `to`, inclusive.
///
/// `stored` holds the persisted hours; slots missing from it are reported as
/// not available. Days are sorted by date and slots by hour. An empty list is
/// returned when `from` is after `to`.
#[must_use]
pub fn build_day_schedules(
    config: &FactoryConfig,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    stored: &[(DateTime<Utc>, Availability)],
) -> Vec<DaySchedule> {
    let by_time: BTreeMap<DateTime<Utc>, Availability> = stored.iter().copied().collect();
    let last_date: NaiveDate = to.date_naive();

    from.date_naive()
        .iter_days()
        .take_while(|date| *date <= last_date)
        .map(|date| {
            let hours: Vec<HourSlot> = (config.min_utc_hour..=config.max_utc_hour)
                .map(|hour_of_day| {
                    let hour: DateTime<Utc> = slot_time(date, hour_of_day);
                    let availability: Availability = by_time
                        .get(&hour)
                        .copied()
                        .unwrap_or(Availability::NotAvailable);
                    HourSlot {
                        hour,
                        available: availability == Availability::Available,
                        has_training_scheduled: availability == Availability::TrainingScheduled,
                    }
                })
                .collect();

            DaySchedule {
                date,
                has_free_hours: hours.iter().any(|slot| slot.available),
                hours,
            }
        })
        .collect()
}
