// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};

use crate::{Availability, DaySchedule, FactoryConfig, build_day_schedules, schedule_bounds};

fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, 0, 0).unwrap()
}

#[test]
fn test_missing_days_and_hours_are_back_filled() {
    let config: FactoryConfig = FactoryConfig::default();
    let stored = [
        (at(11, 14), Availability::Available),
        (at(10, 13), Availability::TrainingScheduled),
    ];

    let days: Vec<DaySchedule> = build_day_schedules(&config, at(10, 0), at(12, 23), &stored);

    assert_eq!(days.len(), 3);
    assert_eq!(
        days.iter().map(|day| day.date).collect::<Vec<_>>(),
        vec![
            NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 11).unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
        ]
    );
    for day in &days {
        assert_eq!(day.hours.len(), 9);
        assert!(day.hours.windows(2).all(|pair| pair[0].hour < pair[1].hour));
    }

    assert!(!days[0].has_free_hours);
    assert!(days[0].hours[1].has_training_scheduled);
    assert!(days[1].has_free_hours);
    assert!(days[1].hours[2].available);
    assert!(!days[2].has_free_hours);
    assert!(days[2].hours.iter().all(|slot| !slot.available));
}

#[test]
fn test_single_day_range() {
    let days: Vec<DaySchedule> =
        build_day_schedules(&FactoryConfig::default(), at(10, 13), at(10, 13), &[]);

    assert_eq!(days.len(), 1);
    assert_eq!(days[0].hours.first().unwrap().hour, at(10, 12));
    assert_eq!(days[0].hours.last().unwrap().hour, at(10, 20));
}

#[test]
fn test_reversed_range_is_empty() {
    let days: Vec<DaySchedule> =
        build_day_schedules(&FactoryConfig::default(), at(12, 0), at(10, 0), &[]);

    assert!(days.is_empty());
}

#[test]
fn test_schedule_bounds_cover_configured_hours() {
    let config: FactoryConfig = FactoryConfig {
        max_weeks_in_the_future_to_set: 1,
        min_utc_hour: 0,
        max_utc_hour: 24,
    };

    assert_eq!(
        schedule_bounds(&config, at(10, 15), at(11, 9)),
        (at(10, 0), at(12, 0))
    );
}
