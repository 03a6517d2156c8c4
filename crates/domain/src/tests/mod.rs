// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used)]

mod balance;
mod schedule;
mod user;

use chrono::{DateTime, Duration, NaiveTime, Utc};

use crate::{Factory, FactoryConfig, Training};

pub fn test_factory() -> Factory {
    Factory::new(FactoryConfig::default()).unwrap()
}

/// Returns tomorrow (UTC) at the given full hour.
pub fn tomorrow_at(hour_of_day: i64) -> DateTime<Utc> {
    let tomorrow = Utc::now().date_naive() + Duration::days(1);
    tomorrow.and_time(NaiveTime::MIN).and_utc() + Duration::hours(hour_of_day)
}

pub fn new_training_at(time: DateTime<Utc>) -> Training {
    Training::new("training-uuid", "user-uuid", "Jane Doe", time).unwrap()
}
