// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod query_tests;
mod training_command_tests;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, NaiveTime, Utc};
use gymslot_domain::{Factory, FactoryConfig, Training, User, UserType, truncate_to_hour};
use gymslot_persistence::{
    MemoryHourRepository, MemoryTrainingRepository, PersistenceError, TrainingRepository,
};

use crate::middleware::MetricsClient;
use crate::services::{BalanceService, HourService, IdempotencyKey, ServiceError};

/// One call received by [`RecordingHourService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HourCall {
    Schedule(DateTime<Utc>),
    Cancel(DateTime<Utc>),
    MakeAvailable(Vec<DateTime<Utc>>),
}

/// Hour service that records calls and optionally refuses them.
#[derive(Default)]
pub struct RecordingHourService {
    calls: Mutex<Vec<HourCall>>,
    fail: bool,
}

impl RecordingHourService {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<HourCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HourCall) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            return Err(ServiceError::Unavailable {
                service: "hour",
                message: String::from("connection refused"),
            });
        }
        Ok(())
    }
}

impl HourService for RecordingHourService {
    fn schedule_training(
        &self,
        _key: &IdempotencyKey,
        time: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        self.record(HourCall::Schedule(time))
    }

    fn cancel_training(
        &self,
        _key: &IdempotencyKey,
        time: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        self.record(HourCall::Cancel(time))
    }

    fn make_hours_available(
        &self,
        _key: &IdempotencyKey,
        hours: &[DateTime<Utc>],
    ) -> Result<(), ServiceError> {
        self.record(HourCall::MakeAvailable(hours.to_vec()))
    }

    fn is_hour_available(&self, _time: DateTime<Utc>) -> Result<bool, ServiceError> {
        Ok(!self.fail)
    }
}

/// Balance service that records `(user_uuid, delta)` pairs.
#[derive(Default)]
pub struct RecordingBalanceService {
    calls: Mutex<Vec<(String, i64)>>,
    fail: bool,
}

impl RecordingBalanceService {
    pub fn failing() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(String, i64)> {
        self.calls.lock().unwrap().clone()
    }
}

impl BalanceService for RecordingBalanceService {
    fn update_training_balance(
        &self,
        _key: &IdempotencyKey,
        user_uuid: &str,
        delta: i64,
    ) -> Result<(), ServiceError> {
        self.calls
            .lock()
            .unwrap()
            .push((user_uuid.to_string(), delta));
        if self.fail {
            return Err(ServiceError::InsufficientBalance {
                user_uuid: user_uuid.to_string(),
                balance: 0,
                delta,
            });
        }
        Ok(())
    }
}

/// Metrics client that sums counters per key.
#[derive(Default)]
pub struct RecordingMetrics {
    counters: Mutex<HashMap<String, i64>>,
}

impl RecordingMetrics {
    pub fn get(&self, key: &str) -> Option<i64> {
        self.counters.lock().unwrap().get(key).copied()
    }
}

impl MetricsClient for RecordingMetrics {
    fn inc(&self, key: &str, value: i64) {
        *self
            .counters
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default() += value;
    }
}

pub fn test_factory() -> Factory {
    Factory::new(FactoryConfig::default()).unwrap()
}

pub fn hour_repository() -> Arc<MemoryHourRepository> {
    Arc::new(MemoryHourRepository::new(test_factory()))
}

pub fn training_repository() -> Arc<MemoryTrainingRepository> {
    Arc::new(MemoryTrainingRepository::new())
}

/// Returns the given full hour `days` days from today (UTC).
pub fn day_at(days: i64, hour_of_day: i64) -> DateTime<Utc> {
    let date = Utc::now().date_naive() + Duration::days(days);
    date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(hour_of_day)
}

/// A full hour inside the free-cancel notice period.
pub fn soon() -> DateTime<Utc> {
    truncate_to_hour(Utc::now()) + Duration::hours(2)
}

pub fn attendee(uuid: &str) -> User {
    User::new(uuid, UserType::Attendee).unwrap()
}

pub fn trainer() -> User {
    User::new("trainer-uuid", UserType::Trainer).unwrap()
}

/// Stores a training without calling any service.
pub fn seed_training(
    trainings: &MemoryTrainingRepository,
    uuid: &str,
    user_uuid: &str,
    time: DateTime<Utc>,
) {
    let training: Training = Training::new(uuid, user_uuid, "Jane Doe", time).unwrap();
    trainings
        .add_training(training, |_: &Training| Ok::<_, PersistenceError>(()))
        .unwrap();
}
