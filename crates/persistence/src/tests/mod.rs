// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

/// Generates one test per backend from a function taking a `&Fixture`.
///
/// For `fn foo(fixture: &Fixture)` this emits `foo_memory`, `foo_sqlite`
/// and `foo_document`.
macro_rules! backend_tests {
    ($($name:ident),* $(,)?) => {
        pastey::paste! {
            $(
                #[test]
                fn [<$name _memory>]() {
                    $name(&crate::tests::memory_fixture());
                }

                #[test]
                fn [<$name _sqlite>]() {
                    $name(&crate::tests::sqlite_fixture());
                }

                #[test]
                fn [<$name _document>]() {
                    $name(&crate::tests::document_fixture());
                }
            )*
        }
    };
}

mod store_tests;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use gymslot_domain::{Factory, FactoryConfig, Training, User, UserType};
use tempfile::TempDir;

use crate::store::{HourStore, StorageConfig, TrainingStore, open_repositories};

/// Repositories of one backend plus the directory backing them.
pub struct Fixture {
    pub hours: HourStore,
    pub trainings: TrainingStore,
    _dir: TempDir,
}

fn open_fixture(config_for: impl FnOnce(&TempDir) -> StorageConfig) -> Fixture {
    let dir: TempDir = tempfile::tempdir().expect("Failed to create temp dir");
    let config: StorageConfig = config_for(&dir);
    let (hours, trainings) =
        open_repositories(&config, test_factory()).expect("Failed to open repositories");
    Fixture {
        hours,
        trainings,
        _dir: dir,
    }
}

pub fn memory_fixture() -> Fixture {
    open_fixture(|_| StorageConfig::Memory)
}

pub fn sqlite_fixture() -> Fixture {
    open_fixture(|dir| StorageConfig::Sqlite {
        path: dir.path().join("gymslot.db"),
    })
}

pub fn document_fixture() -> Fixture {
    open_fixture(|dir| StorageConfig::Document {
        path: Some(dir.path().join("documents")),
    })
}

pub fn test_factory() -> Factory {
    Factory::new(FactoryConfig::default()).unwrap()
}

/// Returns the given full hour `days` days from today (UTC).
pub fn day_at(days: i64, hour_of_day: i64) -> DateTime<Utc> {
    let date = Utc::now().date_naive() + Duration::days(days);
    date.and_time(NaiveTime::MIN).and_utc() + Duration::hours(hour_of_day)
}

pub fn tomorrow_at(hour_of_day: i64) -> DateTime<Utc> {
    day_at(1, hour_of_day)
}

pub fn attendee(uuid: &str) -> User {
    User::new(uuid, UserType::Attendee).unwrap()
}

pub fn trainer() -> User {
    User::new("trainer-uuid", UserType::Trainer).unwrap()
}

pub fn training(uuid: &str, user_uuid: &str, time: DateTime<Utc>) -> Training {
    Training::new(uuid, user_uuid, "Jane Doe", time).unwrap()
}
