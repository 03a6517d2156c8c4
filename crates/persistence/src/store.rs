// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend selection.
//!
//! The repositories are chosen once, from a [`StorageConfig`], and wrapped
//! in [`HourStore`]/[`TrainingStore`] so callers work with one concrete type
//! whatever the backend.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use gymslot_domain::{Availability, Factory, Hour, Training, User};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::backend::document::{open_database, open_temporary_database};
use crate::backend::sqlite::initialize_pool;
use crate::document::{DocumentHourRepository, DocumentTrainingRepository};
use crate::error::PersistenceError;
use crate::memory::{MemoryHourRepository, MemoryTrainingRepository};
use crate::repository::{HourRepository, TrainingRepository};
use crate::sqlite::{SqliteHourRepository, SqliteTrainingRepository};

/// Where hours and trainings are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum StorageConfig {
    /// Process memory; lost on exit.
    Memory,
    /// A `SQLite` database file.
    Sqlite { path: PathBuf },
    /// A `sled` directory. Without a path a temporary store is used.
    Document { path: Option<PathBuf> },
}

/// Hour repository of the configured backend.
pub enum HourStore {
    Memory(MemoryHourRepository),
    Sqlite(SqliteHourRepository),
    Document(DocumentHourRepository),
}

/// Training repository of the configured backend.
pub enum TrainingStore {
    Memory(MemoryTrainingRepository),
    Sqlite(SqliteTrainingRepository),
    Document(DocumentTrainingRepository),
}

/// Opens the hour and training repositories described by `config`.
///
/// # Arguments
///
/// * `config` - The backend to use
/// * `factory` - Builds and re-validates hours read from storage
///
/// # Errors
///
/// Returns an error if the backend cannot be opened or migrated.
pub fn open_repositories(
    config: &StorageConfig,
    factory: Factory,
) -> Result<(HourStore, TrainingStore), PersistenceError> {
    let stores: (HourStore, TrainingStore) = match config {
        StorageConfig::Memory => (
            HourStore::Memory(MemoryHourRepository::new(factory)),
            TrainingStore::Memory(MemoryTrainingRepository::new()),
        ),
        StorageConfig::Sqlite { path } => {
            let pool = initialize_pool(path)?;
            (
                HourStore::Sqlite(SqliteHourRepository::new(pool.clone(), factory)),
                TrainingStore::Sqlite(SqliteTrainingRepository::new(pool)),
            )
        }
        StorageConfig::Document { path } => {
            let db = match path {
                Some(path) => open_database(path)?,
                None => open_temporary_database()?,
            };
            (
                HourStore::Document(DocumentHourRepository::new(&db, factory)?),
                TrainingStore::Document(DocumentTrainingRepository::new(&db)?),
            )
        }
    };

    info!(?config, "Repositories opened");
    Ok(stores)
}

impl HourRepository for HourStore {
    fn factory(&self) -> &Factory {
        match self {
            Self::Memory(repo) => repo.factory(),
            Self::Sqlite(repo) => repo.factory(),
            Self::Document(repo) => repo.factory(),
        }
    }

    fn get_or_create_hour(&self, hour_time: DateTime<Utc>) -> Result<Hour, PersistenceError> {
        match self {
            Self::Memory(repo) => repo.get_or_create_hour(hour_time),
            Self::Sqlite(repo) => repo.get_or_create_hour(hour_time),
            Self::Document(repo) => repo.get_or_create_hour(hour_time),
        }
    }

    fn update_hour<E, F>(&self, hour_time: DateTime<Utc>, update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Hour) -> Result<Hour, E>,
    {
        match self {
            Self::Memory(repo) => repo.update_hour(hour_time, update_fn),
            Self::Sqlite(repo) => repo.update_hour(hour_time, update_fn),
            Self::Document(repo) => repo.update_hour(hour_time, update_fn),
        }
    }

    fn stored_hours_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, Availability)>, PersistenceError> {
        match self {
            Self::Memory(repo) => repo.stored_hours_between(start, end),
            Self::Sqlite(repo) => repo.stored_hours_between(start, end),
            Self::Document(repo) => repo.stored_hours_between(start, end),
        }
    }
}

impl TrainingRepository for TrainingStore {
    fn add_training<E, F>(&self, training: Training, create_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(&Training) -> Result<(), E>,
    {
        match self {
            Self::Memory(repo) => repo.add_training(training, create_fn),
            Self::Sqlite(repo) => repo.add_training(training, create_fn),
            Self::Document(repo) => repo.add_training(training, create_fn),
        }
    }

    fn get_training(&self, training_uuid: &str, user: &User) -> Result<Training, PersistenceError> {
        match self {
            Self::Memory(repo) => repo.get_training(training_uuid, user),
            Self::Sqlite(repo) => repo.get_training(training_uuid, user),
            Self::Document(repo) => repo.get_training(training_uuid, user),
        }
    }

    fn update_training<E, F>(&self, training_uuid: &str, user: &User, update_fn: F) -> Result<(), E>
    where
        E: From<PersistenceError>,
        F: FnMut(Training) -> Result<Training, E>,
    {
        match self {
            Self::Memory(repo) => repo.update_training(training_uuid, user, update_fn),
            Self::Sqlite(repo) => repo.update_training(training_uuid, user, update_fn),
            Self::Document(repo) => repo.update_training(training_uuid, user, update_fn),
        }
    }

    fn all_trainings(&self, since: DateTime<Utc>) -> Result<Vec<Training>, PersistenceError> {
        match self {
            Self::Memory(repo) => repo.all_trainings(since),
            Self::Sqlite(repo) => repo.all_trainings(since),
            Self::Document(repo) => repo.all_trainings(since),
        }
    }

    fn trainings_for_user(
        &self,
        user_uuid: &str,
        since: DateTime<Utc>,
    ) -> Result<Vec<Training>, PersistenceError> {
        match self {
            Self::Memory(repo) => repo.trainings_for_user(user_uuid, since),
            Self::Sqlite(repo) => repo.trainings_for_user(user_uuid, since),
            Self::Document(repo) => repo.trainings_for_user(user_uuid, since),
        }
    }
}
