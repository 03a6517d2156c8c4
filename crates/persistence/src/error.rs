// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use chrono::{DateTime, Utc};
use gymslot_domain::{ForbiddenToSeeTraining, HourError, TrainingError};

/// Errors that can occur during persistence operations.
///
/// Write conflicts between concurrent updates never show up here; they are
/// retried inside the repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// A stored value could not be decoded.
    CorruptRecord(String),
    /// A time cannot be represented by the storage encoding.
    TimeOutOfRange(DateTime<Utc>),
    /// An hour could not be built, usually because it left the scheduling window.
    InvalidHour(HourError),
    /// A stored training breaks a training invariant.
    InvalidTraining(TrainingError),
    /// The requested training was not found.
    TrainingNotFound(String),
    /// A training with this UUID already exists.
    DuplicateTraining(String),
    /// Another active training already occupies this time.
    TrainingTimeTaken(DateTime<Utc>),
    /// The acting user may not see the training.
    Forbidden(ForbiddenToSeeTraining),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::CorruptRecord(msg) => write!(f, "Corrupt record: {msg}"),
            Self::TimeOutOfRange(time) => write!(f, "Time out of storable range: {time}"),
            Self::InvalidHour(err) => write!(f, "{err}"),
            Self::InvalidTraining(err) => write!(f, "{err}"),
            Self::TrainingNotFound(uuid) => write!(f, "training '{uuid}' not found"),
            Self::DuplicateTraining(uuid) => write!(f, "training '{uuid}' already exists"),
            Self::TrainingTimeTaken(time) => {
                write!(f, "there is training already at {time}")
            }
            Self::Forbidden(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<diesel::r2d2::PoolError> for PersistenceError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<sled::Error> for PersistenceError {
    fn from(err: sled::Error) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<HourError> for PersistenceError {
    fn from(err: HourError) -> Self {
        Self::InvalidHour(err)
    }
}

impl From<TrainingError> for PersistenceError {
    fn from(err: TrainingError) -> Self {
        Self::InvalidTraining(err)
    }
}

impl From<ForbiddenToSeeTraining> for PersistenceError {
    fn from(err: ForbiddenToSeeTraining) -> Self {
        Self::Forbidden(err)
    }
}
