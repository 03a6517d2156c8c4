// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ports to the services a training command talks to.
//!
//! Commands call these services from inside the training repository's
//! atomic scope. A scope may run more than once, so every call carries an
//! [`IdempotencyKey`] derived from the command's [`OperationId`]; a service
//! that already applied a key must report success without applying it
//! again.

use std::fmt;

use chrono::{DateTime, Utc};
use gymslot_domain::HourError;
use gymslot_persistence::PersistenceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Identity of one command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationId(Uuid);

impl OperationId {
    /// Creates a random operation id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the key of one side effect of this operation.
    #[must_use]
    pub fn key(&self, step: &str) -> IdempotencyKey {
        IdempotencyKey(format!("{}:{step}", self.0))
    }
}

impl Default for OperationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Deduplicates one side effect across retried atomic scopes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey(String);

impl IdempotencyKey {
    /// Returns a key for a sub-step of this side effect.
    #[must_use]
    pub fn child(&self, step: &str) -> Self {
        Self(format!("{}/{step}", self.0))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IdempotencyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Failures reported by the hour and balance services.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// The balance change would leave the user below zero.
    #[error("training balance of user {user_uuid} cannot drop below 0 (balance {balance}, change {delta})")]
    InsufficientBalance {
        user_uuid: String,
        balance: i64,
        delta: i64,
    },

    /// The hour refused the requested transition.
    #[error("unable to update availability of hour {time}: {source}")]
    HourRejected {
        time: DateTime<Utc>,
        #[source]
        source: HourError,
    },

    /// The hour store failed.
    #[error("hour storage failed: {0}")]
    Storage(#[from] PersistenceError),

    /// The service could not be reached.
    #[error("{service} service unavailable: {message}")]
    Unavailable {
        service: &'static str,
        message: String,
    },
}

impl ServiceError {
    /// Returns the name of the service that failed.
    #[must_use]
    pub const fn service(&self) -> &'static str {
        match self {
            Self::InsufficientBalance { .. } => "balance",
            Self::HourRejected { .. } | Self::Storage(_) => "hour",
            Self::Unavailable { service, .. } => *service,
        }
    }
}

/// Remote owner of trainer hours.
pub trait HourService: Send + Sync {
    /// Books the hour at `time`.
    ///
    /// # Errors
    ///
    /// Returns an error if the hour is not available or the call fails.
    fn schedule_training(
        &self,
        key: &IdempotencyKey,
        time: DateTime<Utc>,
    ) -> Result<(), ServiceError>;

    /// Releases the hour at `time`.
    ///
    /// # Errors
    ///
    /// Returns an error if no training is booked or the call fails.
    fn cancel_training(&self, key: &IdempotencyKey, time: DateTime<Utc>) -> Result<(), ServiceError>;

    /// Books `new_time`, then releases `original_time`.
    ///
    /// # Errors
    ///
    /// Returns the first failing step's error; a failed release leaves the
    /// new hour booked.
    fn move_training(
        &self,
        key: &IdempotencyKey,
        new_time: DateTime<Utc>,
        original_time: DateTime<Utc>,
    ) -> Result<(), ServiceError> {
        self.schedule_training(&key.child("schedule"), new_time)?;
        self.cancel_training(&key.child("cancel"), original_time)
    }

    /// Opens every hour in `hours` for bookings.
    ///
    /// # Errors
    ///
    /// Returns the error of the first hour that cannot be opened.
    fn make_hours_available(
        &self,
        key: &IdempotencyKey,
        hours: &[DateTime<Utc>],
    ) -> Result<(), ServiceError>;

    /// Returns whether the hour at `time` can be booked.
    ///
    /// # Errors
    ///
    /// Returns an error if the hour is outside the window or the call fails.
    fn is_hour_available(&self, time: DateTime<Utc>) -> Result<bool, ServiceError>;
}

/// Remote owner of attendee training balances.
pub trait BalanceService: Send + Sync {
    /// Adds `delta` to the balance of `user_uuid`.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::InsufficientBalance` if the result would be
    /// negative.
    fn update_training_balance(
        &self,
        key: &IdempotencyKey,
        user_uuid: &str,
        delta: i64,
    ) -> Result<(), ServiceError>;
}
