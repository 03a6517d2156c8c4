// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Relational repositories on `SQLite`.
//!
//! Every update runs in a `BEGIN IMMEDIATE` transaction, which takes the
//! database write lock before the first read. Competing writers wait on the
//! busy timeout. When it expires the update fails with
//! `PersistenceError::DatabaseError` and is not retried; only a reported
//! serialization failure restarts the attempt through
//! [`crate::atomic::retry_on_conflict`].
//!
//! An update function that writes through a second repository on the same
//! database file waits on its own enclosing transaction and fails once the
//! busy timeout expires.

mod hours;
mod trainings;

pub use hours::SqliteHourRepository;
pub use trainings::SqliteTrainingRepository;

use diesel::SqliteConnection;
use diesel::result::Error as DieselError;

use crate::atomic::Attempt;
use crate::backend::sqlite::{SqlitePool, is_write_conflict, storage_error};
use crate::error::PersistenceError;

/// Failure inside one transaction attempt.
enum TxError<E> {
    /// The database failed; may be a retryable conflict.
    Storage(DieselError),
    /// The attempt was rejected and must not be retried.
    Rejected(E),
}

impl<E> From<DieselError> for TxError<E> {
    fn from(err: DieselError) -> Self {
        Self::Storage(err)
    }
}

impl<E: From<PersistenceError>> TxError<E> {
    fn rejected(err: impl Into<PersistenceError>) -> Self {
        Self::Rejected(E::from(err.into()))
    }
}

/// Runs `body` in one immediate transaction on a pooled connection.
fn run_attempt<T, E, B>(pool: &SqlitePool, body: B) -> Attempt<T, E>
where
    E: From<PersistenceError>,
    B: FnOnce(&mut SqliteConnection) -> Result<T, TxError<E>>,
{
    let mut conn = match pool.get() {
        Ok(conn) => conn,
        Err(err) => return Attempt::Finished(Err(E::from(PersistenceError::from(err)))),
    };

    match conn.immediate_transaction(body) {
        Ok(value) => Attempt::Finished(Ok(value)),
        Err(TxError::Rejected(err)) => Attempt::Finished(Err(err)),
        Err(TxError::Storage(err)) if is_write_conflict(&err) => Attempt::Conflict,
        Err(TxError::Storage(err)) => Attempt::Finished(Err(E::from(storage_error(err)))),
    }
}
