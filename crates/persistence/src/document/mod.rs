// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document repositories on `sled`.
//!
//! Updates run inside `sled` transactions, which detect conflicting
//! concurrent writes and rerun the transaction closure on their own. The
//! update functions are therefore kept in a `RefCell` so the `Fn` closure
//! `sled` requires can still call them mutably.

mod hours;
mod trainings;

pub use hours::DocumentHourRepository;
pub use trainings::DocumentTrainingRepository;

use sled::transaction::{ConflictableTransactionError, TransactionResult};

use crate::error::PersistenceError;

/// Aborts a transaction with a persistence error.
fn abort<E: From<PersistenceError>>(
    err: impl Into<PersistenceError>,
) -> ConflictableTransactionError<E> {
    ConflictableTransactionError::Abort(E::from(err.into()))
}

/// Unwraps a finished transaction into the caller's error type.
fn finish<T, E: From<PersistenceError>>(result: TransactionResult<T, E>) -> Result<T, E> {
    result.map_err(|err| match err {
        sled::transaction::TransactionError::Abort(err) => err,
        sled::transaction::TransactionError::Storage(err) => E::from(PersistenceError::from(err)),
    })
}

fn decode_uuid(raw: &[u8]) -> Result<&str, PersistenceError> {
    std::str::from_utf8(raw).map_err(|err| PersistenceError::CorruptRecord(err.to_string()))
}
