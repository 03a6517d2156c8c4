// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage encoding of instants.
//!
//! Times are stored as nanoseconds since the Unix epoch. Document keys use
//! the big-endian bytes with the sign bit flipped so that byte order equals
//! time order.

use chrono::{DateTime, Utc};

use crate::error::PersistenceError;

const SIGN_BIT: u64 = 1 << 63;

/// Returns `time` as nanoseconds since the Unix epoch.
///
/// # Errors
///
/// Returns `PersistenceError::TimeOutOfRange` outside roughly 1677..2262.
pub fn to_nanos(time: DateTime<Utc>) -> Result<i64, PersistenceError> {
    time.timestamp_nanos_opt()
        .ok_or(PersistenceError::TimeOutOfRange(time))
}

/// Returns the order-preserving document key of `time`.
///
/// # Errors
///
/// Returns `PersistenceError::TimeOutOfRange` if `time` has no nanosecond
/// representation.
pub fn to_key(time: DateTime<Utc>) -> Result<[u8; 8], PersistenceError> {
    let nanos: i64 = to_nanos(time)?;
    Ok((u64::from_be_bytes(nanos.to_be_bytes()) ^ SIGN_BIT).to_be_bytes())
}

/// Decodes a key produced by [`to_key`].
///
/// # Errors
///
/// Returns `PersistenceError::CorruptRecord` unless `key` is eight bytes.
pub fn from_key(key: &[u8]) -> Result<DateTime<Utc>, PersistenceError> {
    let bytes: [u8; 8] = key.try_into().map_err(|_| {
        PersistenceError::CorruptRecord(format!("invalid time key of {} bytes", key.len()))
    })?;
    let nanos: i64 = i64::from_be_bytes((u64::from_be_bytes(bytes) ^ SIGN_BIT).to_be_bytes());
    Ok(DateTime::from_timestamp_nanos(nanos))
}
