// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Retry loop shared by the repository backends.
//!
//! A backend runs one read-modify-write attempt at a time and reports
//! either a final outcome or a write conflict. Conflicts restart the whole
//! attempt (fresh read, fresh call of the update function) after a short
//! backoff. There is no attempt limit, so backends report a conflict only
//! when another writer committed in between; lock waits that time out are
//! final errors, never conflicts.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// Largest backoff exponent; caps the sleep at 64 ms.
const MAX_BACKOFF_SHIFT: u32 = 6;

/// Outcome of a single atomic attempt.
#[derive(Debug)]
pub enum Attempt<T, E> {
    /// The attempt committed or failed for good.
    Finished(Result<T, E>),
    /// The attempt lost a write race and was rolled back.
    Conflict,
}

/// Runs `attempt` until it finishes.
///
/// # Arguments
///
/// * `operation` - Name used in log events
/// * `attempt` - One complete read-modify-write attempt
///
/// # Errors
///
/// Returns the error of the finishing attempt unchanged.
pub fn retry_on_conflict<T, E, F>(operation: &'static str, mut attempt: F) -> Result<T, E>
where
    F: FnMut() -> Attempt<T, E>,
{
    let mut conflicts: u32 = 0;

    loop {
        match attempt() {
            Attempt::Finished(result) => {
                if conflicts > 0 {
                    debug!(operation, conflicts, "Atomic update finished after retries");
                }
                return result;
            }
            Attempt::Conflict => {
                conflicts = conflicts.saturating_add(1);
                let backoff: Duration = backoff_for(conflicts);
                warn!(
                    operation,
                    conflicts,
                    backoff_ms = backoff.as_millis(),
                    "Write conflict, retrying atomic update"
                );
                thread::sleep(backoff);
            }
        }
    }
}

/// Returns the sleep before the next attempt: 2, 4, 8 ... 64 ms.
#[must_use]
pub fn backoff_for(conflicts: u32) -> Duration {
    Duration::from_millis(1_u64 << conflicts.clamp(1, MAX_BACKOFF_SHIFT))
}
