// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Training credit accounting.

use crate::training::Training;
use crate::user::UserType;

/// Balance change applied when a training is booked.
pub const SCHEDULE_BALANCE_DELTA: i64 = -1;

/// Computes the balance change for the attendee when `training` is
/// cancelled by a user of type `canceled_by`.
///
/// - Inside the free-cancel window the booked credit is returned (`+1`)
/// - A late cancellation by the trainer returns it with a penalty credit (`+2`)
/// - A late cancellation by the attendee forfeits it (`0`)
#[must_use]
pub fn cancel_balance_delta(training: &Training, canceled_by: UserType) -> i64 {
    if training.can_be_canceled_for_free() {
        return 1;
    }

    match canceled_by {
        UserType::Trainer => 2,
        UserType::Attendee => 0,
    }
}
