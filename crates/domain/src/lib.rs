// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Domain model of the Gymslot scheduling core.
//!
//! Two aggregates live here, each with its own state machine:
//!
//! - [`Hour`]: one trainer time slot, built through a [`Factory`] that
//!   enforces the scheduling window
//! - [`Training`]: one attendee booking, including the two-party
//!   reschedule protocol
//!
//! Everything in this crate is pure. Persistence and orchestration live in
//! the `gymslot-persistence` and `gymslot-api` crates.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod balance;
mod error;
mod factory;
mod hour;
mod schedule;
mod training;
mod user;

#[cfg(test)]
mod tests;

pub use balance::{SCHEDULE_BALANCE_DELTA, cancel_balance_delta};
pub use error::{
    DomainError, FactoryConfigError, FactoryConfigViolation, ForbiddenToSeeTraining, HourError,
    TrainingError, UserError,
};
pub use factory::{Factory, FactoryConfig, truncate_to_hour};
pub use hour::{Availability, Hour};
pub use schedule::{DaySchedule, HourSlot, build_day_schedules, schedule_bounds};
pub use training::{FREE_CANCEL_NOTICE_HOURS, MAX_NOTES_LENGTH, RescheduleProposal, Training};
pub use user::{User, UserType, can_user_see_training};
