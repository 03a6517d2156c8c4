// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Command and query boundary of the Gymslot scheduling core.
//!
//! Training commands compose one atomic training update with calls to the
//! hour and balance services ([`HourService`], [`BalanceService`]). Trainer
//! commands and hour queries work on an hour repository directly. Every
//! handler returns [`ApiError`], and [`Application`] wires all of them with
//! logging and metrics middleware.
//!
//! Transport, authentication and process wiring live outside this crate.

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
#![allow(clippy::multiple_crate_versions)]

mod application;
pub mod commands;
mod error;
mod local;
pub mod middleware;
pub mod queries;
mod services;

#[cfg(test)]
mod tests;

pub use application::{Application, Commands, Queries};
pub use commands::{Command, CommandHandler};
pub use error::{
    ApiError, translate_domain_error, translate_hour_error, translate_persistence_error,
    translate_service_error, translate_training_error, translate_user_error,
};
pub use local::{InMemoryBalanceLedger, LocalHourService};
pub use middleware::{MetricsClient, NoOpMetricsClient};
pub use queries::{Query, QueryHandler, TrainingView};
pub use services::{BalanceService, HourService, IdempotencyKey, OperationId, ServiceError};
