// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Gymslot scheduling core.
//!
//! This crate stores trainer hours and trainings behind two repository
//! traits, [`HourRepository`] and [`TrainingRepository`], and offers three
//! interchangeable backends.
//!
//! ## Backends
//!
//! - **Memory**: a mutex-guarded map per repository. Used by tests and
//!   single-process setups.
//! - **`SQLite`**: Diesel over an `r2d2` connection pool. Schema changes
//!   live in `migrations/` and are embedded at compile time.
//! - **Document**: `sled` trees holding one JSON document per training.
//!
//! Backend selection happens once, through [`StorageConfig`] and
//! [`open_repositories`], and is transparent to callers.
//!
//! ## Atomic updates
//!
//! Updates take a function from the current aggregate to its replacement.
//! The function runs inside the backend's atomic scope and may be called
//! again when the attempt loses a write race, so it must tolerate retries.
//! A failing function leaves storage untouched.
//!
//! ## Time encoding
//!
//! Times are stored as `i64` nanoseconds since the Unix epoch; see
//! [`time_codec`].

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

pub mod atomic;
mod backend;
mod data_models;
mod diesel_schema;
mod document;
mod error;
mod memory;
mod repository;
mod sqlite;
mod store;
pub mod time_codec;

#[cfg(test)]
mod tests;

pub use document::{DocumentHourRepository, DocumentTrainingRepository};
pub use error::PersistenceError;
pub use memory::{MemoryHourRepository, MemoryTrainingRepository};
pub use repository::{HourRepository, TrainingRepository};
pub use sqlite::{SqliteHourRepository, SqliteTrainingRepository};
pub use store::{HourStore, StorageConfig, TrainingStore, open_repositories};
