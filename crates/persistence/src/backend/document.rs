// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `sled` document store setup.
//!
//! ## Layout
//!
//! - `hours`: time key → availability string
//! - `trainings`: training UUID → JSON [`crate::data_models::TrainingDocument`]
//! - `training_times`: time key → UUID of the active training at that time
//!
//! Time keys come from [`crate::time_codec::to_key`], so range scans return
//! entries in time order.

use std::path::Path;

use sled::{Db, Tree};
use tracing::info;

use crate::error::PersistenceError;

pub const HOURS_TREE: &str = "hours";
pub const TRAININGS_TREE: &str = "trainings";
pub const TRAINING_TIMES_TREE: &str = "training_times";

/// Opens (or creates) the document store at `path`.
///
/// # Errors
///
/// Returns an error if `sled` cannot open the directory.
pub fn open_database(path: &Path) -> Result<Db, PersistenceError> {
    info!(path = %path.display(), "Opening document store");
    Ok(sled::open(path)?)
}

/// Opens a store that is deleted when the last handle is dropped.
///
/// # Errors
///
/// Returns an error if `sled` cannot create the temporary store.
pub fn open_temporary_database() -> Result<Db, PersistenceError> {
    info!("Opening temporary document store");
    Ok(sled::Config::new().temporary(true).open()?)
}

/// Opens one named tree of `db`.
///
/// # Errors
///
/// Returns an error if the tree cannot be opened.
pub fn open_tree(db: &Db, name: &str) -> Result<Tree, PersistenceError> {
    Ok(db.open_tree(name)?)
}
