// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Database backend-specific code.
//!
//! This module isolates connection setup, migration execution and the
//! classification of backend errors. Repository logic lives in `sqlite/`
//! and `document/`.
//!
//! ## Backend Support
//!
//! - `sqlite`: `SQLite` through Diesel, the relational backend
//! - `document`: `sled`, the embedded document backend

pub mod document;
pub mod sqlite;
