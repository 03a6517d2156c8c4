// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite-specific backend utilities.
//!
//! This module is limited to:
//! - Connection pool initialization
//! - Migration execution
//! - SQLite-specific configuration (PRAGMA statements)
//! - Classifying lock failures of a transaction

use std::path::Path;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

use crate::error::PersistenceError;

/// SQLite migrations.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Pooled `SQLite` connections shared by the relational repositories.
pub type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

/// Maximum number of pooled connections.
const POOL_SIZE: u32 = 8;

/// How long a connection waits for a competing writer before `SQLite`
/// reports the database as locked.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Applies per-connection PRAGMAs when the pool opens a connection.
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        // Diesel has no PRAGMA DSL.
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}; PRAGMA foreign_keys = ON;"
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Run pending migrations on the provided connection.
///
/// # Errors
///
/// Returns an error if migration execution fails.
pub fn run_migrations(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    info!("Running SQLite database migrations");
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?;
    Ok(())
}

/// Enable WAL mode for file-based `SQLite` databases.
///
/// WAL lets readers proceed while one writer holds the database.
///
/// # Errors
///
/// Returns an error if the PRAGMA statement fails.
pub fn enable_wal_mode(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    // Diesel has no PRAGMA DSL.
    conn.batch_execute("PRAGMA journal_mode = WAL;")
        .map_err(PersistenceError::from)
}

/// Opens a connection pool on the database file at `path` and brings the
/// schema up to date.
///
/// # Arguments
///
/// * `path` - The database file, created if missing
///
/// # Errors
///
/// Returns an error if the pool cannot be built or migrations fail.
pub fn initialize_pool(path: &Path) -> Result<SqlitePool, PersistenceError> {
    let database_url: String = path.to_string_lossy().into_owned();
    info!(database_url = %database_url, "Initializing SQLite database");

    let pool: SqlitePool = Pool::builder()
        .max_size(POOL_SIZE)
        .connection_customizer(Box::new(ConnectionOptions))
        .build(ConnectionManager::<SqliteConnection>::new(database_url))?;

    let mut conn = pool.get()?;
    enable_wal_mode(&mut conn)?;
    run_migrations(&mut conn)?;

    Ok(pool)
}

/// Returns true when `err` reports a lost write race.
///
/// Updates take the write lock with `BEGIN IMMEDIATE`, so a competing
/// writer is waited for through the busy timeout instead of failing the
/// attempt. `SQLITE_BUSY` ("database is locked") therefore means the busy
/// timeout expired, which is not retried: the lock holder may be the
/// caller's own enclosing transaction.
#[must_use]
pub fn is_write_conflict(err: &DieselError) -> bool {
    matches!(
        err,
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _)
    )
}

/// Returns true when `err` reports an expired busy timeout.
#[must_use]
pub fn is_busy_timeout(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(_, info) => {
            let message: String = info.message().to_lowercase();
            message.contains("database is locked") || message.contains("database table is locked")
        }
        _ => false,
    }
}

/// Converts a failed transaction into a storage error, naming the lock wait
/// when the busy timeout expired.
#[must_use]
pub fn storage_error(err: DieselError) -> PersistenceError {
    if is_busy_timeout(&err) {
        warn!(
            error = %err,
            busy_timeout_ms = BUSY_TIMEOUT_MS,
            "SQLite write lock wait expired"
        );
        return PersistenceError::DatabaseError(format!(
            "write lock not acquired within {BUSY_TIMEOUT_MS} ms: {err}"
        ));
    }
    PersistenceError::from(err)
}
