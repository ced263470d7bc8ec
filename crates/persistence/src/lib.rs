// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the olympiad progression engine.
//!
//! This crate stores olympiads, players, teams, events, stages, groups,
//! matches, scores, and sessions in `SQLite` via Diesel. Migrations are
//! embedded and run at connection time.
//!
//! ## Concurrency
//!
//! Rows that participate in concurrent writes (olympiads, events,
//! matches) carry a `version` column starting at 1. Mutations that must
//! not race take the version the caller last observed and perform a
//! compare-and-set: the `UPDATE` filters on the expected version, and
//! zero affected rows means another writer got there first.
//!
//! ## Testing
//!
//! Tests use shared in-memory databases. Each `Store::new_in_memory()`
//! call receives a unique database name from an atomic counter, so
//! tests are isolated without time-based collisions.

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

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;

pub mod mutations;
pub mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    BracketLinkData, EventData, EventStageData, GroupData, GroupParticipantData, MatchData,
    MatchScoreData, OlympiadData, ParticipantData, PlayerData, SessionData, TeamData,
};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a `SQLite` database.
///
/// Owns the connection. Callers either use the convenience methods or
/// compose multi-step writes atomically via [`Store::transaction`] with
/// the free functions in [`mutations`] and [`queries`].
pub struct Store {
    conn: SqliteConnection,
}

impl Store {
    /// Creates a new store with an in-memory `SQLite` database.
    ///
    /// Uses a shared in-memory database via Diesel.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;

        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new store with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;

        // WAL mode for better read concurrency on file-backed databases
        backend::enable_wal_mode(&mut conn)?;

        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    /// Runs a closure inside a database transaction.
    ///
    /// Multi-step writes (stage builds, result recording with bracket
    /// propagation and advancement) go through here so they commit or
    /// roll back as a unit.
    ///
    /// # Errors
    ///
    /// Returns the closure's error; the transaction is rolled back.
    pub fn transaction<T, E, F>(&mut self, f: F) -> Result<T, E>
    where
        E: From<diesel::result::Error>,
        F: FnOnce(&mut SqliteConnection) -> Result<T, E>,
    {
        self.conn.transaction(f)
    }

    /// Borrows the underlying connection for single-statement reads.
    pub fn connection(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }
}
