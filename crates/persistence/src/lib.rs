// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SQLite persistence for the Escala duty roster.
//!
//! This crate implements the engine's `Repository` boundary on top of
//! `rusqlite`. The conditional writes the contract demands — slot claim,
//! convoy creation, report creation — each run inside a single SQLite
//! transaction that re-evaluates its precondition before writing, which
//! satisfies the compare-and-set discipline the booking protocol relies
//! on.
//!
//! All access goes through one connection behind a mutex, so repository
//! calls serialize; in-memory databases are used for tests and a
//! file-backed database for deployments.

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

mod error;
mod mutations;
mod queries;
mod schema;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;

use escala_core::{
    ClaimOutcome, ConvoyOutcome, ReportFilter, ReportOutcome, Repository, RepositoryError,
    TeamFilter,
};
use escala_domain::{
    AfterActionReport, AlertStatus, ConflictAlert, Convoy, DutySlot, Holiday, SlotStatus, Team,
    WeekId,
};
use rusqlite::Connection;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// SQLite-backed implementation of the engine's `Repository` boundary.
pub struct Persistence {
    conn: Mutex<Connection>,
}

impl Persistence {
    /// Opens an in-memory database and applies the schema.
    ///
    /// Each in-memory database is private to its connection, which gives
    /// tests deterministic isolation for free.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema setup fails.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open_in_memory()
            .map_err(|err| PersistenceError::ConnectionFailed(err.to_string()))?;
        Self::initialize(conn)
    }

    /// Opens (or creates) a file-backed database and applies the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or schema setup fails.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        let conn: Connection = Connection::open(path)
            .map_err(|err| PersistenceError::ConnectionFailed(err.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, PersistenceError> {
        conn.pragma_update(None, "foreign_keys", true)
            .map_err(|err| PersistenceError::InitializationFailed(err.to_string()))?;
        conn.execute_batch(schema::SCHEMA)
            .map_err(|err| PersistenceError::InitializationFailed(err.to_string()))?;
        info!("database schema initialized");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, PersistenceError> {
        self.conn.lock().map_err(|_| PersistenceError::LockPoisoned)
    }
}

impl Repository for Persistence {
    fn create_slots(&self, slots: &[DutySlot]) -> Result<Vec<DutySlot>, RepositoryError> {
        let mut conn = self.lock()?;
        mutations::create_slots(&mut conn, slots).map_err(Into::into)
    }

    fn slot(&self, slot_id: i64) -> Result<Option<DutySlot>, RepositoryError> {
        let conn = self.lock()?;
        queries::slot(&conn, slot_id).map_err(Into::into)
    }

    fn slots_for_week(&self, week_id: &WeekId) -> Result<Vec<DutySlot>, RepositoryError> {
        let conn = self.lock()?;
        queries::slots_for_week(&conn, week_id).map_err(Into::into)
    }

    fn claim_slot(
        &self,
        slot_id: i64,
        expected: SlotStatus,
        team: &Team,
    ) -> Result<ClaimOutcome, RepositoryError> {
        let mut conn = self.lock()?;
        mutations::claim_slot(&mut conn, slot_id, expected, team).map_err(Into::into)
    }

    fn void_booking(&self, team_id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.lock()?;
        mutations::void_booking(&mut conn, team_id).map_err(Into::into)
    }

    fn team(&self, team_id: i64) -> Result<Option<Team>, RepositoryError> {
        let conn = self.lock()?;
        queries::team(&conn, team_id).map_err(Into::into)
    }

    fn teams_matching(&self, filter: &TeamFilter) -> Result<Vec<Team>, RepositoryError> {
        let conn = self.lock()?;
        queries::teams_matching(&conn, filter).map_err(Into::into)
    }

    fn create_convoy(&self, convoy: &Convoy) -> Result<ConvoyOutcome, RepositoryError> {
        let mut conn = self.lock()?;
        mutations::create_convoy(&mut conn, convoy).map_err(Into::into)
    }

    fn convoy(&self, convoy_id: i64) -> Result<Option<Convoy>, RepositoryError> {
        let conn = self.lock()?;
        queries::convoy(&conn, convoy_id).map_err(Into::into)
    }

    fn convoy_for_team(&self, team_id: i64) -> Result<Option<Convoy>, RepositoryError> {
        let conn = self.lock()?;
        queries::convoy_for_team(&conn, team_id).map_err(Into::into)
    }

    fn create_report(&self, report: &AfterActionReport) -> Result<ReportOutcome, RepositoryError> {
        let mut conn = self.lock()?;
        mutations::create_report(&mut conn, report).map_err(Into::into)
    }

    fn reports_matching(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<AfterActionReport>, RepositoryError> {
        let conn = self.lock()?;
        queries::reports_matching(&conn, filter).map_err(Into::into)
    }

    fn create_alert(&self, alert: &ConflictAlert) -> Result<ConflictAlert, RepositoryError> {
        let mut conn = self.lock()?;
        mutations::create_alert(&mut conn, alert).map_err(Into::into)
    }

    fn alerts(&self) -> Result<Vec<ConflictAlert>, RepositoryError> {
        let conn = self.lock()?;
        queries::alerts(&conn).map_err(Into::into)
    }

    fn update_alert_status(
        &self,
        alert_id: i64,
        status: AlertStatus,
    ) -> Result<(), RepositoryError> {
        let mut conn = self.lock()?;
        mutations::update_alert_status(&mut conn, alert_id, status).map_err(Into::into)
    }

    fn add_holiday(&self, holiday: &Holiday) -> Result<Holiday, RepositoryError> {
        let mut conn = self.lock()?;
        mutations::add_holiday(&mut conn, holiday).map_err(Into::into)
    }

    fn remove_holiday(&self, holiday_id: i64) -> Result<(), RepositoryError> {
        let mut conn = self.lock()?;
        mutations::remove_holiday(&mut conn, holiday_id).map_err(Into::into)
    }

    fn holidays(&self) -> Result<Vec<Holiday>, RepositoryError> {
        let conn = self.lock()?;
        queries::holidays(&conn).map_err(Into::into)
    }
}
