// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage boundary of the scheduling engine.
//!
//! The engine never talks to a concrete database; it talks to this trait.
//! Implementations must provide at least read-committed isolation for the
//! query methods and genuine atomicity for the conditional writes
//! ([`Repository::claim_slot`], [`Repository::create_convoy`],
//! [`Repository::create_report`]): the condition must be re-evaluated
//! inside the same transaction that performs the write, so a lost race
//! surfaces as a typed outcome rather than a double write.

use escala_domain::{
    AfterActionReport, AlertStatus, ConflictAlert, Convoy, CycleId, DutySlot, Holiday, Matricula,
    ShiftKind, SlotStatus, Team, WeekId,
};

/// Errors surfaced by repository implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The underlying storage engine failed.
    Backend(String),
    /// A stored value could not be encoded or decoded.
    Serialization(String),
    /// A referenced entity does not exist.
    NotFound {
        /// The entity kind (e.g. "slot", "team").
        entity: &'static str,
        /// The canonical id that was looked up.
        id: i64,
    },
}

impl std::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Backend(msg) => write!(f, "Storage backend error: {msg}"),
            Self::Serialization(msg) => write!(f, "Serialization error: {msg}"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Filter for team queries. `None` fields do not constrain the query.
#[derive(Debug, Clone, Default)]
pub struct TeamFilter {
    /// Restrict to teams of this week.
    pub week_id: Option<WeekId>,
    /// Restrict to teams of this cycle.
    pub cycle_id: Option<CycleId>,
    /// Restrict to teams of this shift kind.
    pub shift: Option<ShiftKind>,
    /// Restrict to teams whose roster contains this officer.
    pub member: Option<Matricula>,
    /// Include cancelled teams; conflict checks never set this.
    pub include_cancelled: bool,
}

/// Filter for after-action report queries.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    /// Restrict to reports of this cycle.
    pub cycle_id: Option<CycleId>,
    /// Restrict to the report of this convoy.
    pub convoy_id: Option<i64>,
}

/// Outcome of the atomic slot claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The slot transitioned to occupied and the team was created; the
    /// returned team carries its assigned id.
    Claimed(Team),
    /// The slot's status no longer matched the expected value at commit
    /// time; nothing was written.
    Lost {
        /// The status observed at commit time.
        current: SlotStatus,
    },
}

/// Outcome of the conditional convoy creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvoyOutcome {
    /// Both teams were still unassigned; the convoy was created.
    Formed(Convoy),
    /// A team was already referenced by another convoy at commit time;
    /// nothing was written.
    TeamTaken {
        /// The team that was already assigned.
        team_id: i64,
    },
}

/// Outcome of the conditional report creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// The convoy had no report yet; this one was stored.
    Submitted(AfterActionReport),
    /// The convoy already had a report at commit time; nothing was
    /// written.
    AlreadySubmitted,
}

/// Abstract transactional storage for the scheduling engine.
pub trait Repository {
    /// Persists freshly generated slots, assigning canonical ids.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn create_slots(&self, slots: &[DutySlot]) -> Result<Vec<DutySlot>, RepositoryError>;

    /// Fetches a single slot by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn slot(&self, slot_id: i64) -> Result<Option<DutySlot>, RepositoryError>;

    /// Fetches all slots of a week.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn slots_for_week(&self, week_id: &WeekId) -> Result<Vec<DutySlot>, RepositoryError>;

    /// Atomically transitions a slot from `expected` to occupied and
    /// creates the team, in one transaction. The slot status must be
    /// re-read inside the transaction; a mismatch yields
    /// [`ClaimOutcome::Lost`] with nothing written.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist or the storage engine
    /// fails.
    fn claim_slot(
        &self,
        slot_id: i64,
        expected: SlotStatus,
        team: &Team,
    ) -> Result<ClaimOutcome, RepositoryError>;

    /// Administrative reversal of a booking: marks the team cancelled and
    /// releases its slot back to available, atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the team does not exist or the storage engine
    /// fails.
    fn void_booking(&self, team_id: i64) -> Result<(), RepositoryError>;

    /// Fetches a single team by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn team(&self, team_id: i64) -> Result<Option<Team>, RepositoryError>;

    /// Fetches teams matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn teams_matching(&self, filter: &TeamFilter) -> Result<Vec<Team>, RepositoryError>;

    /// Conditionally creates a convoy: inside the transaction, re-checks
    /// that neither referenced team is already assigned to a convoy.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn create_convoy(&self, convoy: &Convoy) -> Result<ConvoyOutcome, RepositoryError>;

    /// Fetches a single convoy by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn convoy(&self, convoy_id: i64) -> Result<Option<Convoy>, RepositoryError>;

    /// Fetches the convoy referencing a team, if any. A team referenced by
    /// a convoy counts as assigned; no separate flag exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn convoy_for_team(&self, team_id: i64) -> Result<Option<Convoy>, RepositoryError>;

    /// Conditionally creates a convoy's single report: inside the
    /// transaction, re-checks that no report exists for the convoy.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn create_report(&self, report: &AfterActionReport) -> Result<ReportOutcome, RepositoryError>;

    /// Fetches reports matching the filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn reports_matching(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<AfterActionReport>, RepositoryError>;

    /// Persists a conflict alert, assigning its canonical id. Alert writes
    /// survive an aborted booking: they are the audit trail of attempted
    /// circumvention.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn create_alert(&self, alert: &ConflictAlert) -> Result<ConflictAlert, RepositoryError>;

    /// Fetches all alerts, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn alerts(&self) -> Result<Vec<ConflictAlert>, RepositoryError>;

    /// Updates an alert's review status.
    ///
    /// # Errors
    ///
    /// Returns an error if the alert does not exist or the storage engine
    /// fails.
    fn update_alert_status(
        &self,
        alert_id: i64,
        status: AlertStatus,
    ) -> Result<(), RepositoryError>;

    /// Persists a holiday, assigning its canonical id.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn add_holiday(&self, holiday: &Holiday) -> Result<Holiday, RepositoryError>;

    /// Removes a holiday.
    ///
    /// # Errors
    ///
    /// Returns an error if the holiday does not exist or the storage
    /// engine fails.
    fn remove_holiday(&self, holiday_id: i64) -> Result<(), RepositoryError>;

    /// Fetches all holidays, earliest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage engine fails.
    fn holidays(&self) -> Result<Vec<Holiday>, RepositoryError>;
}
