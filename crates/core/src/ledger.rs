// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot generation and the atomic booking protocol.

use crate::conflict::ConflictValidator;
use crate::error::CoreError;
use crate::notifier::Notifier;
use crate::repository::{ClaimOutcome, Repository};
use escala_domain::{
    DutySlot, Officer, ShiftKind, SlotStatus, Team, VehiclePlate, WeekInfo, cycle_of,
};
use std::collections::HashSet;
use time::{Date, Weekday};

/// Day-shift slots added on weekends and holidays.
const REINFORCED_DAY_SLOTS: u8 = 2;

/// Night-shift quota for a weekday.
///
/// Weekend quotas are doubled at generation time; holidays get the same
/// treatment as weekends.
#[must_use]
pub const fn night_quota(weekday: Weekday) -> u8 {
    match weekday {
        Weekday::Monday => 4,
        Weekday::Tuesday | Weekday::Wednesday | Weekday::Thursday => 3,
        Weekday::Friday => 6,
        Weekday::Saturday | Weekday::Sunday => 5,
    }
}

/// A proposed booking: the roster, the vehicle and the leader's contact.
///
/// Position 0 of the roster is the registering leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamProposal {
    /// Ordered roster, leader first.
    pub members: Vec<Officer>,
    /// Designated vehicle.
    pub vehicle: VehiclePlate,
    /// Leader contact phone in normalized form.
    pub leader_phone: String,
}

/// Owns duty-slot creation and the transactional booking protocol.
pub struct SlotLedger<'a, R: Repository> {
    repo: &'a R,
}

impl<'a, R: Repository> SlotLedger<'a, R> {
    /// Creates a ledger over the given repository.
    #[must_use]
    pub const fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Generates the duty slots of a week.
    ///
    /// Ordinary weekdays get their night quota. Weekend days and holidays
    /// get the night quota doubled plus [`REINFORCED_DAY_SLOTS`] day-shift
    /// slots.
    ///
    /// # Errors
    ///
    /// Fails with `CoreError::AlreadyGenerated` if any slot already exists
    /// for the week; nothing is written in that case. Repository failures
    /// are propagated.
    pub fn generate_week(
        &self,
        week: &WeekInfo,
        holidays: &HashSet<Date>,
    ) -> Result<Vec<DutySlot>, CoreError> {
        let existing: Vec<DutySlot> = self.repo.slots_for_week(&week.week_id)?;
        if !existing.is_empty() {
            return Err(CoreError::AlreadyGenerated {
                week_id: week.week_id,
            });
        }

        let mut slots: Vec<DutySlot> = Vec::new();
        for day in &week.days {
            let weekday: Weekday = day.weekday();
            let reinforced: bool = matches!(weekday, Weekday::Saturday | Weekday::Sunday)
                || holidays.contains(day);
            let quota: u8 = night_quota(weekday);

            if reinforced {
                for _ in 0..REINFORCED_DAY_SLOTS {
                    slots.push(DutySlot::new(*day, ShiftKind::Day, week.week_id));
                }
                for _ in 0..quota * 2 {
                    slots.push(DutySlot::new(*day, ShiftKind::Night, week.week_id));
                }
            } else {
                for _ in 0..quota {
                    slots.push(DutySlot::new(*day, ShiftKind::Night, week.week_id));
                }
            }
        }

        let created: Vec<DutySlot> = self.repo.create_slots(&slots)?;
        Ok(created)
    }

    /// Books a slot for a proposed team.
    ///
    /// Preconditions are checked in order before any mutation: the slot
    /// must exist and be available, and the conflict validator must
    /// approve the roster. The claim itself is atomic: the repository
    /// re-reads the slot status at commit, so a concurrent booking of the
    /// same slot loses with `SlotUnavailable` rather than double-booking.
    ///
    /// The notifier observes the outcome either way; a circumvention alert
    /// raised by the validator is persisted even though the booking
    /// aborts.
    ///
    /// # Errors
    ///
    /// - `CoreError::SlotUnavailable` if the slot is missing, occupied, or
    ///   lost to a concurrent claim
    /// - `CoreError::ConflictDetected` if a booking constraint rejects the
    ///   roster
    /// - `CoreError::Domain` for roster-level violations
    /// - `CoreError::Repository` for storage failures
    pub fn book_slot<N: Notifier>(
        &self,
        slot_id: i64,
        proposal: &TeamProposal,
        notifier: &N,
    ) -> Result<Team, CoreError> {
        let outcome: Result<Team, CoreError> = self.try_book(slot_id, proposal, notifier);
        match &outcome {
            Ok(team) => notifier.booking_committed(team),
            Err(error) => notifier.booking_rejected(slot_id, error),
        }
        outcome
    }

    fn try_book<N: Notifier>(
        &self,
        slot_id: i64,
        proposal: &TeamProposal,
        notifier: &N,
    ) -> Result<Team, CoreError> {
        let slot: DutySlot = self
            .repo
            .slot(slot_id)?
            .ok_or(CoreError::SlotUnavailable { slot_id })?;
        if slot.status != SlotStatus::Available {
            return Err(CoreError::SlotUnavailable { slot_id });
        }

        // Roster shape first: a malformed proposal must not reach the
        // conflict scan, where it could leave a spurious alert behind.
        escala_domain::validate_roster(&proposal.members)?;

        ConflictValidator::new(self.repo).check(proposal, &slot, notifier)?;

        let team: Team = Team::new(
            slot_id,
            slot.date,
            slot.shift,
            slot.week_id,
            cycle_of(slot.date),
            proposal.members.clone(),
            proposal.vehicle.clone(),
            proposal.leader_phone.clone(),
        )?;

        match self.repo.claim_slot(slot_id, SlotStatus::Available, &team)? {
            ClaimOutcome::Claimed(committed) => Ok(committed),
            ClaimOutcome::Lost { .. } => Err(CoreError::SlotUnavailable { slot_id }),
        }
    }

    /// Administratively voids a booking, releasing the slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the team does not exist or the repository
    /// fails.
    pub fn void_booking(&self, team_id: i64) -> Result<(), CoreError> {
        self.repo.void_booking(team_id).map_err(Into::into)
    }
}
