// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking constraint evaluation.
//!
//! Two independent constraints guard every booking:
//!
//! 1. The monthly long-shift rule: an officer serves at most one 12-hour
//!    day shift per cycle.
//! 2. The weekly single-assignment rule: an officer serves on at most one
//!    team per week. The requesting leader (roster position 0) is exempt;
//!    any other member triggers a persisted circumvention alert on top of
//!    the rejection.
//!
//! Both rules scan committed, non-cancelled team records only — never
//! slots. The scans are a best-effort pre-check: the slot claim is the
//! actual arbiter of exclusivity under concurrency.

use crate::error::{ConflictRule, CoreError};
use crate::ledger::TeamProposal;
use crate::notifier::Notifier;
use crate::repository::{Repository, TeamFilter};
use escala_domain::{
    AlertKind, ConflictAlert, CycleId, DutySlot, Officer, ShiftKind, Team, cycle_of,
};

/// Decides whether a proposed team may occupy a target slot.
pub struct ConflictValidator<'a, R: Repository> {
    repo: &'a R,
}

impl<'a, R: Repository> ConflictValidator<'a, R> {
    /// Creates a validator over the given repository.
    #[must_use]
    pub const fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Evaluates all booking constraints for a proposal against a slot.
    ///
    /// The monthly long-shift rule runs first; the weekly
    /// single-assignment rule second. A weekly violation persists a
    /// `POSSIBLE_CIRCUMVENTION` alert before the rejection is returned.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConflictDetected` on any violation, or
    /// `CoreError::Repository` if a scan or the alert write fails.
    pub fn check<N: Notifier>(
        &self,
        proposal: &TeamProposal,
        slot: &DutySlot,
        notifier: &N,
    ) -> Result<(), CoreError> {
        self.check_monthly_long_shift(proposal, slot)?;
        self.check_weekly_assignment(proposal, slot, notifier)?;
        Ok(())
    }

    /// Rule 2: one 12-hour day shift per officer per cycle.
    ///
    /// Applies to every proposed member, leader included. Treated as
    /// officer error: the rejection carries no alert.
    fn check_monthly_long_shift(
        &self,
        proposal: &TeamProposal,
        slot: &DutySlot,
    ) -> Result<(), CoreError> {
        if slot.shift != ShiftKind::Day {
            return Ok(());
        }

        let cycle: CycleId = cycle_of(slot.date);
        for member in &proposal.members {
            let filter: TeamFilter = TeamFilter {
                cycle_id: Some(cycle),
                shift: Some(ShiftKind::Day),
                member: Some(member.matricula.clone()),
                ..TeamFilter::default()
            };
            let prior: Vec<Team> = self.repo.teams_matching(&filter)?;
            if !prior.is_empty() {
                return Err(CoreError::ConflictDetected {
                    rule: ConflictRule::MonthlyLongShift,
                    message: format!(
                        "Officer {} has already served a 12-hour shift in cycle {cycle}",
                        member.name
                    ),
                    offending: Some(member.matricula.clone()),
                });
            }
        }
        Ok(())
    }

    /// Rule 1: one assignment per officer per week, leader exempt.
    ///
    /// A violating member other than the leader looks like an attempt to
    /// slip an already-booked officer into a second team, so the alert is
    /// written even though the booking aborts.
    fn check_weekly_assignment<N: Notifier>(
        &self,
        proposal: &TeamProposal,
        slot: &DutySlot,
        notifier: &N,
    ) -> Result<(), CoreError> {
        for member in proposal.members.iter().skip(1) {
            let filter: TeamFilter = TeamFilter {
                week_id: Some(slot.week_id),
                member: Some(member.matricula.clone()),
                ..TeamFilter::default()
            };
            let prior: Vec<Team> = self.repo.teams_matching(&filter)?;
            if !prior.is_empty() {
                let alert: ConflictAlert = self.raise_circumvention_alert(member, slot, notifier)?;
                return Err(CoreError::ConflictDetected {
                    rule: ConflictRule::WeeklySingleAssignment,
                    message: alert.message,
                    offending: Some(member.matricula.clone()),
                });
            }
        }
        Ok(())
    }

    fn raise_circumvention_alert<N: Notifier>(
        &self,
        member: &Officer,
        slot: &DutySlot,
        notifier: &N,
    ) -> Result<ConflictAlert, CoreError> {
        let alert: ConflictAlert = ConflictAlert::new(
            AlertKind::PossibleCircumvention,
            format!(
                "Officer {} ({}) is already assigned to a team in week {}",
                member.name,
                member.matricula.display(),
                slot.week_id
            ),
            member.matricula.clone(),
            slot.week_id,
        );
        let persisted: ConflictAlert = self.repo.create_alert(&alert)?;
        notifier.alert_raised(&persisted);
        Ok(persisted)
    }
}
