// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Worked-hour ledgers and cycle statistics.
//!
//! Both derivations are read-only views over committed data: safe to
//! recompute at any time, idempotent, no locking. Unreported service is
//! not credited — a team whose convoy has no submitted after-action report
//! contributes no hours.

use crate::error::CoreError;
use crate::repository::{ReportFilter, Repository, TeamFilter};
use escala_domain::{
    AfterActionReport, Convoy, CycleId, Matricula, OutcomeCounters, ShiftWindow, Team,
    shift_window,
};
use std::collections::{BTreeMap, HashSet};
use time::PrimitiveDateTime;

/// One credited service interval of an officer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceInterval {
    /// Start of the shift window.
    pub start: PrimitiveDateTime,
    /// End of the shift window.
    pub end: PrimitiveDateTime,
    /// Hours credited for this service.
    pub hours: u32,
}

/// An officer's worked-hour ledger for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfficerHours {
    /// The officer's canonical registration number.
    pub matricula: Matricula,
    /// The officer's name as recorded on the roster.
    pub name: String,
    /// Sum of the credited hours of all services.
    pub total_hours: u32,
    /// The individual credited services.
    pub services: Vec<ServiceInterval>,
}

/// Aggregated operational statistics for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleStatistics {
    /// The cycle covered.
    pub cycle_id: CycleId,
    /// Number of reports aggregated.
    pub report_count: usize,
    /// Sums of the fixed outcome counter set.
    pub totals: OutcomeCounters,
}

/// Derives per-officer hours and cycle-level statistics.
pub struct HoursAggregator<'a, R: Repository> {
    repo: &'a R,
}

impl<'a, R: Repository> HoursAggregator<'a, R> {
    /// Creates an aggregator over the given repository.
    #[must_use]
    pub const fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Computes every officer's worked-hour ledger for a cycle.
    ///
    /// Only non-cancelled teams of the cycle whose convoy has a submitted
    /// report qualify. Each member of a qualifying team is credited the
    /// shift window of the team's slot. The result is ordered by
    /// matricula.
    ///
    /// # Errors
    ///
    /// Returns an error if a repository query fails or a shift window
    /// cannot be computed.
    pub fn officer_hours(&self, cycle_id: CycleId) -> Result<Vec<OfficerHours>, CoreError> {
        let reports: Vec<AfterActionReport> = self.repo.reports_matching(&ReportFilter {
            cycle_id: Some(cycle_id),
            convoy_id: None,
        })?;
        let reported_convoys: HashSet<i64> = reports.iter().map(|r| r.convoy_id).collect();

        let teams: Vec<Team> = self.repo.teams_matching(&TeamFilter {
            cycle_id: Some(cycle_id),
            ..TeamFilter::default()
        })?;

        let mut ledger: BTreeMap<Matricula, OfficerHours> = BTreeMap::new();
        for team in teams {
            let Some(team_id) = team.team_id else {
                continue;
            };
            let Some(convoy) = self.repo.convoy_for_team(team_id)? else {
                continue;
            };
            if !convoy_is_reported(&convoy, &reported_convoys) {
                continue;
            }

            let window: ShiftWindow = shift_window(team.slot_date, team.shift)?;
            let service: ServiceInterval = ServiceInterval {
                start: window.start,
                end: window.end,
                hours: window.hours,
            };
            for member in &team.members {
                let entry: &mut OfficerHours = ledger
                    .entry(member.matricula.clone())
                    .or_insert_with(|| OfficerHours {
                        matricula: member.matricula.clone(),
                        name: member.name.clone(),
                        total_hours: 0,
                        services: Vec::new(),
                    });
                entry.total_hours += window.hours;
                entry.services.push(service);
            }
        }

        Ok(ledger.into_values().collect())
    }

    /// Sums the fixed outcome counters over all reports of a cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository query fails.
    pub fn cycle_statistics(&self, cycle_id: CycleId) -> Result<CycleStatistics, CoreError> {
        let reports: Vec<AfterActionReport> = self.repo.reports_matching(&ReportFilter {
            cycle_id: Some(cycle_id),
            convoy_id: None,
        })?;

        let mut totals: OutcomeCounters = OutcomeCounters::default();
        for report in &reports {
            totals.accumulate(&report.counters);
        }

        Ok(CycleStatistics {
            cycle_id,
            report_count: reports.len(),
            totals,
        })
    }
}

fn convoy_is_reported(convoy: &Convoy, reported: &HashSet<i64>) -> bool {
    convoy
        .convoy_id
        .is_some_and(|id| reported.contains(&id))
}
