// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Convoy formation and after-action report submission.

use crate::error::CoreError;
use crate::repository::{ConvoyOutcome, ReportOutcome, Repository};
use escala_domain::{
    AfterActionReport, Convoy, Designation, Matricula, OutcomeCounters, Team, cycle_of,
    validate_area_code,
};
use time::OffsetDateTime;

/// The operational assignment of a convoy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationalData {
    /// Geographic area code (AIS).
    pub area_code: u8,
    /// Neighborhood covered by the patrol.
    pub neighborhood: String,
    /// Mission description.
    pub mission: String,
    /// Supervising delegate (DPC).
    pub dpc: Designation,
    /// Supervising duty officer (OIP).
    pub oip: Designation,
    /// Where the pre-shift briefing takes place.
    pub briefing_location: Designation,
}

/// Groups exactly two booked teams into a convoy.
pub struct ConvoyFormer<'a, R: Repository> {
    repo: &'a R,
}

impl<'a, R: Repository> ConvoyFormer<'a, R> {
    /// Creates a former over the given repository.
    #[must_use]
    pub const fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Forms a convoy from exactly two unassigned teams.
    ///
    /// The unassignment check runs twice: once here as a pre-check with a
    /// precise error, and once inside the repository transaction, so two
    /// administrators racing on overlapping team sets cannot both commit.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidSelection` unless exactly two distinct,
    ///   existing, non-cancelled, unassigned teams are given
    /// - `CoreError::IncompleteOperationalData` if a required operational
    ///   field is missing or empty
    /// - `CoreError::Repository` for storage failures
    pub fn form_convoy(
        &self,
        team_ids: &[i64],
        data: OperationalData,
    ) -> Result<Convoy, CoreError> {
        let &[first, second] = team_ids else {
            return Err(CoreError::InvalidSelection {
                reason: format!("exactly 2 teams are required, got {}", team_ids.len()),
            });
        };
        if first == second {
            return Err(CoreError::InvalidSelection {
                reason: String::from("the two teams must be distinct"),
            });
        }

        validate_operational_data(&data)?;

        let lead_team: Team = self.require_unassigned(first)?;
        self.require_unassigned(second)?;

        let convoy: Convoy = Convoy::new(
            lead_team.week_id,
            lead_team.slot_date,
            [first, second],
            data.area_code,
            data.neighborhood,
            data.mission,
            data.dpc,
            data.oip,
            data.briefing_location,
        );

        match self.repo.create_convoy(&convoy)? {
            ConvoyOutcome::Formed(committed) => Ok(committed),
            ConvoyOutcome::TeamTaken { team_id } => Err(CoreError::InvalidSelection {
                reason: format!("team {team_id} was assigned to another convoy"),
            }),
        }
    }

    /// Submits the convoy's single after-action report.
    ///
    /// The report's cycle derives from the convoy's patrol date. A second
    /// submission for the same convoy is rejected; reports are immutable
    /// once stored.
    ///
    /// # Errors
    ///
    /// - `CoreError::InvalidSelection` if the convoy does not exist
    /// - `CoreError::ReportAlreadySubmitted` if the convoy already has a
    ///   report
    /// - `CoreError::Repository` for storage failures
    pub fn submit_report(
        &self,
        convoy_id: i64,
        counters: OutcomeCounters,
        summary: String,
        submitted_by: Matricula,
        submitted_at: OffsetDateTime,
    ) -> Result<AfterActionReport, CoreError> {
        let convoy: Convoy =
            self.repo
                .convoy(convoy_id)?
                .ok_or_else(|| CoreError::InvalidSelection {
                    reason: format!("convoy {convoy_id} does not exist"),
                })?;

        let report: AfterActionReport = AfterActionReport::new(
            convoy_id,
            cycle_of(convoy.date),
            counters,
            summary,
            submitted_by,
            submitted_at,
        );

        match self.repo.create_report(&report)? {
            ReportOutcome::Submitted(committed) => Ok(committed),
            ReportOutcome::AlreadySubmitted => {
                Err(CoreError::ReportAlreadySubmitted { convoy_id })
            }
        }
    }

    fn require_unassigned(&self, team_id: i64) -> Result<Team, CoreError> {
        let team: Team =
            self.repo
                .team(team_id)?
                .ok_or_else(|| CoreError::InvalidSelection {
                    reason: format!("team {team_id} does not exist"),
                })?;
        if !team.is_active() {
            return Err(CoreError::InvalidSelection {
                reason: format!("team {team_id} was cancelled"),
            });
        }
        if self.repo.convoy_for_team(team_id)?.is_some() {
            return Err(CoreError::InvalidSelection {
                reason: format!("team {team_id} is already assigned to a convoy"),
            });
        }
        Ok(team)
    }
}

/// Validates that every operational field is usable.
///
/// A designation set to "other" must carry non-empty free text; named
/// designations must be non-empty as well.
fn validate_operational_data(data: &OperationalData) -> Result<(), CoreError> {
    validate_area_code(data.area_code)?;
    if data.neighborhood.trim().is_empty() {
        return Err(CoreError::IncompleteOperationalData {
            field: "neighborhood",
        });
    }
    if data.mission.trim().is_empty() {
        return Err(CoreError::IncompleteOperationalData { field: "mission" });
    }
    validate_designation(&data.dpc, "dpc")?;
    validate_designation(&data.oip, "oip")?;
    validate_designation(&data.briefing_location, "briefing_location")?;
    Ok(())
}

fn validate_designation(
    designation: &Designation,
    field: &'static str,
) -> Result<(), CoreError> {
    if designation.resolved().trim().is_empty() {
        return Err(CoreError::IncompleteOperationalData { field });
    }
    Ok(())
}
