// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed requests and responses of the API surface.
//!
//! Requests carry raw caller input (normalized and validated by the
//! operation); responses are flat views with display formatting applied,
//! so callers never handle domain types directly.

use escala_core::{CycleStatistics, OfficerHours, ServiceInterval};
use escala_domain::{AfterActionReport, ConflictAlert, Convoy, Holiday, OutcomeCounters, Team};
use serde::{Deserialize, Serialize};
use time::{Date, PrimitiveDateTime};

/// The selector value that switches a designation to free text.
pub const OTHER_CHOICE: &str = "OUTRO";

/// One roster entry as entered by the registering leader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberEntry {
    /// Officer name (raw; will be normalized).
    pub name: String,
    /// Registration number (raw; will be canonicalized).
    pub matricula: String,
    /// Department code.
    pub department: String,
    /// Unit (delegacia).
    pub unit: String,
    /// Contact phone; required for position 0 (the leader).
    pub phone: Option<String>,
}

/// Request to book a duty slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSlotRequest {
    /// The target slot.
    pub slot_id: i64,
    /// The roster, leader first.
    pub members: Vec<MemberEntry>,
    /// Vehicle plate (raw; will be canonicalized).
    pub vehicle: String,
}

/// A roster member in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    /// Display-formatted matricula (`NNN.NNN-N-N`).
    pub matricula: String,
    /// Officer name.
    pub name: String,
    /// Department code.
    pub department: String,
    /// Unit (delegacia).
    pub unit: String,
}

/// A committed team in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamView {
    /// Canonical team id.
    pub team_id: i64,
    /// The claimed slot.
    pub slot_id: i64,
    /// The duty date.
    pub date: Date,
    /// Shift kind (`day`/`night`).
    pub shift: String,
    /// Week identifier (`YYYY-Www`).
    pub week_id: String,
    /// Cycle identifier (`YYYY-MM`).
    pub cycle_id: String,
    /// Leader name.
    pub leader_name: String,
    /// Leader unit.
    pub leader_unit: String,
    /// Leader contact phone.
    pub leader_phone: String,
    /// Vehicle plate.
    pub vehicle: String,
    /// Full roster in display form.
    pub members: Vec<MemberView>,
    /// Team status.
    pub status: String,
}

impl From<&Team> for TeamView {
    fn from(team: &Team) -> Self {
        Self {
            team_id: team.team_id.unwrap_or_default(),
            slot_id: team.slot_id,
            date: team.slot_date,
            shift: team.shift.to_string(),
            week_id: team.week_id.to_string(),
            cycle_id: team.cycle_id.to_string(),
            leader_name: team.leader().name.clone(),
            leader_unit: team.leader().unit.clone(),
            leader_phone: team.leader_phone.clone(),
            vehicle: team.vehicle.value().to_string(),
            members: team
                .members
                .iter()
                .map(|member| MemberView {
                    matricula: member.matricula.display(),
                    name: member.name.clone(),
                    department: member.department.clone(),
                    unit: member.unit.clone(),
                })
                .collect(),
            status: team.status.to_string(),
        }
    }
}

/// One slot in the week schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    /// Canonical slot id.
    pub slot_id: i64,
    /// Shift kind (`day`/`night`).
    pub shift: String,
    /// Slot status (`available`/`occupied`).
    pub status: String,
    /// The booked team, once occupied.
    pub team: Option<TeamView>,
}

/// All slots of one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    /// The calendar date.
    pub date: Date,
    /// How many slots are still available.
    pub available: usize,
    /// The day's slots, day shift first.
    pub slots: Vec<SlotView>,
}

/// The schedule of a whole week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekScheduleResponse {
    /// Week identifier (`YYYY-Www`).
    pub week_id: String,
    /// Monday-to-Sunday day schedules.
    pub days: Vec<DaySchedule>,
}

/// Result of generating a week's slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateWeekResponse {
    /// Week identifier (`YYYY-Www`).
    pub week_id: String,
    /// How many slots were created.
    pub slots_created: usize,
}

/// A designation as entered: a selector value, plus free text when the
/// selector is [`OTHER_CHOICE`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignationInput {
    /// The selected value, or [`OTHER_CHOICE`].
    pub choice: String,
    /// Free text, meaningful only with [`OTHER_CHOICE`].
    pub other_text: Option<String>,
}

/// Request to form a convoy from two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConvoyRequest {
    /// Exactly two team ids.
    pub team_ids: Vec<i64>,
    /// Geographic area code (AIS).
    pub area_code: u8,
    /// Neighborhood covered by the patrol.
    pub neighborhood: String,
    /// Mission description.
    pub mission: String,
    /// Supervising delegate (DPC).
    pub dpc: DesignationInput,
    /// Supervising duty officer (OIP).
    pub oip: DesignationInput,
    /// Briefing location.
    pub briefing_location: DesignationInput,
}

/// A formed convoy in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvoyView {
    /// Canonical convoy id.
    pub convoy_id: i64,
    /// Week identifier.
    pub week_id: String,
    /// Patrol date.
    pub date: Date,
    /// The two paired teams.
    pub team_ids: [i64; 2],
    /// Geographic area code (AIS).
    pub area_code: u8,
    /// Neighborhood.
    pub neighborhood: String,
    /// Mission description.
    pub mission: String,
    /// Effective DPC name.
    pub dpc: String,
    /// Effective OIP name.
    pub oip: String,
    /// Effective briefing location.
    pub briefing_location: String,
    /// Convoy status.
    pub status: String,
}

impl From<&Convoy> for ConvoyView {
    fn from(convoy: &Convoy) -> Self {
        Self {
            convoy_id: convoy.convoy_id.unwrap_or_default(),
            week_id: convoy.week_id.to_string(),
            date: convoy.date,
            team_ids: convoy.team_ids,
            area_code: convoy.area_code,
            neighborhood: convoy.neighborhood.clone(),
            mission: convoy.mission.clone(),
            dpc: convoy.dpc.resolved().to_string(),
            oip: convoy.oip.resolved().to_string(),
            briefing_location: convoy.briefing_location.resolved().to_string(),
            status: convoy.status.to_string(),
        }
    }
}

/// Request to submit a convoy's after-action report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitReportRequest {
    /// The convoy being reported.
    pub convoy_id: i64,
    /// Operational outcome counters.
    pub counters: OutcomeCounters,
    /// Free-text summary.
    pub summary: String,
}

/// A submitted report in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportView {
    /// Canonical report id.
    pub report_id: i64,
    /// The reported convoy.
    pub convoy_id: i64,
    /// Cycle identifier (`YYYY-MM`).
    pub cycle_id: String,
    /// Operational outcome counters.
    pub counters: OutcomeCounters,
    /// Free-text summary.
    pub summary: String,
    /// Display-formatted matricula of the submitter.
    pub submitted_by: String,
}

impl From<&AfterActionReport> for ReportView {
    fn from(report: &AfterActionReport) -> Self {
        Self {
            report_id: report.report_id.unwrap_or_default(),
            convoy_id: report.convoy_id,
            cycle_id: report.cycle_id.to_string(),
            counters: report.counters,
            summary: report.summary.clone(),
            submitted_by: report.submitted_by.display(),
        }
    }
}

/// One past service of an officer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceHistoryEntry {
    /// The duty date.
    pub date: Date,
    /// Shift kind (`day`/`night`).
    pub shift: String,
    /// Leader name of the team served on.
    pub leader_name: String,
    /// Vehicle plate.
    pub vehicle: String,
    /// Full roster in display form.
    pub members: Vec<MemberView>,
}

/// One credited service interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceView {
    /// Start of the shift window.
    pub start: PrimitiveDateTime,
    /// End of the shift window.
    pub end: PrimitiveDateTime,
    /// Hours credited.
    pub hours: u32,
}

impl From<&ServiceInterval> for ServiceView {
    fn from(service: &ServiceInterval) -> Self {
        Self {
            start: service.start,
            end: service.end,
            hours: service.hours,
        }
    }
}

/// One officer's worked-hour ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerHoursView {
    /// Display-formatted matricula.
    pub matricula: String,
    /// Officer name.
    pub name: String,
    /// Sum of credited hours.
    pub total_hours: u32,
    /// The individual services.
    pub services: Vec<ServiceView>,
}

impl From<&OfficerHours> for OfficerHoursView {
    fn from(hours: &OfficerHours) -> Self {
        Self {
            matricula: hours.matricula.display(),
            name: hours.name.clone(),
            total_hours: hours.total_hours,
            services: hours.services.iter().map(ServiceView::from).collect(),
        }
    }
}

/// The hours dashboard of a cycle, busiest officers first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerHoursResponse {
    /// Cycle identifier (`YYYY-MM`).
    pub cycle_id: String,
    /// Per-officer ledgers, ordered by total hours descending.
    pub officers: Vec<OfficerHoursView>,
}

/// The statistics dashboard of a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleStatisticsResponse {
    /// Number of reports aggregated.
    pub report_count: usize,
    /// Sums of the fixed outcome counter set.
    pub totals: OutcomeCounters,
}

impl From<&CycleStatistics> for CycleStatisticsResponse {
    fn from(stats: &CycleStatistics) -> Self {
        Self {
            report_count: stats.report_count,
            totals: stats.totals,
        }
    }
}

/// A conflict alert in display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertView {
    /// Canonical alert id.
    pub alert_id: i64,
    /// Alert kind.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Display-formatted matricula of the offending officer.
    pub offending_matricula: String,
    /// Week identifier.
    pub week_id: String,
    /// Review status (`new`/`reviewed`).
    pub status: String,
}

impl From<&ConflictAlert> for AlertView {
    fn from(alert: &ConflictAlert) -> Self {
        Self {
            alert_id: alert.alert_id.unwrap_or_default(),
            kind: alert.kind.to_string(),
            message: alert.message.clone(),
            offending_matricula: alert.offending_matricula.display(),
            week_id: alert.week_id.to_string(),
            status: alert.status.to_string(),
        }
    }
}

/// Request to register a holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// Holiday name (raw; will be normalized).
    pub name: String,
    /// The calendar date.
    pub date: Date,
}

/// A registered holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayView {
    /// Canonical holiday id.
    pub holiday_id: i64,
    /// Holiday name.
    pub name: String,
    /// The calendar date.
    pub date: Date,
}

impl From<&Holiday> for HolidayView {
    fn from(holiday: &Holiday) -> Self {
        Self {
            holiday_id: holiday.holiday_id.unwrap_or_default(),
            name: holiday.name.clone(),
            date: holiday.date,
        }
    }
}
