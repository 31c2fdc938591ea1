// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the Escala duty roster.
//!
//! Operations here are plain functions over any `Repository`
//! implementation: they normalize raw caller input into domain types,
//! gate on the actor's role, delegate to the scheduling engine and
//! translate every inner error into the [`ApiError`] contract. Transport
//! (HTTP or otherwise) and authentication live outside this crate.

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

mod auth;
mod error;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{Actor, Role, require_admin};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_repository_error,
};
pub use request_response::{
    AlertView, BookSlotRequest, ConvoyView, CycleStatisticsResponse, DaySchedule,
    DesignationInput, FormConvoyRequest, GenerateWeekResponse, HolidayRequest, HolidayView,
    MemberEntry, MemberView, OTHER_CHOICE, OfficerHoursResponse, OfficerHoursView, ReportView,
    ServiceHistoryEntry, ServiceView, SlotView, SubmitReportRequest, TeamView,
    WeekScheduleResponse,
};

use escala_core::{
    ConvoyFormer, CycleStatistics, HoursAggregator, Notifier, OfficerHours, OperationalData,
    Repository, SlotLedger, TeamFilter, TeamProposal,
};
use escala_domain::{
    AlertStatus, Convoy, CycleId, Designation, DutySlot, Holiday, Matricula, Officer, Team,
    VehiclePlate, WeekInfo, normalize_name, normalize_phone, week_of,
};
use std::collections::{BTreeMap, HashSet};
use time::{Date, OffsetDateTime};
use tracing::info;

/// Generates the duty slots of the week containing `reference_date`.
///
/// Holidays registered through the repository reinforce their day's
/// quotas.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors, `RuleViolation`
/// when the week was already generated, or `Internal` on storage
/// failures.
pub fn generate_week<R: Repository>(
    repo: &R,
    actor: &Actor,
    reference_date: Date,
) -> Result<GenerateWeekResponse, ApiError> {
    require_admin(actor, "generate_week")?;
    let week: WeekInfo = week_of(reference_date).map_err(translate_domain_error)?;
    let holidays: HashSet<Date> = repo
        .holidays()
        .map_err(|err| translate_repository_error(&err))?
        .into_iter()
        .map(|holiday| holiday.date)
        .collect();

    let slots: Vec<DutySlot> = SlotLedger::new(repo)
        .generate_week(&week, &holidays)
        .map_err(translate_core_error)?;

    info!(week_id = %week.week_id, count = slots.len(), "week generated");
    Ok(GenerateWeekResponse {
        week_id: week.week_id.to_string(),
        slots_created: slots.len(),
    })
}

/// Returns the schedule of the week containing `reference_date`, slots
/// grouped by day with their booked teams.
///
/// # Errors
///
/// Fails with `Internal` on storage failures.
pub fn week_schedule<R: Repository>(
    repo: &R,
    reference_date: Date,
) -> Result<WeekScheduleResponse, ApiError> {
    let week: WeekInfo = week_of(reference_date).map_err(translate_domain_error)?;
    let slots: Vec<DutySlot> = repo
        .slots_for_week(&week.week_id)
        .map_err(|err| translate_repository_error(&err))?;

    let mut by_day: BTreeMap<Date, Vec<SlotView>> = BTreeMap::new();
    for slot in slots {
        let team: Option<Team> = match slot.team_id {
            Some(team_id) => repo
                .team(team_id)
                .map_err(|err| translate_repository_error(&err))?,
            None => None,
        };
        by_day.entry(slot.date).or_default().push(SlotView {
            slot_id: slot.slot_id.unwrap_or_default(),
            shift: slot.shift.to_string(),
            status: slot.status.to_string(),
            team: team.as_ref().map(TeamView::from),
        });
    }

    let days: Vec<DaySchedule> = by_day
        .into_iter()
        .map(|(date, slots)| DaySchedule {
            date,
            available: slots.iter().filter(|s| s.status == "available").count(),
            slots,
        })
        .collect();

    Ok(WeekScheduleResponse {
        week_id: week.week_id.to_string(),
        days,
    })
}

fn build_proposal(request: &BookSlotRequest) -> Result<TeamProposal, ApiError> {
    let leader: &MemberEntry =
        request
            .members
            .first()
            .ok_or_else(|| ApiError::InvalidInput {
                field: String::from("members"),
                message: String::from("the roster cannot be empty"),
            })?;
    let leader_phone: String = normalize_phone(leader.phone.as_deref().unwrap_or_default())
        .map_err(translate_domain_error)?;

    let mut members: Vec<Officer> = Vec::with_capacity(request.members.len());
    for entry in &request.members {
        let matricula: Matricula =
            Matricula::parse(&entry.matricula).map_err(translate_domain_error)?;
        members.push(Officer::new(
            matricula,
            normalize_name(&entry.name),
            entry.department.trim().to_string(),
            entry.unit.trim().to_string(),
            entry.phone.clone(),
        ));
    }

    let vehicle: VehiclePlate =
        VehiclePlate::parse(&request.vehicle).map_err(translate_domain_error)?;

    Ok(TeamProposal {
        members,
        vehicle,
        leader_phone,
    })
}

/// Books a duty slot for the actor's team.
///
/// The actor must be roster position 0: registering a team on someone
/// else's behalf is not allowed.
///
/// # Errors
///
/// Fails with `InvalidInput` on malformed roster fields,
/// `SlotUnavailable`/`BookingConflict` per the booking protocol, or
/// `Internal` on storage failures.
pub fn book_slot<R: Repository, N: Notifier>(
    repo: &R,
    notifier: &N,
    actor: &Actor,
    request: &BookSlotRequest,
) -> Result<TeamView, ApiError> {
    let proposal: TeamProposal = build_proposal(request)?;
    let leader_matches: bool = proposal
        .members
        .first()
        .is_some_and(|leader| leader.matricula == actor.matricula);
    if !leader_matches {
        return Err(ApiError::InvalidInput {
            field: String::from("members"),
            message: String::from("the registering officer must occupy roster position 1"),
        });
    }

    let team: Team = SlotLedger::new(repo)
        .book_slot(request.slot_id, &proposal, notifier)
        .map_err(translate_core_error)?;

    info!(
        slot_id = request.slot_id,
        team_id = team.team_id.unwrap_or_default(),
        leader = %actor.matricula,
        "slot booked"
    );
    Ok(TeamView::from(&team))
}

/// Administratively voids a booking, releasing its slot.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors or
/// `ResourceNotFound` for unknown teams.
pub fn void_booking<R: Repository>(
    repo: &R,
    actor: &Actor,
    team_id: i64,
) -> Result<(), ApiError> {
    require_admin(actor, "void_booking")?;
    SlotLedger::new(repo)
        .void_booking(team_id)
        .map_err(translate_core_error)?;
    info!(team_id, "booking voided");
    Ok(())
}

fn resolve_designation(input: &DesignationInput) -> Designation {
    if input.choice == OTHER_CHOICE {
        Designation::Other(normalize_name(input.other_text.as_deref().unwrap_or_default()))
    } else {
        Designation::Named(input.choice.clone())
    }
}

/// Forms a convoy from exactly two unassigned teams.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors, `InvalidInput` on
/// an unusable selection or missing operational fields, or `Internal` on
/// storage failures.
pub fn form_convoy<R: Repository>(
    repo: &R,
    actor: &Actor,
    request: &FormConvoyRequest,
) -> Result<ConvoyView, ApiError> {
    require_admin(actor, "form_convoy")?;
    let data: OperationalData = OperationalData {
        area_code: request.area_code,
        neighborhood: normalize_name(&request.neighborhood),
        mission: normalize_name(&request.mission),
        dpc: resolve_designation(&request.dpc),
        oip: resolve_designation(&request.oip),
        briefing_location: resolve_designation(&request.briefing_location),
    };

    let convoy: Convoy = ConvoyFormer::new(repo)
        .form_convoy(&request.team_ids, data)
        .map_err(translate_core_error)?;

    info!(
        convoy_id = convoy.convoy_id.unwrap_or_default(),
        area_code = convoy.area_code,
        "convoy formed"
    );
    Ok(ConvoyView::from(&convoy))
}

/// Submits a convoy's after-action report.
///
/// Only the leader of one of the convoy's teams may submit.
///
/// # Errors
///
/// Fails with `ResourceNotFound` for unknown convoys, `PermissionDenied`
/// for actors who lead neither team, `RuleViolation` when the report
/// already exists, or `Internal` on storage failures.
pub fn submit_report<R: Repository>(
    repo: &R,
    actor: &Actor,
    request: &SubmitReportRequest,
    submitted_at: OffsetDateTime,
) -> Result<ReportView, ApiError> {
    let convoy: Convoy = repo
        .convoy(request.convoy_id)
        .map_err(|err| translate_repository_error(&err))?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("convoy"),
            message: format!("convoy {} does not exist", request.convoy_id),
        })?;

    let mut leads_a_team: bool = false;
    for team_id in convoy.team_ids {
        let team: Option<Team> = repo
            .team(team_id)
            .map_err(|err| translate_repository_error(&err))?;
        if team.is_some_and(|team| team.leader().matricula == actor.matricula) {
            leads_a_team = true;
        }
    }
    if !leads_a_team {
        return Err(ApiError::PermissionDenied {
            action: String::from("submit_report"),
            required_role: String::from("convoy team leader"),
        });
    }

    let report = ConvoyFormer::new(repo)
        .submit_report(
            request.convoy_id,
            request.counters,
            request.summary.clone(),
            actor.matricula.clone(),
            submitted_at,
        )
        .map_err(translate_core_error)?;

    info!(
        convoy_id = request.convoy_id,
        submitted_by = %actor.matricula,
        "report submitted"
    );
    Ok(ReportView::from(&report))
}

/// Computes the per-officer hours dashboard of a cycle.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors or `InvalidInput`
/// for malformed cycle ids.
pub fn officer_hours<R: Repository>(
    repo: &R,
    actor: &Actor,
    cycle: &str,
) -> Result<OfficerHoursResponse, ApiError> {
    require_admin(actor, "officer_hours")?;
    let cycle_id: CycleId = cycle.parse().map_err(translate_domain_error)?;

    let mut ledgers: Vec<OfficerHours> = HoursAggregator::new(repo)
        .officer_hours(cycle_id)
        .map_err(translate_core_error)?;
    // Busiest officers first; ties stay in matricula order.
    ledgers.sort_by(|a, b| b.total_hours.cmp(&a.total_hours));

    Ok(OfficerHoursResponse {
        cycle_id: cycle_id.to_string(),
        officers: ledgers.iter().map(OfficerHoursView::from).collect(),
    })
}

/// Computes the operational statistics dashboard of a cycle.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors or `InvalidInput`
/// for malformed cycle ids.
pub fn cycle_statistics<R: Repository>(
    repo: &R,
    actor: &Actor,
    cycle: &str,
) -> Result<CycleStatisticsResponse, ApiError> {
    require_admin(actor, "cycle_statistics")?;
    let cycle_id: CycleId = cycle.parse().map_err(translate_domain_error)?;

    let stats: CycleStatistics = HoursAggregator::new(repo)
        .cycle_statistics(cycle_id)
        .map_err(translate_core_error)?;
    Ok(CycleStatisticsResponse::from(&stats))
}

/// Lists an officer's past services, most recent first.
///
/// Officers may consult their own history; admins may consult anyone's.
///
/// # Errors
///
/// Fails with `PermissionDenied` when a non-admin asks for another
/// officer's history, or `InvalidInput` for malformed matriculas.
pub fn service_history<R: Repository>(
    repo: &R,
    actor: &Actor,
    matricula: Option<&str>,
) -> Result<Vec<ServiceHistoryEntry>, ApiError> {
    let target: Matricula = match matricula {
        Some(raw) => Matricula::parse(raw).map_err(translate_domain_error)?,
        None => actor.matricula.clone(),
    };
    if target != actor.matricula && !actor.is_admin() {
        return Err(ApiError::PermissionDenied {
            action: String::from("service_history"),
            required_role: String::from("admin"),
        });
    }

    let mut teams: Vec<Team> = repo
        .teams_matching(&TeamFilter {
            member: Some(target),
            ..TeamFilter::default()
        })
        .map_err(|err| translate_repository_error(&err))?;
    teams.sort_by(|a, b| b.slot_date.cmp(&a.slot_date));

    Ok(teams
        .iter()
        .map(|team| ServiceHistoryEntry {
            date: team.slot_date,
            shift: team.shift.to_string(),
            leader_name: team.leader().name.clone(),
            vehicle: team.vehicle.value().to_string(),
            members: TeamView::from(team).members,
        })
        .collect())
}

/// Lists every conflict alert, oldest first.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors.
pub fn list_alerts<R: Repository>(repo: &R, actor: &Actor) -> Result<Vec<AlertView>, ApiError> {
    require_admin(actor, "list_alerts")?;
    let alerts = repo
        .alerts()
        .map_err(|err| translate_repository_error(&err))?;
    Ok(alerts.iter().map(AlertView::from).collect())
}

/// Marks a conflict alert as reviewed.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors or
/// `ResourceNotFound` for unknown alerts.
pub fn mark_alert_reviewed<R: Repository>(
    repo: &R,
    actor: &Actor,
    alert_id: i64,
) -> Result<(), ApiError> {
    require_admin(actor, "mark_alert_reviewed")?;
    repo.update_alert_status(alert_id, AlertStatus::Reviewed)
        .map_err(|err| translate_repository_error(&err))?;
    info!(alert_id, "alert reviewed");
    Ok(())
}

/// Registers a holiday.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors or `InvalidInput`
/// for blank names.
pub fn add_holiday<R: Repository>(
    repo: &R,
    actor: &Actor,
    request: &HolidayRequest,
) -> Result<HolidayView, ApiError> {
    require_admin(actor, "add_holiday")?;
    let name: String = normalize_name(&request.name);
    if name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("holiday name cannot be empty"),
        });
    }

    let holiday: Holiday = repo
        .add_holiday(&Holiday::new(name, request.date))
        .map_err(|err| translate_repository_error(&err))?;
    info!(date = %holiday.date, "holiday added");
    Ok(HolidayView::from(&holiday))
}

/// Removes a holiday.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors or
/// `ResourceNotFound` for unknown holidays.
pub fn remove_holiday<R: Repository>(
    repo: &R,
    actor: &Actor,
    holiday_id: i64,
) -> Result<(), ApiError> {
    require_admin(actor, "remove_holiday")?;
    repo.remove_holiday(holiday_id)
        .map_err(|err| translate_repository_error(&err))?;
    info!(holiday_id, "holiday removed");
    Ok(())
}

/// Lists registered holidays, earliest first.
///
/// # Errors
///
/// Fails with `PermissionDenied` for non-admin actors.
pub fn list_holidays<R: Repository>(
    repo: &R,
    actor: &Actor,
) -> Result<Vec<HolidayView>, ApiError> {
    require_admin(actor, "list_holidays")?;
    let holidays = repo
        .holidays()
        .map_err(|err| translate_repository_error(&err))?;
    Ok(holidays.iter().map(HolidayView::from).collect())
}
