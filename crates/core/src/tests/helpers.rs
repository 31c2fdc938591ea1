// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! In-memory repository and fixtures shared by the engine tests.

use crate::{
    ClaimOutcome, ConvoyOutcome, CoreError, Notifier, ReportFilter, ReportOutcome, Repository,
    RepositoryError, SlotLedger, TeamFilter, TeamProposal,
};
use escala_domain::{
    AfterActionReport, AlertStatus, ConflictAlert, Convoy, Designation, DutySlot, Holiday,
    Matricula, Officer, ShiftKind, SlotStatus, Team, TeamStatus, VehiclePlate, WeekId, WeekInfo,
    week_of,
};
use std::collections::HashSet;
use std::sync::Mutex;
use time::Date;
use time::macros::date;

/// Monday of the reference week used throughout the tests.
pub const WEEK_MONDAY: Date = date!(2025 - 03 - 10);

#[derive(Default)]
struct Inner {
    slots: Vec<DutySlot>,
    teams: Vec<Team>,
    convoys: Vec<Convoy>,
    reports: Vec<AfterActionReport>,
    alerts: Vec<ConflictAlert>,
    holidays: Vec<Holiday>,
    next_id: i64,
}

impl Inner {
    fn alloc(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// A `Repository` backed by plain vectors behind a mutex.
#[derive(Default)]
pub struct MemoryRepository {
    inner: Mutex<Inner>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn team_matches(team: &Team, filter: &TeamFilter) -> bool {
    if !filter.include_cancelled && team.status == TeamStatus::Cancelled {
        return false;
    }
    if filter.week_id.is_some_and(|week| week != team.week_id) {
        return false;
    }
    if filter.cycle_id.is_some_and(|cycle| cycle != team.cycle_id) {
        return false;
    }
    if filter.shift.is_some_and(|shift| shift != team.shift) {
        return false;
    }
    if let Some(member) = &filter.member {
        if !team.members.iter().any(|m| &m.matricula == member) {
            return false;
        }
    }
    true
}

impl Repository for MemoryRepository {
    fn create_slots(&self, slots: &[DutySlot]) -> Result<Vec<DutySlot>, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let mut created: Vec<DutySlot> = Vec::with_capacity(slots.len());
        for slot in slots {
            let mut slot: DutySlot = slot.clone();
            slot.slot_id = Some(inner.alloc());
            inner.slots.push(slot.clone());
            created.push(slot);
        }
        Ok(created)
    }

    fn slot(&self, slot_id: i64) -> Result<Option<DutySlot>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .slots
            .iter()
            .find(|s| s.slot_id == Some(slot_id))
            .cloned())
    }

    fn slots_for_week(&self, week_id: &WeekId) -> Result<Vec<DutySlot>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .slots
            .iter()
            .filter(|s| &s.week_id == week_id)
            .cloned()
            .collect())
    }

    fn claim_slot(
        &self,
        slot_id: i64,
        expected: SlotStatus,
        team: &Team,
    ) -> Result<ClaimOutcome, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let team_id: i64 = inner.alloc();
        let slot = inner
            .slots
            .iter_mut()
            .find(|s| s.slot_id == Some(slot_id))
            .ok_or(RepositoryError::NotFound {
                entity: "slot",
                id: slot_id,
            })?;
        if slot.status != expected {
            return Ok(ClaimOutcome::Lost {
                current: slot.status,
            });
        }
        slot.status = SlotStatus::Occupied;
        slot.team_id = Some(team_id);
        let mut committed: Team = team.clone();
        committed.team_id = Some(team_id);
        inner.teams.push(committed.clone());
        Ok(ClaimOutcome::Claimed(committed))
    }

    fn void_booking(&self, team_id: i64) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let slot_id: i64 = {
            let team = inner
                .teams
                .iter_mut()
                .find(|t| t.team_id == Some(team_id))
                .ok_or(RepositoryError::NotFound {
                    entity: "team",
                    id: team_id,
                })?;
            team.status = TeamStatus::Cancelled;
            team.slot_id
        };
        if let Some(slot) = inner.slots.iter_mut().find(|s| s.slot_id == Some(slot_id)) {
            slot.status = SlotStatus::Available;
            slot.team_id = None;
        }
        Ok(())
    }

    fn team(&self, team_id: i64) -> Result<Option<Team>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .teams
            .iter()
            .find(|t| t.team_id == Some(team_id))
            .cloned())
    }

    fn teams_matching(&self, filter: &TeamFilter) -> Result<Vec<Team>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .teams
            .iter()
            .filter(|t| team_matches(t, filter))
            .cloned()
            .collect())
    }

    fn create_convoy(&self, convoy: &Convoy) -> Result<ConvoyOutcome, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        for team_id in convoy.team_ids {
            if inner
                .convoys
                .iter()
                .any(|c| c.team_ids.contains(&team_id))
            {
                return Ok(ConvoyOutcome::TeamTaken { team_id });
            }
        }
        let mut committed: Convoy = convoy.clone();
        committed.convoy_id = Some(inner.alloc());
        inner.convoys.push(committed.clone());
        Ok(ConvoyOutcome::Formed(committed))
    }

    fn convoy(&self, convoy_id: i64) -> Result<Option<Convoy>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .convoys
            .iter()
            .find(|c| c.convoy_id == Some(convoy_id))
            .cloned())
    }

    fn convoy_for_team(&self, team_id: i64) -> Result<Option<Convoy>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .convoys
            .iter()
            .find(|c| c.team_ids.contains(&team_id))
            .cloned())
    }

    fn create_report(&self, report: &AfterActionReport) -> Result<ReportOutcome, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        if inner.reports.iter().any(|r| r.convoy_id == report.convoy_id) {
            return Ok(ReportOutcome::AlreadySubmitted);
        }
        let mut committed: AfterActionReport = report.clone();
        committed.report_id = Some(inner.alloc());
        inner.reports.push(committed.clone());
        Ok(ReportOutcome::Submitted(committed))
    }

    fn reports_matching(
        &self,
        filter: &ReportFilter,
    ) -> Result<Vec<AfterActionReport>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .reports
            .iter()
            .filter(|r| {
                filter.cycle_id.is_none_or(|cycle| cycle == r.cycle_id)
                    && filter.convoy_id.is_none_or(|id| id == r.convoy_id)
            })
            .cloned()
            .collect())
    }

    fn create_alert(&self, alert: &ConflictAlert) -> Result<ConflictAlert, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let mut committed: ConflictAlert = alert.clone();
        committed.alert_id = Some(inner.alloc());
        inner.alerts.push(committed.clone());
        Ok(committed)
    }

    fn alerts(&self) -> Result<Vec<ConflictAlert>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.alerts.clone())
    }

    fn update_alert_status(
        &self,
        alert_id: i64,
        status: AlertStatus,
    ) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let alert = inner
            .alerts
            .iter_mut()
            .find(|a| a.alert_id == Some(alert_id))
            .ok_or(RepositoryError::NotFound {
                entity: "alert",
                id: alert_id,
            })?;
        alert.status = status;
        Ok(())
    }

    fn add_holiday(&self, holiday: &Holiday) -> Result<Holiday, RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let mut committed: Holiday = holiday.clone();
        committed.holiday_id = Some(inner.alloc());
        inner.holidays.push(committed.clone());
        Ok(committed)
    }

    fn remove_holiday(&self, holiday_id: i64) -> Result<(), RepositoryError> {
        let mut inner = self.inner.lock().unwrap();
        let before: usize = inner.holidays.len();
        inner.holidays.retain(|h| h.holiday_id != Some(holiday_id));
        if inner.holidays.len() == before {
            return Err(RepositoryError::NotFound {
                entity: "holiday",
                id: holiday_id,
            });
        }
        Ok(())
    }

    fn holidays(&self) -> Result<Vec<Holiday>, RepositoryError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.holidays.clone())
    }
}

/// A notifier that records every event it observes.
#[derive(Default)]
pub struct CollectingNotifier {
    pub committed: Mutex<Vec<i64>>,
    pub rejected: Mutex<Vec<i64>>,
    pub alerts: Mutex<Vec<ConflictAlert>>,
}

impl Notifier for CollectingNotifier {
    fn booking_committed(&self, team: &Team) {
        self.committed.lock().unwrap().push(team.slot_id);
    }

    fn booking_rejected(&self, slot_id: i64, _error: &CoreError) {
        self.rejected.lock().unwrap().push(slot_id);
    }

    fn alert_raised(&self, alert: &ConflictAlert) {
        self.alerts.lock().unwrap().push(alert.clone());
    }
}

pub fn officer(matricula: &str, name: &str) -> Officer {
    Officer::new(
        Matricula::parse(matricula).unwrap(),
        String::from(name),
        String::from("DPC"),
        String::from("3o DP"),
        None,
    )
}

pub fn proposal(matriculas: [&str; 3]) -> TeamProposal {
    let members: Vec<Officer> = matriculas
        .iter()
        .enumerate()
        .map(|(position, matricula)| officer(matricula, &format!("OFFICER {position}")))
        .collect();
    TeamProposal {
        members,
        vehicle: VehiclePlate::parse("ABC1234").unwrap(),
        leader_phone: String::from("(85) 98888.8888"),
    }
}

/// The reference week (2025-W11) with its slots generated.
pub fn seeded_week(repo: &MemoryRepository) -> (WeekInfo, Vec<DutySlot>) {
    let week: WeekInfo = week_of(WEEK_MONDAY).unwrap();
    let slots: Vec<DutySlot> = SlotLedger::new(repo)
        .generate_week(&week, &HashSet::new())
        .unwrap();
    (week, slots)
}

/// Picks a slot of the given date and shift out of a generated batch.
pub fn slot_of(slots: &[DutySlot], date: Date, shift: ShiftKind) -> DutySlot {
    slots
        .iter()
        .find(|s| s.date == date && s.shift == shift)
        .cloned()
        .unwrap()
}

/// Picks the `n`-th slot of the given date and shift.
pub fn nth_slot_of(slots: &[DutySlot], date: Date, shift: ShiftKind, n: usize) -> DutySlot {
    slots
        .iter()
        .filter(|s| s.date == date && s.shift == shift)
        .nth(n)
        .cloned()
        .unwrap()
}

/// The standard operational data used by convoy tests.
pub fn operational_data() -> crate::OperationalData {
    crate::OperationalData {
        area_code: 7,
        neighborhood: String::from("CENTRO"),
        mission: String::from("PATRULHAMENTO OSTENSIVO"),
        dpc: Designation::Named(String::from("KLEVER FARIAS")),
        oip: Designation::Named(String::from("JARBAS")),
        briefing_location: Designation::Named(String::from("POLICIA CIVIL - CISP")),
    }
}
