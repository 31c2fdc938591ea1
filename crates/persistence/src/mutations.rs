// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side operations.
//!
//! Every multi-row write runs inside a transaction. The conditional writes
//! (`claim_slot`, `create_convoy`, `create_report`) re-evaluate their
//! precondition inside the transaction, so a booking race resolves to a
//! typed outcome with nothing written by the loser.

use crate::error::PersistenceError;
use crate::queries::{encode_date, encode_datetime};
use escala_core::{ClaimOutcome, ConvoyOutcome, ReportOutcome};
use escala_domain::{
    AfterActionReport, AlertStatus, ConflictAlert, Convoy, Designation, DutySlot, Holiday,
    SlotStatus, Team,
};
use rusqlite::{Connection, OptionalExtension, Transaction, params};
use tracing::debug;

pub fn create_slots(
    conn: &mut Connection,
    slots: &[DutySlot],
) -> Result<Vec<DutySlot>, PersistenceError> {
    let tx: Transaction<'_> = conn.transaction()?;
    let mut created: Vec<DutySlot> = Vec::with_capacity(slots.len());
    {
        let mut stmt = tx.prepare(
            "INSERT INTO slots (slot_date, shift, week_id, status) VALUES (?1, ?2, ?3, ?4)",
        )?;
        for slot in slots {
            stmt.execute(params![
                encode_date(slot.date)?,
                slot.shift.as_str(),
                slot.week_id.to_string(),
                slot.status.as_str(),
            ])?;
            let mut slot: DutySlot = slot.clone();
            slot.slot_id = Some(tx.last_insert_rowid());
            created.push(slot);
        }
    }
    tx.commit()?;
    debug!(count = created.len(), "created slots");
    Ok(created)
}

pub fn claim_slot(
    conn: &mut Connection,
    slot_id: i64,
    expected: SlotStatus,
    team: &Team,
) -> Result<ClaimOutcome, PersistenceError> {
    let tx: Transaction<'_> = conn.transaction()?;

    // Compare-and-set on the slot status; the UPDATE both re-reads and
    // claims in one step.
    let claimed: usize = tx.execute(
        "UPDATE slots SET status = ?1 WHERE slot_id = ?2 AND status = ?3",
        params![
            SlotStatus::Occupied.as_str(),
            slot_id,
            expected.as_str()
        ],
    )?;
    if claimed == 0 {
        let current: Option<String> = tx
            .query_row(
                "SELECT status FROM slots WHERE slot_id = ?1",
                params![slot_id],
                |row| row.get(0),
            )
            .optional()?;
        return match current {
            Some(status) => Ok(ClaimOutcome::Lost {
                current: crate::queries::decode(&status)?,
            }),
            None => Err(PersistenceError::NotFound {
                entity: "slot",
                id: slot_id,
            }),
        };
    }

    tx.execute(
        "INSERT INTO teams (slot_id, slot_date, shift, week_id, cycle_id, vehicle,
                            leader_phone, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            team.slot_id,
            encode_date(team.slot_date)?,
            team.shift.as_str(),
            team.week_id.to_string(),
            team.cycle_id.to_string(),
            team.vehicle.value(),
            team.leader_phone,
            team.status.as_str(),
        ],
    )?;
    let team_id: i64 = tx.last_insert_rowid();
    {
        let mut stmt = tx.prepare(
            "INSERT INTO team_members (team_id, position, matricula, name, department, unit,
                                       phone)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        )?;
        for (position, member) in team.members.iter().enumerate() {
            let position: i64 = i64::try_from(position)
                .map_err(|err| PersistenceError::SerializationError(err.to_string()))?;
            stmt.execute(params![
                team_id,
                position,
                member.matricula.value(),
                member.name,
                member.department,
                member.unit,
                member.phone,
            ])?;
        }
    }
    tx.execute(
        "UPDATE slots SET team_id = ?1 WHERE slot_id = ?2",
        params![team_id, slot_id],
    )?;
    tx.commit()?;
    debug!(slot_id, team_id, "booking committed");

    let mut committed: Team = team.clone();
    committed.team_id = Some(team_id);
    Ok(ClaimOutcome::Claimed(committed))
}

pub fn void_booking(conn: &mut Connection, team_id: i64) -> Result<(), PersistenceError> {
    let tx: Transaction<'_> = conn.transaction()?;
    let slot_id: Option<i64> = tx
        .query_row(
            "SELECT slot_id FROM teams WHERE team_id = ?1",
            params![team_id],
            |row| row.get(0),
        )
        .optional()?;
    let Some(slot_id) = slot_id else {
        return Err(PersistenceError::NotFound {
            entity: "team",
            id: team_id,
        });
    };
    tx.execute(
        "UPDATE teams SET status = 'cancelled' WHERE team_id = ?1",
        params![team_id],
    )?;
    tx.execute(
        "UPDATE slots SET status = 'available', team_id = NULL WHERE slot_id = ?1",
        params![slot_id],
    )?;
    tx.commit()?;
    debug!(team_id, slot_id, "booking voided");
    Ok(())
}

fn encode_designation(designation: &Designation) -> Result<String, PersistenceError> {
    serde_json::to_string(designation).map_err(Into::into)
}

pub fn create_convoy(
    conn: &mut Connection,
    convoy: &Convoy,
) -> Result<ConvoyOutcome, PersistenceError> {
    let tx: Transaction<'_> = conn.transaction()?;

    // Re-check unassignment inside the transaction: a team referenced by
    // any convoy is taken.
    for team_id in convoy.team_ids {
        let taken: Option<i64> = tx
            .query_row(
                "SELECT convoy_id FROM convoy_teams WHERE team_id = ?1",
                params![team_id],
                |row| row.get(0),
            )
            .optional()?;
        if taken.is_some() {
            return Ok(ConvoyOutcome::TeamTaken { team_id });
        }
    }

    tx.execute(
        "INSERT INTO convoys (week_id, convoy_date, area_code, neighborhood, mission, dpc,
                              oip, briefing_location, status)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            convoy.week_id.to_string(),
            encode_date(convoy.date)?,
            convoy.area_code,
            convoy.neighborhood,
            convoy.mission,
            encode_designation(&convoy.dpc)?,
            encode_designation(&convoy.oip)?,
            encode_designation(&convoy.briefing_location)?,
            convoy.status.as_str(),
        ],
    )?;
    let convoy_id: i64 = tx.last_insert_rowid();
    for team_id in convoy.team_ids {
        tx.execute(
            "INSERT INTO convoy_teams (convoy_id, team_id) VALUES (?1, ?2)",
            params![convoy_id, team_id],
        )?;
    }
    tx.commit()?;
    debug!(convoy_id, ?convoy.team_ids, "convoy formed");

    let mut committed: Convoy = convoy.clone();
    committed.convoy_id = Some(convoy_id);
    Ok(ConvoyOutcome::Formed(committed))
}

pub fn create_report(
    conn: &mut Connection,
    report: &AfterActionReport,
) -> Result<ReportOutcome, PersistenceError> {
    let tx: Transaction<'_> = conn.transaction()?;

    let existing: Option<i64> = tx
        .query_row(
            "SELECT report_id FROM reports WHERE convoy_id = ?1",
            params![report.convoy_id],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Ok(ReportOutcome::AlreadySubmitted);
    }

    tx.execute(
        "INSERT INTO reports (convoy_id, cycle_id, counters, summary, submitted_by,
                              submitted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            report.convoy_id,
            report.cycle_id.to_string(),
            serde_json::to_string(&report.counters)?,
            report.summary,
            report.submitted_by.value(),
            encode_datetime(report.submitted_at)?,
        ],
    )?;
    let report_id: i64 = tx.last_insert_rowid();
    tx.commit()?;
    debug!(report_id, convoy_id = report.convoy_id, "report submitted");

    let mut committed: AfterActionReport = report.clone();
    committed.report_id = Some(report_id);
    Ok(ReportOutcome::Submitted(committed))
}

pub fn create_alert(
    conn: &mut Connection,
    alert: &ConflictAlert,
) -> Result<ConflictAlert, PersistenceError> {
    conn.execute(
        "INSERT INTO alerts (kind, message, offending_matricula, week_id, status)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            alert.kind.as_str(),
            alert.message,
            alert.offending_matricula.value(),
            alert.week_id.to_string(),
            alert.status.as_str(),
        ],
    )?;
    let alert_id: i64 = conn.last_insert_rowid();
    debug!(alert_id, kind = alert.kind.as_str(), "alert recorded");

    let mut committed: ConflictAlert = alert.clone();
    committed.alert_id = Some(alert_id);
    Ok(committed)
}

pub fn update_alert_status(
    conn: &mut Connection,
    alert_id: i64,
    status: AlertStatus,
) -> Result<(), PersistenceError> {
    let updated: usize = conn.execute(
        "UPDATE alerts SET status = ?1 WHERE alert_id = ?2",
        params![status.as_str(), alert_id],
    )?;
    if updated == 0 {
        return Err(PersistenceError::NotFound {
            entity: "alert",
            id: alert_id,
        });
    }
    Ok(())
}

pub fn add_holiday(
    conn: &mut Connection,
    holiday: &Holiday,
) -> Result<Holiday, PersistenceError> {
    conn.execute(
        "INSERT INTO holidays (name, holiday_date) VALUES (?1, ?2)",
        params![holiday.name, encode_date(holiday.date)?],
    )?;
    let mut committed: Holiday = holiday.clone();
    committed.holiday_id = Some(conn.last_insert_rowid());
    Ok(committed)
}

pub fn remove_holiday(conn: &mut Connection, holiday_id: i64) -> Result<(), PersistenceError> {
    let removed: usize = conn.execute(
        "DELETE FROM holidays WHERE holiday_id = ?1",
        params![holiday_id],
    )?;
    if removed == 0 {
        return Err(PersistenceError::NotFound {
            entity: "holiday",
            id: holiday_id,
        });
    }
    Ok(())
}
