// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side queries and the column codecs shared with the mutation layer.

use crate::error::PersistenceError;
use escala_core::{ReportFilter, TeamFilter};
use escala_domain::{
    AfterActionReport, ConflictAlert, Convoy, Designation, DomainError, DutySlot, Holiday,
    Matricula, Officer, OutcomeCounters, Team, WeekId,
};
use rusqlite::{Connection, OptionalExtension, params, params_from_iter};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// Encodes a date as `YYYY-MM-DD` for storage.
pub fn encode_date(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|err| PersistenceError::SerializationError(err.to_string()))
}

pub fn decode_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &DATE_FORMAT)
        .map_err(|err| PersistenceError::SerializationError(format!("bad date '{value}': {err}")))
}

pub fn encode_datetime(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .format(&Rfc3339)
        .map_err(|err| PersistenceError::SerializationError(err.to_string()))
}

pub fn decode_datetime(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|err| {
        PersistenceError::SerializationError(format!("bad datetime '{value}': {err}"))
    })
}

/// Decodes a stored enum or identifier column via its `FromStr`.
pub fn decode<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse()
        .map_err(|err: DomainError| PersistenceError::SerializationError(err.to_string()))
}

fn decode_matricula(value: &str) -> Result<Matricula, PersistenceError> {
    Matricula::parse(value)
        .map_err(|err| PersistenceError::SerializationError(err.to_string()))
}

type SlotRow = (i64, String, String, String, String, Option<i64>);

fn slot_from_row(row: SlotRow) -> Result<DutySlot, PersistenceError> {
    let (slot_id, date, shift, week_id, status, team_id) = row;
    Ok(DutySlot::with_id(
        slot_id,
        decode_date(&date)?,
        decode(&shift)?,
        decode(&week_id)?,
        decode(&status)?,
        team_id,
    ))
}

pub fn slot(conn: &Connection, slot_id: i64) -> Result<Option<DutySlot>, PersistenceError> {
    let row: Option<SlotRow> = conn
        .query_row(
            "SELECT slot_id, slot_date, shift, week_id, status, team_id
             FROM slots WHERE slot_id = ?1",
            params![slot_id],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                ))
            },
        )
        .optional()?;
    row.map(slot_from_row).transpose()
}

pub fn slots_for_week(
    conn: &Connection,
    week_id: &WeekId,
) -> Result<Vec<DutySlot>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT slot_id, slot_date, shift, week_id, status, team_id
         FROM slots WHERE week_id = ?1 ORDER BY slot_date, shift, slot_id",
    )?;
    let rows: Vec<SlotRow> = stmt
        .query_map(params![week_id.to_string()], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<Result<_, _>>()?;
    rows.into_iter().map(slot_from_row).collect()
}

fn members_of(conn: &Connection, team_id: i64) -> Result<Vec<Officer>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT matricula, name, department, unit, phone
         FROM team_members WHERE team_id = ?1 ORDER BY position",
    )?;
    let rows: Vec<(String, String, String, String, Option<String>)> = stmt
        .query_map(params![team_id], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ))
        })?
        .collect::<Result<_, _>>()?;
    rows.into_iter()
        .map(|(matricula, name, department, unit, phone)| {
            Ok(Officer::new(
                decode_matricula(&matricula)?,
                name,
                department,
                unit,
                phone,
            ))
        })
        .collect()
}

type TeamRow = (i64, i64, String, String, String, String, String, String, String);

fn team_from_row(conn: &Connection, row: TeamRow) -> Result<Team, PersistenceError> {
    let (team_id, slot_id, slot_date, shift, week_id, cycle_id, vehicle, leader_phone, status) =
        row;
    Ok(Team::with_id(
        team_id,
        slot_id,
        decode_date(&slot_date)?,
        decode(&shift)?,
        decode(&week_id)?,
        decode(&cycle_id)?,
        members_of(conn, team_id)?,
        decode(&vehicle)?,
        leader_phone,
        decode(&status)?,
    ))
}

pub fn team(conn: &Connection, team_id: i64) -> Result<Option<Team>, PersistenceError> {
    let row: Option<TeamRow> = conn
        .query_row(
            "SELECT team_id, slot_id, slot_date, shift, week_id, cycle_id, vehicle,
                    leader_phone, status
             FROM teams WHERE team_id = ?1",
            params![team_id],
            |row| {
                Ok((
                    row.get(0)?,
                    row.get(1)?,
                    row.get(2)?,
                    row.get(3)?,
                    row.get(4)?,
                    row.get(5)?,
                    row.get(6)?,
                    row.get(7)?,
                    row.get(8)?,
                ))
            },
        )
        .optional()?;
    row.map(|row| team_from_row(conn, row)).transpose()
}

pub fn teams_matching(
    conn: &Connection,
    filter: &TeamFilter,
) -> Result<Vec<Team>, PersistenceError> {
    let mut sql: String = String::from(
        "SELECT t.team_id, t.slot_id, t.slot_date, t.shift, t.week_id, t.cycle_id,
                t.vehicle, t.leader_phone, t.status
         FROM teams t WHERE 1=1",
    );
    let mut bindings: Vec<String> = Vec::new();

    if let Some(week_id) = &filter.week_id {
        sql.push_str(" AND t.week_id = ?");
        bindings.push(week_id.to_string());
    }
    if let Some(cycle_id) = &filter.cycle_id {
        sql.push_str(" AND t.cycle_id = ?");
        bindings.push(cycle_id.to_string());
    }
    if let Some(shift) = &filter.shift {
        sql.push_str(" AND t.shift = ?");
        bindings.push(shift.to_string());
    }
    if let Some(member) = &filter.member {
        sql.push_str(
            " AND EXISTS (SELECT 1 FROM team_members m
                          WHERE m.team_id = t.team_id AND m.matricula = ?)",
        );
        bindings.push(member.value().to_string());
    }
    if !filter.include_cancelled {
        sql.push_str(" AND t.status <> 'cancelled'");
    }
    sql.push_str(" ORDER BY t.team_id");

    let mut stmt = conn.prepare(&sql)?;
    let rows: Vec<TeamRow> = stmt
        .query_map(params_from_iter(bindings.iter()), |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
                row.get(7)?,
                row.get(8)?,
            ))
        })?
        .collect::<Result<_, _>>()?;
    rows.into_iter()
        .map(|row| team_from_row(conn, row))
        .collect()
}

type ConvoyRow = (i64, String, String, u8, String, String, String, String, String, String);

fn convoy_team_ids(conn: &Connection, convoy_id: i64) -> Result<[i64; 2], PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT team_id FROM convoy_teams WHERE convoy_id = ?1 ORDER BY rowid",
    )?;
    let ids: Vec<i64> = stmt
        .query_map(params![convoy_id], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    ids.try_into().map_err(|_| {
        PersistenceError::SerializationError(format!(
            "convoy {convoy_id} does not reference exactly two teams"
        ))
    })
}

fn designation(value: &str) -> Result<Designation, PersistenceError> {
    serde_json::from_str(value).map_err(Into::into)
}

fn convoy_from_row(conn: &Connection, row: ConvoyRow) -> Result<Convoy, PersistenceError> {
    let (
        convoy_id,
        week_id,
        convoy_date,
        area_code,
        neighborhood,
        mission,
        dpc,
        oip,
        briefing_location,
        status,
    ) = row;
    let mut convoy: Convoy = Convoy::new(
        decode(&week_id)?,
        decode_date(&convoy_date)?,
        convoy_team_ids(conn, convoy_id)?,
        area_code,
        neighborhood,
        mission,
        designation(&dpc)?,
        designation(&oip)?,
        designation(&briefing_location)?,
    );
    convoy.convoy_id = Some(convoy_id);
    convoy.status = decode(&status)?;
    Ok(convoy)
}

const CONVOY_COLUMNS: &str = "convoy_id, week_id, convoy_date, area_code, neighborhood,
                              mission, dpc, oip, briefing_location, status";

fn convoy_row_mapper(row: &rusqlite::Row<'_>) -> rusqlite::Result<ConvoyRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
        row.get(9)?,
    ))
}

pub fn convoy(conn: &Connection, convoy_id: i64) -> Result<Option<Convoy>, PersistenceError> {
    let row: Option<ConvoyRow> = conn
        .query_row(
            &format!("SELECT {CONVOY_COLUMNS} FROM convoys WHERE convoy_id = ?1"),
            params![convoy_id],
            convoy_row_mapper,
        )
        .optional()?;
    row.map(|row| convoy_from_row(conn, row)).transpose()
}

pub fn convoy_for_team(
    conn: &Connection,
    team_id: i64,
) -> Result<Option<Convoy>, PersistenceError> {
    let row: Option<ConvoyRow> = conn
        .query_row(
            &format!(
                "SELECT {CONVOY_COLUMNS} FROM convoys
                 WHERE convoy_id = (SELECT convoy_id FROM convoy_teams WHERE team_id = ?1)"
            ),
            params![team_id],
            convoy_row_mapper,
        )
        .optional()?;
    row.map(|row| convoy_from_row(conn, row)).transpose()
}

type ReportRow = (i64, i64, String, String, String, String, String);

fn report_from_row(row: ReportRow) -> Result<AfterActionReport, PersistenceError> {
    let (report_id, convoy_id, cycle_id, counters, summary, submitted_by, submitted_at) = row;
    let counters: OutcomeCounters = serde_json::from_str(&counters)?;
    let mut report: AfterActionReport = AfterActionReport::new(
        convoy_id,
        decode(&cycle_id)?,
        counters,
        summary,
        decode_matricula(&submitted_by)?,
        decode_datetime(&submitted_at)?,
    );
    report.report_id = Some(report_id);
    Ok(report)
}

pub fn reports_matching(
    conn: &Connection,
    filter: &ReportFilter,
) -> Result<Vec<AfterActionReport>, PersistenceError> {
    let mut sql: String = String::from(
        "SELECT report_id, convoy_id, cycle_id, counters, summary, submitted_by, submitted_at
         FROM reports WHERE 1=1",
    );
    let mut bindings: Vec<String> = Vec::new();
    if let Some(cycle_id) = &filter.cycle_id {
        sql.push_str(" AND cycle_id = ?");
        bindings.push(cycle_id.to_string());
    }
    if let Some(convoy_id) = filter.convoy_id {
        sql.push_str(" AND convoy_id = ?");
        bindings.push(convoy_id.to_string());
    }
    sql.push_str(" ORDER BY report_id");

    let mut stmt = conn.prepare(&sql)?;
    let rows: Vec<ReportRow> = stmt
        .query_map(params_from_iter(bindings.iter()), |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
                row.get(6)?,
            ))
        })?
        .collect::<Result<_, _>>()?;
    rows.into_iter().map(report_from_row).collect()
}

pub fn alerts(conn: &Connection) -> Result<Vec<ConflictAlert>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT alert_id, kind, message, offending_matricula, week_id, status
         FROM alerts ORDER BY alert_id",
    )?;
    let rows: Vec<(i64, String, String, String, String, String)> = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
                row.get(5)?,
            ))
        })?
        .collect::<Result<_, _>>()?;
    rows.into_iter()
        .map(|(alert_id, kind, message, offending, week_id, status)| {
            let mut alert: ConflictAlert = ConflictAlert::new(
                decode(&kind)?,
                message,
                decode_matricula(&offending)?,
                decode(&week_id)?,
            );
            alert.alert_id = Some(alert_id);
            alert.status = decode(&status)?;
            Ok(alert)
        })
        .collect()
}

pub fn holidays(conn: &Connection) -> Result<Vec<Holiday>, PersistenceError> {
    let mut stmt = conn.prepare(
        "SELECT holiday_id, name, holiday_date FROM holidays ORDER BY holiday_date, holiday_id",
    )?;
    let rows: Vec<(i64, String, String)> = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<_, _>>()?;
    rows.into_iter()
        .map(|(holiday_id, name, date)| {
            let mut holiday: Holiday = Holiday::new(name, decode_date(&date)?);
            holiday.holiday_id = Some(holiday_id);
            Ok(holiday)
        })
        .collect()
}
