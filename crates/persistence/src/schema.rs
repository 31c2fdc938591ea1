// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Embedded SQLite schema.
//!
//! Slots are never deleted; teams, convoys and reports are append-only
//! apart from status updates. The `convoy_teams.team_id` uniqueness
//! constraint is the database-level backstop for "a team belongs to at
//! most one convoy"; the transactional re-check in the mutation layer is
//! what turns a lost race into a typed outcome instead of an error.

/// The full schema, applied on every open (idempotent).
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS slots (
    slot_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    slot_date  TEXT    NOT NULL,
    shift      TEXT    NOT NULL,
    week_id    TEXT    NOT NULL,
    status     TEXT    NOT NULL DEFAULT 'available',
    team_id    INTEGER REFERENCES teams (team_id)
);

CREATE INDEX IF NOT EXISTS idx_slots_week ON slots (week_id);

CREATE TABLE IF NOT EXISTS teams (
    team_id      INTEGER PRIMARY KEY AUTOINCREMENT,
    slot_id      INTEGER NOT NULL REFERENCES slots (slot_id),
    slot_date    TEXT    NOT NULL,
    shift        TEXT    NOT NULL,
    week_id      TEXT    NOT NULL,
    cycle_id     TEXT    NOT NULL,
    vehicle      TEXT    NOT NULL,
    leader_phone TEXT    NOT NULL,
    status       TEXT    NOT NULL DEFAULT 'registered'
);

CREATE INDEX IF NOT EXISTS idx_teams_week ON teams (week_id);
CREATE INDEX IF NOT EXISTS idx_teams_cycle ON teams (cycle_id);

CREATE TABLE IF NOT EXISTS team_members (
    team_id    INTEGER NOT NULL REFERENCES teams (team_id),
    position   INTEGER NOT NULL,
    matricula  TEXT    NOT NULL,
    name       TEXT    NOT NULL,
    department TEXT    NOT NULL,
    unit       TEXT    NOT NULL,
    phone      TEXT,
    PRIMARY KEY (team_id, position)
);

CREATE INDEX IF NOT EXISTS idx_members_matricula ON team_members (matricula);

CREATE TABLE IF NOT EXISTS convoys (
    convoy_id         INTEGER PRIMARY KEY AUTOINCREMENT,
    week_id           TEXT    NOT NULL,
    convoy_date       TEXT    NOT NULL,
    area_code         INTEGER NOT NULL,
    neighborhood      TEXT    NOT NULL,
    mission           TEXT    NOT NULL,
    dpc               TEXT    NOT NULL,
    oip               TEXT    NOT NULL,
    briefing_location TEXT    NOT NULL,
    status            TEXT    NOT NULL DEFAULT 'formed'
);

CREATE TABLE IF NOT EXISTS convoy_teams (
    convoy_id INTEGER NOT NULL REFERENCES convoys (convoy_id),
    team_id   INTEGER NOT NULL UNIQUE REFERENCES teams (team_id),
    PRIMARY KEY (convoy_id, team_id)
);

CREATE TABLE IF NOT EXISTS reports (
    report_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    convoy_id    INTEGER NOT NULL UNIQUE REFERENCES convoys (convoy_id),
    cycle_id     TEXT    NOT NULL,
    counters     TEXT    NOT NULL,
    summary      TEXT    NOT NULL,
    submitted_by TEXT    NOT NULL,
    submitted_at TEXT    NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reports_cycle ON reports (cycle_id);

CREATE TABLE IF NOT EXISTS alerts (
    alert_id            INTEGER PRIMARY KEY AUTOINCREMENT,
    kind                TEXT NOT NULL,
    message             TEXT NOT NULL,
    offending_matricula TEXT NOT NULL,
    week_id             TEXT NOT NULL,
    status              TEXT NOT NULL DEFAULT 'new'
);

CREATE TABLE IF NOT EXISTS holidays (
    holiday_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    holiday_date TEXT NOT NULL
);
";
