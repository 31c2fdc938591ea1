// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::{CycleId, WeekId};
use crate::error::DomainError;
use crate::validation::validate_roster;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

/// Number of officers in a team roster. The leader occupies position 0.
pub const TEAM_SIZE: usize = 3;

/// An officer's registration number in canonical form.
///
/// The canonical form is exactly 8 uppercase characters drawn from digits
/// and `X`, left-padded with zeros. All comparisons and persistence use the
/// canonical form; [`Matricula::display`] renders the human-facing
/// `NNN.NNN-N-N` grouping.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Matricula {
    value: String,
}

impl Matricula {
    /// Parses and canonicalizes a registration number.
    ///
    /// Separators (`.`, `-`, `/`, spaces) are stripped and letters are
    /// uppercased before validation, so both raw and display-formatted
    /// inputs are accepted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMatricula` if the input is empty, has
    /// more than 8 significant characters, or contains characters other
    /// than digits and `X`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let cleaned: String = input
            .to_uppercase()
            .chars()
            .filter(|c| !matches!(c, '.' | '-' | '/' | ' '))
            .collect();
        if cleaned.is_empty() {
            return Err(DomainError::InvalidMatricula(String::from(
                "matricula cannot be empty",
            )));
        }
        if cleaned.len() > 8 {
            return Err(DomainError::InvalidMatricula(format!(
                "matricula has more than 8 characters: '{input}'"
            )));
        }
        if let Some(bad) = cleaned.chars().find(|c| !c.is_ascii_digit() && *c != 'X') {
            return Err(DomainError::InvalidMatricula(format!(
                "unexpected character '{bad}' in '{input}'"
            )));
        }
        Ok(Self {
            value: format!("{cleaned:0>8}"),
        })
    }

    /// Returns the canonical 8-character value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Renders the registration number as `NNN.NNN-N-N`.
    #[must_use]
    pub fn display(&self) -> String {
        format!(
            "{}.{}-{}-{}",
            &self.value[0..3],
            &self.value[3..6],
            &self.value[6..7],
            &self.value[7..8]
        )
    }
}

impl std::fmt::Display for Matricula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// A vehicle plate in canonical `ABC-1234` form.
///
/// Both legacy (`ABC1234`) and Mercosul (`ABC1D23`) plates are accepted;
/// the dash is inserted after the third character.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehiclePlate {
    value: String,
}

impl VehiclePlate {
    /// Parses and canonicalizes a vehicle plate.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidVehiclePlate` if the input does not
    /// reduce to 7 alphanumeric characters starting with three letters.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let cleaned: String = input
            .to_uppercase()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect();
        if cleaned.len() != 7 {
            return Err(DomainError::InvalidVehiclePlate(format!(
                "expected 7 characters, got {} in '{input}'",
                cleaned.len()
            )));
        }
        if !cleaned.chars().take(3).all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidVehiclePlate(format!(
                "plate must start with three letters: '{input}'"
            )));
        }
        Ok(Self {
            value: format!("{}-{}", &cleaned[0..3], &cleaned[3..7]),
        })
    }

    /// Returns the canonical plate value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for VehiclePlate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for VehiclePlate {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// The two shift kinds a duty slot can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShiftKind {
    /// 08:00-20:00, credited 12 hours.
    Day,
    /// 19:00-01:00 (next day), credited 6 hours.
    Night,
}

impl ShiftKind {
    /// Converts this shift kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Night => "night",
        }
    }
}

impl std::fmt::Display for ShiftKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ShiftKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Self::Day),
            "night" => Ok(Self::Night),
            _ => Err(DomainError::InvalidShiftKind(s.to_string())),
        }
    }
}

/// Lifecycle status of a duty slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    /// Open for booking.
    #[default]
    Available,
    /// Claimed by a team.
    Occupied,
}

impl SlotStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SlotStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            _ => Err(DomainError::InvalidSlotStatus(s.to_string())),
        }
    }
}

/// Lifecycle status of a team record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatus {
    /// Committed by a successful booking.
    #[default]
    Registered,
    /// Administratively voided; the slot was released.
    Cancelled,
}

impl TeamStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TeamStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidTeamStatus(s.to_string())),
        }
    }
}

/// Lifecycle status of a convoy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConvoyStatus {
    /// Both teams paired and the operational assignment recorded.
    #[default]
    Formed,
}

impl ConvoyStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Formed => "formed",
        }
    }
}

impl std::fmt::Display for ConvoyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConvoyStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "formed" => Ok(Self::Formed),
            _ => Err(DomainError::InvalidConvoyStatus(s.to_string())),
        }
    }
}

/// Kinds of policy-violation alerts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlertKind {
    /// An officer other than the requesting leader was already assigned
    /// elsewhere in the same week.
    PossibleCircumvention,
}

impl AlertKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PossibleCircumvention => "POSSIBLE_CIRCUMVENTION",
        }
    }
}

impl std::fmt::Display for AlertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POSSIBLE_CIRCUMVENTION" => Ok(Self::PossibleCircumvention),
            _ => Err(DomainError::InvalidAlertKind(s.to_string())),
        }
    }
}

/// Review status of a conflict alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    /// Raised and awaiting administrative review.
    #[default]
    New,
    /// Acknowledged by an administrator.
    Reviewed,
}

impl AlertStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Reviewed => "reviewed",
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "reviewed" => Ok(Self::Reviewed),
            _ => Err(DomainError::InvalidAlertStatus(s.to_string())),
        }
    }
}

/// A field officer as recorded on a team roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    /// Canonical registration number.
    pub matricula: Matricula,
    /// Full name, normalized to uppercase without diacritics.
    pub name: String,
    /// Department (e.g. DPC, DHPP).
    pub department: String,
    /// Unit within the department (delegacia).
    pub unit: String,
    /// Contact phone; required for the team leader.
    pub phone: Option<String>,
}

impl Officer {
    /// Creates a new `Officer`.
    #[must_use]
    pub const fn new(
        matricula: Matricula,
        name: String,
        department: String,
        unit: String,
        phone: Option<String>,
    ) -> Self {
        Self {
            matricula,
            name,
            department,
            unit,
            phone,
        }
    }
}

/// A single bookable unit of duty.
///
/// Slots are created in bulk at week-generation time, mutated only by the
/// booking transaction and never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutySlot {
    /// Canonical numeric identifier assigned by the repository.
    /// `None` indicates the slot has not been persisted yet.
    pub slot_id: Option<i64>,
    /// The calendar date of the duty.
    pub date: Date,
    /// Day or night shift.
    pub shift: ShiftKind,
    /// The week the slot belongs to.
    pub week_id: WeekId,
    /// Current lifecycle status.
    pub status: SlotStatus,
    /// The booked team, once occupied.
    pub team_id: Option<i64>,
}

impl DutySlot {
    /// Creates a new available `DutySlot` without a persisted id.
    #[must_use]
    pub const fn new(date: Date, shift: ShiftKind, week_id: WeekId) -> Self {
        Self {
            slot_id: None,
            date,
            shift,
            week_id,
            status: SlotStatus::Available,
            team_id: None,
        }
    }

    /// Creates a `DutySlot` with an existing persisted id.
    #[must_use]
    pub const fn with_id(
        slot_id: i64,
        date: Date,
        shift: ShiftKind,
        week_id: WeekId,
        status: SlotStatus,
        team_id: Option<i64>,
    ) -> Self {
        Self {
            slot_id: Some(slot_id),
            date,
            shift,
            week_id,
            status,
            team_id,
        }
    }
}

/// A 3-officer roster bound to one duty slot.
///
/// The roster is ordered: position 0 is the registering leader. A team
/// exists only once its slot has been atomically claimed; afterwards only
/// its status may change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Canonical numeric identifier assigned by the repository.
    pub team_id: Option<i64>,
    /// The claimed slot.
    pub slot_id: i64,
    /// The slot's calendar date.
    pub slot_date: Date,
    /// The slot's shift kind.
    pub shift: ShiftKind,
    /// The slot's week.
    pub week_id: WeekId,
    /// Cycle derived from the slot's date (not the registration date).
    pub cycle_id: CycleId,
    /// Ordered roster; never empty, leader first.
    pub members: Vec<Officer>,
    /// Designated vehicle.
    pub vehicle: VehiclePlate,
    /// Leader contact phone in normalized form.
    pub leader_phone: String,
    /// Current lifecycle status.
    pub status: TeamStatus,
}

impl Team {
    /// Creates a new `Team` without a persisted id, validating the roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the roster does not contain exactly
    /// [`TEAM_SIZE`] distinct, fully-identified officers.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        slot_id: i64,
        slot_date: Date,
        shift: ShiftKind,
        week_id: WeekId,
        cycle_id: CycleId,
        members: Vec<Officer>,
        vehicle: VehiclePlate,
        leader_phone: String,
    ) -> Result<Self, DomainError> {
        validate_roster(&members)?;
        Ok(Self {
            team_id: None,
            slot_id,
            slot_date,
            shift,
            week_id,
            cycle_id,
            members,
            vehicle,
            leader_phone,
            status: TeamStatus::Registered,
        })
    }

    /// Creates a `Team` with an existing persisted id.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn with_id(
        team_id: i64,
        slot_id: i64,
        slot_date: Date,
        shift: ShiftKind,
        week_id: WeekId,
        cycle_id: CycleId,
        members: Vec<Officer>,
        vehicle: VehiclePlate,
        leader_phone: String,
        status: TeamStatus,
    ) -> Self {
        Self {
            team_id: Some(team_id),
            slot_id,
            slot_date,
            shift,
            week_id,
            cycle_id,
            members,
            vehicle,
            leader_phone,
            status,
        }
    }

    /// Returns the registering leader (roster position 0).
    #[must_use]
    pub fn leader(&self) -> &Officer {
        &self.members[0]
    }

    /// Returns whether this team record is still in force.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status != TeamStatus::Cancelled
    }
}

/// A supervision or briefing designation: a name from the standing roster,
/// or free text when the roster does not apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Designation {
    /// A value picked from the standing roster of names.
    Named(String),
    /// A free-text value entered when none of the roster entries apply.
    Other(String),
}

impl Designation {
    /// Returns the effective value of the designation.
    #[must_use]
    pub fn resolved(&self) -> &str {
        match self {
            Self::Named(value) | Self::Other(value) => value,
        }
    }

    /// Returns whether this is a free-text designation.
    #[must_use]
    pub const fn is_other(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

/// A pairing of exactly two teams for a shared patrol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Convoy {
    /// Canonical numeric identifier assigned by the repository.
    pub convoy_id: Option<i64>,
    /// The week both teams serve in.
    pub week_id: WeekId,
    /// The patrol date (taken from the first team's slot).
    pub date: Date,
    /// Exactly two distinct team ids.
    pub team_ids: [i64; 2],
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
    /// Current lifecycle status.
    pub status: ConvoyStatus,
}

impl Convoy {
    /// Creates a new `Convoy` without a persisted id.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        week_id: WeekId,
        date: Date,
        team_ids: [i64; 2],
        area_code: u8,
        neighborhood: String,
        mission: String,
        dpc: Designation,
        oip: Designation,
        briefing_location: Designation,
    ) -> Self {
        Self {
            convoy_id: None,
            week_id,
            date,
            team_ids,
            area_code,
            neighborhood,
            mission,
            dpc,
            oip,
            briefing_location,
            status: ConvoyStatus::Formed,
        }
    }
}

/// The fixed set of operational outcome counters carried by an
/// after-action report.
///
/// The counter set is explicit and versioned: aggregation sums exactly
/// these fields, so adding a counter is a deliberate schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutcomeCounters {
    /// Persons stopped and checked.
    pub persons_checked: u32,
    /// Vehicles stopped and checked.
    pub vehicles_checked: u32,
    /// Arrests effected.
    pub arrests: u32,
    /// Citations issued.
    pub citations: u32,
    /// Arrest warrants served.
    pub warrants_served: u32,
    /// Weapons seized.
    pub weapons_seized: u32,
}

impl OutcomeCounters {
    /// Adds another report's counters into this accumulator, saturating on
    /// overflow.
    pub const fn accumulate(&mut self, other: &Self) {
        self.persons_checked = self.persons_checked.saturating_add(other.persons_checked);
        self.vehicles_checked = self.vehicles_checked.saturating_add(other.vehicles_checked);
        self.arrests = self.arrests.saturating_add(other.arrests);
        self.citations = self.citations.saturating_add(other.citations);
        self.warrants_served = self.warrants_served.saturating_add(other.warrants_served);
        self.weapons_seized = self.weapons_seized.saturating_add(other.weapons_seized);
    }

    /// Returns the counters as `(name, value)` pairs in declaration order.
    #[must_use]
    pub const fn entries(&self) -> [(&'static str, u32); 6] {
        [
            ("persons_checked", self.persons_checked),
            ("vehicles_checked", self.vehicles_checked),
            ("arrests", self.arrests),
            ("citations", self.citations),
            ("warrants_served", self.warrants_served),
            ("weapons_seized", self.weapons_seized),
        ]
    }
}

/// The single after-action report of a convoy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AfterActionReport {
    /// Canonical numeric identifier assigned by the repository.
    pub report_id: Option<i64>,
    /// The convoy this report covers.
    pub convoy_id: i64,
    /// Cycle derived from the convoy's date.
    pub cycle_id: CycleId,
    /// Operational outcome counters.
    pub counters: OutcomeCounters,
    /// Free-text summary of the patrol.
    pub summary: String,
    /// Registration number of the submitting leader.
    pub submitted_by: Matricula,
    /// Submission timestamp (caller-supplied).
    pub submitted_at: OffsetDateTime,
}

impl AfterActionReport {
    /// Creates a new `AfterActionReport` without a persisted id.
    #[must_use]
    pub const fn new(
        convoy_id: i64,
        cycle_id: CycleId,
        counters: OutcomeCounters,
        summary: String,
        submitted_by: Matricula,
        submitted_at: OffsetDateTime,
    ) -> Self {
        Self {
            report_id: None,
            convoy_id,
            cycle_id,
            counters,
            summary,
            submitted_by,
            submitted_at,
        }
    }
}

/// A recorded policy violation detected during booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictAlert {
    /// Canonical numeric identifier assigned by the repository.
    pub alert_id: Option<i64>,
    /// What kind of violation was detected.
    pub kind: AlertKind,
    /// Human-readable description.
    pub message: String,
    /// The officer found double-booked.
    pub offending_matricula: Matricula,
    /// The week in which the violation was detected.
    pub week_id: WeekId,
    /// Review status.
    pub status: AlertStatus,
}

impl ConflictAlert {
    /// Creates a new unreviewed `ConflictAlert` without a persisted id.
    #[must_use]
    pub const fn new(
        kind: AlertKind,
        message: String,
        offending_matricula: Matricula,
        week_id: WeekId,
    ) -> Self {
        Self {
            alert_id: None,
            kind,
            message,
            offending_matricula,
            week_id,
            status: AlertStatus::New,
        }
    }
}

/// A named calendar date that modifies slot-generation quotas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Canonical numeric identifier assigned by the repository.
    pub holiday_id: Option<i64>,
    /// Holiday name, normalized to uppercase.
    pub name: String,
    /// The calendar date.
    pub date: Date,
}

impl Holiday {
    /// Creates a new `Holiday` without a persisted id.
    #[must_use]
    pub const fn new(name: String, date: Date) -> Self {
        Self {
            holiday_id: None,
            name,
            date,
        }
    }
}
