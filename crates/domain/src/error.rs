// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::Matricula;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Registration number is empty, too long, or contains invalid characters.
    InvalidMatricula(String),
    /// Officer name is empty or invalid.
    InvalidName(String),
    /// Officer unit (delegacia) is empty or invalid.
    InvalidUnit(String),
    /// Vehicle plate does not match the expected format.
    InvalidVehiclePlate(String),
    /// Phone number does not match the expected format.
    InvalidPhone(String),
    /// A team roster does not have the required number of members.
    InvalidRosterSize {
        /// The number of members provided.
        found: usize,
    },
    /// The same officer appears more than once in a team roster.
    DuplicateRosterMember {
        /// The duplicated registration number.
        matricula: Matricula,
    },
    /// The geographic area code is not a recognized AIS.
    InvalidAreaCode {
        /// The rejected code.
        code: u8,
    },
    /// Month value outside 1-12.
    InvalidMonth {
        /// The rejected month value.
        month: u8,
    },
    /// ISO week number outside 1-53.
    InvalidIsoWeek {
        /// The rejected week number.
        week: u8,
    },
    /// Failed to parse a cycle identifier.
    InvalidCycleId(String),
    /// Failed to parse a week identifier.
    InvalidWeekId(String),
    /// Failed to parse a shift kind.
    InvalidShiftKind(String),
    /// Failed to parse a slot status.
    InvalidSlotStatus(String),
    /// Failed to parse a team status.
    InvalidTeamStatus(String),
    /// Failed to parse a convoy status.
    InvalidConvoyStatus(String),
    /// Failed to parse an alert kind.
    InvalidAlertKind(String),
    /// Failed to parse an alert review status.
    InvalidAlertStatus(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMatricula(msg) => write!(f, "Invalid matricula: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidUnit(msg) => write!(f, "Invalid unit: {msg}"),
            Self::InvalidVehiclePlate(msg) => write!(f, "Invalid vehicle plate: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone: {msg}"),
            Self::InvalidRosterSize { found } => {
                write!(f, "A team requires exactly 3 members, got {found}")
            }
            Self::DuplicateRosterMember { matricula } => {
                write!(
                    f,
                    "Officer {} appears more than once in the roster",
                    matricula.value()
                )
            }
            Self::InvalidAreaCode { code } => {
                write!(f, "Area code {code} is not a recognized AIS")
            }
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidIsoWeek { week } => {
                write!(f, "Invalid ISO week: {week}. Must be between 1 and 53")
            }
            Self::InvalidCycleId(msg) => write!(f, "Invalid cycle id: {msg}"),
            Self::InvalidWeekId(msg) => write!(f, "Invalid week id: {msg}"),
            Self::InvalidShiftKind(msg) => write!(f, "Invalid shift kind: {msg}"),
            Self::InvalidSlotStatus(msg) => write!(f, "Invalid slot status: {msg}"),
            Self::InvalidTeamStatus(msg) => write!(f, "Invalid team status: {msg}"),
            Self::InvalidConvoyStatus(msg) => write!(f, "Invalid convoy status: {msg}"),
            Self::InvalidAlertKind(msg) => write!(f, "Invalid alert kind: {msg}"),
            Self::InvalidAlertStatus(msg) => write!(f, "Invalid alert status: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
