// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use escala_core::{CoreError, RepositoryError};
use escala_domain::DomainError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract; translation is explicit so inner errors are never leaked
/// directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The actor does not have permission for this operation.
    PermissionDenied {
        /// The operation that was attempted.
        action: String,
        /// The role (or relationship) required for it.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// The slot was taken before the booking could commit. Retryable
    /// against a different slot only.
    SlotUnavailable {
        /// The contested slot.
        slot_id: i64,
    },
    /// A booking constraint rejected the proposed roster.
    BookingConflict {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
        /// Display form of the offending officer's matricula, when
        /// attributable.
        offending_matricula: Option<String>,
    },
    /// A business rule other than a booking constraint was violated.
    RuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied {
                action,
                required_role,
            } => {
                write!(f, "Permission denied: '{action}' requires {required_role}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::SlotUnavailable { slot_id } => {
                write!(f, "Slot {slot_id} is not available for booking")
            }
            Self::BookingConflict { rule, message, .. } => {
                write!(f, "Booking conflict ({rule}): {message}")
            }
            Self::RuleViolation { rule, message } => {
                write!(f, "Rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => write!(f, "Internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidMatricula(msg) => ApiError::InvalidInput {
            field: String::from("matricula"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidUnit(msg) => ApiError::InvalidInput {
            field: String::from("unit"),
            message: msg,
        },
        DomainError::InvalidVehiclePlate(msg) => ApiError::InvalidInput {
            field: String::from("vehicle"),
            message: msg,
        },
        DomainError::InvalidPhone(msg) => ApiError::InvalidInput {
            field: String::from("phone"),
            message: msg,
        },
        DomainError::InvalidRosterSize { found } => ApiError::InvalidInput {
            field: String::from("members"),
            message: format!("A team requires exactly 3 members, got {found}"),
        },
        DomainError::DuplicateRosterMember { matricula } => ApiError::InvalidInput {
            field: String::from("members"),
            message: format!(
                "Officer {} appears more than once in the roster",
                matricula.display()
            ),
        },
        DomainError::InvalidAreaCode { code } => ApiError::InvalidInput {
            field: String::from("area_code"),
            message: format!("Area code {code} is not a recognized AIS"),
        },
        DomainError::InvalidMonth { month } => ApiError::InvalidInput {
            field: String::from("cycle"),
            message: format!("Invalid month: {month}"),
        },
        DomainError::InvalidIsoWeek { week } => ApiError::InvalidInput {
            field: String::from("week"),
            message: format!("Invalid ISO week: {week}"),
        },
        DomainError::InvalidCycleId(msg) => ApiError::InvalidInput {
            field: String::from("cycle"),
            message: format!("Invalid cycle id: {msg}"),
        },
        DomainError::InvalidWeekId(msg) => ApiError::InvalidInput {
            field: String::from("week"),
            message: format!("Invalid week id: {msg}"),
        },
        DomainError::InvalidShiftKind(msg) => ApiError::InvalidInput {
            field: String::from("shift"),
            message: format!("Invalid shift kind: {msg}"),
        },
        DomainError::InvalidSlotStatus(msg)
        | DomainError::InvalidTeamStatus(msg)
        | DomainError::InvalidConvoyStatus(msg)
        | DomainError::InvalidAlertKind(msg)
        | DomainError::InvalidAlertStatus(msg) => ApiError::Internal {
            message: format!("Corrupt stored status: {msg}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::Internal {
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::SlotUnavailable { slot_id } => ApiError::SlotUnavailable { slot_id },
        CoreError::ConflictDetected {
            rule,
            message,
            offending,
        } => ApiError::BookingConflict {
            rule: rule.as_str().to_string(),
            message,
            offending_matricula: offending.map(|m| m.display()),
        },
        CoreError::AlreadyGenerated { week_id } => ApiError::RuleViolation {
            rule: String::from("week_already_generated"),
            message: format!("Slots already generated for week {week_id}"),
        },
        CoreError::InvalidSelection { reason } => ApiError::InvalidInput {
            field: String::from("teams"),
            message: reason,
        },
        CoreError::IncompleteOperationalData { field } => ApiError::InvalidInput {
            field: field.to_string(),
            message: format!("'{field}' is required"),
        },
        CoreError::ReportAlreadySubmitted { convoy_id } => ApiError::RuleViolation {
            rule: String::from("one_report_per_convoy"),
            message: format!("Convoy {convoy_id} already has a submitted report"),
        },
        CoreError::Domain(domain_err) => translate_domain_error(domain_err),
        CoreError::Repository(repo_err) => translate_repository_error(&repo_err),
    }
}

/// Translates a repository error into an API error.
#[must_use]
pub fn translate_repository_error(err: &RepositoryError) -> ApiError {
    match err {
        RepositoryError::NotFound { entity, id } => ApiError::ResourceNotFound {
            resource_type: (*entity).to_string(),
            message: format!("{entity} {id} does not exist"),
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
