// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::repository::RepositoryError;
use escala_domain::{DomainError, Matricula, WeekId};

/// The booking constraint that rejected a proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictRule {
    /// No officer may serve on two teams in the same week.
    WeeklySingleAssignment,
    /// No officer may serve two 12-hour day shifts in the same cycle.
    MonthlyLongShift,
}

impl ConflictRule {
    /// Converts this rule to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WeeklySingleAssignment => "weekly_single_assignment",
            Self::MonthlyLongShift => "monthly_long_shift",
        }
    }
}

impl std::fmt::Display for ConflictRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors produced by the scheduling engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The slot is missing, already occupied, or was claimed by a
    /// concurrent booking. The caller should re-fetch the week and may
    /// retry against a different slot, never the same one.
    SlotUnavailable {
        /// The contested slot.
        slot_id: i64,
    },
    /// A booking constraint rejected the proposed team. Not retryable
    /// without changing the roster.
    ConflictDetected {
        /// The rule that was violated.
        rule: ConflictRule,
        /// Human-readable description.
        message: String,
        /// The officer that triggered the rule, when attributable.
        offending: Option<Matricula>,
    },
    /// Slots already exist for the requested week. Informational
    /// idempotency guard; nothing was written.
    AlreadyGenerated {
        /// The week that was already generated.
        week_id: WeekId,
    },
    /// The convoy team selection is unusable (wrong count, unknown,
    /// cancelled or already-assigned teams). Caller-correctable.
    InvalidSelection {
        /// What made the selection unusable.
        reason: String,
    },
    /// A required operational field is missing or empty.
    IncompleteOperationalData {
        /// The offending field.
        field: &'static str,
    },
    /// The convoy already has its single after-action report.
    ReportAlreadySubmitted {
        /// The convoy in question.
        convoy_id: i64,
    },
    /// A domain rule was violated.
    Domain(DomainError),
    /// The repository failed.
    Repository(RepositoryError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SlotUnavailable { slot_id } => {
                write!(f, "Slot {slot_id} is not available for booking")
            }
            Self::ConflictDetected { rule, message, .. } => {
                write!(f, "Conflict detected ({rule}): {message}")
            }
            Self::AlreadyGenerated { week_id } => {
                write!(f, "Slots already generated for week {week_id}")
            }
            Self::InvalidSelection { reason } => {
                write!(f, "Invalid team selection: {reason}")
            }
            Self::IncompleteOperationalData { field } => {
                write!(f, "Incomplete operational data: '{field}' is required")
            }
            Self::ReportAlreadySubmitted { convoy_id } => {
                write!(f, "Convoy {convoy_id} already has a submitted report")
            }
            Self::Domain(err) => write!(f, "Domain violation: {err}"),
            Self::Repository(err) => write!(f, "Repository failure: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

impl From<RepositoryError> for CoreError {
    fn from(err: RepositoryError) -> Self {
        Self::Repository(err)
    }
}
