// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Cycle, week and shift-window arithmetic.
//!
//! All functions here are pure and deterministic: given the same date they
//! always produce the same identifiers and windows, perform no I/O and are
//! safe to call concurrently without synchronization.
//!
//! ## Invariants
//!
//! - A cycle runs from day 21 of one month through day 20 of the next;
//!   dates on or after day 21 belong to the next month's cycle id.
//! - Weeks are ISO-8601: Monday start, week id derived from the ISO
//!   week-based year.
//! - Day shifts span 08:00-20:00 and credit 12 hours; night shifts span
//!   19:00 to 01:00 of the following date and credit 6 hours.

use crate::error::DomainError;
use crate::types::ShiftKind;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::macros::time;
use time::{Date, Duration, Month, PrimitiveDateTime};

/// Hours credited for a day shift (08:00-20:00).
pub const DAY_SHIFT_CREDITED_HOURS: u32 = 12;

/// Hours credited for a night shift (19:00-01:00 next day).
pub const NIGHT_SHIFT_CREDITED_HOURS: u32 = 6;

/// Identifies a payroll/administrative cycle.
///
/// A cycle begins on the 21st calendar day of a month and ends on the 20th
/// of the following month. The id carries the year and month of the cycle's
/// closing boundary and renders as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CycleId {
    year: i32,
    month: u8,
}

impl CycleId {
    /// Creates a new `CycleId`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidMonth` if `month` is not between 1 and 12.
    pub const fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        if month >= 1 && month <= 12 {
            Ok(Self { year, month })
        } else {
            Err(DomainError::InvalidMonth { month })
        }
    }

    /// Returns the cycle's year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the cycle's month (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for CycleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| DomainError::InvalidCycleId(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DomainError::InvalidCycleId(s.to_string()))?;
        let month: u8 = month
            .parse()
            .map_err(|_| DomainError::InvalidCycleId(s.to_string()))?;
        Self::new(year, month).map_err(|_| DomainError::InvalidCycleId(s.to_string()))
    }
}

/// Identifies an ISO-8601 calendar week, rendered as `YYYY-Www`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WeekId {
    year: i32,
    week: u8,
}

impl WeekId {
    /// Creates a new `WeekId`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIsoWeek` if `week` is not between 1 and 53.
    pub const fn new(year: i32, week: u8) -> Result<Self, DomainError> {
        if week >= 1 && week <= 53 {
            Ok(Self { year, week })
        } else {
            Err(DomainError::InvalidIsoWeek { week })
        }
    }

    /// Returns the ISO week-based year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the ISO week number (1-53).
    #[must_use]
    pub const fn week(&self) -> u8 {
        self.week
    }
}

impl std::fmt::Display for WeekId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-W{:02}", self.year, self.week)
    }
}

impl FromStr for WeekId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, week) = s
            .split_once("-W")
            .ok_or_else(|| DomainError::InvalidWeekId(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| DomainError::InvalidWeekId(s.to_string()))?;
        let week: u8 = week
            .parse()
            .map_err(|_| DomainError::InvalidWeekId(s.to_string()))?;
        Self::new(year, week).map_err(|_| DomainError::InvalidWeekId(s.to_string()))
    }
}

/// A resolved week: its id plus the ordered Monday-to-Sunday dates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekInfo {
    /// The ISO week identifier.
    pub week_id: WeekId,
    /// The seven dates of the week, Monday first.
    pub days: [Date; 7],
}

/// The concrete time window of a single shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftWindow {
    /// Start of the shift (local wall clock).
    pub start: PrimitiveDateTime,
    /// End of the shift (local wall clock).
    pub end: PrimitiveDateTime,
    /// Hours credited for payroll purposes.
    pub hours: u32,
}

/// Returns the cycle a date belongs to.
///
/// Day 20 of month M belongs to cycle `M`; day 21 belongs to cycle `M+1`,
/// rolling the year when M is December.
#[must_use]
pub fn cycle_of(date: Date) -> CycleId {
    let month: Month = date.month();
    if date.day() >= 21 {
        let year: i32 = if month == Month::December {
            date.year() + 1
        } else {
            date.year()
        };
        CycleId {
            year,
            month: u8::from(month.next()),
        }
    } else {
        CycleId {
            year: date.year(),
            month: u8::from(month),
        }
    }
}

/// Resolves the ISO week containing `date`.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the week's dates fall
/// outside the representable date range.
pub fn week_of(date: Date) -> Result<WeekInfo, DomainError> {
    let monday: Date = date
        .checked_sub(Duration::days(i64::from(
            date.weekday().number_days_from_monday(),
        )))
        .ok_or_else(|| DomainError::DateArithmeticOverflow {
            operation: String::from("resolving the Monday of a week"),
        })?;

    let mut days: [Date; 7] = [monday; 7];
    let mut current: Date = monday;
    for slot in &mut days[1..] {
        current = current
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("enumerating the days of a week"),
            })?;
        *slot = current;
    }

    let (iso_year, iso_week, _) = monday.to_iso_week_date();
    Ok(WeekInfo {
        week_id: WeekId {
            year: iso_year,
            week: iso_week,
        },
        days,
    })
}

/// Computes the concrete time window for a shift on `date`.
///
/// Day shifts run 08:00-20:00 on `date` and credit 12 hours. Night shifts
/// run from 19:00 on `date` to 01:00 on the following date and credit
/// 6 hours; the credit figure is a fixed business rule, not the elapsed
/// duration.
///
/// # Errors
///
/// Returns `DomainError::DateArithmeticOverflow` if the night shift's end
/// date is not representable.
pub fn shift_window(date: Date, kind: ShiftKind) -> Result<ShiftWindow, DomainError> {
    match kind {
        ShiftKind::Day => Ok(ShiftWindow {
            start: PrimitiveDateTime::new(date, time!(8:00)),
            end: PrimitiveDateTime::new(date, time!(20:00)),
            hours: DAY_SHIFT_CREDITED_HOURS,
        }),
        ShiftKind::Night => {
            let end_date: Date =
                date.next_day()
                    .ok_or_else(|| DomainError::DateArithmeticOverflow {
                        operation: String::from("resolving the end of a night shift"),
                    })?;
            Ok(ShiftWindow {
                start: PrimitiveDateTime::new(date, time!(19:00)),
                end: PrimitiveDateTime::new(end_date, time!(1:00)),
                hours: NIGHT_SHIFT_CREDITED_HOURS,
            })
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_cycle_of_day_20_keeps_month() {
        assert_eq!(cycle_of(date!(2025 - 03 - 20)).to_string(), "2025-03");
    }

    #[test]
    fn test_cycle_of_day_21_advances_month() {
        assert_eq!(cycle_of(date!(2025 - 03 - 21)).to_string(), "2025-04");
    }

    #[test]
    fn test_cycle_of_december_boundary_rolls_year() {
        assert_eq!(cycle_of(date!(2025 - 12 - 20)).to_string(), "2025-12");
        assert_eq!(cycle_of(date!(2025 - 12 - 21)).to_string(), "2026-01");
    }

    #[test]
    fn test_cycle_of_early_january() {
        // Jan 10 is inside the cycle that started Dec 21.
        assert_eq!(cycle_of(date!(2026 - 01 - 10)).to_string(), "2026-01");
    }

    #[test]
    fn test_week_of_monday_start() {
        // 2025-03-12 is a Wednesday.
        let week: WeekInfo = week_of(date!(2025 - 03 - 12)).unwrap();
        assert_eq!(week.days[0], date!(2025 - 03 - 10));
        assert_eq!(week.days[6], date!(2025 - 03 - 16));
        assert_eq!(week.week_id.to_string(), "2025-W11");
    }

    #[test]
    fn test_week_of_monday_is_fixed_point() {
        let week: WeekInfo = week_of(date!(2025 - 03 - 10)).unwrap();
        assert_eq!(week.days[0], date!(2025 - 03 - 10));
    }

    #[test]
    fn test_week_id_uses_iso_week_based_year() {
        // 2025-12-29 is a Monday belonging to ISO week 1 of 2026.
        let week: WeekInfo = week_of(date!(2025 - 12 - 29)).unwrap();
        assert_eq!(week.week_id.to_string(), "2026-W01");
    }

    #[test]
    fn test_day_shift_window() {
        let window: ShiftWindow = shift_window(date!(2025 - 03 - 10), ShiftKind::Day).unwrap();
        assert_eq!(window.start.date(), date!(2025 - 03 - 10));
        assert_eq!(window.start.time(), time!(8:00));
        assert_eq!(window.end.date(), date!(2025 - 03 - 10));
        assert_eq!(window.end.time(), time!(20:00));
        assert_eq!(window.hours, 12);
    }

    #[test]
    fn test_night_shift_crosses_midnight() {
        let window: ShiftWindow = shift_window(date!(2025 - 03 - 10), ShiftKind::Night).unwrap();
        assert_eq!(window.start.date(), date!(2025 - 03 - 10));
        assert_eq!(window.end.date(), date!(2025 - 03 - 11));
        assert_eq!(window.end.time(), time!(1:00));
        assert_eq!(window.hours, 6);
    }

    #[test]
    fn test_night_shift_crosses_month_end() {
        let window: ShiftWindow = shift_window(date!(2025 - 04 - 30), ShiftKind::Night).unwrap();
        assert_eq!(window.end.date(), date!(2025 - 05 - 01));
        assert_eq!(window.hours, 6);
    }

    #[test]
    fn test_night_shift_crosses_year_end() {
        let window: ShiftWindow = shift_window(date!(2025 - 12 - 31), ShiftKind::Night).unwrap();
        assert_eq!(window.end.date(), date!(2026 - 01 - 01));
        assert_eq!(window.hours, 6);
    }

    #[test]
    fn test_cycle_id_parse_round_trip() {
        let cycle: CycleId = "2026-01".parse().unwrap();
        assert_eq!(cycle.year(), 2026);
        assert_eq!(cycle.month(), 1);
        assert_eq!(cycle.to_string(), "2026-01");
    }

    #[test]
    fn test_cycle_id_rejects_bad_month() {
        assert!("2026-13".parse::<CycleId>().is_err());
        assert!("2026-00".parse::<CycleId>().is_err());
        assert!("garbage".parse::<CycleId>().is_err());
    }

    #[test]
    fn test_week_id_parse_round_trip() {
        let week: WeekId = "2025-W07".parse().unwrap();
        assert_eq!(week.year(), 2025);
        assert_eq!(week.week(), 7);
        assert_eq!(week.to_string(), "2025-W07");
    }

    #[test]
    fn test_week_id_rejects_bad_week() {
        assert!("2025-W54".parse::<WeekId>().is_err());
        assert!("2025-07".parse::<WeekId>().is_err());
    }
}
