// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Matricula, Officer, TEAM_SIZE};
use std::collections::HashSet;

/// Area codes (AIS) recognized for convoy assignments.
const VALID_AREA_CODES: [u8; 14] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 24, 25];

/// Validates a proposed team roster.
///
/// The roster must contain exactly [`TEAM_SIZE`] officers, each with a
/// non-empty name and unit, and no registration number may repeat.
/// This function is pure and has no side effects; uniqueness across other
/// teams is a separate, repository-backed check.
///
/// # Errors
///
/// Returns an error if:
/// - The roster size differs from [`TEAM_SIZE`]
/// - Any officer's name or unit is empty
/// - The same registration number appears twice
pub fn validate_roster(members: &[Officer]) -> Result<(), DomainError> {
    if members.len() != TEAM_SIZE {
        return Err(DomainError::InvalidRosterSize {
            found: members.len(),
        });
    }

    let mut seen: HashSet<&Matricula> = HashSet::with_capacity(members.len());
    for member in members {
        if member.name.trim().is_empty() {
            return Err(DomainError::InvalidName(String::from(
                "Officer name cannot be empty",
            )));
        }
        if member.unit.trim().is_empty() {
            return Err(DomainError::InvalidUnit(String::from(
                "Officer unit cannot be empty",
            )));
        }
        if !seen.insert(&member.matricula) {
            return Err(DomainError::DuplicateRosterMember {
                matricula: member.matricula.clone(),
            });
        }
    }

    Ok(())
}

/// Validates a geographic area code against the recognized AIS set.
///
/// # Errors
///
/// Returns `DomainError::InvalidAreaCode` for unrecognized codes.
pub fn validate_area_code(code: u8) -> Result<(), DomainError> {
    if VALID_AREA_CODES.contains(&code) {
        Ok(())
    } else {
        Err(DomainError::InvalidAreaCode { code })
    }
}

/// Normalizes a personal or place name: uppercase, common Latin diacritics
/// stripped, surrounding whitespace removed.
#[must_use]
pub fn normalize_name(input: &str) -> String {
    input
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'Á' | 'À' | 'Â' | 'Ã' | 'Ä' => 'A',
            'É' | 'È' | 'Ê' | 'Ë' => 'E',
            'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
            'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
            'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
            'Ç' => 'C',
            'Ñ' => 'N',
            other => other,
        })
        .collect()
}

/// Normalizes a Brazilian mobile phone number to `(NN) NNNNN.NNNN`.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` unless the input reduces to exactly
/// 11 digits (area code plus 9-digit number).
pub fn normalize_phone(input: &str) -> Result<String, DomainError> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() != 11 {
        return Err(DomainError::InvalidPhone(format!(
            "expected 11 digits, got {} in '{input}'",
            digits.len()
        )));
    }
    Ok(format!(
        "({}) {}.{}",
        &digits[0..2],
        &digits[2..7],
        &digits[7..11]
    ))
}
