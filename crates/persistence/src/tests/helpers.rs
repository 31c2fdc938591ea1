// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixtures shared by the persistence tests.

use crate::Persistence;
use escala_core::{NoopNotifier, OperationalData, SlotLedger, TeamProposal};
use escala_domain::{
    Designation, DutySlot, Matricula, Officer, ShiftKind, Team, VehiclePlate, WeekInfo, week_of,
};
use std::collections::HashSet;
use time::Date;
use time::macros::date;

/// Monday of the reference week used throughout the tests.
pub const WEEK_MONDAY: Date = date!(2025 - 03 - 10);

pub fn repo() -> Persistence {
    Persistence::new_in_memory().unwrap()
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

/// A proposal with a roster unique to `n`, for concurrent bookers.
pub fn numbered_proposal(n: usize) -> TeamProposal {
    let base: usize = (n + 1) * 100;
    let matriculas: [String; 3] = [
        format!("{:08}", base + 1),
        format!("{:08}", base + 2),
        format!("{:08}", base + 3),
    ];
    proposal([&matriculas[0], &matriculas[1], &matriculas[2]])
}

/// The reference week (2025-W11) with its slots generated.
pub fn seeded_week(repo: &Persistence) -> (WeekInfo, Vec<DutySlot>) {
    let week: WeekInfo = week_of(WEEK_MONDAY).unwrap();
    let slots: Vec<DutySlot> = SlotLedger::new(repo)
        .generate_week(&week, &HashSet::new())
        .unwrap();
    (week, slots)
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

/// Books the `n`-th Monday night slot with the given roster.
pub fn book_monday_night(
    repo: &Persistence,
    slots: &[DutySlot],
    n: usize,
    matriculas: [&str; 3],
) -> Team {
    SlotLedger::new(repo)
        .book_slot(
            nth_slot_of(slots, WEEK_MONDAY, ShiftKind::Night, n)
                .slot_id
                .unwrap(),
            &proposal(matriculas),
            &NoopNotifier,
        )
        .unwrap()
}

/// The standard operational data used by convoy tests.
pub fn operational_data() -> OperationalData {
    OperationalData {
        area_code: 7,
        neighborhood: String::from("CENTRO"),
        mission: String::from("PATRULHAMENTO OSTENSIVO"),
        dpc: Designation::Named(String::from("KLEVER FARIAS")),
        oip: Designation::Other(String::from("ROGERIO")),
        briefing_location: Designation::Named(String::from("POLICIA CIVIL - CISP")),
    }
}
