// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Fixtures shared by the API tests.

use crate::{
    Actor, BookSlotRequest, DesignationInput, FormConvoyRequest, MemberEntry, Role, TeamView,
    WeekScheduleResponse,
};
use escala_core::NoopNotifier;
use escala_domain::Matricula;
use escala_persistence::Persistence;
use time::Date;
use time::macros::date;

/// Monday of the reference week used throughout the tests.
pub const MONDAY: Date = date!(2025 - 03 - 10);

pub fn repo() -> Persistence {
    Persistence::new_in_memory().unwrap()
}

pub fn admin() -> Actor {
    Actor::new(
        Matricula::parse("99990001").unwrap(),
        String::from("COORDENACAO GERAL"),
        Role::Admin,
    )
}

pub fn officer_actor(matricula: &str, name: &str) -> Actor {
    Actor::new(
        Matricula::parse(matricula).unwrap(),
        String::from(name),
        Role::Officer,
    )
}

pub fn member(matricula: &str, name: &str, phone: Option<&str>) -> MemberEntry {
    MemberEntry {
        name: String::from(name),
        matricula: String::from(matricula),
        department: String::from("DPC"),
        unit: String::from("3o DP"),
        phone: phone.map(String::from),
    }
}

/// A booking request led by the first matricula, with the leader's phone
/// filled in.
pub fn booking_request(slot_id: i64, matriculas: [&str; 3]) -> BookSlotRequest {
    BookSlotRequest {
        slot_id,
        members: vec![
            member(matriculas[0], "ANA SOUZA", Some("85988888888")),
            member(matriculas[1], "CARLOS LIMA", None),
            member(matriculas[2], "MARIA COSTA", None),
        ],
        vehicle: String::from("abc1234"),
    }
}

/// Generates the reference week and returns its schedule.
pub fn seeded_schedule(repo: &Persistence) -> WeekScheduleResponse {
    crate::generate_week(repo, &admin(), MONDAY).unwrap();
    crate::week_schedule(repo, MONDAY).unwrap()
}

/// Picks the first available slot of the given date and shift.
pub fn available_slot(schedule: &WeekScheduleResponse, date: Date, shift: &str) -> i64 {
    schedule
        .days
        .iter()
        .find(|day| day.date == date)
        .unwrap()
        .slots
        .iter()
        .find(|slot| slot.shift == shift && slot.status == "available")
        .unwrap()
        .slot_id
}

/// Books a slot through the API with the given roster; the leader is the
/// acting officer.
pub fn book(repo: &Persistence, slot_id: i64, matriculas: [&str; 3]) -> TeamView {
    let actor: Actor = officer_actor(matriculas[0], "ANA SOUZA");
    crate::book_slot(
        repo,
        &NoopNotifier,
        &actor,
        &booking_request(slot_id, matriculas),
    )
    .unwrap()
}

pub fn named(choice: &str) -> DesignationInput {
    DesignationInput {
        choice: String::from(choice),
        other_text: None,
    }
}

pub fn convoy_request(team_ids: Vec<i64>) -> FormConvoyRequest {
    FormConvoyRequest {
        team_ids,
        area_code: 7,
        neighborhood: String::from("Centro"),
        mission: String::from("Patrulhamento ostensivo"),
        dpc: named("KLEVER FARIAS"),
        oip: named("JARBAS"),
        briefing_location: named("POLICIA CIVIL - CISP"),
    }
}
