// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for slot generation and the booking protocol.

use super::helpers::{
    CollectingNotifier, MemoryRepository, WEEK_MONDAY, officer, proposal, seeded_week, slot_of,
};
use crate::{CoreError, NoopNotifier, Repository, SlotLedger, TeamProposal};
use escala_domain::{
    DomainError, DutySlot, Holiday, ShiftKind, SlotStatus, Team, TeamStatus, WeekInfo, week_of,
};
use std::collections::HashSet;
use time::Date;
use time::macros::date;

fn count(slots: &[DutySlot], date: Date, shift: ShiftKind) -> usize {
    slots
        .iter()
        .filter(|s| s.date == date && s.shift == shift)
        .count()
}

#[test]
fn test_generate_week_applies_weekday_quotas() {
    let repo: MemoryRepository = MemoryRepository::new();

    let (_, slots) = seeded_week(&repo);

    // Ordinary weekdays: bare night quota, no day slots.
    assert_eq!(count(&slots, date!(2025 - 03 - 10), ShiftKind::Night), 4);
    assert_eq!(count(&slots, date!(2025 - 03 - 11), ShiftKind::Night), 3);
    assert_eq!(count(&slots, date!(2025 - 03 - 12), ShiftKind::Night), 3);
    assert_eq!(count(&slots, date!(2025 - 03 - 13), ShiftKind::Night), 3);
    assert_eq!(count(&slots, date!(2025 - 03 - 14), ShiftKind::Night), 6);
    assert_eq!(count(&slots, date!(2025 - 03 - 10), ShiftKind::Day), 0);
}

#[test]
fn test_generate_week_reinforces_weekends() {
    let repo: MemoryRepository = MemoryRepository::new();

    let (_, slots) = seeded_week(&repo);

    // Weekend: doubled night quota plus two fixed day slots.
    assert_eq!(count(&slots, date!(2025 - 03 - 15), ShiftKind::Night), 10);
    assert_eq!(count(&slots, date!(2025 - 03 - 15), ShiftKind::Day), 2);
    assert_eq!(count(&slots, date!(2025 - 03 - 16), ShiftKind::Night), 10);
    assert_eq!(count(&slots, date!(2025 - 03 - 16), ShiftKind::Day), 2);
}

#[test]
fn test_generate_week_reinforces_holidays() {
    let repo: MemoryRepository = MemoryRepository::new();
    let week: WeekInfo = week_of(WEEK_MONDAY).unwrap();
    let holidays: HashSet<Date> = HashSet::from([date!(2025 - 03 - 12)]);

    let slots: Vec<DutySlot> = SlotLedger::new(&repo)
        .generate_week(&week, &holidays)
        .unwrap();

    // The holiday Wednesday gets weekend treatment.
    assert_eq!(count(&slots, date!(2025 - 03 - 12), ShiftKind::Night), 6);
    assert_eq!(count(&slots, date!(2025 - 03 - 12), ShiftKind::Day), 2);
    // Other weekdays are unaffected.
    assert_eq!(count(&slots, date!(2025 - 03 - 11), ShiftKind::Night), 3);
}

#[test]
fn test_generate_week_is_guarded_against_repetition() {
    let repo: MemoryRepository = MemoryRepository::new();
    let (week, slots) = seeded_week(&repo);

    let result: Result<Vec<DutySlot>, CoreError> =
        SlotLedger::new(&repo).generate_week(&week, &HashSet::new());

    assert!(matches!(
        result,
        Err(CoreError::AlreadyGenerated { week_id }) if week_id == week.week_id
    ));
    // Nothing extra was written.
    assert_eq!(
        repo.slots_for_week(&week.week_id).unwrap().len(),
        slots.len()
    );
}

#[test]
fn test_generate_week_assigns_slot_ids() {
    let repo: MemoryRepository = MemoryRepository::new();

    let (_, slots) = seeded_week(&repo);

    assert!(slots.iter().all(|s| s.slot_id.is_some()));
    assert!(slots.iter().all(|s| s.status == SlotStatus::Available));
}

#[test]
fn test_book_slot_commits_team_and_occupies_slot() {
    let repo: MemoryRepository = MemoryRepository::new();
    let (_, slots) = seeded_week(&repo);
    let slot: DutySlot = slot_of(&slots, date!(2025 - 03 - 10), ShiftKind::Night);
    let slot_id: i64 = slot.slot_id.unwrap();

    let team: Team = SlotLedger::new(&repo)
        .book_slot(
            slot_id,
            &proposal(["00012345", "00054321", "00099999"]),
            &NoopNotifier,
        )
        .unwrap();

    assert!(team.team_id.is_some());
    assert_eq!(team.slot_id, slot_id);
    assert_eq!(team.week_id.to_string(), "2025-W11");
    // Cycle derives from the slot date, March 10 being before day 21.
    assert_eq!(team.cycle_id.to_string(), "2025-03");
    assert_eq!(team.status, TeamStatus::Registered);
    assert_eq!(team.leader().matricula.value(), "00012345");

    let stored: DutySlot = repo.slot(slot_id).unwrap().unwrap();
    assert_eq!(stored.status, SlotStatus::Occupied);
    assert_eq!(stored.team_id, team.team_id);
}

#[test]
fn test_book_slot_fails_for_occupied_slot() {
    let repo: MemoryRepository = MemoryRepository::new();
    let (_, slots) = seeded_week(&repo);
    let slot_id: i64 = slot_of(&slots, date!(2025 - 03 - 10), ShiftKind::Night)
        .slot_id
        .unwrap();
    let ledger: SlotLedger<'_, MemoryRepository> = SlotLedger::new(&repo);
    ledger
        .book_slot(
            slot_id,
            &proposal(["00012345", "00054321", "00099999"]),
            &NoopNotifier,
        )
        .unwrap();

    let result: Result<Team, CoreError> = ledger.book_slot(
        slot_id,
        &proposal(["00011111", "00022222", "00033333"]),
        &NoopNotifier,
    );

    assert!(matches!(
        result,
        Err(CoreError::SlotUnavailable { slot_id: id }) if id == slot_id
    ));
}

#[test]
fn test_book_slot_fails_for_unknown_slot() {
    let repo: MemoryRepository = MemoryRepository::new();
    seeded_week(&repo);

    let result: Result<Team, CoreError> = SlotLedger::new(&repo).book_slot(
        9999,
        &proposal(["00012345", "00054321", "00099999"]),
        &NoopNotifier,
    );

    assert!(matches!(
        result,
        Err(CoreError::SlotUnavailable { slot_id: 9999 })
    ));
}

#[test]
fn test_book_slot_rejects_short_roster_before_any_mutation() {
    let repo: MemoryRepository = MemoryRepository::new();
    let (_, slots) = seeded_week(&repo);
    let slot: DutySlot = slot_of(&slots, date!(2025 - 03 - 10), ShiftKind::Night);
    let short: TeamProposal = TeamProposal {
        members: vec![
            officer("00012345", "ANA SOUZA"),
            officer("00054321", "CARLOS LIMA"),
        ],
        ..proposal(["00012345", "00054321", "00099999"])
    };

    let result: Result<Team, CoreError> =
        SlotLedger::new(&repo).book_slot(slot.slot_id.unwrap(), &short, &NoopNotifier);

    assert!(matches!(
        result,
        Err(CoreError::Domain(DomainError::InvalidRosterSize { found: 2 }))
    ));
    // The slot is untouched and no alert was left behind.
    let stored: DutySlot = repo.slot(slot.slot_id.unwrap()).unwrap().unwrap();
    assert_eq!(stored.status, SlotStatus::Available);
    assert!(repo.alerts().unwrap().is_empty());
}

#[test]
fn test_void_booking_releases_slot_for_rebooking() {
    let repo: MemoryRepository = MemoryRepository::new();
    let (_, slots) = seeded_week(&repo);
    let slot_id: i64 = slot_of(&slots, date!(2025 - 03 - 11), ShiftKind::Night)
        .slot_id
        .unwrap();
    let ledger: SlotLedger<'_, MemoryRepository> = SlotLedger::new(&repo);
    let team: Team = ledger
        .book_slot(
            slot_id,
            &proposal(["00012345", "00054321", "00099999"]),
            &NoopNotifier,
        )
        .unwrap();

    ledger.void_booking(team.team_id.unwrap()).unwrap();

    let stored: DutySlot = repo.slot(slot_id).unwrap().unwrap();
    assert_eq!(stored.status, SlotStatus::Available);
    assert_eq!(stored.team_id, None);
    let cancelled: Team = repo.team(team.team_id.unwrap()).unwrap().unwrap();
    assert_eq!(cancelled.status, TeamStatus::Cancelled);

    // The released slot can be booked again, by a different roster.
    let rebooked: Team = ledger
        .book_slot(
            slot_id,
            &proposal(["00011111", "00022222", "00033333"]),
            &NoopNotifier,
        )
        .unwrap();
    assert_ne!(rebooked.team_id, team.team_id);
}

#[test]
fn test_void_booking_fails_for_unknown_team() {
    let repo: MemoryRepository = MemoryRepository::new();
    seeded_week(&repo);

    let result: Result<(), CoreError> = SlotLedger::new(&repo).void_booking(4242);

    assert!(matches!(result, Err(CoreError::Repository(_))));
}

#[test]
fn test_notifier_observes_commit_and_rejection() {
    let repo: MemoryRepository = MemoryRepository::new();
    let (_, slots) = seeded_week(&repo);
    let slot_id: i64 = slot_of(&slots, date!(2025 - 03 - 10), ShiftKind::Night)
        .slot_id
        .unwrap();
    let notifier: CollectingNotifier = CollectingNotifier::default();
    let ledger: SlotLedger<'_, MemoryRepository> = SlotLedger::new(&repo);

    ledger
        .book_slot(
            slot_id,
            &proposal(["00012345", "00054321", "00099999"]),
            &notifier,
        )
        .unwrap();
    let _ = ledger.book_slot(
        slot_id,
        &proposal(["00011111", "00022222", "00033333"]),
        &notifier,
    );

    assert_eq!(notifier.committed.lock().unwrap().as_slice(), &[slot_id]);
    assert_eq!(notifier.rejected.lock().unwrap().as_slice(), &[slot_id]);
}

#[test]
fn test_generated_holiday_set_round_trip() {
    // Holidays stored through the repository drive generation the same way
    // as an ad-hoc set.
    let repo: MemoryRepository = MemoryRepository::new();
    repo.add_holiday(&Holiday::new(
        String::from("DATA MAGNA"),
        date!(2025 - 03 - 12),
    ))
    .unwrap();
    let week: WeekInfo = week_of(WEEK_MONDAY).unwrap();
    let holidays: HashSet<Date> = repo
        .holidays()
        .unwrap()
        .into_iter()
        .map(|h| h.date)
        .collect();

    let slots: Vec<DutySlot> = SlotLedger::new(&repo)
        .generate_week(&week, &holidays)
        .unwrap();

    assert_eq!(count(&slots, date!(2025 - 03 - 12), ShiftKind::Day), 2);
}
