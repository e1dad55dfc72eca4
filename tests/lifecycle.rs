//! Integration tests for the cycle lifecycle: start/advance orchestration,
//! completion checks, result capture, and the persistence failure policy.

use chrono::NaiveDate;
use tournament_pairing_web::{
    advance_cycle, is_current_cycle_complete, record_result, start_tournament, Cycle, Encounter,
    EncounterResult, MemoryStore, PairingSystem, ParticipantId, StoreError, StoreErrorKind,
    Tournament, TournamentError, TournamentStore,
};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
}

fn swiss_tournament(n: usize) -> Tournament {
    let mut t = Tournament::new("club open", PairingSystem::Swiss, start_date(), "Bye");
    for i in 1..=n {
        t.add_participant(format!("P{i}")).unwrap();
    }
    t
}

/// Store that fails selected operations, for exercising the failure policy.
#[derive(Default)]
struct FailingStore {
    inner: MemoryStore,
    fail_insert_cycle: bool,
    fail_insert_encounter: bool,
    fail_update_pointer: bool,
}

impl TournamentStore for FailingStore {
    fn insert_encounter(&mut self, encounter: &Encounter, cycle: u32) -> Result<(), StoreError> {
        if self.fail_insert_encounter {
            return Err(StoreError::new(StoreErrorKind::InsertEncounter, "row not affected"));
        }
        self.inner.insert_encounter(encounter, cycle)
    }

    fn update_participant_result(&mut self, participant: ParticipantId, cycle: u32) -> Result<(), StoreError> {
        self.inner.update_participant_result(participant, cycle)
    }

    fn insert_cycle(&mut self, cycle: &Cycle) -> Result<(), StoreError> {
        if self.fail_insert_cycle {
            return Err(StoreError::new(StoreErrorKind::InsertCycle, "row not affected"));
        }
        self.inner.insert_cycle(cycle)
    }

    fn update_current_cycle(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        if self.fail_update_pointer {
            return Err(StoreError::new(StoreErrorKind::UpdateCurrentCycle, "row not affected"));
        }
        self.inner.update_current_cycle(tournament)
    }

    fn list_encounters(&self, cycle: u32) -> Result<Vec<Encounter>, StoreError> {
        self.inner.list_encounters(cycle)
    }
}

#[test]
fn start_generates_the_first_cycle_and_persists_it() {
    let mut t = swiss_tournament(6);
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();

    assert_eq!(t.current_cycle, 1);
    assert_eq!(t.cycles.len(), 1);
    assert_eq!(store.stored_current_cycle(), 1);
    assert_eq!(store.list_encounters(1).unwrap().len(), 3);
}

#[test]
fn swiss_accepts_a_single_participant() {
    let mut t = swiss_tournament(1);
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();
    assert_eq!(t.planned_cycles, 0);
}

#[test]
fn swiss_rejects_an_empty_roster() {
    let mut t = swiss_tournament(0);
    let mut store = MemoryStore::new();
    assert_eq!(
        start_tournament(&mut t, &mut store),
        Err(TournamentError::InvalidParticipantCount { minimum: 1, actual: 0 })
    );
}

#[test]
fn swiss_cycle_completes_only_when_all_results_are_in() {
    let mut t = swiss_tournament(4);
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();

    assert!(!is_current_cycle_complete(&t).unwrap());
    record_result(&mut t, 1, 1, EncounterResult::InitialWins, 1.0, 0.0).unwrap();
    assert!(!is_current_cycle_complete(&t).unwrap());
    record_result(&mut t, 1, 2, EncounterResult::Draw, 1.0, 1.0).unwrap();
    assert!(is_current_cycle_complete(&t).unwrap());
}

#[test]
fn completion_check_requires_a_started_tournament() {
    let t = swiss_tournament(4);
    assert_eq!(is_current_cycle_complete(&t), Err(TournamentError::NotStarted));
}

#[test]
fn elimination_completion_stub_reports_complete_by_default() {
    let system = PairingSystem::Elimination { simple: true, track_completion: false };
    let mut t = Tournament::new("knockout", system, start_date(), "Bye");
    for i in 1..=4 {
        t.add_participant(format!("P{i}")).unwrap();
    }
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();

    // No result captured, yet the stub policy reports complete.
    assert!(is_current_cycle_complete(&t).unwrap());
}

#[test]
fn elimination_completion_scan_can_be_enabled() {
    let system = PairingSystem::Elimination { simple: true, track_completion: true };
    let mut t = Tournament::new("knockout", system, start_date(), "Bye");
    for i in 1..=4 {
        t.add_participant(format!("P{i}")).unwrap();
    }
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();

    assert!(!is_current_cycle_complete(&t).unwrap());
    record_result(&mut t, 1, 1, EncounterResult::InitialWins, 1.0, 0.0).unwrap();
    record_result(&mut t, 1, 2, EncounterResult::FinalWins, 0.0, 1.0).unwrap();
    assert!(is_current_cycle_complete(&t).unwrap());
}

#[test]
fn record_result_awards_points_to_both_sides() {
    let mut t = swiss_tournament(4);
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();

    // Cycle 1 pairs (1,3),(2,4).
    record_result(&mut t, 1, 1, EncounterResult::InitialWins, 2.0, 1.0).unwrap();
    record_result(&mut t, 1, 2, EncounterResult::Draw, 1.0, 1.0).unwrap();

    assert_eq!(t.participant(1).unwrap().score, 1.0);
    assert_eq!(t.participant(3).unwrap().score, 0.0);
    assert_eq!(t.participant(2).unwrap().score, 0.5);
    assert_eq!(t.participant(4).unwrap().score, 0.5);

    let encounter = &t.cycles[0].encounters[0];
    assert_eq!(encounter.result, EncounterResult::InitialWins);
    assert_eq!(encounter.initial_marker, 2.0);
    assert_eq!(encounter.final_marker, 1.0);
}

#[test]
fn correcting_a_result_replaces_the_previous_award() {
    let mut t = swiss_tournament(4);
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();

    record_result(&mut t, 1, 1, EncounterResult::InitialWins, 2.0, 1.0).unwrap();
    record_result(&mut t, 1, 1, EncounterResult::FinalWins, 1.0, 2.0).unwrap();

    assert_eq!(t.participant(1).unwrap().score, 0.0);
    assert_eq!(t.participant(3).unwrap().score, 1.0);
}

#[test]
fn record_result_rejects_unknown_cycle_or_encounter() {
    let mut t = swiss_tournament(4);
    let mut store = MemoryStore::new();
    start_tournament(&mut t, &mut store).unwrap();

    assert_eq!(
        record_result(&mut t, 9, 1, EncounterResult::Draw, 0.0, 0.0),
        Err(TournamentError::CycleNotFound(9))
    );
    assert_eq!(
        record_result(&mut t, 1, 9, EncounterResult::Draw, 0.0, 0.0),
        Err(TournamentError::EncounterNotFound { cycle: 1, number: 9 })
    );
}

#[test]
fn cycle_insert_failure_aborts_with_no_visible_state_change() {
    let mut t = swiss_tournament(4);
    let mut store = FailingStore { fail_insert_cycle: true, ..Default::default() };

    let err = start_tournament(&mut t, &mut store).unwrap_err();
    assert_eq!(
        err,
        TournamentError::Persistence(StoreError::new(StoreErrorKind::InsertCycle, "row not affected"))
    );
    assert_eq!(t.current_cycle, 0);
    assert!(t.cycles.is_empty());
}

#[test]
fn encounter_insert_failure_aborts_the_advance() {
    let mut t = swiss_tournament(4);
    let mut store = FailingStore { fail_insert_encounter: true, ..Default::default() };

    let err = start_tournament(&mut t, &mut store).unwrap_err();
    assert!(matches!(
        err,
        TournamentError::Persistence(StoreError { kind: StoreErrorKind::InsertEncounter, .. })
    ));
    // The cycle was never appended to the tournament.
    assert!(t.cycles.is_empty());
}

#[test]
fn pointer_update_failure_is_nonfatal() {
    let mut t = swiss_tournament(4);
    let mut store = FailingStore { fail_update_pointer: true, ..Default::default() };

    start_tournament(&mut t, &mut store).unwrap();
    assert_eq!(t.current_cycle, 1);
    assert_eq!(t.cycles.len(), 1);
}
