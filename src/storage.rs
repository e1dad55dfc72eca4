//! Persistence collaborator: the contract the pairing core writes through,
//! plus an in-memory implementation for the web binary and tests.
//!
//! Durable engines and schemas are out of scope here; the core only relies on
//! each call either succeeding or failing as a unit.

use crate::models::{Cycle, Encounter, ParticipantId, Tournament};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which storage operation failed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorKind {
    InsertEncounter,
    InsertCycle,
    UpdateCurrentCycle,
    UpdateParticipant,
    ListEncounters,
}

/// A failed storage call: the operation kind plus a short detail string.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub detail: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let op = match self.kind {
            StoreErrorKind::InsertEncounter => "insert encounter",
            StoreErrorKind::InsertCycle => "insert cycle",
            StoreErrorKind::UpdateCurrentCycle => "update current cycle",
            StoreErrorKind::UpdateParticipant => "update participant result",
            StoreErrorKind::ListEncounters => "list encounters",
        };
        write!(f, "{} failed: {}", op, self.detail)
    }
}

/// Storage contract consumed by the pairing core.
///
/// Each call is atomic from the core's point of view: it succeeds or fails,
/// and the core never retries. Failure policy (abort vs best-effort) is
/// decided by the lifecycle manager, not here.
pub trait TournamentStore {
    /// Persist a newly created encounter for a cycle. Failure means the row
    /// was not written and aborts the in-progress pairing operation.
    fn insert_encounter(&mut self, encounter: &Encounter, cycle: u32) -> Result<(), StoreError>;

    /// Mark a participant as having a result pending for the cycle. Called
    /// once per participant per created encounter.
    fn update_participant_result(&mut self, participant: ParticipantId, cycle: u32) -> Result<(), StoreError>;

    /// Persist a newly created (still empty) cycle.
    fn insert_cycle(&mut self, cycle: &Cycle) -> Result<(), StoreError>;

    /// Persist the tournament's current-cycle pointer.
    fn update_current_cycle(&mut self, tournament: &Tournament) -> Result<(), StoreError>;

    /// All persisted encounters of a cycle, in insertion order.
    fn list_encounters(&self, cycle: u32) -> Result<Vec<Encounter>, StoreError>;
}

/// Hash-map backed store. One instance per tournament.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    encounters: HashMap<u32, Vec<Encounter>>,
    cycles: HashSet<u32>,
    pending: HashMap<u32, Vec<ParticipantId>>,
    current_cycle: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Participants marked as having a pending result for a cycle (used to
    /// detect missing results).
    pub fn pending_results(&self, cycle: u32) -> &[ParticipantId] {
        self.pending.get(&cycle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Last current-cycle pointer written through `update_current_cycle`.
    pub fn stored_current_cycle(&self) -> u32 {
        self.current_cycle
    }
}

impl TournamentStore for MemoryStore {
    fn insert_encounter(&mut self, encounter: &Encounter, cycle: u32) -> Result<(), StoreError> {
        let rows = self.encounters.entry(cycle).or_default();
        if rows.iter().any(|e| e.number == encounter.number) {
            return Err(StoreError::new(
                StoreErrorKind::InsertEncounter,
                format!("encounter {} already exists in cycle {}", encounter.number, cycle),
            ));
        }
        rows.push(encounter.clone());
        Ok(())
    }

    fn update_participant_result(&mut self, participant: ParticipantId, cycle: u32) -> Result<(), StoreError> {
        self.pending.entry(cycle).or_default().push(participant);
        Ok(())
    }

    fn insert_cycle(&mut self, cycle: &Cycle) -> Result<(), StoreError> {
        if !self.cycles.insert(cycle.number) {
            return Err(StoreError::new(
                StoreErrorKind::InsertCycle,
                format!("cycle {} already exists", cycle.number),
            ));
        }
        Ok(())
    }

    fn update_current_cycle(&mut self, tournament: &Tournament) -> Result<(), StoreError> {
        self.current_cycle = tournament.current_cycle;
        Ok(())
    }

    fn list_encounters(&self, cycle: u32) -> Result<Vec<Encounter>, StoreError> {
        Ok(self.encounters.get(&cycle).cloned().unwrap_or_default())
    }
}
