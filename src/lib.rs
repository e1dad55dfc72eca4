//! Tournament pairing and standings engine: library with models, pairing
//! engines, tie-break resolution, and the persistence contract.

pub mod logic;
pub mod models;
pub mod roster;
pub mod storage;

pub use logic::{
    advance_cycle, is_current_cycle_complete, record_result, resolve_ties,
    resolve_ties_full_sort, start_tournament, PairingOutcome,
};
pub use models::{
    Cycle, Encounter, EncounterResult, PairingSystem, Participant, ParticipantId, Tournament,
    TournamentError, TournamentId,
};
pub use roster::{read_roster, read_roster_from, write_template, write_template_to, RosterEntry};
pub use storage::{MemoryStore, StoreError, StoreErrorKind, TournamentStore};
