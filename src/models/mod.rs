//! Data structures for the pairing engine: participants, encounters, cycles, tournaments.

mod cycle;
mod encounter;
mod participant;
mod tournament;

pub use cycle::Cycle;
pub use encounter::{Encounter, EncounterResult};
pub use participant::{Participant, ParticipantId};
pub use tournament::{PairingSystem, Tournament, TournamentError, TournamentId};
