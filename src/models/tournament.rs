//! Tournament aggregate, pairing system selection, and TournamentError.

use crate::models::cycle::Cycle;
use crate::models::encounter::Encounter;
use crate::models::participant::{Participant, ParticipantId};
use crate::storage::StoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, PartialEq)]
pub enum TournamentError {
    /// Too few participants for the selected pairing system.
    InvalidParticipantCount { minimum: usize, actual: usize },
    /// A storage collaborator call failed (kind identifies the operation).
    Persistence(StoreError),
    /// Roster file header does not match the expected two-column layout.
    MalformedRosterFile,
    /// I/O failure while reading or writing a roster file.
    RosterIo(String),
    /// A participant with this name already exists (names are unique, case-insensitive).
    DuplicateParticipantName,
    /// Participant name is empty or blank.
    InvalidParticipantName,
    /// Participant not found in the roster.
    ParticipantNotFound(ParticipantId),
    /// No cycle with this number exists.
    CycleNotFound(u32),
    /// No encounter with this sequence number exists in the cycle.
    EncounterNotFound { cycle: u32, number: u32 },
    /// The tournament has not been started yet.
    NotStarted,
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::InvalidParticipantCount { minimum, actual } => {
                write!(f, "Need at least {} participants (have {})", minimum, actual)
            }
            TournamentError::Persistence(e) => write!(f, "Storage failure: {}", e),
            TournamentError::MalformedRosterFile => {
                write!(f, "Roster file must have exactly the two columns Name,Score")
            }
            TournamentError::RosterIo(msg) => write!(f, "Roster file error: {}", msg),
            TournamentError::DuplicateParticipantName => {
                write!(f, "A participant with this name already exists")
            }
            TournamentError::InvalidParticipantName => write!(f, "Participant name is empty"),
            TournamentError::ParticipantNotFound(_) => write!(f, "Participant not found"),
            TournamentError::CycleNotFound(n) => write!(f, "Cycle {} not found", n),
            TournamentError::EncounterNotFound { cycle, number } => {
                write!(f, "Encounter {} not found in cycle {}", number, cycle)
            }
            TournamentError::NotStarted => write!(f, "Tournament has not been started"),
        }
    }
}

impl From<StoreError> for TournamentError {
    fn from(e: StoreError) -> Self {
        TournamentError::Persistence(e)
    }
}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Selected pairing strategy.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PairingSystem {
    /// Swiss system: floor(log2 n) cycles, score-group pairing.
    Swiss,
    /// Single or double elimination: ceil(log2 n) cycles, doubled for double.
    Elimination {
        /// true = single elimination, false = double (two mirrored bracket halves).
        simple: bool,
        /// Whether cycle completion scans encounter results. Off by default:
        /// elimination completion tracking is an unfinished feature upstream,
        /// so the stock behavior reports every cycle complete.
        #[serde(default)]
        track_completion: bool,
    },
}

impl PairingSystem {
    /// Total number of cycles this system needs for `n` participants.
    pub fn round_count(&self, n: usize) -> u32 {
        match self {
            PairingSystem::Swiss => crate::logic::swiss::round_count(n),
            PairingSystem::Elimination { simple, .. } => {
                crate::logic::elimination::round_count(n, *simple)
            }
        }
    }

    /// Minimum roster size the system accepts at start.
    pub fn minimum_participants(&self) -> usize {
        match self {
            PairingSystem::Swiss => 1,
            PairingSystem::Elimination { .. } => 2,
        }
    }
}

/// Full tournament state: roster (order carries the ranking), realized
/// cycles, pairing system, tie-break chain, and the bye sentinel name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub start_date: NaiveDate,
    pub system: PairingSystem,
    /// Ordered roster; position is the current ranking.
    pub participants: Vec<Participant>,
    /// Realized cycles, in order.
    pub cycles: Vec<Cycle>,
    /// 0 before the tournament starts.
    pub current_cycle: u32,
    /// Total cycles, computed once at start (never recomputed per round).
    pub planned_cycles: u32,
    /// Ordered tie-break criterion names (see `logic::tiebreak::REGISTRY`).
    pub tie_breakers: Vec<String>,
    /// Name of the pseudo-participant that stands in for "no opponent".
    pub bye_name: String,
    /// Points awarded per encounter result.
    pub win_points: f64,
    pub draw_points: f64,
    pub loss_points: f64,
    next_participant_id: ParticipantId,
}

impl Tournament {
    /// Create a tournament with an empty roster, not yet started.
    pub fn new(
        name: impl Into<String>,
        system: PairingSystem,
        start_date: NaiveDate,
        bye_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start_date,
            system,
            participants: Vec::new(),
            cycles: Vec::new(),
            current_cycle: 0,
            planned_cycles: 0,
            tie_breakers: Vec::new(),
            bye_name: bye_name.into(),
            win_points: 1.0,
            draw_points: 0.5,
            loss_points: 0.0,
            next_participant_id: 1,
        }
    }

    /// Register a participant with score zero. Names must be non-blank and
    /// unique (case-insensitive). Returns the assigned id.
    pub fn add_participant(&mut self, name: impl Into<String>) -> Result<ParticipantId, TournamentError> {
        self.add_participant_with_score(name, 0.0)
    }

    /// Register a participant with a starting score (roster import).
    pub fn add_participant_with_score(
        &mut self,
        name: impl Into<String>,
        score: f64,
    ) -> Result<ParticipantId, TournamentError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(TournamentError::InvalidParticipantName);
        }
        let is_duplicate = self
            .participants
            .iter()
            .any(|p| p.name.eq_ignore_ascii_case(trimmed));
        if is_duplicate {
            return Err(TournamentError::DuplicateParticipantName);
        }
        let id = self.next_participant_id;
        self.next_participant_id += 1;
        self.participants.push(Participant::with_score(id, trimmed, score));
        Ok(id)
    }

    /// Look up a participant by id.
    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    /// Mutable reference to a participant by id.
    pub fn participant_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id == id)
    }

    /// Whether this participant is the designated bye sentinel (matched by
    /// name, case-insensitive).
    pub fn is_bye(&self, participant: &Participant) -> bool {
        participant.name.eq_ignore_ascii_case(&self.bye_name)
    }

    /// Every encounter created so far, across all cycles, in order.
    pub fn all_encounters(&self) -> Vec<Encounter> {
        self.cycles
            .iter()
            .flat_map(|c| c.encounters.iter().cloned())
            .collect()
    }

    /// The cycle currently in progress, if the tournament has started.
    pub fn current(&self) -> Option<&Cycle> {
        if self.current_cycle == 0 {
            return None;
        }
        self.cycles.iter().find(|c| c.number == self.current_cycle)
    }

    /// Mutable reference to a cycle by number.
    pub fn cycle_mut(&mut self, number: u32) -> Option<&mut Cycle> {
        self.cycles.iter_mut().find(|c| c.number == number)
    }
}
