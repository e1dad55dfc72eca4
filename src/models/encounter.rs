//! Encounter (a single pairing within a cycle) and its result codes.

use crate::models::participant::ParticipantId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Outcome of an encounter, from the initial participant's side.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterResult {
    /// No result captured yet.
    #[default]
    NotPlayed,
    InitialWins,
    FinalWins,
    Draw,
}

/// A single scheduled/played pairing between two participants (or one
/// participant and the bye sentinel) within a cycle.
///
/// References participants by id only; an encounter always names two distinct
/// participants except when one side is the designated bye sentinel. Mutated
/// in place when a result is recorded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Encounter {
    /// Sequence number, restarting at 1 each cycle and unique within it.
    pub number: u32,
    pub initial: ParticipantId,
    #[serde(rename = "final")]
    pub final_: ParticipantId,
    /// Owning cycle number (1-based).
    pub cycle: u32,
    pub result: EncounterResult,
    /// Score achieved by the initial participant.
    pub initial_marker: f64,
    /// Score achieved by the final participant.
    pub final_marker: f64,
    pub date: NaiveDate,
}

impl Encounter {
    /// Build an encounter for a cycle: not yet played, zero markers.
    pub fn new(number: u32, initial: ParticipantId, final_: ParticipantId, cycle: u32, date: NaiveDate) -> Self {
        Self {
            number,
            initial,
            final_,
            cycle,
            result: EncounterResult::NotPlayed,
            initial_marker: 0.0,
            final_marker: 0.0,
            date,
        }
    }

    /// Whether the given participant took part in this encounter.
    pub fn involves(&self, id: ParticipantId) -> bool {
        self.initial == id || self.final_ == id
    }

    /// The other side of this encounter, if `id` took part in it.
    pub fn opponent_of(&self, id: ParticipantId) -> Option<ParticipantId> {
        if self.initial == id {
            Some(self.final_)
        } else if self.final_ == id {
            Some(self.initial)
        } else {
            None
        }
    }

    /// The winner's id, or `None` for a draw or an unplayed encounter.
    pub fn winner(&self) -> Option<ParticipantId> {
        match self.result {
            EncounterResult::InitialWins => Some(self.initial),
            EncounterResult::FinalWins => Some(self.final_),
            EncounterResult::NotPlayed | EncounterResult::Draw => None,
        }
    }

    /// Marker scored by `id` in this encounter (0.0 if not involved).
    pub fn marker_for(&self, id: ParticipantId) -> f64 {
        if self.initial == id {
            self.initial_marker
        } else if self.final_ == id {
            self.final_marker
        } else {
            0.0
        }
    }

    /// Marker scored against `id` in this encounter (0.0 if not involved).
    pub fn marker_against(&self, id: ParticipantId) -> f64 {
        if self.initial == id {
            self.final_marker
        } else if self.final_ == id {
            self.initial_marker
        } else {
            0.0
        }
    }
}
