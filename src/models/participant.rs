//! Participant data structure.

use serde::{Deserialize, Serialize};

/// Identifier for a participant within a tournament. Assigned at registration
/// from a per-tournament counter; never reused, never changed across cycles.
pub type ParticipantId = u32;

/// A participant in the tournament. Roster position carries ranking meaning;
/// tie-break statistics are derived from the encounter history on demand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    /// Accumulated score: sum of per-encounter point awards.
    pub score: f64,
}

impl Participant {
    /// Create a participant with the given id and name, score zero.
    pub fn new(id: ParticipantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            score: 0.0,
        }
    }

    /// Create a participant with a starting score (e.g. imported from a roster file).
    pub fn with_score(id: ParticipantId, name: impl Into<String>, score: f64) -> Self {
        Self {
            id,
            name: name.into(),
            score,
        }
    }

    /// Award points to this participant (win, draw, or loss value).
    pub fn add_points(&mut self, points: f64) {
        self.score += points;
    }
}
