//! Cycle (round): one complete set of encounters for a round number.

use crate::models::encounter::{Encounter, EncounterResult};
use serde::{Deserialize, Serialize};

/// One round of the tournament: 1-based number plus the ordered encounters
/// created for it. The encounter set is fixed after creation; only results
/// are updated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cycle {
    pub number: u32,
    pub encounters: Vec<Encounter>,
}

impl Cycle {
    /// Create an empty cycle with the given number.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            encounters: Vec::new(),
        }
    }

    /// A cycle is complete iff every encounter has a captured result.
    pub fn is_complete(&self) -> bool {
        self.encounters
            .iter()
            .all(|e| e.result != EncounterResult::NotPlayed)
    }
}
