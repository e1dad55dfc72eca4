//! Tie-break criterion chain: a registry of named comparison rules applied
//! in the operator's chosen order until one yields a decisive winner.

use crate::models::{Encounter, EncounterResult, Participant, ParticipantId};
use std::cmp::Ordering;

/// Everything a criterion may consult when resolving one tied pair.
pub struct TieBreakInput<'a> {
    pub first: &'a Participant,
    pub second: &'a Participant,
    pub roster: &'a [Participant],
    /// Full encounter history across all cycles.
    pub encounters: &'a [Encounter],
    /// Cycles realized so far (Koya threshold input).
    pub cycles_played: usize,
    /// Points a win is worth (Koya threshold input).
    pub win_points: f64,
}

type ResolveFn = fn(&TieBreakInput<'_>) -> Option<ParticipantId>;

/// A named tie-break criterion. Criteria are independent strategies sharing
/// one comparison contract; they are selected by name from [`REGISTRY`].
pub struct Criterion {
    pub name: &'static str,
    resolve: ResolveFn,
}

impl Criterion {
    /// Winner of the tied pair under this criterion, or `None` to defer to
    /// the next criterion in the chain.
    pub fn resolve(&self, input: &TieBreakInput<'_>) -> Option<ParticipantId> {
        (self.resolve)(input)
    }
}

/// All recognized criteria, dispatchable by name.
pub const REGISTRY: &[Criterion] = &[
    Criterion { name: "head_to_head", resolve: head_to_head },
    Criterion { name: "sonneborn_berger", resolve: sonneborn_berger },
    Criterion { name: "buchholz", resolve: buchholz },
    Criterion { name: "koya", resolve: koya },
    Criterion { name: "encounters_won", resolve: encounters_won },
    Criterion { name: "marker_differential", resolve: marker_differential },
    Criterion { name: "markers_for", resolve: markers_for },
    Criterion { name: "markers_against", resolve: markers_against },
];

/// Look up a criterion by its registered name.
pub fn criterion(name: &str) -> Option<&'static Criterion> {
    REGISTRY.iter().find(|c| c.name == name)
}

/// Re-rank a tied roster by applying the criterion chain to every pair.
///
/// Returns a new ordering; the input is never mutated. Every pair of
/// equal-score participants is visited in nested roster order (including
/// re-visits as the order shifts); the first criterion returning a winner
/// stops the chain for that pair and applies a single adjacent-position
/// correction: the winner is swapped one slot up only when it currently sits
/// immediately after the other tied participant. A pair no criterion
/// resolves is left as is. A single full sweep is idempotent.
pub fn resolve_ties(
    roster: &[Participant],
    encounters: &[Encounter],
    criteria: &[String],
    cycles_played: usize,
    win_points: f64,
) -> Vec<Participant> {
    let mut ordered = roster.to_vec();
    for i in 0..ordered.len() {
        for j in 0..ordered.len() {
            if ordered[i].score != ordered[j].score || ordered[i].id == ordered[j].id {
                continue;
            }
            let first = ordered[i].clone();
            let second = ordered[j].clone();
            let winner = {
                let input = TieBreakInput {
                    first: &first,
                    second: &second,
                    roster: &ordered,
                    encounters,
                    cycles_played,
                    win_points,
                };
                let mut winner = None;
                for name in criteria {
                    let Some(c) = criterion(name) else { continue };
                    if let Some(id) = c.resolve(&input) {
                        winner = Some(id);
                        break;
                    }
                }
                winner
            };
            if let Some(winner) = winner {
                swap_if_adjacent(&mut ordered, first.id, second.id, winner);
            }
        }
    }
    ordered
}

/// Alternate mode: a full stable resort by score, breaking equal scores with
/// the criterion chain. This is NOT the default behavior; `resolve_ties`
/// performs only the adjacent-swap correction.
pub fn resolve_ties_full_sort(
    roster: &[Participant],
    encounters: &[Encounter],
    criteria: &[String],
    cycles_played: usize,
    win_points: f64,
) -> Vec<Participant> {
    let snapshot = roster.to_vec();
    let mut ordered = roster.to_vec();
    ordered.sort_by(|a, b| {
        b.score.total_cmp(&a.score).then_with(|| {
            let input = TieBreakInput {
                first: a,
                second: b,
                roster: &snapshot,
                encounters,
                cycles_played,
                win_points,
            };
            for name in criteria {
                let Some(c) = criterion(name) else { continue };
                match c.resolve(&input) {
                    Some(id) if id == a.id => return Ordering::Less,
                    Some(id) if id == b.id => return Ordering::Greater,
                    _ => {}
                }
            }
            Ordering::Equal
        })
    });
    ordered
}

/// Swap the winner one position up, but only when it is found after the
/// other tied participant and sits immediately behind it.
fn swap_if_adjacent(ordered: &mut [Participant], a: ParticipantId, b: ParticipantId, winner: ParticipantId) {
    let mut found = false;
    for idx in 0..ordered.len() {
        let pid = ordered[idx].id;
        if pid == a || pid == b {
            if found && pid == winner {
                let other = if winner == a { b } else { a };
                if idx > 0 && ordered[idx - 1].id == other {
                    ordered.swap(idx, idx - 1);
                }
            }
            found = true;
        }
    }
}

fn decide(first: &Participant, second: &Participant, a: f64, b: f64) -> Option<ParticipantId> {
    match a.total_cmp(&b) {
        Ordering::Greater => Some(first.id),
        Ordering::Less => Some(second.id),
        Ordering::Equal => None,
    }
}

fn score_of(roster: &[Participant], id: ParticipantId) -> f64 {
    roster.iter().find(|p| p.id == id).map_or(0.0, |p| p.score)
}

fn played(e: &Encounter) -> bool {
    e.result != EncounterResult::NotPlayed
}

/// Result weight from `id`'s perspective: 1 for a win, 0.5 for a draw, 0 for
/// a loss or an unplayed encounter.
fn result_weight(e: &Encounter, id: ParticipantId) -> f64 {
    match e.result {
        EncounterResult::Draw => 0.5,
        _ => match e.winner() {
            Some(w) if w == id => 1.0,
            _ => 0.0,
        },
    }
}

/// Direct result between the two tied participants; a draw or an unplayed
/// encounter defers.
fn head_to_head(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let (a, b) = (input.first.id, input.second.id);
    input
        .encounters
        .iter()
        .filter(|e| e.opponent_of(a) == Some(b))
        .find_map(|e| e.winner())
}

/// Sum of opponents' scores weighted by the result obtained against them.
fn sonneborn_berger(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let total = |id: ParticipantId| {
        input
            .encounters
            .iter()
            .filter(|e| played(e))
            .filter_map(|e| e.opponent_of(id).map(|opp| (e, opp)))
            .map(|(e, opp)| score_of(input.roster, opp) * result_weight(e, id))
            .sum::<f64>()
    };
    decide(input.first, input.second, total(input.first.id), total(input.second.id))
}

/// Sum of all opponents' scores.
fn buchholz(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let total = |id: ParticipantId| {
        input
            .encounters
            .iter()
            .filter(|e| played(e))
            .filter_map(|e| e.opponent_of(id))
            .map(|opp| score_of(input.roster, opp))
            .sum::<f64>()
    };
    decide(input.first, input.second, total(input.first.id), total(input.second.id))
}

/// Koya system: sum of the scores of opponents who themselves reached at
/// least 50% of the maximum possible score.
fn koya(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let threshold = 0.5 * input.cycles_played as f64 * input.win_points;
    let total = |id: ParticipantId| {
        input
            .encounters
            .iter()
            .filter(|e| played(e))
            .filter_map(|e| e.opponent_of(id))
            .map(|opp| score_of(input.roster, opp))
            .filter(|&s| s >= threshold)
            .sum::<f64>()
    };
    decide(input.first, input.second, total(input.first.id), total(input.second.id))
}

/// Total encounters won.
fn encounters_won(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let total = |id: ParticipantId| {
        input
            .encounters
            .iter()
            .filter(|e| e.winner() == Some(id))
            .count() as f64
    };
    decide(input.first, input.second, total(input.first.id), total(input.second.id))
}

/// Markers scored minus markers conceded.
fn marker_differential(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let total = |id: ParticipantId| {
        input
            .encounters
            .iter()
            .filter(|e| played(e) && e.involves(id))
            .map(|e| e.marker_for(id) - e.marker_against(id))
            .sum::<f64>()
    };
    decide(input.first, input.second, total(input.first.id), total(input.second.id))
}

/// Raw markers scored.
fn markers_for(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let total = |id: ParticipantId| {
        input
            .encounters
            .iter()
            .filter(|e| played(e) && e.involves(id))
            .map(|e| e.marker_for(id))
            .sum::<f64>()
    };
    decide(input.first, input.second, total(input.first.id), total(input.second.id))
}

/// Raw markers conceded; fewer wins the tie.
fn markers_against(input: &TieBreakInput<'_>) -> Option<ParticipantId> {
    let total = |id: ParticipantId| {
        input
            .encounters
            .iter()
            .filter(|e| played(e) && e.involves(id))
            .map(|e| e.marker_against(id))
            .sum::<f64>()
    };
    // Reversed arguments: the lower total wins.
    decide(input.first, input.second, total(input.second.id), total(input.first.id))
}
