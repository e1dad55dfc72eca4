//! Single/double elimination pairing: round count, bye consumption, and
//! front-vs-back bracket pairing regenerated each cycle from the current
//! roster.

use crate::models::{Encounter, Tournament, TournamentError};
use crate::storage::TournamentStore;

/// Number of cycles an elimination tournament needs: ceil(log2 n), doubled
/// for double elimination. One participant is a degenerate zero-round
/// bracket.
pub fn round_count(n: usize, simple: bool) -> u32 {
    let base = if n <= 1 { 0 } else { (n - 1).ilog2() + 1 };
    if simple {
        base
    } else {
        base * 2
    }
}

/// Byes owed to a non-power-of-two field: the slots missing up to the full
/// bracket, `2^round_count(n) - n`. Zero for a power-of-two field.
pub fn bye_count(n: usize, simple: bool) -> i64 {
    if n == 0 || n.is_power_of_two() {
        0
    } else {
        (1i64 << round_count(n, simple)) - n as i64
    }
}

/// Pair one elimination cycle from the current roster order.
///
/// Positions `1..=total` (where `total = (n - byes)/2 + byes`) are walked in
/// order; byes are consumed first, decrementing the bye counter before any
/// pairing happens, then the front cursor meets the back cursor. Double
/// elimination runs a mirrored second pass (back-to-front against
/// front-to-back) for the losers' half with an independent bye counter;
/// its sequence numbers continue after the first pass so numbers stay unique
/// within the cycle.
///
/// Both participants of every created encounter are marked as having a
/// result pending through the store.
pub fn pair_cycle(
    tournament: &Tournament,
    cycle: u32,
    simple: bool,
    store: &mut dyn TournamentStore,
) -> Result<Vec<Encounter>, TournamentError> {
    let roster = &tournament.participants;
    let n = roster.len();
    let byes = bye_count(n, simple);
    let total = (n as i64 - byes) / 2 + byes;

    let mut encounters = Vec::new();
    let mut remaining_byes = byes;
    let mut back = 0;
    for i in 1..=total.max(0) {
        if remaining_byes > 0 {
            remaining_byes -= 1;
            continue;
        }
        let initial = roster[i as usize - 1].id;
        let final_ = roster[n - 1 - back].id;
        back += 1;
        let encounter = Encounter::new(i as u32, initial, final_, cycle, tournament.start_date);
        store.insert_encounter(&encounter, cycle)?;
        store.update_participant_result(initial, cycle)?;
        store.update_participant_result(final_, cycle)?;
        encounters.push(encounter);
    }

    if !simple {
        // Mirrored pass for the losers' bracket half.
        let mut remaining_byes = byes;
        let mut back = 0;
        for i in 1..=total.max(0) {
            if remaining_byes > 0 {
                remaining_byes -= 1;
                continue;
            }
            let initial = roster[n - 1 - back].id;
            let final_ = roster[i as usize - 1].id;
            back += 1;
            let number = (total + i) as u32;
            let encounter = Encounter::new(number, initial, final_, cycle, tournament.start_date);
            store.insert_encounter(&encounter, cycle)?;
            store.update_participant_result(initial, cycle)?;
            store.update_participant_result(final_, cycle)?;
            encounters.push(encounter);
        }
    }

    log::debug!(
        "elimination cycle {}: {} encounters, {} byes",
        cycle,
        encounters.len(),
        byes
    );
    Ok(encounters)
}
