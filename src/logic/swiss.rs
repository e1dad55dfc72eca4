//! Swiss-system pairing: round count, first-cycle rank split, and
//! later-cycle score-group pairing with bye rotation.

use crate::models::{Encounter, Participant, Tournament, TournamentError};
use crate::storage::TournamentStore;

/// Encounters created for a cycle together with the roster order the engine
/// worked from. The caller installs the returned roster; pairing never
/// mutates shared state in place.
#[derive(Clone, Debug)]
pub struct PairingOutcome {
    pub roster: Vec<Participant>,
    pub encounters: Vec<Encounter>,
}

/// Number of cycles a Swiss tournament needs: floor(log2 n). Computed once
/// at tournament start and reused for its whole lifetime.
pub fn round_count(n: usize) -> u32 {
    if n == 0 {
        0
    } else {
        n.ilog2()
    }
}

/// Pair the first cycle: top half of the roster against the bottom half.
///
/// With `mitad = n/2`, position `i` meets position `i + mitad` for
/// `i = 1..=mitad`. If the bye sentinel is in the roster it is moved to the
/// end first and `mitad` shrinks by one; the sentinel then gets one extra
/// encounter against the participant left at the second-to-last position.
pub fn pair_first_cycle(
    tournament: &Tournament,
    cycle: u32,
    store: &mut dyn TournamentStore,
) -> Result<PairingOutcome, TournamentError> {
    let mut roster = tournament.participants.clone();
    let mut mitad = roster.len() / 2;

    let bye_pos = roster.iter().position(|p| tournament.is_bye(p));
    if let Some(pos) = bye_pos {
        let bye = roster.remove(pos);
        roster.push(bye);
        mitad = mitad.saturating_sub(1);
    }

    let mut encounters = Vec::new();
    for i in 1..=mitad {
        let initial = roster[i - 1].id;
        let final_ = roster[i - 1 + mitad].id;
        let encounter = Encounter::new(i as u32, initial, final_, cycle, tournament.start_date);
        store.insert_encounter(&encounter, cycle)?;
        store.update_participant_result(initial, cycle)?;
        store.update_participant_result(final_, cycle)?;
        encounters.push(encounter);
    }

    if bye_pos.is_some() && roster.len() >= 2 {
        let initial = roster[roster.len() - 2].id;
        let final_ = roster[roster.len() - 1].id;
        let encounter = Encounter::new(mitad as u32 + 1, initial, final_, cycle, tournament.start_date);
        store.insert_encounter(&encounter, cycle)?;
        store.update_participant_result(initial, cycle)?;
        store.update_participant_result(final_, cycle)?;
        encounters.push(encounter);
    }

    log::debug!("swiss cycle {}: {} encounters", cycle, encounters.len());
    Ok(PairingOutcome { roster, encounters })
}

/// Pair a cycle after the first: sort by score and pair within contiguous
/// equal-score groups.
///
/// The roster is stably sorted descending by accumulated score. When the bye
/// sentinel is present, the participants holding the lowest score seen from
/// the front of the sorted roster through the sentinel are moved to the end
/// in reversed relative order, followed by the sentinel itself; this rotates
/// which low scorer receives the bye across cycles.
///
/// Each equal-score group of size `cont` produces `ceil(cont/2)` pairs of
/// `(pos + j, pos + half + j)`. An odd group's last pair reaches one slot
/// past the group and the scan resumes one slot further, so the remainder is
/// taken from the next group's front; there is no cross-group pairing beyond
/// that. A missing partner at the very end of the roster leaves that
/// participant unpaired for the cycle.
pub fn pair_later_cycle(
    tournament: &Tournament,
    cycle: u32,
    store: &mut dyn TournamentStore,
) -> Result<PairingOutcome, TournamentError> {
    let mut roster = tournament.participants.clone();
    roster.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut seen_scores: Vec<f64> = Vec::new();
    let mut bye_pos = None;
    for (idx, p) in roster.iter().enumerate() {
        if !seen_scores.contains(&p.score) {
            seen_scores.push(p.score);
        }
        if tournament.is_bye(p) {
            bye_pos = Some(idx);
            break;
        }
    }

    if let Some(pos) = bye_pos {
        let bye = roster.remove(pos);
        let lowest = seen_scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mut lowest_group: Vec<Participant> = roster
            .iter()
            .filter(|p| p.score == lowest)
            .cloned()
            .collect();
        roster.retain(|p| p.score != lowest);
        lowest_group.reverse();
        roster.append(&mut lowest_group);
        roster.push(bye);
    }

    let mut encounters = Vec::new();
    let mut num: u32 = 1;
    let mut pos = 0;
    while pos < roster.len() {
        let score = roster[pos].score;
        let mut fin = pos + 1;
        while fin < roster.len() && roster[fin].score == score {
            fin += 1;
        }
        let cont = fin - pos;
        let half = cont / 2 + cont % 2;

        for _ in 0..half {
            let final_ = match roster.get(pos + half) {
                Some(p) => p.id,
                None => break,
            };
            let initial = roster[pos].id;
            let encounter = Encounter::new(num, initial, final_, cycle, tournament.start_date);
            store.insert_encounter(&encounter, cycle)?;
            store.update_participant_result(initial, cycle)?;
            store.update_participant_result(final_, cycle)?;
            encounters.push(encounter);
            num += 1;
            pos += 1;
        }
        pos += half;
    }

    log::debug!("swiss cycle {}: {} encounters", cycle, encounters.len());
    Ok(PairingOutcome { roster, encounters })
}
