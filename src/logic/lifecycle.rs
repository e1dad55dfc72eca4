//! Cycle lifecycle: start, advance, and completion checks.
//!
//! Persistence failure policy (applied uniformly, never swallowed):
//! - cycle insert failure aborts before any visible state change;
//! - encounter insert and participant update failures abort the advance
//!   (rows persisted before the failure stay persisted, no rollback);
//! - current-cycle pointer update is best-effort: failure is logged as a
//!   warning and the advance still succeeds.

use crate::logic::{elimination, swiss};
use crate::models::{Cycle, PairingSystem, Tournament, TournamentError};
use crate::storage::TournamentStore;

/// Start the tournament: validate the roster size for the selected system,
/// compute and pin the total cycle count, then advance into cycle 1.
pub fn start_tournament(
    tournament: &mut Tournament,
    store: &mut dyn TournamentStore,
) -> Result<(), TournamentError> {
    let minimum = tournament.system.minimum_participants();
    let actual = tournament.participants.len();
    if actual < minimum {
        return Err(TournamentError::InvalidParticipantCount { minimum, actual });
    }
    tournament.planned_cycles = tournament.system.round_count(actual);
    tournament.current_cycle = 0;
    tournament.cycles.clear();
    advance_cycle(tournament, store)
}

/// Advance to the next cycle: create and persist the cycle, delegate to the
/// active pairing engine, and update the stored cycle pointer.
///
/// For Swiss tournaments this is a no-op once the planned cycle count has
/// been reached. Elimination brackets are regenerated each call from the
/// current roster, so the caller decides when the bracket is exhausted.
pub fn advance_cycle(
    tournament: &mut Tournament,
    store: &mut dyn TournamentStore,
) -> Result<(), TournamentError> {
    if tournament.system == PairingSystem::Swiss
        && tournament.current_cycle >= tournament.planned_cycles
    {
        return Ok(());
    }

    let next = tournament.current_cycle + 1;
    let mut cycle = Cycle::new(next);
    // Pointer advances only after the insert succeeds, so a failure here
    // leaves no visible state change.
    store.insert_cycle(&cycle)?;
    tournament.current_cycle = next;

    let encounters = match tournament.system {
        PairingSystem::Swiss => {
            let outcome = if next == 1 {
                swiss::pair_first_cycle(tournament, next, store)?
            } else {
                swiss::pair_later_cycle(tournament, next, store)?
            };
            tournament.participants = outcome.roster;
            outcome.encounters
        }
        PairingSystem::Elimination { simple, .. } => {
            elimination::pair_cycle(tournament, next, simple, store)?
        }
    };

    cycle.encounters = encounters;
    tournament.cycles.push(cycle);

    if let Err(e) = store.update_current_cycle(tournament) {
        log::warn!("current-cycle pointer update failed (non-fatal): {}", e);
    }
    log::info!(
        "tournament '{}' advanced to cycle {}/{}",
        tournament.name,
        tournament.current_cycle,
        tournament.planned_cycles
    );
    Ok(())
}

/// Whether every encounter of the current cycle has a captured result.
///
/// Swiss scans the encounter results. Elimination reports per its
/// `track_completion` flag: off (the default) reports every cycle complete,
/// on runs the same scan Swiss uses.
pub fn is_current_cycle_complete(tournament: &Tournament) -> Result<bool, TournamentError> {
    let cycle = tournament.current().ok_or(TournamentError::NotStarted)?;
    match tournament.system {
        PairingSystem::Swiss => Ok(cycle.is_complete()),
        PairingSystem::Elimination { track_completion, .. } => {
            Ok(!track_completion || cycle.is_complete())
        }
    }
}
