//! Result capture: record an encounter's outcome and award points.

use crate::models::{EncounterResult, Tournament, TournamentError};

/// Record a result for an encounter of a cycle: sets the result code and the
/// two markers in place and awards points to both participants per the
/// tournament's configured point values.
///
/// Re-recording replaces the previous award before applying the new one, so
/// scores stay consistent when a result is corrected.
pub fn record_result(
    tournament: &mut Tournament,
    cycle_number: u32,
    encounter_number: u32,
    result: EncounterResult,
    initial_marker: f64,
    final_marker: f64,
) -> Result<(), TournamentError> {
    let (initial, final_, previous) = {
        let cycle = tournament
            .cycle_mut(cycle_number)
            .ok_or(TournamentError::CycleNotFound(cycle_number))?;
        let encounter = cycle
            .encounters
            .iter_mut()
            .find(|e| e.number == encounter_number)
            .ok_or(TournamentError::EncounterNotFound {
                cycle: cycle_number,
                number: encounter_number,
            })?;
        let previous = encounter.result;
        encounter.result = result;
        encounter.initial_marker = initial_marker;
        encounter.final_marker = final_marker;
        (encounter.initial, encounter.final_, previous)
    };

    let (new_initial, new_final) = awards(tournament, result);
    let (old_initial, old_final) = awards(tournament, previous);

    tournament
        .participant_mut(initial)
        .ok_or(TournamentError::ParticipantNotFound(initial))?
        .add_points(new_initial - old_initial);
    tournament
        .participant_mut(final_)
        .ok_or(TournamentError::ParticipantNotFound(final_))?
        .add_points(new_final - old_final);
    Ok(())
}

/// Point awards (initial side, final side) for a result code.
fn awards(tournament: &Tournament, result: EncounterResult) -> (f64, f64) {
    match result {
        EncounterResult::NotPlayed => (0.0, 0.0),
        EncounterResult::InitialWins => (tournament.win_points, tournament.loss_points),
        EncounterResult::FinalWins => (tournament.loss_points, tournament.win_points),
        EncounterResult::Draw => (tournament.draw_points, tournament.draw_points),
    }
}
