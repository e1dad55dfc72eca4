//! Tournament pairing logic: pairing engines, tie-breaks, cycle lifecycle.

pub mod elimination;
pub mod lifecycle;
pub mod results;
pub mod swiss;
pub mod tiebreak;

pub use lifecycle::{advance_cycle, is_current_cycle_complete, start_tournament};
pub use results::record_result;
pub use swiss::PairingOutcome;
pub use tiebreak::{resolve_ties, resolve_ties_full_sort, Criterion, TieBreakInput, REGISTRY};
