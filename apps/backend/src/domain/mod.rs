//! Domain layer: pure game logic types and helpers.

pub mod claims;
pub mod dealing;
pub mod groups;
pub mod hand_analysis;
pub mod player_view;
pub mod round;
pub mod rules;
pub mod scoring;
pub mod seed_derivation;
pub mod snapshot;
pub mod state;
pub mod table_transition;
pub mod tiles_logic;
pub mod tiles_parsing;
pub mod tiles_types;
pub mod turns;
pub mod winning;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
pub(crate) mod test_state_helpers;
#[cfg(test)]
mod tests_props_rules;
#[cfg(test)]
mod tests_turns;

// Re-exports for ergonomics
pub use groups::{is_valid_group, is_valid_run, is_valid_set};
pub use hand_analysis::{analyze_hand, HandAnalysis, SearchBudget};
pub use player_view::SeatView;
pub use scoring::{calculate_score, RoundOutcome, RoundWin, WinKind};
pub use seed_derivation::{derive_bot_seed, derive_dealing_seed};
pub use state::{GameState, Phase, Seat};
pub use tiles_parsing::parse_tiles;
pub use tiles_types::{Color, Rank, Tile, Wildcard};
pub use winning::{check_pairs_winning, check_winning, Arrangement, WinningHand};
