//! Goofspiel, the game of pure strategy, in its perfect-information
//! form: both hands are public, so nothing is hidden but the bids.
//!
//! Each round nature flips one of the remaining prize cards, both
//! players bid one card from their hands at the same time, and the
//! higher bid takes the prize. Tied bids burn it. When the deck runs
//! out the higher point total wins the match.
//!
//! The state space is small and the optimal strategy is genuinely
//! mixed, which makes it an ideal proving ground for the stage-game
//! equilibrium machinery: every bid is a simultaneous node whose
//! matrix game must be solved exactly.

mod card;
mod game;

pub use card::*;
pub use game::*;
