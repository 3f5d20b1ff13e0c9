//! The value-propagation and stage-game equilibrium engine.
//!
//! `solve` walks the whole game once, bottom-up, and leaves behind a
//! `ValueTable` holding each reachable state's optimal value for P0.
//! During that walk (and again at play time) every simultaneous node
//! becomes a `Stage`: a matrix of continuation values handed to the
//! linear program in `lp`, which returns the Nash mixed strategies
//! and the value of the matrix game.

mod lp;
mod matrix;
mod solver;
mod stage;
mod table;

pub use lp::*;
pub use matrix::*;
pub use solver::*;
pub use stage::*;
pub use table::*;
