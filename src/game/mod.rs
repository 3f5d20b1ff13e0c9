//! The boundary between the solver and whatever game it is solving.
//!
//! A game exposes its local structure through the `Node` sum type:
//! terminal, chance, sequential, or simultaneous, each variant carrying
//! exactly the data its kind needs. The solver, agent, and play loop
//! dispatch on that enum and never see the rules themselves.

mod game;
mod node;
mod seat;

pub use game::*;
pub use node::*;
pub use seat::*;
