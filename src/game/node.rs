use super::game::Game;
use super::seat::Seat;
use crate::Probability;
use crate::Utility;

/// what kind of decision point a state is. every state is exactly
/// one of these, and each variant carries the data its kind needs,
/// so dispatching on node kind is an exhaustive match rather than
/// a series of boolean probes.
#[derive(Debug, Clone, PartialEq)]
pub enum Node<G: Game> {
    /// game over. returns are (P0, P1) and must sum to zero.
    Terminal { returns: [Utility; 2] },
    /// nature moves. outcomes carry their own weights.
    Chance { outcomes: Vec<(G::Action, Probability)> },
    /// exactly one seat moves.
    Sequential { seat: Seat, actions: Vec<G::Action> },
    /// both seats commit blind. actions are (P0's, P1's).
    Simultaneous { actions: [Vec<G::Action>; 2] },
}
