use super::node::Node;
use super::seat::Seat;
use crate::Probability;

/// a finite two-player zero-sum game with chance, sequential, and
/// simultaneous decision points. it must be implemented by the
/// consumer of the solver API.
///
/// state identity is the value itself: states are small Copy types
/// used directly as map keys, and two equal states must expose equal
/// node structure, successors, and optimal value. the solver and the
/// value table are the only things that hold states across calls.
pub trait Game: Clone + Copy + std::fmt::Debug + Ord + std::hash::Hash {
    type Action: Clone + Copy + std::fmt::Debug + Ord + std::hash::Hash;

    /// local structure of this state.
    fn node(&self) -> Node<Self>;
    /// successor after a chance outcome or a lone mover's action.
    fn apply(&self, action: Self::Action) -> Self;
    /// successor after both seats commit blind actions.
    fn apply_joint(&self, joint: [Self::Action; 2]) -> Self;

    /// distribution over successors for a joint action at a
    /// simultaneous node, folding in any chance resolution bundled
    /// into the transition. an empty distribution marks the
    /// transition as missing, which the solver treats as an error
    /// rather than an implicit zero.
    fn transitions(&self, a0: Self::Action, a1: Self::Action) -> Vec<(Self, Probability)> {
        vec![(self.apply_joint([a0, a1]), 1.0)]
    }

    /// what one seat may do here. empty exactly at terminal and
    /// chance nodes, and at sequential nodes where the seat waits.
    fn legal_actions(&self, seat: Seat) -> Vec<Self::Action> {
        match self.node() {
            Node::Terminal { .. } => vec![],
            Node::Chance { .. } => vec![],
            Node::Sequential { seat: mover, actions } => match mover == seat {
                true => actions,
                false => vec![],
            },
            Node::Simultaneous { actions } => {
                let [p0, p1] = actions;
                match seat {
                    Seat::P0 => p0,
                    Seat::P1 => p1,
                }
            }
        }
    }
}
