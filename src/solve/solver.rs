use super::stage::solve_stage;
use super::table::ValueTable;
use crate::Probability;
use crate::Utility;
use crate::error::Error;
use crate::error::Result;
use crate::game::Game;
use crate::game::Node;
use crate::game::Seat;
use std::collections::BTreeSet;

/// one entry on the explicit traversal stack. Open schedules a
/// state for expansion; Shut fires after all of its successors have
/// been valued.
enum Visit<G> {
    Open(G, usize),
    Shut(G),
}

/// backward induction over the whole game reachable from `root`.
///
/// the traversal is an explicit-stack post-order walk, so the call
/// stack stays flat no matter how deep the game runs. each state is
/// expanded at most once (memoized by identity) and valued only
/// after its successors, which makes the expectation / optimization
/// / equilibrium folds in `evaluate` well-defined.
///
/// `depth` caps expansion; `None` expands to the terminals. states
/// cut off by the cap are scored as draws. `tolerance` is slack for
/// float checks only, never an iteration threshold: this is exact
/// induction over a finite tree, not fixed-point approximation.
pub fn solve<G: Game>(root: G, depth: Option<usize>, tolerance: Utility) -> Result<ValueTable<G>> {
    let mut table = ValueTable::default();
    let mut onpath = BTreeSet::new();
    let mut stack = vec![Visit::Open(root, 0)];
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Open(state, _) if table.get(&state).is_some() => continue,
            Visit::Open(state, _) if onpath.contains(&state) => {
                return Err(Error::malformed(&state, "cycle in the state space"));
            }
            Visit::Open(state, d)
                if depth.map_or(false, |cap| d >= cap)
                    && !matches!(state.node(), Node::Terminal { .. }) =>
            {
                table.insert(state, 0.0); // cut off mid-game: call it a draw
            }
            Visit::Open(state, d) => {
                onpath.insert(state);
                stack.push(Visit::Shut(state));
                for successor in successors(&state) {
                    stack.push(Visit::Open(successor, d + 1));
                }
            }
            Visit::Shut(state) => {
                onpath.remove(&state);
                let value = evaluate(&state, &table, tolerance)?;
                table.insert(state, value);
            }
        }
    }
    Ok(table)
}

/// every state reachable in one step, across all node kinds.
fn successors<G: Game>(state: &G) -> Vec<G> {
    match state.node() {
        Node::Terminal { .. } => vec![],
        Node::Chance { outcomes } => outcomes
            .into_iter()
            .map(|(outcome, _)| state.apply(outcome))
            .collect(),
        Node::Sequential { actions, .. } => actions
            .into_iter()
            .map(|action| state.apply(action))
            .collect(),
        Node::Simultaneous { actions } => {
            let [rows, cols] = actions;
            rows.iter()
                .flat_map(|&a0| cols.iter().map(move |&a1| (a0, a1)))
                .flat_map(|(a0, a1)| state.transitions(a0, a1))
                .map(|(successor, _)| successor)
                .collect()
        }
    }
}

/// fold a state's value out of its successors' values, by node kind.
/// this is the single source of truth for what a value means; the
/// solver calls it bottom-up and tests call it to re-derive the
/// table.
pub fn evaluate<G: Game>(state: &G, table: &ValueTable<G>, tolerance: Utility) -> Result<Utility> {
    match state.node() {
        Node::Terminal { returns } => {
            match (returns[0] + returns[1]).abs() <= tolerance {
                true => Ok(returns[0]),
                false => Err(Error::malformed(state, "terminal returns are not zero-sum")),
            }
        }
        Node::Chance { outcomes } => {
            if outcomes.is_empty() {
                return Err(Error::malformed(state, "chance node with no outcomes"));
            }
            let mass = outcomes.iter().map(|(_, p)| p).sum::<Probability>();
            if (mass - 1.0).abs() > tolerance {
                return Err(Error::malformed(
                    state,
                    format!("chance probabilities sum to {}", mass),
                ));
            }
            let mut value = 0.0;
            for (outcome, weight) in outcomes {
                value += weight * table.value(&state.apply(outcome))?;
            }
            Ok(value)
        }
        Node::Sequential { seat, actions } => {
            if actions.is_empty() {
                return Err(Error::malformed(
                    state,
                    "no legal actions at a non-terminal node",
                ));
            }
            let mut best = match seat {
                Seat::P0 => Utility::NEG_INFINITY,
                Seat::P1 => Utility::INFINITY,
            };
            for action in actions {
                let value = table.value(&state.apply(action))?;
                best = match seat {
                    Seat::P0 => best.max(value),
                    Seat::P1 => best.min(value),
                };
            }
            Ok(best)
        }
        Node::Simultaneous { actions } => {
            let [rows, cols] = actions;
            if rows.is_empty() || cols.is_empty() {
                return Err(Error::malformed(
                    state,
                    "simultaneous node missing actions for a seat",
                ));
            }
            Ok(solve_stage(state, &rows, &cols, table, tolerance)?.value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SOLVE_TOLERANCE;
    use crate::goofspiel::Goofspiel;
    pub const TOLERANCE: f32 = 1e-5;

    /// a hand-built toy tree exercising every node kind:
    ///
    /// 0: P0 picks between terminals worth 3 and 5
    /// 3: chance splits 50/50 between those terminals
    /// 4: P1 picks between the same terminals
    /// 5: terminal worth +1, solved with no recursion at all
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    struct Toy(u8);

    impl Game for Toy {
        type Action = u8;

        fn node(&self) -> Node<Self> {
            match self.0 {
                0 => Node::Sequential {
                    seat: Seat::P0,
                    actions: vec![1, 2],
                },
                1 => Node::Terminal {
                    returns: [3.0, -3.0],
                },
                2 => Node::Terminal {
                    returns: [5.0, -5.0],
                },
                3 => Node::Chance {
                    outcomes: vec![(1, 0.5), (2, 0.5)],
                },
                4 => Node::Sequential {
                    seat: Seat::P1,
                    actions: vec![1, 2],
                },
                5 => Node::Terminal {
                    returns: [1.0, -1.0],
                },
                _ => unreachable!(),
            }
        }

        fn apply(&self, action: Self::Action) -> Self {
            Self(action)
        }

        fn apply_joint(&self, _: [Self::Action; 2]) -> Self {
            unreachable!("no simultaneous nodes in the toy tree")
        }
    }

    #[test]
    fn maximizer_takes_the_better_branch() {
        let table = solve(Toy(0), None, TOLERANCE).unwrap();
        assert_eq!(table.value(&Toy(0)).unwrap(), 5.0);
    }

    #[test]
    fn minimizer_takes_the_worse_branch() {
        let table = solve(Toy(4), None, TOLERANCE).unwrap();
        assert_eq!(table.value(&Toy(4)).unwrap(), 3.0);
    }

    #[test]
    fn chance_takes_the_expectation() {
        let table = solve(Toy(3), None, TOLERANCE).unwrap();
        assert!((table.value(&Toy(3)).unwrap() - 4.0).abs() < TOLERANCE);
    }

    #[test]
    fn terminal_solves_without_recursion() {
        let table = solve(Toy(5), None, TOLERANCE).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.value(&Toy(5)).unwrap(), 1.0);
    }

    #[test]
    fn depth_cap_scores_the_cut_as_a_draw() {
        let table = solve(Toy(0), Some(0), TOLERANCE).unwrap();
        assert_eq!(table.value(&Toy(0)).unwrap(), 0.0);
        assert_eq!(table.len(), 1);
    }

    /// chance weights that leak mass abort the whole solve.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    struct BadChance(u8);

    impl Game for BadChance {
        type Action = u8;
        fn node(&self) -> Node<Self> {
            match self.0 {
                0 => Node::Chance {
                    outcomes: vec![(1, 0.3), (2, 0.3)],
                },
                _ => Node::Terminal { returns: [0.0, 0.0] },
            }
        }
        fn apply(&self, action: Self::Action) -> Self {
            Self(action)
        }
        fn apply_joint(&self, _: [Self::Action; 2]) -> Self {
            unreachable!()
        }
    }

    #[test]
    fn leaky_chance_is_malformed() {
        let result = solve(BadChance(0), None, TOLERANCE);
        assert!(matches!(result, Err(Error::MalformedGame { .. })));
    }

    /// claims to be a decision point, offers nothing to decide.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    struct Stuck;

    impl Game for Stuck {
        type Action = u8;
        fn node(&self) -> Node<Self> {
            Node::Sequential {
                seat: Seat::P0,
                actions: vec![],
            }
        }
        fn apply(&self, _: Self::Action) -> Self {
            unreachable!()
        }
        fn apply_joint(&self, _: [Self::Action; 2]) -> Self {
            unreachable!()
        }
    }

    #[test]
    fn actionless_nonterminal_is_malformed() {
        let result = solve(Stuck, None, TOLERANCE);
        assert!(matches!(result, Err(Error::MalformedGame { .. })));
    }

    /// unbalanced terminal returns abort the solve.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    struct Skewed;

    impl Game for Skewed {
        type Action = u8;
        fn node(&self) -> Node<Self> {
            Node::Terminal {
                returns: [1.0, -0.5],
            }
        }
        fn apply(&self, _: Self::Action) -> Self {
            unreachable!()
        }
        fn apply_joint(&self, _: [Self::Action; 2]) -> Self {
            unreachable!()
        }
    }

    #[test]
    fn skewed_returns_are_malformed() {
        let result = solve(Skewed, None, TOLERANCE);
        assert!(matches!(result, Err(Error::MalformedGame { .. })));
    }

    /// a state that loops back to itself must be rejected, not
    /// walked forever.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    struct Loop;

    impl Game for Loop {
        type Action = u8;
        fn node(&self) -> Node<Self> {
            Node::Sequential {
                seat: Seat::P0,
                actions: vec![0],
            }
        }
        fn apply(&self, _: Self::Action) -> Self {
            Self
        }
        fn apply_joint(&self, _: [Self::Action; 2]) -> Self {
            unreachable!()
        }
    }

    #[test]
    fn cyclic_state_space_is_malformed() {
        let result = solve(Loop, None, TOLERANCE);
        assert!(matches!(result, Err(Error::MalformedGame { .. })));
    }

    /// symmetric seats make every goofspiel deal worth nothing.
    #[test]
    fn goofspiel_is_fair() {
        for cards in [2, 3] {
            let root = Goofspiel::root(cards);
            let table = solve(root, None, SOLVE_TOLERANCE).unwrap();
            let value = table.value(&root).unwrap();
            assert!(value.abs() < 1e-4, "{}-card value {}", cards, value);
        }
    }

    /// every recorded value must re-derive from its successors via
    /// the rule for its node kind.
    #[test]
    fn table_is_self_consistent() {
        let root = Goofspiel::root(3);
        let table = solve(root, None, SOLVE_TOLERANCE).unwrap();
        for (state, &value) in table.iter() {
            let rederived = evaluate(state, &table, SOLVE_TOLERANCE).unwrap();
            assert!(
                (rederived - value).abs() < 1e-4,
                "{:?} recorded {} but re-derives to {}",
                state,
                value,
                rederived
            );
        }
    }

    /// same game in, same table out. the LP and the traversal are
    /// both deterministic, so the values match bitwise.
    #[test]
    fn solve_is_deterministic() {
        let root = Goofspiel::root(3);
        let once = solve(root, None, SOLVE_TOLERANCE).unwrap();
        let again = solve(root, None, SOLVE_TOLERANCE).unwrap();
        assert_eq!(once.len(), again.len());
        for ((s1, v1), (s2, v2)) in once.iter().zip(again.iter()) {
            assert_eq!(s1, s2);
            assert_eq!(v1, v2, "values diverge at {:?}", s1);
        }
    }
}
