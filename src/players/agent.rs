use crate::POLICY_MIN;
use crate::Policy;
use crate::SOLVE_TOLERANCE;
use crate::Utility;
use crate::error::Error;
use crate::error::Result;
use crate::game::Game;
use crate::game::Node;
use crate::game::Seat;
use crate::solve::ValueTable;
use crate::solve::solve_stage;
use rand::rngs::SmallRng;

/// tabular equilibrium player. owns a seat and a read-only view of
/// the solved value table; at each simultaneous node it rebuilds the
/// stage game, solves it for the Nash mix, and samples one action
/// from its own side of the pair. stateless across turns except for
/// remembering the last distribution it played from.
pub struct Agent<'a, G: Game> {
    seat: Seat,
    table: &'a ValueTable<G>,
    last: Option<Policy<G::Action>>,
}

impl<'a, G: Game> Agent<'a, G> {
    pub fn new(seat: Seat, table: &'a ValueTable<G>) -> Self {
        Self {
            seat,
            table,
            last: None,
        }
    }

    pub fn seat(&self) -> Seat {
        self.seat
    }

    /// the distribution behind the most recent decision.
    pub fn last(&self) -> Option<&Policy<G::Action>> {
        self.last.as_ref()
    }

    /// pick an action at this state, or nothing where the agent has
    /// no move: terminal states, chance nodes, and the opponent's
    /// sequential turns. the rng is explicit so a fixed seed replays
    /// the same draw.
    pub fn decide(
        &mut self,
        state: &G,
        rng: &mut SmallRng,
    ) -> Result<Option<(G::Action, Policy<G::Action>)>> {
        let policy = match state.node() {
            Node::Terminal { .. } => None,
            Node::Chance { .. } => None,
            Node::Sequential { seat, .. } if seat != self.seat => None,
            Node::Sequential { actions, .. } => Some(self.resolve(state, actions)?),
            Node::Simultaneous { actions } => Some(self.equilibrate(state, actions)?),
        };
        match policy {
            None => Ok(None),
            Some(policy) => {
                let action = Self::sample(&policy, rng);
                self.last = Some(policy.clone());
                Ok(Some((action, policy)))
            }
        }
    }

    /// sequential turns degenerate to a point mass on the best
    /// continuation for our side.
    fn resolve(&self, state: &G, actions: Vec<G::Action>) -> Result<Policy<G::Action>> {
        let mut best: Option<(G::Action, Utility)> = None;
        for action in actions.iter().copied() {
            let value = self.table.value(&state.apply(action))?;
            let improves = match best {
                None => true,
                Some((_, incumbent)) => match self.seat {
                    Seat::P0 => value > incumbent,
                    Seat::P1 => value < incumbent,
                },
            };
            if improves {
                best = Some((action, value));
            }
        }
        let (choice, _) =
            best.ok_or_else(|| Error::malformed(state, "no legal actions at a non-terminal node"))?;
        Ok(actions
            .into_iter()
            .map(|action| {
                (
                    action,
                    match action == choice {
                        true => 1.0,
                        false => 0.0,
                    },
                )
            })
            .collect())
    }

    /// simultaneous turns take our side of the stage equilibrium.
    /// the stage value must agree with what backward induction
    /// recorded for this state; both folds read the same table, so
    /// any drift means the table does not belong to this game.
    fn equilibrate(&self, state: &G, actions: [Vec<G::Action>; 2]) -> Result<Policy<G::Action>> {
        let [rows, cols] = actions;
        let stage = solve_stage(state, &rows, &cols, self.table, SOLVE_TOLERANCE)?;
        let planned = self.table.value(state)?;
        assert!(
            (stage.value - planned).abs() <= SOLVE_TOLERANCE,
            "stage value {} drifts from planned value {}",
            stage.value,
            planned
        );
        let [p0, p1] = stage.policies;
        Ok(match self.seat {
            Seat::P0 => p0,
            Seat::P1 => p1,
        })
    }

    /// one weighted draw from the mix. zero-mass actions keep a
    /// denormal floor so WeightedIndex accepts the row.
    fn sample(policy: &Policy<G::Action>, rng: &mut SmallRng) -> G::Action {
        use rand::distr::Distribution;
        use rand::distr::weighted::WeightedIndex;
        let weights = policy
            .iter()
            .map(|(_, mass)| mass.max(POLICY_MIN))
            .collect::<Vec<_>>();
        let index = WeightedIndex::new(weights)
            .expect("at least one mass > 0")
            .sample(rng);
        policy[index].0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Probability;
    use crate::goofspiel::Card;
    use crate::goofspiel::Goofspiel;
    use crate::solve::solve;
    use rand::SeedableRng;

    #[test]
    fn no_action_at_terminal() {
        let root = Goofspiel::root(1);
        let table = solve(root, None, SOLVE_TOLERANCE).unwrap();
        let terminal = root.apply(Card(1)).apply_joint([Card(1), Card(1)]);
        let mut agent = Agent::new(Seat::P0, &table);
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert!(agent.decide(&terminal, rng).unwrap().is_none());
        assert!(agent.last().is_none());
    }

    #[test]
    fn no_action_at_chance() {
        let root = Goofspiel::root(2);
        let table = solve(root, None, SOLVE_TOLERANCE).unwrap();
        let mut agent = Agent::new(Seat::P0, &table);
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert!(agent.decide(&root, rng).unwrap().is_none());
    }

    /// same table, same seed, same bid: decisions replay exactly.
    #[test]
    fn decide_is_idempotent_under_a_seed() {
        let root = Goofspiel::root(3);
        let table = solve(root, None, SOLVE_TOLERANCE).unwrap();
        let state = root.apply(Card(2));
        for seed in 0..16 {
            let mut one = Agent::new(Seat::P0, &table);
            let mut two = Agent::new(Seat::P0, &table);
            let (a, p) = one
                .decide(&state, &mut SmallRng::seed_from_u64(seed))
                .unwrap()
                .unwrap();
            let (b, q) = two
                .decide(&state, &mut SmallRng::seed_from_u64(seed))
                .unwrap()
                .unwrap();
            assert_eq!(a, b, "seed {} replayed differently", seed);
            assert_eq!(p, q);
        }
    }

    /// the sampled mix is a distribution over the legal hand only.
    #[test]
    fn policy_is_a_distribution_over_the_hand() {
        let root = Goofspiel::root(3);
        let table = solve(root, None, SOLVE_TOLERANCE).unwrap();
        let state = root.apply(Card(3));
        for seat in [Seat::P0, Seat::P1] {
            let mut agent = Agent::new(seat, &table);
            let ref mut rng = SmallRng::seed_from_u64(7);
            let (action, policy) = agent.decide(&state, rng).unwrap().unwrap();
            let legal = state.legal_actions(seat);
            let mass = policy.iter().map(|(_, p)| p).sum::<Probability>();
            assert!((mass - 1.0).abs() < 1e-4, "mass {}", mass);
            assert!(policy.iter().all(|(_, p)| *p >= 0.0));
            assert!(policy.iter().all(|(a, _)| legal.contains(a)));
            assert!(legal.contains(&action));
        }
    }

    /// a lone mover's "mix" is a point mass on the best child.
    #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
    struct Fork(u8);

    impl Game for Fork {
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
                _ => unreachable!(),
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
    fn lone_mover_plays_the_best_child_outright() {
        let table = solve(Fork(0), None, SOLVE_TOLERANCE).unwrap();
        let mut agent = Agent::new(Seat::P0, &table);
        let ref mut rng = SmallRng::seed_from_u64(0);
        let (action, policy) = agent.decide(&Fork(0), rng).unwrap().unwrap();
        assert_eq!(action, 2);
        assert_eq!(policy, vec![(1, 0.0), (2, 1.0)]);
    }

    #[test]
    fn opponents_turn_is_not_ours() {
        let table = solve(Fork(0), None, SOLVE_TOLERANCE).unwrap();
        let mut agent = Agent::new(Seat::P1, &table);
        let ref mut rng = SmallRng::seed_from_u64(0);
        assert!(agent.decide(&Fork(0), rng).unwrap().is_none());
    }
}
