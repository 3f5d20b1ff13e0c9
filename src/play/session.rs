use crate::POLICY_MIN;
use crate::Policy;
use crate::Probability;
use crate::Utility;
use crate::error::Result;
use crate::game::Game;
use crate::game::Node;
use crate::game::Seat;
use crate::players::Agent;
use crate::players::Human;
use crate::solve::ValueTable;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::cmp::Ordering;

/// one round of blind bidding: collect the human's action, then the
/// agent's, then land them on the table together.
enum Phase<A> {
    Human,
    Agent { bid: A },
    Apply { joint: [A; 2] },
}

/// interactive match loop against the equilibrium agent. the table
/// is solved before the session starts and never changes; each game
/// replays from the root with the seats swapped, forever, until the
/// human walks away.
pub struct Session<'a, G: Game> {
    root: G,
    table: &'a ValueTable<G>,
    human: Seat,
    rng: SmallRng,
    games: usize,
}

impl<'a, G> Session<'a, G>
where
    G: Game + std::fmt::Display,
    G::Action: std::fmt::Display + std::str::FromStr,
{
    pub fn new(root: G, table: &'a ValueTable<G>, seed: Option<u64>) -> Self {
        Self {
            root,
            table,
            human: Seat::P1, // the opening seat; swaps every game
            rng: match seed {
                Some(seed) => SmallRng::seed_from_u64(seed),
                None => SmallRng::from_os_rng(),
            },
            games: 0,
        }
    }

    /// play forever, swapping seats between games.
    pub fn run(mut self) -> Result<()> {
        loop {
            self.game()?;
            self.human = self.human.other();
            self.games += 1;
        }
    }

    fn game(&mut self) -> Result<()> {
        log::info!("game {}: you are {}", self.games + 1, self.human);
        let ref mut agent = Agent::new(self.human.other(), self.table);
        let mut state = self.root;
        loop {
            state = match state.node() {
                Node::Terminal { returns } => return Ok(self.report(returns)),
                Node::Chance { outcomes } => self.reveal(state, outcomes),
                Node::Sequential { seat, .. } => self.ply(agent, state, seat)?,
                Node::Simultaneous { .. } => self.round(agent, state)?,
            };
        }
    }

    /// nature's move: one weighted draw over the outcomes.
    fn reveal(&mut self, state: G, outcomes: Vec<(G::Action, Probability)>) -> G {
        use rand::distr::Distribution;
        use rand::distr::weighted::WeightedIndex;
        let weights = outcomes
            .iter()
            .map(|(_, weight)| weight.max(POLICY_MIN))
            .collect::<Vec<_>>();
        let index = WeightedIndex::new(weights)
            .expect("at least one outcome")
            .sample(&mut self.rng);
        state.apply(outcomes[index].0)
    }

    /// a lone mover: the human or the agent, whoever holds the seat.
    fn ply(&mut self, agent: &mut Agent<G>, state: G, seat: Seat) -> Result<G> {
        println!("{}", state);
        let action = match seat == self.human {
            true => Human.bid(&state, seat),
            false => {
                let (action, _) = agent
                    .decide(&state, &mut self.rng)?
                    .expect("agent holds the seat");
                log::info!("agent plays {}", action);
                action
            }
        };
        Ok(state.apply(action))
    }

    /// both seats commit blind: human first, then the agent, then
    /// the joint apply.
    fn round(&mut self, agent: &mut Agent<G>, state: G) -> Result<G> {
        println!("{}", state);
        let mut phase = Phase::Human;
        loop {
            phase = match phase {
                Phase::Human => Phase::Agent {
                    bid: Human.bid(&state, self.human),
                },
                Phase::Agent { bid } => {
                    let (reply, policy) = agent
                        .decide(&state, &mut self.rng)?
                        .expect("simultaneous nodes demand an action");
                    log::info!("agent mixes {}", mixture(&policy));
                    log::info!("you bid {}, agent bids {}", bid, reply);
                    Phase::Apply {
                        joint: match self.human {
                            Seat::P0 => [bid, reply],
                            Seat::P1 => [reply, bid],
                        },
                    }
                }
                Phase::Apply { joint } => return Ok(state.apply_joint(joint)),
            };
        }
    }

    fn report(&self, returns: [Utility; 2]) {
        use colored::Colorize;
        let score = returns[self.human.index()];
        let verdict = match score.partial_cmp(&0.0) {
            Some(Ordering::Greater) => "you win".green(),
            Some(Ordering::Less) => "you lose".red(),
            _ => "draw".yellow(),
        };
        println!("\n{}\n", verdict);
    }
}

fn mixture<A: std::fmt::Display>(policy: &Policy<A>) -> String {
    policy
        .iter()
        .map(|(action, mass)| format!("{} {:.2}", action, mass))
        .collect::<Vec<_>>()
        .join(" · ")
}
