use crate::game::Game;
use crate::game::Seat;
use dialoguer::Input;

/// terminal-input player. bids are typed as the action's display
/// form and validated against the legal set before they escape the
/// prompt; unparsable or illegal input re-prompts, never defaults.
#[derive(Debug, Default)]
pub struct Human;

impl Human {
    pub fn bid<G>(&self, state: &G, seat: Seat) -> G::Action
    where
        G: Game,
        G::Action: std::fmt::Display + std::str::FromStr,
    {
        let legal = state.legal_actions(seat);
        let menu = legal
            .iter()
            .map(|action| action.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let raw = Input::<String>::new()
            .with_prompt(format!("your bid [{}]", menu))
            .report(false)
            .validate_with(|input: &String| -> Result<(), String> {
                let bid = input
                    .trim()
                    .parse::<G::Action>()
                    .map_err(|_| String::from("enter a card value"))?;
                match legal.contains(&bid) {
                    true => Ok(()),
                    false => Err(format!("{} is not in your hand", bid)),
                }
            })
            .interact()
            .unwrap();
        match raw.trim().parse::<G::Action>() {
            Ok(bid) => bid,
            Err(_) => unreachable!("validated by the prompt"),
        }
    }
}
