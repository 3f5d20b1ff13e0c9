use super::card::Card;
use crate::Probability;
use crate::Utility;
use crate::game::Game;
use crate::game::Node;
use std::cmp::Ordering;

/// full public state of one Goofspiel match. everything fits in a
/// few bytes so states are Copy and serve as their own identity.
/// bitmasks put card c at bit c-1; upcard 0 means no prize is
/// face up.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Goofspiel {
    cards: u8,
    prizes: u8,
    upcard: u8,
    hands: [u8; 2],
    scores: [u8; 2],
}

impl Goofspiel {
    /// deal a fresh n-card game. n caps at 8 so a hand fits in a byte.
    pub fn root(cards: usize) -> Self {
        assert!((1..=8).contains(&cards), "deck must hold 1..=8 cards");
        let full = ((1u16 << cards) - 1) as u8;
        Self {
            cards: cards as u8,
            prizes: full,
            upcard: 0,
            hands: [full, full],
            scores: [0, 0],
        }
    }

    pub fn scores(&self) -> [u8; 2] {
        self.scores
    }

    fn held(mask: u8) -> Vec<Card> {
        (1..=8u8)
            .map(Card)
            .filter(|card| mask & card.bit() != 0)
            .collect()
    }

    /// uniform reveal over the prizes still in the deck.
    fn reveals(&self) -> Vec<(Card, Probability)> {
        let remaining = Self::held(self.prizes);
        let weight = 1.0 / remaining.len() as Probability;
        remaining.into_iter().map(|card| (card, weight)).collect()
    }

    /// win/loss/draw for the whole match, from each seat's side.
    fn outcome(&self) -> [Utility; 2] {
        match self.scores[0].cmp(&self.scores[1]) {
            Ordering::Greater => [1.0, -1.0],
            Ordering::Less => [-1.0, 1.0],
            Ordering::Equal => [0.0, 0.0],
        }
    }

    fn show(mask: u8) -> String {
        match mask {
            0 => String::from("-"),
            _ => Self::held(mask)
                .iter()
                .map(|card| card.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl Game for Goofspiel {
    type Action = Card;

    fn node(&self) -> Node<Self> {
        match (self.upcard, self.prizes) {
            (0, 0) => Node::Terminal {
                returns: self.outcome(),
            },
            (0, _) => Node::Chance {
                outcomes: self.reveals(),
            },
            (_, _) => Node::Simultaneous {
                actions: [Self::held(self.hands[0]), Self::held(self.hands[1])],
            },
        }
    }

    fn apply(&self, card: Card) -> Self {
        assert!(self.upcard == 0, "a prize is already face up");
        assert!(self.prizes & card.bit() != 0, "prize {} is not in the deck", card);
        let mut next = *self;
        next.prizes &= !card.bit();
        next.upcard = card.0;
        next
    }

    fn apply_joint(&self, [bid0, bid1]: [Card; 2]) -> Self {
        assert!(self.upcard != 0, "no prize is face up");
        assert!(self.hands[0] & bid0.bit() != 0, "P0 does not hold {}", bid0);
        assert!(self.hands[1] & bid1.bit() != 0, "P1 does not hold {}", bid1);
        let mut next = *self;
        next.hands[0] &= !bid0.bit();
        next.hands[1] &= !bid1.bit();
        match bid0.cmp(&bid1) {
            Ordering::Greater => next.scores[0] += self.upcard,
            Ordering::Less => next.scores[1] += self.upcard,
            Ordering::Equal => {} // tied bids burn the prize
        }
        next.upcard = 0;
        next
    }
}

impl std::fmt::Display for Goofspiel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "score {}-{} │ upcard {} │ deck [{}] │ P0 holds [{}] │ P1 holds [{}]",
            self.scores[0],
            self.scores[1],
            match self.upcard {
                0 => String::from("-"),
                c => c.to_string(),
            },
            Self::show(self.prizes),
            Self::show(self.hands[0]),
            Self::show(self.hands[1]),
        )
    }
}
