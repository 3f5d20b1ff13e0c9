/// a bid card, identified by face value 1..=8. prizes use the
/// same type since the prize deck mirrors the hands.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card(pub u8);

impl Card {
    pub(crate) fn bit(&self) -> u8 {
        1 << (self.0 - 1)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Card {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u8>() {
            Ok(value) if (1..=8).contains(&value) => Ok(Self(value)),
            Ok(value) => Err(format!("{} is not a card value", value)),
            Err(_) => Err(String::from("not a number")),
        }
    }
}
