/// one of the two players in a zero-sum game. P0 maximizes the
/// recorded value, P1 minimizes it.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub enum Seat {
    P0,
    P1,
}

impl Seat {
    pub fn index(&self) -> usize {
        match self {
            Self::P0 => 0,
            Self::P1 => 1,
        }
    }
    pub fn other(&self) -> Self {
        match self {
            Self::P0 => Self::P1,
            Self::P1 => Self::P0,
        }
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
