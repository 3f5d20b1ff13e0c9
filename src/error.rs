use thiserror::Error;

/// Fatal failures raised while solving a game or deciding a move.
/// Both variants name the offending state so the diagnostic points
/// at the exact spot in the tree. There is no partial-result mode:
/// a solve that errors produces no value table at all.
#[derive(Error, Debug)]
pub enum Error {
    /// the game description violated a structural invariant
    #[error("malformed game at {state}: {reason}")]
    MalformedGame { state: String, reason: String },
    /// the linear program under a stage game had no solution.
    /// deterministic inputs make a retry pointless, so this aborts.
    #[error("equilibrium solve failed at {state}: {reason}")]
    Equilibrium { state: String, reason: String },
}

impl Error {
    pub fn malformed<S: std::fmt::Debug>(state: &S, reason: impl Into<String>) -> Self {
        Self::MalformedGame {
            state: format!("{:?}", state),
            reason: reason.into(),
        }
    }
    pub fn equilibrium<S: std::fmt::Debug>(state: &S, reason: impl Into<String>) -> Self {
        Self::Equilibrium {
            state: format!("{:?}", state),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
