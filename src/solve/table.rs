use crate::Utility;
use crate::error::Error;
use crate::error::Result;
use crate::game::Game;
use std::collections::BTreeMap;

/// state values computed by backward induction. write-once while the
/// solve runs, read-only forever after, so it can be shared freely
/// by any number of agents or concurrent matches.
#[derive(Debug)]
pub struct ValueTable<G: Game> {
    values: BTreeMap<G, Utility>,
}

impl<G: Game> Default for ValueTable<G> {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }
}

impl<G: Game> ValueTable<G> {
    pub fn get(&self, state: &G) -> Option<Utility> {
        self.values.get(state).copied()
    }

    /// the value of a state that backward induction must already
    /// have reached. a miss means the table was built for a
    /// different game, or cut off above this state.
    pub fn value(&self, state: &G) -> Result<Utility> {
        self.get(state)
            .ok_or_else(|| Error::malformed(state, "state is missing from the value table"))
    }

    pub(crate) fn insert(&mut self, state: G, value: Utility) {
        self.values.insert(state, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = (&G, &Utility)> {
        self.values.iter()
    }
}
