use super::lp;
use super::matrix::Matrix;
use super::table::ValueTable;
use crate::Policy;
use crate::Probability;
use crate::Utility;
use crate::error::Error;
use crate::error::Result;
use crate::game::Game;

/// the one-step normal-form game induced at a simultaneous node by
/// folding already-known continuation values into a payoff matrix,
/// together with its Nash solution. rows index P0's actions, columns
/// P1's.
#[derive(Debug, Clone)]
pub struct Stage<A> {
    pub matrix: Matrix,
    pub rows: Vec<A>,
    pub cols: Vec<A>,
    pub policies: [Policy<A>; 2],
    pub value: Utility,
}

/// build and solve the stage game at one simultaneous state. every
/// joint action must map to a well-formed successor distribution,
/// and every successor must already be valued in the table.
pub fn solve_stage<G: Game>(
    state: &G,
    rows: &[G::Action],
    cols: &[G::Action],
    table: &ValueTable<G>,
    tolerance: Utility,
) -> Result<Stage<G::Action>> {
    let mut matrix = Matrix::new(rows.len(), cols.len());
    for (i, &a0) in rows.iter().enumerate() {
        for (j, &a1) in cols.iter().enumerate() {
            let branches = state.transitions(a0, a1);
            if branches.is_empty() {
                return Err(Error::malformed(
                    state,
                    "missing transition for a legal joint action",
                ));
            }
            let mass = branches.iter().map(|(_, p)| p).sum::<Probability>();
            if (mass - 1.0).abs() > tolerance {
                return Err(Error::malformed(
                    state,
                    format!("transition probabilities sum to {}", mass),
                ));
            }
            let mut cell = 0.0;
            for (successor, weight) in branches {
                cell += weight * table.value(&successor)?;
            }
            matrix.set(i, j, cell);
        }
    }
    let equilibrium =
        lp::solve_zero_sum(&matrix).map_err(|e| Error::equilibrium(state, e.to_string()))?;
    let p0 = rows
        .iter()
        .copied()
        .zip(equilibrium.row.iter().copied())
        .collect::<Policy<_>>();
    let p1 = cols
        .iter()
        .copied()
        .zip(equilibrium.col.iter().copied())
        .collect::<Policy<_>>();
    Ok(Stage {
        matrix,
        rows: rows.to_vec(),
        cols: cols.to_vec(),
        policies: [p0, p1],
        value: equilibrium.value,
    })
}
