use super::matrix::Matrix;
use crate::Probability;
use crate::Utility;
use minilp::ComparisonOp;
use minilp::LinearExpr;
use minilp::OptimizationDirection;
use minilp::Problem;

/// a mixed strategy pair and game value for a zero-sum matrix game.
#[derive(Debug, Clone)]
pub struct Equilibrium {
    pub row: Vec<Probability>,
    pub col: Vec<Probability>,
    pub value: Utility,
}

/// solve the zero-sum matrix game by linear programming, one LP per
/// side: the row player maximizes the floor of its expected payoff
/// against any pure column, the column player minimizes the ceiling
/// against any pure row. LP duality makes the two optima agree, so
/// the pair is a Nash equilibrium of the matrix game.
///
/// degenerate games admit many equilibria; whichever vertex the
/// simplex lands on is returned. the inputs are deterministic, so
/// repeated calls return the same one.
pub fn solve_zero_sum(matrix: &Matrix) -> Result<Equilibrium, minilp::Error> {
    let (row, value) = maximin(matrix)?;
    let (col, _) = minimax(matrix)?;
    Ok(Equilibrium {
        row,
        col,
        value: value as Utility,
    })
}

fn maximin(matrix: &Matrix) -> Result<(Vec<Probability>, f64), minilp::Error> {
    let mut lp = Problem::new(OptimizationDirection::Maximize);
    let floor = lp.add_var(1.0, (f64::NEG_INFINITY, f64::INFINITY));
    let masses = (0..matrix.rows())
        .map(|_| lp.add_var(0.0, (0.0, 1.0)))
        .collect::<Vec<_>>();
    for j in 0..matrix.cols() {
        let mut payoff = LinearExpr::empty();
        for (i, &mass) in masses.iter().enumerate() {
            payoff.add(mass, matrix.at(i, j) as f64);
        }
        payoff.add(floor, -1.0);
        lp.add_constraint(payoff, ComparisonOp::Ge, 0.0);
    }
    let mut simplex = LinearExpr::empty();
    for &mass in masses.iter() {
        simplex.add(mass, 1.0);
    }
    lp.add_constraint(simplex, ComparisonOp::Eq, 1.0);
    let solution = lp.solve()?;
    let strategy = normalized(masses.iter().map(|&mass| solution[mass]).collect());
    Ok((strategy, solution.objective()))
}

fn minimax(matrix: &Matrix) -> Result<(Vec<Probability>, f64), minilp::Error> {
    let mut lp = Problem::new(OptimizationDirection::Minimize);
    let ceiling = lp.add_var(1.0, (f64::NEG_INFINITY, f64::INFINITY));
    let masses = (0..matrix.cols())
        .map(|_| lp.add_var(0.0, (0.0, 1.0)))
        .collect::<Vec<_>>();
    for i in 0..matrix.rows() {
        let mut payoff = LinearExpr::empty();
        for (j, &mass) in masses.iter().enumerate() {
            payoff.add(mass, matrix.at(i, j) as f64);
        }
        payoff.add(ceiling, -1.0);
        lp.add_constraint(payoff, ComparisonOp::Le, 0.0);
    }
    let mut simplex = LinearExpr::empty();
    for &mass in masses.iter() {
        simplex.add(mass, 1.0);
    }
    lp.add_constraint(simplex, ComparisonOp::Eq, 1.0);
    let solution = lp.solve()?;
    let strategy = normalized(masses.iter().map(|&mass| solution[mass]).collect());
    Ok((strategy, solution.objective()))
}

/// clamp simplex jitter off the distribution: tiny negatives go to
/// zero, then everything rescales to unit mass.
fn normalized(masses: Vec<f64>) -> Vec<Probability> {
    let clamped = masses
        .into_iter()
        .map(|mass| mass.max(0.0))
        .collect::<Vec<_>>();
    let total = clamped.iter().sum::<f64>();
    clamped
        .into_iter()
        .map(|mass| (mass / total) as Probability)
        .collect()
}
