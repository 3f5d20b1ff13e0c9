pub mod error;
pub mod game;
pub mod goofspiel;
pub mod play;
pub mod players;
pub mod solve;

/// Expected values, payoffs, and state values.
pub type Utility = f32;
/// Strategy weights, chance outcomes, and sampling distributions.
pub type Probability = f32;

/// A mixed strategy: action masses at a single decision point.
/// Decision points here hold a handful of actions, so a flat Vec
/// beats map lookups and keeps insertion order for display.
pub type Policy<A> = Vec<(A, Probability)>;

/// Numerical slack for probability sums, zero-sum checks, and
/// equilibrium cross-checks.
pub const SOLVE_TOLERANCE: Utility = 1e-5;
/// Minimum sampling weight to keep WeightedIndex away from all-zero rows.
pub const POLICY_MIN: Probability = Probability::MIN_POSITIVE;
/// Cards per hand (and prizes in the deck) in the default deal.
pub const GOOFSPIEL_CARDS: usize = 3;

/// Initialize terminal logging at the given level.
pub fn log(level: log::LevelFilter) {
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    simplelog::TermLogger::init(
        level,
        config,
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )
    .expect("initialize logger");
}
