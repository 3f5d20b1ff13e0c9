use clap::Parser;
use goofbot::GOOFSPIEL_CARDS;
use goofbot::SOLVE_TOLERANCE;
use goofbot::goofspiel::Goofspiel;
use goofbot::play::Session;
use goofbot::solve::solve;

/// Solve Goofspiel exactly by backward induction, then defend the
/// equilibrium against a human at the table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// cards per hand; the prize deck matches (1..=8)
    #[arg(long, default_value_t = GOOFSPIEL_CARDS)]
    cards: usize,
    /// cap on expansion depth; omit to expand to the terminals
    #[arg(long)]
    depth: Option<usize>,
    /// seed for reveals and sampling; omit for entropy
    #[arg(long)]
    seed: Option<u64>,
    /// dump every solved state value before play begins
    #[arg(long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    goofbot::log(match args.verbose {
        true => log::LevelFilter::Debug,
        false => log::LevelFilter::Info,
    });
    let root = Goofspiel::root(args.cards);
    let table = solve(root, args.depth, SOLVE_TOLERANCE)?;
    for (state, value) in table.iter() {
        log::debug!("{} = {:+.3}", state, value);
    }
    log::info!(
        "solved {} states; the deal is worth {:+.3} to P0",
        table.len(),
        table.value(&root)?
    );
    Session::new(root, &table, args.seed).run()?;
    Ok(())
}
