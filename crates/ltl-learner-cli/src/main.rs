//! `ltl-learner`: the §6 CLI surface. Reads one sample JSON (and, optionally, one
//! operator-subset JSON), runs the enumeration driver to a cutoff, and prints the learned
//! formula — or the "unable to determine" message — to stdout.
//!
//! Everything beyond this single-invocation surface (directory sweeps, per-sample
//! timeouts, a CSV results writer) is the external batch harness spec.md excludes; this
//! binary does not implement it.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

use ltl_learner_core::{learn, LearnResult};
use ltl_learner_varisat::VarisatSolver;

mod input;

/// Learn a minimal LTL formula separating a sample's positive and negative traces.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Input sample JSON file.
    #[arg(short = 'f', long = "input", value_name = "FILE")]
    input_file: PathBuf,

    /// Maximum syntax-DAG size to search before giving up.
    #[arg(short = 'k', long = "cutoff", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    cutoff: u64,

    /// Optional JSON file restricting the enabled LTL operator set.
    #[arg(short = 'o', long = "operators", value_name = "FILE")]
    operators_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    TermLogger::init(LevelFilter::Info, Config::default(), TerminalMode::Mixed, ColorChoice::Auto)?;

    let args = Cli::parse();
    info!("args = {args:?}");

    let parsed = input::read_sample_file(&args.input_file)?;
    let operators = input::read_operator_set(args.operators_file.as_deref())?;

    info!(
        "learning over {} atoms, {} positive, {} negative traces, cutoff={}",
        parsed.atom_names.len(),
        parsed.positives.len(),
        parsed.negatives.len(),
        args.cutoff
    );

    let mut solver = VarisatSolver::new();
    let result = learn(
        &mut solver,
        parsed.atom_names.len(),
        &operators,
        &parsed.positives,
        &parsed.negatives,
        args.cutoff as usize,
        None,
    )?;

    match result {
        LearnResult::Found { formula, nodes, elapsed } => {
            info!("found a formula of {nodes} DAG nodes in {elapsed:?}");
            println!("{}", formula.render(&parsed.atom_names));
        }
        LearnResult::NotFound { cutoff, elapsed } => {
            info!("no separating formula within cutoff {cutoff} after {elapsed:?}");
            println!("Unable to determine a formula within the given constraint.");
        }
    }

    Ok(())
}
