use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;
use tt_phase::{BasePhase, PhaseError, config};
use tt_tables::{TableError, interpolate, load_tables};

#[derive(Parser)]
#[command(name = "tt-cli")]
#[command(about = "Tabulated reference-state thermo for a constant-density solution", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a phase configuration file and its tables
    Validate {
        /// Path to the phase YAML/JSON file
        config_path: PathBuf,
    },
    /// Evaluate tracked-species reference thermo at given mole fractions
    Eval {
        /// Path to the phase YAML/JSON file
        config_path: PathBuf,
        /// Tracked-species mole fraction (repeatable)
        #[arg(short, long = "x", required = true)]
        x: Vec<f64>,
    },
    /// Interpolate a raw table file
    Interp {
        /// Table file (delimited text, YAML or JSON)
        table_path: PathBuf,
        /// Mole fraction (repeatable)
        #[arg(short, long = "x", required = true)]
        x: Vec<f64>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Phase(#[from] PhaseError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error("Tracked mole fraction {x} outside [0, 1]")]
    Composition { x: f64 },

    #[error("Single-species phase only admits x = 1, got {x}")]
    PureComposition { x: f64 },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Eval { config_path, x } => cmd_eval(&config_path, &x),
        Commands::Interp { table_path, x } => cmd_interp(&table_path, &x),
    }
}

fn cmd_validate(config_path: &Path) -> CliResult<()> {
    let phase = config::load(config_path)?;
    let tracked = phase.tracked_species();
    println!("✓ {} is valid", config_path.display());
    println!("  Model: {}", phase.model_name());
    println!("  Species: {}", phase.n_species());
    println!(
        "  Tracked: {} (index {})",
        phase.base().species_name(tracked)?,
        tracked
    );
    println!(
        "  Tables: {} enthalpy points, {} entropy points",
        phase.tables().enthalpy.len(),
        phase.tables().entropy.len()
    );
    Ok(())
}

fn cmd_eval(config_path: &Path, xs: &[f64]) -> CliResult<()> {
    let mut phase = config::load(config_path)?;
    let tracked = phase.tracked_species();
    let n = phase.n_species();

    println!(
        "{:>10} {:>16} {:>16} {:>16} {:>16}",
        "x", "h [J/mol]", "s [J/mol/K]", "mu0 [J/mol]", "mu [J/mol]"
    );
    for &x in xs {
        phase.set_mole_fractions(&split_composition(n, tracked.get(), x)?)?;
        println!(
            "{:>10.6} {:>16.6} {:>16.6} {:>16.6} {:>16.6}",
            phase.base().mole_fraction(tracked)?,
            phase.reference_enthalpy(tracked)?,
            phase.reference_entropy(tracked)?,
            phase.reference_gibbs(tracked)?,
            phase.chemical_potential(tracked)?,
        );
    }
    info!(evaluations = phase.evaluation_count(), "eval complete");
    Ok(())
}

/// Tracked species at `x`, the remainder spread evenly over the others.
fn split_composition(n: usize, tracked: usize, x: f64) -> CliResult<Vec<f64>> {
    if !(0.0..=1.0).contains(&x) {
        return Err(CliError::Composition { x });
    }
    if n == 1 {
        return if x == 1.0 {
            Ok(vec![1.0])
        } else {
            Err(CliError::PureComposition { x })
        };
    }
    let rest = (1.0 - x) / (n - 1) as f64;
    Ok((0..n).map(|k| if k == tracked { x } else { rest }).collect())
}

fn cmd_interp(table_path: &Path, xs: &[f64]) -> CliResult<()> {
    let tables = load_tables(table_path)?;
    println!("{:>10} {:>16} {:>16}", "x", "h", "s");
    for &x in xs {
        println!(
            "{:>10.6} {:>16.6} {:>16.6}",
            x,
            interpolate(&tables.enthalpy, x)?,
            interpolate(&tables.entropy, x)?
        );
    }
    Ok(())
}
