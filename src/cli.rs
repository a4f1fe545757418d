use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wgen dual-pathway stochastic daily weather generator.
#[derive(Parser)]
#[command(
    name = "wgen",
    version,
    about = "Dual-pathway stochastic daily weather generator"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Simulate an ensemble and write its summary.
    Generate(GenerateArgs),
    /// Build the calibration from a configuration without simulating.
    Validate(ValidateArgs),
}

/// Arguments for the `generate` subcommand.
#[derive(clap::Args)]
pub struct GenerateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wgen.toml")]
    pub config: PathBuf,

    /// Override summary JSON output path from config (stdout if neither is set).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Added to every base seed from config.
    #[arg(long, default_value_t = 0)]
    pub seed_offset: u64,

    /// Override number of realizations from config.
    #[arg(short = 'n', long)]
    pub realizations: Option<u64>,
}

/// Arguments for the `validate` subcommand.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wgen.toml")]
    pub config: PathBuf,
}
