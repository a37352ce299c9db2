pub mod commands;
pub mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::error::Result;
use crate::domain::prep_config::RoundingRule;
use crate::infrastructure::config::ConfigService;

#[derive(Parser, Debug)]
#[command(name = "qpair-prep")]
#[command(about = "Multi-label encoding and class balancing for question-pair datasets", long_about = None)]
pub struct Cli {
    /// TOML config file (defaults to ./qpair-prep.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// One-hot encode list columns and append the indicator columns
    Encode(EncodeArgs),
    /// Subsample rows so the groups of a column are balanced
    Balance(BalanceArgs),
}

#[derive(Args, Debug, Default)]
pub struct EncodeArgs {
    /// Source CSV file
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Destination CSV file
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// List column to encode as NAME:PREFIX (repeatable, replaces the configured list)
    #[arg(long = "column", value_name = "NAME:PREFIX")]
    pub columns: Vec<String>,
    /// Encoded column to show value counts for (repeatable)
    #[arg(long = "preview", value_name = "COLUMN")]
    pub previews: Vec<String>,
    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Default)]
pub struct BalanceArgs {
    /// Source CSV file
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// Destination CSV file
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Column whose values define the groups
    #[arg(long)]
    pub group_column: Option<String>,
    /// Sampling seed
    #[arg(long)]
    pub seed: Option<u64>,
    /// Draw this many rows in proportion to group frequency
    #[arg(long, conflicts_with = "equal_floor")]
    pub total_samples: Option<usize>,
    /// Undersample every group to the size of the smallest one
    #[arg(long)]
    pub equal_floor: bool,
    /// Rounding of proportional targets
    #[arg(long, value_enum, conflicts_with = "equal_floor")]
    pub rounding: Option<RoundingArg>,
    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundingArg {
    LargestRemainder,
    Nearest,
}

impl From<RoundingArg> for RoundingRule {
    fn from(arg: RoundingArg) -> Self {
        match arg {
            RoundingArg::LargestRemainder => RoundingRule::LargestRemainder,
            RoundingArg::Nearest => RoundingRule::Nearest,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let service = match &cli.config {
        Some(path) => ConfigService::new().with_file(path),
        None => ConfigService::new(),
    };
    let config = service.load()?;

    match cli.command {
        Commands::Encode(args) => commands::encode(config.encoder, args),
        Commands::Balance(args) => commands::balance(config.balancer, args),
    }
}
