//! CLI definition and argument parsing.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

const LONG_ABOUT: &str = "\
Read a rate file (one rate per line, in alignment column order, e.g. TIGER \
-rl output) and split the sites into rate partitions.

The first partition spans
    highest_rate - (highest_rate - minimum_rate) / divfactor
and every later one
    upper_rate - (upper_rate - minimum_rate) / (divfactor + partition_number * 0.3)
so partitions get narrower towards the fast (low rate) end. Once 10% or fewer
of the sites are left they all go in a final partition.

The report, with partition summaries plus MrBayes and PHYLIP partition
schemes, is written to <RATE_FILE>_<DIVFACTOR>.txt.";

/// Partition alignment sites by evolutionary rate.
#[derive(Debug, Parser)]
#[command(name = "rate-partitions")]
#[command(version, about, long_about = LONG_ABOUT)]
pub struct Cli {
    /// A file with rates separated by hard return (TIGER rate output -rl command)
    pub rate_file: PathBuf,

    /// Factor for division as positive numerical value (greater or equal than 1.1)
    #[arg(allow_negative_numbers = true)]
    pub divfactor: f64,

    /// Write the report here instead of <RATE_FILE>_<DIVFACTOR>.txt
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Console output format
    #[arg(short, long, value_enum)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, env = "RATE_PARTITIONS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Compute and print partitions without writing the report
    #[arg(long)]
    pub dry_run: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Summary and partition table (default)
    Text,
    /// JSON format
    Json,
    /// Quiet format (report path only)
    Quiet,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
