//! Rate partitions CLI library.
//!
//! Reads a rate file, runs the partitioner from `ratepart-domain`, renders the
//! report (summary plus MrBayes and PHYLIP partition schemes) and writes it
//! next to the input.

pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod logging;
pub mod output;
pub mod report;

pub use cli::Cli;
pub use config::Config;
pub use driver::{execute, RunOptions, RunOutcome};
pub use error::{CliError, Result};
pub use output::Formatter;
pub use report::Report;
