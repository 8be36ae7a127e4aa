//! rate-partitions - split alignment sites into partitions by evolutionary rate.

use clap::Parser;
use ratepart_cli::config::OutputFormat;
use ratepart_cli::{driver, logging, Cli, Config, Formatter, RunOptions};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> ratepart_cli::Result<()> {
    let cli = Cli::parse();

    // Nothing is read before the factor is known to be usable
    let division_factor = driver::validate_division_factor(cli.divfactor)?;

    let config = Config::load(cli.config.as_deref())?;
    logging::init(cli.verbose, &config.settings.log_level);

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    let options = RunOptions {
        rate_file: cli.rate_file,
        division_factor,
        output: cli.output,
        dry_run: cli.dry_run,
    };
    let outcome = driver::execute(&options)?;

    println!("{}", formatter.format_run(&outcome.run, &outcome.report_path)?);

    if formatter.format() == OutputFormat::Text {
        println!();
        if outcome.written {
            println!("{}", formatter.report_written(&outcome.report_path));
        } else {
            println!("{}", formatter.report_skipped(&outcome.report_path));
        }
    }

    Ok(())
}
