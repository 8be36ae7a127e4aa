//! Run driver: validate, read rates, partition, build and write the report.

use crate::error::{CliError, Result};
use crate::report::{format_float, Report};
use ratepart_domain::{partition, DivisionFactor, MissReason, PartitionRun, RateSequence};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Inputs for one partitioning run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Rate file, one value per line
    pub rate_file: PathBuf,
    /// Already validated division factor
    pub division_factor: DivisionFactor,
    /// Report destination; derived from the rate file when `None`
    pub output: Option<PathBuf>,
    /// Skip writing the report
    pub dry_run: bool,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Partitions and summary values
    pub run: PartitionRun,
    /// Rendered report text
    pub report: String,
    /// Where the report goes
    pub report_path: PathBuf,
    /// Whether the report was written to disk
    pub written: bool,
}

/// Check the division factor before anything else happens.
pub fn validate_division_factor(value: f64) -> Result<DivisionFactor> {
    DivisionFactor::new(value).map_err(|_| CliError::DivisionFactor(value))
}

/// Report path for a rate file: `<rate file>_<factor>.txt`.
///
/// The rate file path is used exactly as given, so the report lands next to
/// the input.
pub fn default_report_path(rate_file: &Path, factor: DivisionFactor) -> PathBuf {
    let mut name = OsString::from(rate_file.as_os_str());
    name.push(format!("_{}.txt", format_float(factor.value())));
    PathBuf::from(name)
}

/// Read and parse a rate file.
pub fn read_rates(path: &Path) -> Result<RateSequence> {
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadRates {
        path: path.to_path_buf(),
        source,
    })?;

    RateSequence::parse(&text).map_err(|source| CliError::RateFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the rendered report.
pub fn write_report(path: &Path, report: &str) -> Result<()> {
    fs::write(path, report).map_err(|source| CliError::WriteReport {
        path: path.to_path_buf(),
        source,
    })
}

/// Execute one run end to end.
///
/// Accounting mismatches are logged and land in the report body; they do
/// not fail the run.
pub fn execute(options: &RunOptions) -> Result<RunOutcome> {
    let rates = read_rates(&options.rate_file)?;
    info!(
        sites = rates.len(),
        slowest = rates.max(),
        fastest = rates.min(),
        spread = rates.spread(),
        "Loaded rates from {}",
        options.rate_file.display()
    );

    debug!("Partitioning with division factor {}", options.division_factor);
    let run = partition(&rates, options.division_factor);
    log_run(&run);

    let source_name = options
        .rate_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| options.rate_file.display().to_string());
    let report = Report::build(&run, &source_name).render();

    let report_path = options
        .output
        .clone()
        .unwrap_or_else(|| default_report_path(&options.rate_file, options.division_factor));

    let written = if options.dry_run {
        debug!("Dry run, skipping write of {}", report_path.display());
        false
    } else {
        write_report(&report_path, &report)?;
        info!("Report written to {}", report_path.display());
        true
    };

    Ok(RunOutcome {
        run,
        report,
        report_path,
        written,
    })
}

fn log_run(run: &PartitionRun) {
    for p in &run.partitions {
        debug!(
            partition = p.index,
            kind = p.kind.as_str(),
            sites = p.site_count(),
            "Rate-span: {:.5}-{:.5}",
            p.upper_bound,
            p.lower_bound
        );
    }

    if !run.reached_cutoff() {
        warn!(
            "Stopped after {} partitions without reaching the cutoff of {} sites",
            run.partition_count(),
            run.cutoff
        );
    }

    let Some(mismatch) = &run.mismatch else {
        info!(
            partitions = run.partition_count(),
            assigned = run.assigned_count,
            "All sites partitioned"
        );
        return;
    };

    warn!("{}", mismatch);
    for missed in &mismatch.missed {
        match missed.reason {
            MissReason::BoundaryTie { partition } => warn!(
                site = missed.site,
                rate = missed.rate,
                "Site sits exactly on the lower bound of Partition_{} and was excluded by both neighbours",
                partition
            ),
            MissReason::Unreached => warn!(
                site = missed.site,
                rate = missed.rate,
                "Site lies below the last partition created"
            ),
        }
    }
    for site in &mismatch.duplicated {
        warn!(site, "Site assigned to more than one partition");
    }
}
