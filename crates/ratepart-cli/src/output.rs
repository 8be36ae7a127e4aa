//! Console output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use ratepart_domain::PartitionRun;
use std::path::Path;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Active format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a finished run for the console.
    pub fn format_run(&self, run: &PartitionRun, report_path: &Path) -> Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.format_run_text(run)),
            OutputFormat::Json => self.format_run_json(run, report_path),
            OutputFormat::Quiet => Ok(report_path.display().to_string()),
        }
    }

    /// Format the run as JSON.
    fn format_run_json(&self, run: &PartitionRun, report_path: &Path) -> Result<String> {
        let partitions: Vec<serde_json::Value> = run
            .partitions
            .iter()
            .map(|p| {
                serde_json::json!({
                    "index": p.index,
                    "kind": p.kind.as_str(),
                    "upper_bound": p.upper_bound,
                    "lower_bound": p.lower_bound,
                    "sites": p.sites,
                })
            })
            .collect();

        let missed: Vec<usize> = run
            .mismatch
            .as_ref()
            .map(|m| m.missed.iter().map(|s| s.site).collect())
            .unwrap_or_default();

        let document = serde_json::json!({
            "report": report_path.display().to_string(),
            "site_count": run.site_count,
            "max_rate": run.max_rate,
            "min_rate": run.min_rate,
            "spread": run.spread,
            "cutoff": run.cutoff,
            "division_factor": run.division_factor.value(),
            "assigned_count": run.assigned_count,
            "balanced": run.is_balanced(),
            "missed_sites": missed,
            "partitions": partitions,
        });

        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Format the run as a summary followed by a partition table.
    fn format_run_text(&self, run: &PartitionRun) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Partition", "Sites", "Upper rate", "Lower rate"]);

        for partition in &run.partitions {
            builder.push_record([
                format!("Partition_{}", partition.index),
                partition.site_count().to_string(),
                format!("{:.5}", partition.upper_bound),
                format!("{:.5}", partition.lower_bound),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut lines = vec![
            format!("Total data - {} sites.", run.site_count),
            format!("Slowest rate: {}", run.max_rate),
            format!("Fastest rate: {}", run.min_rate),
            format!("Rate spread: {}", run.spread),
            String::new(),
            table.to_string(),
        ];

        if let Some(mismatch) = &run.mismatch {
            lines.push(self.warning(&mismatch.to_string()));
        }

        lines.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Message printed once the report file exists.
    pub fn report_written(&self, path: &Path) -> String {
        self.success(&format!(
            "Output file with rate partition summary and MrBayes and PHYLIP partition schemes has been created: {}",
            path.display()
        ))
    }

    /// Message printed instead when `--dry-run` skipped the write.
    pub fn report_skipped(&self, path: &Path) -> String {
        self.info(&format!("Dry run, report not written to {}", path.display()))
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}
