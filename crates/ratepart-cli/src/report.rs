//! Report assembly: description, MrBayes charset block and PHYLIP block.
//!
//! The report is built as three lists of lines from a finished
//! [`PartitionRun`] and serialised once by [`Report::render`]. Sections are
//! separated by two blank lines.

use ratepart_domain::{Partition, PartitionRun};

const SECTION_SEPARATOR: &str = "\n\n\n";

/// A rendered-on-demand partition report.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    description: Vec<String>,
    mrbayes: Vec<String>,
    phylip: Vec<String>,
}

impl Report {
    /// Build the report for `run`, naming the rate file by `source_name`.
    pub fn build(run: &PartitionRun, source_name: &str) -> Self {
        Self {
            description: description_lines(run, source_name),
            mrbayes: mrbayes_lines(run),
            phylip: phylip_lines(run),
        }
    }

    /// Descriptive header, one line per partition, and any accounting warning.
    pub fn description(&self) -> &[String] {
        &self.description
    }

    /// MrBayes block lines.
    pub fn mrbayes(&self) -> &[String] {
        &self.mrbayes
    }

    /// PHYLIP block lines.
    pub fn phylip(&self) -> &[String] {
        &self.phylip
    }

    /// Serialise all three sections.
    pub fn render(&self) -> String {
        [&self.description, &self.mrbayes, &self.phylip]
            .iter()
            .map(|lines| lines.join("\n"))
            .collect::<Vec<_>>()
            .join(SECTION_SEPARATOR)
    }
}

fn description_lines(run: &PartitionRun, source_name: &str) -> Vec<String> {
    let divnum = format_float(run.division_factor.value());

    let mut lines = vec![
        "Partition output from rate-partitions".to_string(),
        String::new(),
        format!("For rate file: {} with {} sites!", source_name, run.site_count),
        String::new(),
        format!("Manually set dividing factor: {}", divnum),
        "Partitions calculated according to:".to_string(),
        format!(
            "\t1st partition: highest rate - ((highest rate - minimum_rate)/({})),",
            divnum
        ),
        format!(
            "\tthe remaining as lower boundary rate= upper boundary rate -((upper boundary rate - minimum rate)/({}+Partitionnumber*0.3)).",
            divnum
        ),
        format!(
            "\tLast partition created when less than 10% of total characters are left (={} characters).",
            format_float(run.cutoff)
        ),
        String::new(),
        format!(
            "Rate spread of entire data set (Highest (slowest, 1=invariant) to lowest (fastest) ): Highest: {}, lowest: {}, spread: {}",
            format_float(run.max_rate),
            format_float(run.min_rate),
            format_float(run.spread)
        ),
    ];

    for partition in &run.partitions {
        lines.push(format!(
            "Partition_{}({} sites):\tRate-span: {}-{}",
            partition.index,
            partition.site_count(),
            format_float(round6(partition.upper_bound)),
            format_float(round6(partition.lower_bound))
        ));
        lines.push(String::new());
    }

    if let Some(mismatch) = &run.mismatch {
        // Replaces the trailing blank so the warning follows the last partition
        lines.pop();
        lines.push(mismatch.to_string());
    }

    lines
}

fn mrbayes_lines(run: &PartitionRun) -> Vec<String> {
    let mut lines = vec!["MrBayes style".to_string(), "begin mrbayes;".to_string()];

    lines.extend(
        run.non_empty()
            .map(|p| format!("Charset Partition_{} = {};", p.index, site_list(p, " "))),
    );

    let names: Vec<String> = run
        .partitions
        .iter()
        .map(|p| format!("Partition_{}", p.index))
        .collect();
    lines.push(format!(
        "partition Partitions = {}: {};",
        run.partition_count(),
        names.join(", ")
    ));
    lines.push("set partition = Partitions;".to_string());

    lines
}

fn phylip_lines(run: &PartitionRun) -> Vec<String> {
    let mut lines = vec!["PHYLIP  style".to_string()];
    lines.extend(
        run.non_empty()
            .map(|p| format!("DNA, Partition_{} = {}", p.index, site_list(p, ", "))),
    );
    lines
}

fn site_list(partition: &Partition, separator: &str) -> String {
    partition
        .sites
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Round to six decimal places.
pub fn round6(value: f64) -> f64 {
    format!("{:.6}", value).parse().unwrap_or(value)
}

/// Render a float the way rate reports always have: shortest round-trip
/// digits, always with a decimal point, scientific notation (two-digit
/// exponent) below 1e-4 and from 1e16 up.
///
/// ```
/// use ratepart_cli::report::format_float;
///
/// assert_eq!(format_float(2.0), "2.0");
/// assert_eq!(format_float(0.465806), "0.465806");
/// assert_eq!(format_float(0.00001), "1e-05");
/// ```
pub fn format_float(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        let zero = if value.is_sign_negative() { "-0.0" } else { "0.0" };
        return zero.to_string();
    }

    let scientific = format!("{:e}", value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if !(-4..16).contains(&exponent) {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exponent.abs());
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratepart_domain::{partition, DivisionFactor, RateSequence};

    fn descending_run() -> PartitionRun {
        let rates =
            RateSequence::new(vec![1.0, 0.9, 0.8, 0.7, 0.6, 0.5, 0.4, 0.3, 0.2, 0.1]).unwrap();
        partition(&rates, DivisionFactor::new(2.5).unwrap())
    }

    fn tie_run() -> PartitionRun {
        let mut values = vec![1.0; 18];
        values.extend([0.5, 0.0]);
        let rates = RateSequence::new(values).unwrap();
        partition(&rates, DivisionFactor::new(2.0).unwrap())
    }

    #[test]
    fn test_format_float() {
        assert_eq!(format_float(1.0), "1.0");
        assert_eq!(format_float(0.64), "0.64");
        assert_eq!(format_float(1.35), "1.35");
        assert_eq!(format_float(0.0), "0.0");
        assert_eq!(format_float(72.7), "72.7");
        assert_eq!(format_float(0.0001), "0.0001");
        assert_eq!(format_float(0.000015), "1.5e-05");
        assert_eq!(format_float(1e16), "1e+16");
        assert_eq!(format_float(1e15), "1000000000000000.0");
        assert_eq!(format_float(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_round6() {
        assert_eq!(round6(0.4658064516129032), 0.465806);
        assert_eq!(round6(0.18487848), 0.184878);
        assert_eq!(round6(1.0), 1.0);
    }

    #[test]
    fn test_partition_lines() {
        let report = Report::build(&descending_run(), "rates.txt");
        let lines: Vec<&str> = report
            .description()
            .iter()
            .filter(|l| l.starts_with("Partition_"))
            .map(String::as_str)
            .collect();

        assert_eq!(
            lines,
            vec![
                "Partition_1(4 sites):\tRate-span: 1.0-0.64",
                "Partition_2(2 sites):\tRate-span: 0.64-0.465806",
                "Partition_3(1 sites):\tRate-span: 0.465806-0.358216",
                "Partition_4(1 sites):\tRate-span: 0.358216-0.288428",
                "Partition_5(0 sites):\tRate-span: 0.288428-0.241321",
                "Partition_6(0 sites):\tRate-span: 0.241321-0.208456",
                "Partition_7(1 sites):\tRate-span: 0.208456-0.184878",
                "Partition_8(1 sites):\tRate-span: 0.184878-0.1",
            ]
        );
    }

    #[test]
    fn test_header() {
        let report = Report::build(&descending_run(), "rates.txt");
        let text = report.description().join("\n");

        assert!(text.contains("For rate file: rates.txt with 10 sites!"));
        assert!(text.contains("Manually set dividing factor: 2.5"));
        assert!(text.contains("(=1.0 characters)"));
        assert!(text.contains("Highest: 1.0, lowest: 0.1, spread: 0.9"));
        assert!(text.ends_with("Rate-span: 0.184878-0.1\n"));
    }

    #[test]
    fn test_mrbayes_block() {
        let report = Report::build(&descending_run(), "rates.txt");
        assert_eq!(
            report.mrbayes().join("\n"),
            "MrBayes style\n\
             begin mrbayes;\n\
             Charset Partition_1 = 1 2 3 4;\n\
             Charset Partition_2 = 5 6;\n\
             Charset Partition_3 = 7;\n\
             Charset Partition_4 = 8;\n\
             Charset Partition_7 = 9;\n\
             Charset Partition_8 = 10;\n\
             partition Partitions = 8: Partition_1, Partition_2, Partition_3, Partition_4, \
             Partition_5, Partition_6, Partition_7, Partition_8;\n\
             set partition = Partitions;"
        );
    }

    #[test]
    fn test_phylip_block() {
        let report = Report::build(&descending_run(), "rates.txt");
        assert_eq!(
            report.phylip().join("\n"),
            "PHYLIP  style\n\
             DNA, Partition_1 = 1, 2, 3, 4\n\
             DNA, Partition_2 = 5, 6\n\
             DNA, Partition_3 = 7\n\
             DNA, Partition_4 = 8\n\
             DNA, Partition_7 = 9\n\
             DNA, Partition_8 = 10"
        );
    }

    #[test]
    fn test_sections_joined() {
        let text = Report::build(&descending_run(), "rates.txt").render();
        assert!(text.contains("Rate-span: 0.184878-0.1\n\n\n\nMrBayes style\n"));
        assert!(text.contains("set partition = Partitions;\n\n\nPHYLIP  style\n"));
        assert!(text.ends_with("DNA, Partition_8 = 10"));
    }

    #[test]
    fn test_mismatch_warning_in_body() {
        let text = Report::build(&tie_run(), "tie.txt").render();
        assert!(text.contains(
            "Partition_2(1 sites):\tRate-span: 0.5-0.0\n\
             Total sites partitioned is not identical to imported sites!:19 vs 20\n\n\nMrBayes style"
        ));
        assert!(text.contains("Charset Partition_2 = 20;"));
    }
}
