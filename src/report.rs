use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Line prefix the audit tool prints when every file was assigned a license.
const ZERO_UNKNOWN_PREFIX: &str = "0 Unknown Licenses";

/// Per-file problem marker in the audit report.
const PROBLEM_PREFIX: &str = " !";

/// Outcome of the first pass over the audit report.
///
/// The two signals are independent: a report can count zero unknown
/// licenses and still flag individual files, and vice versa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportVerdict {
    pub zero_unknown_licenses: bool,
    pub found_problems_with_files: bool,
}

impl ReportVerdict {
    pub fn passed(&self) -> bool {
        self.zero_unknown_licenses && !self.found_problems_with_files
    }
}

/// First pass: read the report line by line and compute the verdict.
pub fn scan_verdict(report_path: &Path) -> Result<ReportVerdict> {
    let file = File::open(report_path)
        .with_context(|| format!("Failed to open audit report: {}", report_path.display()))?;

    let mut zero_unknown_licenses = false;
    let mut found_problems_with_files = false;

    for line in BufReader::new(file).lines() {
        let line = line
            .with_context(|| format!("Failed to read audit report: {}", report_path.display()))?;
        if line.starts_with(ZERO_UNKNOWN_PREFIX) {
            zero_unknown_licenses = true;
        }
        if line.starts_with(PROBLEM_PREFIX) {
            found_problems_with_files = true;
        }
    }

    Ok(ReportVerdict {
        zero_unknown_licenses,
        found_problems_with_files,
    })
}

/// Second pass: extract the unapproved-licenses detail section.
///
/// The tool delimits report sections with rows of `*`. The detail listing
/// sits in the second delimited section, so collect the lines after the
/// second delimiter and before the third, delimiters excluded.
pub fn unapproved_section(report_path: &Path) -> Result<Vec<String>> {
    let file = File::open(report_path)
        .with_context(|| format!("Failed to open audit report: {}", report_path.display()))?;

    let mut section = 0;
    let mut lines = Vec::new();

    for line in BufReader::new(file).lines() {
        let line = line
            .with_context(|| format!("Failed to read audit report: {}", report_path.display()))?;
        if is_section_delimiter(&line) {
            section += 1;
            continue;
        }
        if section == 2 {
            lines.push(line);
        }
    }

    Ok(lines)
}

fn is_section_delimiter(line: &str) -> bool {
    !line.is_empty() && line.chars().all(|c| c == '*')
}
