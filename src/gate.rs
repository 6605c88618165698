use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use glob::Pattern;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::audit::AuditRunner;
use crate::report::{scan_verdict, unapproved_section};
use crate::rules::RuleSet;

/// Report location under the output root. Fixed so that repeated runs
/// overwrite instead of accumulate.
pub const REPORT_RELATIVE_PATH: &str = "reports/licenseHeaders/rat.log";

/// Everything the gate needs, injected explicitly so the task can run
/// against fakes in tests.
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Candidate source directories, one list per build component.
    /// Directories that do not exist are skipped, not an error.
    pub source_sets: Vec<Vec<PathBuf>>,

    /// Glob patterns for directories to leave out of the scan
    pub exclude: Vec<String>,

    /// Root of the build output tree; the report lands beneath it
    pub output_root: PathBuf,
}

/// Error-severity sink for the unapproved-licenses listing.
pub trait GateLogger {
    fn error(&self, message: &str);
}

/// Production logger, writes to stderr.
pub struct StderrLogger;

impl GateLogger for StderrLogger {
    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }
}

/// The designed failure mode: the audit ran and found unknown or
/// unapproved licenses. Distinct from invocation and I/O errors, which
/// stay plain propagated errors.
#[derive(Debug)]
pub struct LicenseViolation {
    pub report_path: PathBuf,
}

impl fmt::Display for LicenseViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown or unapproved licenses found. See the audit report at {}",
            self.report_path.display()
        )
    }
}

impl std::error::Error for LicenseViolation {}

/// Result of a passing run, for human or JSON output.
#[derive(Debug, Serialize)]
pub struct GateOutcome {
    pub report_path: PathBuf,
    pub scanned_directories: Vec<PathBuf>,
    pub generated_at: DateTime<Utc>,
}

/// Run the gate: select directories, invoke the audit tool, interpret the
/// report. Fully sequential; the audit call blocks until the tool exits.
pub fn run_gate(
    config: &GateConfig,
    rules: &RuleSet,
    runner: &dyn AuditRunner,
    logger: &dyn GateLogger,
) -> Result<GateOutcome> {
    let directories = scan_targets(config);
    let report_path = config.output_root.join(REPORT_RELATIVE_PATH);
    prepare_report_path(&report_path)?;

    runner.run_audit(&directories, rules, &report_path)?;

    let verdict = scan_verdict(&report_path)?;
    if !verdict.passed() {
        for line in unapproved_section(&report_path)? {
            logger.error(&line);
        }
        return Err(LicenseViolation {
            report_path: absolute(&report_path),
        }
        .into());
    }

    Ok(GateOutcome {
        report_path,
        scanned_directories: directories,
        generated_at: Utc::now(),
    })
}

/// Union of all source sets, existing directories only, exclude globs
/// applied, deduplicated in first-seen order.
fn scan_targets(config: &GateConfig) -> Vec<PathBuf> {
    let excludes: Vec<Pattern> = config
        .exclude
        .iter()
        .filter_map(|p| Pattern::new(p).ok())
        .collect();

    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for source_set in &config.source_sets {
        for directory in source_set {
            if !directory.is_dir() {
                continue;
            }
            if excludes
                .iter()
                .any(|pattern| pattern.matches(&directory.to_string_lossy()))
            {
                continue;
            }
            if seen.insert(directory.clone()) {
                targets.push(directory.clone());
            }
        }
    }

    targets
}

/// Create the report directory tree and drop any stale report so a re-run
/// starts clean.
fn prepare_report_path(report_path: &Path) -> Result<()> {
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create report directory: {}", parent.display()))?;
    }
    if report_path.exists() {
        fs::remove_file(report_path)
            .with_context(|| format!("Failed to delete stale report: {}", report_path.display()))?;
    }
    Ok(())
}

fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    })
}
