use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::rules::RuleSet;

/// Seam to the external license audit tool.
///
/// The tool owns all text analysis: pattern matching, family assignment,
/// and the report format. This crate only hands it the rule set and the
/// directories to scan, and expects a line-oriented report at
/// `report_path` when the call returns.
pub trait AuditRunner {
    fn run_audit(&self, directories: &[PathBuf], rules: &RuleSet, report_path: &Path) -> Result<()>;
}

/// Invocation settings for the audit tool, from the `[tool]` config section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditTool {
    /// Executable to spawn ("java" for the stock tool)
    pub command: String,

    /// Jars forming the tool's runtime classpath
    #[serde(default)]
    pub classpath: Vec<PathBuf>,

    /// Entry class, appended after the classpath when set
    #[serde(rename = "main-class")]
    pub main_class: Option<String>,

    /// Extra arguments inserted before the rules file and scan directories
    #[serde(default)]
    pub args: Vec<String>,
}

/// Runs the audit tool as a blocking subprocess, redirecting its stdout to
/// the report path. Spawn failures and nonzero exits propagate unmodified;
/// there is no retry.
pub struct ProcessAuditRunner {
    pub tool: AuditTool,
}

impl ProcessAuditRunner {
    pub fn new(tool: AuditTool) -> Self {
        Self { tool }
    }
}

impl AuditRunner for ProcessAuditRunner {
    fn run_audit(&self, directories: &[PathBuf], rules: &RuleSet, report_path: &Path) -> Result<()> {
        // The rule set travels as a JSON file next to the report.
        let rules_path = report_path.with_file_name("rules.json");
        let rules_json = serde_json::to_string_pretty(&rules.wire_form())
            .context("Failed to serialize rule set for the audit tool")?;
        fs::write(&rules_path, rules_json)
            .with_context(|| format!("Failed to write rules file: {}", rules_path.display()))?;

        let report_file = File::create(report_path)
            .with_context(|| format!("Failed to create audit report: {}", report_path.display()))?;

        let args = build_args(&self.tool, &rules_path, directories);
        let status = match Command::new(&self.tool.command)
            .args(&args)
            .stdout(report_file)
            .status()
        {
            Ok(status) => status,
            Err(error) => {
                // The redirect target was created eagerly; a failed launch
                // must not leave an empty report behind.
                let _ = fs::remove_file(report_path);
                return Err(error).with_context(|| {
                    format!("Failed to launch audit tool '{}'", self.tool.command)
                });
            }
        };

        if !status.success() {
            anyhow::bail!("Audit tool '{}' exited with {}", self.tool.command, status);
        }

        Ok(())
    }
}

/// Argument vector for the audit tool invocation:
/// `[-cp <classpath>] [main-class] [args...] --rules <file> <dir>...`
fn build_args(tool: &AuditTool, rules_path: &Path, directories: &[PathBuf]) -> Vec<OsString> {
    let mut args: Vec<OsString> = Vec::new();

    if !tool.classpath.is_empty() {
        args.push("-cp".into());
        args.push(join_classpath(&tool.classpath));
    }
    if let Some(main_class) = &tool.main_class {
        args.push(main_class.into());
    }
    for arg in &tool.args {
        args.push(arg.into());
    }

    args.push("--rules".into());
    args.push(rules_path.as_os_str().to_os_string());
    for directory in directories {
        args.push(directory.as_os_str().to_os_string());
    }

    args
}

fn join_classpath(entries: &[PathBuf]) -> OsString {
    let separator = if cfg!(windows) { ";" } else { ":" };
    let mut joined = OsString::new();
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            joined.push(separator);
        }
        joined.push(entry.as_os_str());
    }
    joined
}
