pub mod audit;
pub mod config;
pub mod gate;
pub mod init;
pub mod output;
pub mod report;
pub mod rules;

// Re-export main types for easy access
pub use audit::{AuditRunner, AuditTool, ProcessAuditRunner};
pub use gate::{run_gate, GateConfig, GateLogger, GateOutcome, LicenseViolation, StderrLogger};
pub use report::ReportVerdict;
pub use rules::{default_rule_set, LicenseFamily, RuleSet};
