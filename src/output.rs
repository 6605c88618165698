use crate::gate::GateOutcome;
use crate::rules::RuleSet;

pub fn format_outcome(outcome: &GateOutcome) -> String {
    let mut output = String::new();

    output.push_str("🔏 License header audit\n");
    output.push_str(&format!(
        "✅ {} directories scanned, no unknown or unapproved licenses\n",
        outcome.scanned_directories.len()
    ));
    output.push_str(&format!("📄 Report: {}\n", outcome.report_path.display()));

    output
}

pub fn format_rules_table(rules: &RuleSet) -> String {
    let mut output = String::new();

    output.push_str("┌──────────┬────────────────────────────────┬──────────┬──────────┐\n");
    output.push_str("│ Category │ License family                 │ Patterns │ Approved │\n");
    output.push_str("├──────────┼────────────────────────────────┼──────────┼──────────┤\n");

    for family in &rules.families {
        let approved = if rules.approved.contains(&family.name) {
            "✅ yes"
        } else {
            "🚫 no"
        };
        output.push_str(&format!(
            "│ {:<8} │ {:<30} │ {:<8} │ {:<7} │\n",
            family.category,
            truncate(&family.name, 30),
            family.patterns.len(),
            approved
        ));
    }

    output.push_str("└──────────┴────────────────────────────────┴──────────┴──────────┘\n");

    output
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let prefix: String = s.chars().take(max_len - 1).collect();
        format!("{}…", prefix)
    }
}
