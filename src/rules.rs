use anyhow::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Width the external audit tool expects for family category codes.
const CATEGORY_WIDTH: usize = 5;

/// A named class of license text, identified by literal substrings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LicenseFamily {
    /// Short category code ("AL", "MIT", ...)
    pub category: String,
    /// Display name the audit tool reports files under
    pub name: String,
    /// Literal substrings that assign a file to this family
    pub patterns: Vec<String>,
}

/// The full rule set handed to the external audit tool: family definitions
/// in match-precedence order plus the display names considered acceptable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleSet {
    pub families: Vec<LicenseFamily>,
    pub approved: Vec<String>,
}

impl RuleSet {
    /// Order-preserving index of families by category code.
    pub fn family_index(&self) -> IndexMap<&str, &LicenseFamily> {
        self.families
            .iter()
            .map(|family| (family.category.as_str(), family))
            .collect()
    }

    /// Check internal consistency: category codes must be unique and every
    /// approved name must refer to a defined family.
    pub fn validate(&self) -> Result<()> {
        let index = self.family_index();
        if index.len() != self.families.len() {
            anyhow::bail!("Duplicate license family category codes in rule set");
        }

        for approved in &self.approved {
            if !self.families.iter().any(|family| &family.name == approved) {
                anyhow::bail!("Approved license '{}' does not match any defined family", approved);
            }
        }

        Ok(())
    }

    /// Rule set as the audit tool consumes it: category codes padded to the
    /// tool's fixed width.
    pub fn wire_form(&self) -> RuleSet {
        RuleSet {
            families: self
                .families
                .iter()
                .map(|family| LicenseFamily {
                    category: format!("{:<width$}", family.category, width = CATEGORY_WIDTH),
                    name: family.name.clone(),
                    patterns: family.patterns.clone(),
                })
                .collect(),
            approved: self.approved.clone(),
        }
    }
}

fn family(category: &str, name: &str, patterns: &[&str]) -> LicenseFamily {
    LicenseFamily {
        category: category.to_string(),
        name: name.to_string(),
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
    }
}

/// The built-in rule set. Family order is the precedence order the audit
/// tool applies: a file belongs to the first family whose pattern it
/// contains. BSD4 is defined but deliberately left off the approved list,
/// so advertising-clause files always fail the gate.
pub fn default_rule_set() -> RuleSet {
    RuleSet {
        families: vec![
            family(
                "BSD4",
                "Original BSD License (with advertising clause)",
                &["All advertising materials"],
            ),
            family(
                "BSD",
                "Modified BSD License",
                &[
                    // brics automaton
                    "Copyright (c) 2001-2009 Anders Moeller",
                    // snowball stemmers
                    "Copyright (c) 2001, Dr Martin Porter",
                    // UK spelling data
                    "Copyright (c) 2002, Richard Boulton",
                    // JaSpell
                    "Copyright (c) 2005 Bruno Martins",
                    // morfologik
                    "Copyright (c) 2006 Dawid Weiss",
                    // egothor stemmer
                    "Egothor Software License version 1.00",
                ],
            ),
            family(
                "MIT",
                "The MIT License",
                &["Permission is hereby granted, free of charge, to any person obtaining a copy"],
            ),
            family(
                "AL",
                "Apache",
                &[
                    "Licensed to the Apache Software Foundation (ASF) under",
                    "Licensed under the Apache License, Version 2.0 (the \"License\")",
                    "http://www.apache.org/licenses/LICENSE-2.0",
                ],
            ),
            family(
                "GEN",
                "Generated",
                &[
                    "Produced by GNUPLOT",
                    "This file was generated automatically by the Snowball to Java compiler",
                    "ANTLR GENERATED CODE",
                    "The following code was generated by JFlex",
                ],
            ),
        ],
        approved: vec![
            "Apache".to_string(),
            "The MIT License".to_string(),
            "Modified BSD License".to_string(),
            "Generated".to_string(),
        ],
    }
}
