use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::config::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = include_str!("../templates/license-gate.toml");

pub fn generate_config() -> Result<()> {
    generate_config_at_path(CONFIG_FILE)
}

/// Write a starter config. If one already exists, add only the keys it is
/// missing and leave the rest (values, comments, ordering) untouched.
pub fn generate_config_at_path<P: AsRef<Path>>(path: P) -> Result<()> {
    let config_path = path.as_ref();

    if !config_path.exists() {
        fs::write(config_path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("✅ Wrote {}", config_path.display());
        return Ok(());
    }

    let added = merge_missing_keys(config_path)?;
    if added.is_empty() {
        println!("✅ {} already complete, nothing to add", config_path.display());
    } else {
        println!(
            "✅ Added {} to {}",
            added.join(", "),
            config_path.display()
        );
    }

    Ok(())
}

fn merge_missing_keys(config_path: &Path) -> Result<Vec<String>> {
    let existing_content = fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    let mut doc = existing_content
        .parse::<toml_edit::DocumentMut>()
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;

    let template = CONFIG_TEMPLATE
        .parse::<toml_edit::DocumentMut>()
        .context("Invalid embedded config template")?;

    let mut added = Vec::new();
    for (key, item) in template.iter() {
        if !doc.contains_key(key) {
            doc[key] = item.clone();
            added.push(key.to_string());
        }
    }

    if !added.is_empty() {
        fs::write(config_path, doc.to_string())
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
    }

    Ok(added)
}
