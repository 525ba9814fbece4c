//! Init command - write an example configuration file

use anyhow::{Context, Result};
use console::style;
use std::path::Path;

use crate::config::{example_config, PROJECT_CONFIG_FILE};

/// Run the init command
pub fn run(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(PROJECT_CONFIG_FILE);

    if config_path.exists() && !force {
        println!(
            "{} {} already exists (use --force to overwrite)",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, example_config())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );
    println!("\nNext steps:");
    println!("  {} List audit modules", style("infraudit modules").cyan());
    println!("  {} Start an interactive audit", style("infraudit run").cyan());
    Ok(())
}
