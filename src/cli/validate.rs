//! Validate command - report on the active catalog
//!
//! Loading already validated the catalog, so reaching this command means it
//! is well formed. What is left is to print what it contains.

use anyhow::Result;
use console::style;

use super::CliEnv;

pub fn run(env: &CliEnv) -> Result<()> {
    let catalog = &env.catalog;
    let modules = catalog.list_modules();
    let options: usize = modules
        .iter()
        .flat_map(|m| &m.questions)
        .map(|q| q.options.len())
        .sum();
    let with_risk = modules
        .iter()
        .flat_map(|m| &m.questions)
        .flat_map(|q| &q.options)
        .filter(|o| o.risk.is_some())
        .count();

    println!(
        "{} Catalog is valid: {} modules, {} questions, {} options ({} with a risk analysis)",
        style("✓").green(),
        modules.len(),
        catalog.question_count(),
        options,
        with_risk
    );
    for module in modules {
        println!(
            "  {} {} questions, {} categories",
            style(format!("{:<16}", module.id)).cyan(),
            module.questions.len(),
            module.categories().len()
        );
    }
    Ok(())
}
