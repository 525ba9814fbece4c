//! Modules command - list the audit modules of the active catalog

use anyhow::Result;
use console::style;
use serde::Serialize;

use super::CliEnv;
use crate::models::AuditModule;

#[derive(Serialize)]
struct ModuleEntry<'a> {
    id: &'a str,
    title: &'a str,
    subtitle: &'a str,
    standard: &'a str,
    questions: usize,
    categories: Vec<&'a str>,
}

impl<'a> From<&'a AuditModule> for ModuleEntry<'a> {
    fn from(module: &'a AuditModule) -> Self {
        Self {
            id: &module.id,
            title: &module.title,
            subtitle: &module.subtitle,
            standard: &module.standard,
            questions: module.questions.len(),
            categories: module.categories(),
        }
    }
}

pub fn run(env: &CliEnv, json: bool) -> Result<()> {
    let modules = env.catalog.list_modules();

    if json {
        let entries: Vec<ModuleEntry> = modules.iter().map(ModuleEntry::from).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let id_width = modules.iter().map(|m| m.id.len()).max().unwrap_or(0);
    println!();
    for module in modules {
        println!(
            "  {}  {}  {}",
            style(format!("{:<width$}", module.id, width = id_width)).cyan().bold(),
            module.title,
            style(format!("({} questions)", module.questions.len())).dim()
        );
        if !module.subtitle.is_empty() {
            println!("  {:<width$}  {}", "", style(&module.subtitle).dim(), width = id_width);
        }
        println!(
            "  {:<width$}  {}",
            "",
            style(format!("Standard: {}", module.standard)).dim(),
            width = id_width
        );
    }
    println!();
    Ok(())
}
