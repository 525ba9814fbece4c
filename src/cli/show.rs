//! Show command - print one module's questionnaire

use anyhow::Result;
use console::style;

use super::CliEnv;
use crate::models::Severity;

pub fn run(env: &CliEnv, module_id: &str) -> Result<()> {
    let module = env.catalog.get_module(module_id)?;

    println!("\n{}", style(&module.title).bold());
    if !module.subtitle.is_empty() {
        println!("{}", module.subtitle);
    }
    println!("{}\n", style(format!("Standard: {}", module.standard)).dim());

    let mut current_category = "";
    for (i, question) in module.questions.iter().enumerate() {
        if question.category != current_category {
            current_category = question.category.as_str();
            println!("{}", style(current_category.to_uppercase()).bold().underlined());
        }

        println!(
            "  {} {} {}",
            style(format!("{:>2}.", i + 1)).dim(),
            question.text,
            style(format!("[{}]", question.id)).dim()
        );
        if let Some(note) = &question.note {
            println!("      {}", style(note).italic().dim());
        }
        for option in &question.options {
            let risk = option
                .risk
                .as_ref()
                .map(|r| severity_label(r.severity))
                .unwrap_or_default();
            println!(
                "      {} {:<60} {:>2} pts  {}",
                style(format!("{})", option.id)).cyan(),
                option.label,
                option.score,
                risk
            );
        }
        println!();
    }
    Ok(())
}

fn severity_label(severity: Severity) -> String {
    let label = format!("[{severity}]");
    match severity {
        Severity::Critical => style(label).red().bold().to_string(),
        Severity::Major => style(label).red().to_string(),
        Severity::Moderate => style(label).yellow().to_string(),
        Severity::Low => style(label).blue().to_string(),
    }
}
