use crate::output::OutputFormat;
use anyhow::Result;
use colored::*;
use entities::{registry, EntityType, LocationPolicy, ProjectPolicy};
use serde::Serialize;

/// One line of the entity type catalogue
#[derive(Debug, Serialize)]
struct TypeSummary {
    entity_type: EntityType,
    template: String,
    required: &'static [&'static str],
    optional: &'static [&'static str],
    project: ProjectPolicy,
    location: LocationPolicy,
}

/// List every registered entity type
pub fn list(format: OutputFormat) -> Result<()> {
    let summaries: Vec<TypeSummary> = registry::entries()
        .iter()
        .map(|entry| TypeSummary {
            entity_type: entry.entity_type,
            template: entry.template_string(),
            required: entry.required,
            optional: entry.optional,
            project: entry.project,
            location: entry.location,
        })
        .collect();

    format.print(&summaries, |summaries| print_types_text(summaries))
}

fn print_types_text(summaries: &[TypeSummary]) {
    println!("{}", "=== Entity Types ===".bold());
    println!();

    for summary in summaries {
        println!(
            "{}  {}",
            summary.entity_type.to_string().cyan().bold(),
            summary.template.green()
        );
        if !summary.required.is_empty() {
            println!("  {}: {}", "required".bold(), summary.required.join(", "));
        }
        if !summary.optional.is_empty() {
            println!("  {}: {}", "optional".bold(), summary.optional.join(", "));
        }
        println!("  {}: {}", "project".bold(), summary.project);
        println!("  {}: {}", "location".bold(), summary.location);
    }

    println!();
    println!("{}", format!("Total entity types: {}", summaries.len()).green());
}
