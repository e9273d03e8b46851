//! Database initialisation.

use std::path::PathBuf;

use tracing::info;

use skillvault_protocols::{NewPersona, SkillCatalog};
use skillvault_skills_bundle::{BundleImporter, ImportOutcome, ImportReport};
use skillvault_skills_progressive::DEFAULT_SYSTEM_PROMPT;

use crate::context::AppContext;

const DEFAULT_PERSONA_DESCRIPTION: &str = "Default agent persona with a range of professional skills";

/// Seed the configured persona and import every bundle into it.
pub(crate) async fn handle_init(
    ctx: &AppContext,
    bundles: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let persona_name = ctx.config.agent.persona.as_str();
    println!("Initialising skill store...");

    if ctx.store.get_persona(persona_name).await?.is_some() {
        println!("  Persona '{}' already exists, skipping", persona_name);
    } else {
        let system_prompt = ctx
            .config
            .agent
            .system_prompt
            .clone()
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());
        ctx.store
            .add_persona(
                NewPersona::new(persona_name)
                    .with_description(DEFAULT_PERSONA_DESCRIPTION)
                    .with_system_prompt(system_prompt),
            )
            .await
            .map_err(|e| {
                format!(
                    "cannot create persona '{}' ({}); if it was disabled, run `skillvault persona enable {}`",
                    persona_name, e, persona_name
                )
            })?;
        println!("  Created persona: {}", persona_name);
    }

    let dir = bundles.unwrap_or_else(|| ctx.config.import.resolved_dir());
    if !dir.is_dir() {
        println!("  Bundle directory {} not found, nothing to import", dir.display());
        return Ok(());
    }

    println!("\nImporting skills from {}...", dir.display());
    let report = BundleImporter::new(ctx.store.clone())
        .import_all(persona_name, &dir)
        .await;
    print_report(&report);

    info!("Initialisation complete for persona '{}'", persona_name);
    Ok(())
}

pub(crate) fn print_report(report: &ImportReport) {
    for item in &report.items {
        let id = item.skill_id.as_deref().unwrap_or("?");
        match &item.outcome {
            ImportOutcome::Imported => println!("  + {} ({})", id, item.dir_name),
            ImportOutcome::Skipped => println!("  = {} already exists, skipped", id),
            ImportOutcome::Failed { kind, message } => {
                println!("  ! {} failed [{}]: {}", item.dir_name, kind, message)
            }
        }
    }
    println!(
        "\nImported: {}, Skipped: {}, Failed: {}",
        report.imported, report.skipped, report.failed
    );
}
