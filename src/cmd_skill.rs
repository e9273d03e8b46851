//! Skill subcommand handlers.

use std::path::Path;

use tracing::info;

use skillvault_protocols::{Provenance, SkillCatalog, SkillImport, SkillManifest};
use skillvault_skills_bundle::{BundleImporter, ImportOutcome};

use crate::cli::SkillAction;
use crate::context::AppContext;

const CONTENT_PREVIEW_CHARS: usize = 500;

/// Handle skill subcommands.
pub(crate) async fn handle_skill_command(
    ctx: &AppContext,
    action: SkillAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SkillAction::List { persona, format } => skill_list(ctx, ctx.persona(&persona), &format).await,
        SkillAction::Info { skill_id, persona } => {
            skill_info(ctx, ctx.persona(&persona), &skill_id).await
        }
        SkillAction::Import { dir, persona } => {
            skill_import(ctx, ctx.persona(&persona), &dir).await
        }
        SkillAction::Add {
            name,
            description,
            content_file,
            priority,
            persona,
        } => {
            skill_add(
                ctx,
                ctx.persona(&persona),
                &name,
                &description,
                &content_file,
                priority,
            )
            .await
        }
    }
}

/// List a persona's skills in catalog order.
async fn skill_list(
    ctx: &AppContext,
    persona: &str,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let skills = ctx.store.list_skills(persona).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&skills)?);
        return Ok(());
    }

    if skills.is_empty() {
        println!("No skills found for persona '{}'.", persona);
        return Ok(());
    }

    println!("{:<20} {:<25} {:>8} {:<15} {}", "ID", "NAME", "PRIORITY", "CATEGORY", "DESCRIPTION");
    println!("{}", "-".repeat(100));
    for skill in &skills {
        println!(
            "{:<20} {:<25} {:>8} {:<15} {}",
            skill.skill_id,
            skill.name,
            skill.priority,
            skill.category.as_deref().unwrap_or("-"),
            skill.catalog_description()
        );
    }
    Ok(())
}

/// Show detailed info about a skill.
async fn skill_info(
    ctx: &AppContext,
    persona: &str,
    identifier: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let skill = ctx
        .store
        .get_skill(persona, identifier)
        .await?
        .ok_or_else(|| format!("skill '{}' not found for persona '{}'", identifier, persona))?;

    println!("Skill: {}", skill.name);
    println!("{}", "=".repeat(50));
    println!("ID:          {}", skill.skill_id);
    println!("Version:     {}", skill.version);
    println!("Status:      {}", skill.status);
    println!("Priority:    {}", skill.priority);
    if let Some(short) = &skill.short_description {
        println!("Summary:     {}", short);
    }
    println!("Description: {}", skill.description);
    if let Some(cat) = &skill.category {
        println!("Category:    {}", cat);
    }
    if !skill.tags.is_empty() {
        println!("Tags:        {}", skill.tags.join(", "));
    }
    if let Some(author) = &skill.author {
        println!("Author:      {}", author);
    }
    if let Some(path) = &skill.provenance.content_file_path {
        println!("Source:      {}", path);
    }
    if let Some(repo) = &skill.provenance.repo_url {
        let commit = skill.provenance.commit_hash.as_deref().unwrap_or("-");
        println!("Repository:  {} @ {}", repo, commit);
    }

    let calls = ctx.store.list_api_calls(&skill.skill_id).await?;
    if !calls.is_empty() {
        println!("\nAPI calls:");
        for call in calls {
            println!("  - {} {} {}", call.api_name, call.method, call.url);
        }
    }

    let requirements = ctx.store.list_requirements(&skill.skill_id).await?;
    if !requirements.is_empty() {
        println!("\nRequirements:");
        for req in requirements {
            let value = req.value.map(|v| format!(" = {}", v)).unwrap_or_default();
            println!("  - [{}] {}{}", req.requirement_type.as_str(), req.name, value);
        }
    }

    let history = ctx.store.sync_history(&skill.skill_id).await?;
    if !history.is_empty() {
        println!("\nSync history:");
        for entry in history {
            let duration = entry
                .outcome
                .duration_ms
                .map(|ms| format!(" ({} ms)", ms))
                .unwrap_or_default();
            println!(
                "  - {} {} {}{}",
                entry.synced_at.format("%Y-%m-%d %H:%M:%S"),
                entry.outcome.sync_type.as_str(),
                entry.outcome.status.as_str(),
                duration
            );
        }
    }

    let preview: String = skill.content.chars().take(CONTENT_PREVIEW_CHARS).collect();
    println!("\nContent:\n{}", preview);
    if skill.content.chars().count() > CONTENT_PREVIEW_CHARS {
        println!("...");
    }

    Ok(())
}

/// Import a single bundle directory.
async fn skill_import(
    ctx: &AppContext,
    persona: &str,
    dir: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let item = BundleImporter::new(ctx.store.clone())
        .import_dir(persona, dir)
        .await;
    let id = item.skill_id.as_deref().unwrap_or(&item.dir_name);

    match item.outcome {
        ImportOutcome::Imported => {
            println!("Imported skill '{}' into persona '{}'", id, persona);
            Ok(())
        }
        ImportOutcome::Skipped => {
            println!("Skill '{}' already exists, skipped", id);
            Ok(())
        }
        ImportOutcome::Failed { kind, message } => {
            Err(format!("import of {} failed [{}]: {}", dir.display(), kind, message).into())
        }
    }
}

/// Add a skill from a name, description and content file.
async fn skill_add(
    ctx: &AppContext,
    persona: &str,
    name: &str,
    description: &str,
    content_file: &Path,
    priority: i32,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(content_file)?;
    let manifest = SkillManifest::quick(name, description).with_priority(priority);
    let import = SkillImport::new(manifest, content)
        .with_provenance(Provenance::from_file(content_file.to_string_lossy()));

    let skill = ctx.store.import_skill(persona, import).await?;
    info!("Added skill '{}' to persona '{}'", skill.skill_id, persona);
    println!("Added skill '{}' ({})", skill.name, skill.skill_id);
    Ok(())
}
