//! Persona subcommand handlers.

use skillvault_protocols::NewPersona;

use crate::cli::PersonaAction;
use crate::context::AppContext;

pub(crate) async fn handle_persona_command(
    ctx: &AppContext,
    action: PersonaAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        PersonaAction::List => persona_list(ctx).await,
        PersonaAction::Add {
            name,
            description,
            system_prompt,
        } => {
            let mut persona = NewPersona::new(name);
            persona.description = description;
            persona.system_prompt = system_prompt;
            let created = ctx.store.add_persona(persona).await?;
            println!("Created persona '{}' (id {})", created.name, created.id);
            Ok(())
        }
        PersonaAction::Disable { name } => set_enabled(ctx, &name, false).await,
        PersonaAction::Enable { name } => set_enabled(ctx, &name, true).await,
    }
}

async fn persona_list(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let personas = ctx.store.list_personas().await?;
    if personas.is_empty() {
        println!("No personas found. Run `skillvault init` first.");
        return Ok(());
    }

    println!("{:<20} {:<8} {:<25} {}", "NAME", "PROMPT", "CREATED", "DESCRIPTION");
    println!("{}", "-".repeat(80));
    for persona in personas {
        let prompt = if persona.system_prompt.is_some() { "custom" } else { "default" };
        println!(
            "{:<20} {:<8} {:<25} {}",
            persona.name,
            prompt,
            persona.created_at.format("%Y-%m-%d %H:%M:%S"),
            persona.description.as_deref().unwrap_or("-")
        );
    }
    Ok(())
}

async fn set_enabled(
    ctx: &AppContext,
    name: &str,
    enabled: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !ctx.store.set_persona_enabled(name, enabled).await? {
        return Err(format!("persona '{}' not found", name).into());
    }
    let state = if enabled { "enabled" } else { "disabled" };
    println!("Persona '{}' {}", name, state);
    Ok(())
}
