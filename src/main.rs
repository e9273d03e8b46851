//! SkillVault - database-backed skills with progressive disclosure.
//!
//! Main entry point for the SkillVault CLI.

mod cli;
mod cmd_agent;
mod cmd_init;
mod cmd_persona;
mod cmd_skill;
mod context;

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, Commands};
use context::AppContext;

/// Get the SkillVault data directory (~/.skillvault).
fn skillvault_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".skillvault")
}

/// Initialize tracing with a stderr console layer and a daily log file.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = skillvault_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("skillvault")
        .filename_suffix("log")
        .max_log_files(30)
        .build(&log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Must outlive main or buffered lines are lost.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Console output goes to stderr; stdout carries command results.
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let ctx = AppContext::load(&cli.config, cli.db).await?;
    debug!("Using database {}", ctx.config.database.path);

    match cli.command {
        Commands::Init { bundles } => cmd_init::handle_init(&ctx, bundles).await,
        Commands::Persona { action } => cmd_persona::handle_persona_command(&ctx, action).await,
        Commands::Skill { action } => cmd_skill::handle_skill_command(&ctx, action).await,
        Commands::Prompt { persona } => {
            cmd_agent::handle_prompt(&ctx, ctx.persona(&persona)).await
        }
        Commands::Load { name, persona } => {
            cmd_agent::handle_load(&ctx, ctx.persona(&persona), &name).await
        }
    }
}
