//! CLI definitions for SkillVault.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// SkillVault CLI.
#[derive(Parser)]
#[command(name = "skillvault")]
#[command(about = "Database-backed skills with progressive disclosure for LLM agents")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml", global = true)]
    pub config: PathBuf,

    /// Database path, overriding the config file (":memory:" for a throwaway store)
    #[arg(long, env = "SKILLVAULT_DB", global = true)]
    pub db: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the schema, seed the default persona and import bundles
    Init {
        /// Bundle directory (default: import.bundle_dir from the config)
        #[arg(long)]
        bundles: Option<PathBuf>,
    },

    /// Persona management commands
    Persona {
        #[command(subcommand)]
        action: PersonaAction,
    },

    /// Skill management commands
    Skill {
        #[command(subcommand)]
        action: SkillAction,
    },

    /// Print the system prompt as the model sees it on a turn
    Prompt {
        /// Persona name (default: agent.persona from the config)
        #[arg(long)]
        persona: Option<String>,
    },

    /// Run the load_skill tool and print its output
    Load {
        /// Skill ID or display name
        name: String,

        /// Persona name (default: agent.persona from the config)
        #[arg(long)]
        persona: Option<String>,
    },
}

#[derive(Subcommand)]
pub(crate) enum PersonaAction {
    /// List enabled personas
    List,

    /// Create a persona
    Add {
        /// Unique persona name
        name: String,

        #[arg(long)]
        description: Option<String>,

        /// Custom system prompt (default: the built-in prompt)
        #[arg(long)]
        system_prompt: Option<String>,
    },

    /// Disable a persona, hiding it and its skills
    Disable {
        name: String,
    },

    /// Re-enable a disabled persona
    Enable {
        name: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum SkillAction {
    /// List a persona's skills in catalog order
    List {
        #[arg(long)]
        persona: Option<String>,

        /// Output format (table, json)
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Show detailed info about a skill
    Info {
        /// Skill ID or display name
        skill_id: String,

        #[arg(long)]
        persona: Option<String>,
    },

    /// Import a single bundle directory
    Import {
        /// Bundle directory containing skill.json
        dir: PathBuf,

        #[arg(long)]
        persona: Option<String>,
    },

    /// Add a skill from a content file, deriving its ID from the name
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        description: String,

        /// File holding the skill content
        #[arg(long)]
        content_file: PathBuf,

        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        priority: i32,

        #[arg(long)]
        persona: Option<String>,
    },
}
