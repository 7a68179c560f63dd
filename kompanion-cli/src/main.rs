//! kompanion CLI: ask the on-device cooking assistant from a terminal.
//!
//! Usage:
//!   kompanion recipes "chicken, rice" --preferences gluten-free
//!   kompanion grocery --pantry "milk, eggs" --meal-plan "Taco night"
//!   kompanion substitute butter --recipe cookies
//!   kompanion chat how long to bake bread
//!   kompanion backend status --json
//!   kompanion backend mock on

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tokio::runtime::Handle;
use tracing::debug;

use kompanion_ai::prefs::KEY_FORCE_MOCK;
use kompanion_ai::{
    BackendFactory, InMemoryPreferences, KitchenAssistant, PreferenceStore, ServiceSelector,
    TomlPreferences,
};
use kompanion_core::KompanionConfig;

#[derive(Parser)]
#[command(
    name = "kompanion",
    version,
    about = "On-device cooking assistant: recipes, grocery lists, substitutions and chat"
)]
struct Cli {
    /// Path to kompanion.toml (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Preference file (overrides [backend].preferences_path)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Suggest recipes for a list of ingredients
    Recipes {
        /// Ingredients separated by commas, semicolons, newlines or "and"
        ingredients: String,

        /// Dietary preferences to mention in the answer
        #[arg(short, long)]
        preferences: Option<String>,
    },

    /// Build a grocery list for a meal plan
    Grocery {
        /// What is already in the pantry
        #[arg(short, long, default_value = "")]
        pantry: String,

        /// Meal plan (defaults to [assistant].default_meal_plan)
        #[arg(short, long)]
        meal_plan: Option<String>,
    },

    /// Suggest substitutes for an ingredient
    Substitute {
        /// Ingredient to replace
        ingredient: String,

        /// Recipe the substitute is for
        #[arg(short, long)]
        recipe: Option<String>,
    },

    /// Ask a cooking question
    Chat {
        /// Message words
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Inspect or switch the AI backend
    Backend {
        #[command(subcommand)]
        action: BackendCommands,
    },
}

#[derive(Subcommand)]
enum BackendCommands {
    /// Show which backend is in use
    Status {
        /// Print machine-readable JSON
        #[arg(long)]
        json: bool,
    },
    /// Force the rule-based backend on or off
    Mock {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Toggle {
    On,
    Off,
}

#[derive(Serialize)]
struct BackendStatus {
    backend: &'static str,
    available: bool,
    force_mock: Option<bool>,
    preferences: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let prefs_path = cli.prefs.clone().or_else(|| config.backend.preferences_path.clone());
    let prefs: Arc<dyn PreferenceStore> = match &prefs_path {
        Some(path) => Arc::new(TomlPreferences::new(path)),
        None => Arc::new(InMemoryPreferences::new()),
    };
    debug!(prefs = ?prefs_path, "Preferences store selected");

    let factory = BackendFactory::new(Handle::current(), &config);
    let selector = Arc::new(ServiceSelector::new(factory, Arc::clone(&prefs)));
    let assistant = KitchenAssistant::new(Arc::clone(&selector), config.assistant.clone());

    match cli.command {
        Commands::Recipes { ingredients, preferences } => {
            print_answer(assistant.suggest_recipes(&ingredients, preferences.as_deref()).await)?;
        }
        Commands::Grocery { pantry, meal_plan } => {
            let meal_plan = meal_plan.unwrap_or_else(|| config.assistant.default_meal_plan.clone());
            print_answer(assistant.grocery_list(&pantry, &meal_plan).await)?;
        }
        Commands::Substitute { ingredient, recipe } => {
            print_answer(assistant.substitutes(&ingredient, recipe.as_deref()).await)?;
        }
        Commands::Chat { message } => {
            print_answer(assistant.ask(&message.join(" ")).await)?;
        }
        Commands::Backend { action } => match action {
            BackendCommands::Status { json } => {
                let status = BackendStatus {
                    backend: assistant.backend_label(),
                    available: assistant.is_ai_available(),
                    force_mock: prefs.get_bool(KEY_FORCE_MOCK).unwrap_or_default(),
                    preferences: prefs_path,
                };
                print_status(&status, json)?;
            }
            BackendCommands::Mock { state } => {
                let label = assistant.toggle_mock_mode(matches!(state, Toggle::On));
                println!("AI backend: {label}");
                if prefs_path.is_none() {
                    println!("(no preference file configured; setting lasts for this run only)");
                }
            }
        },
    }

    selector.shutdown();
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<KompanionConfig> {
    match path {
        Some(path) => KompanionConfig::from_file(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(KompanionConfig::default()),
    }
}

fn print_answer(answer: Result<String, kompanion_ai::AiError>) -> Result<()> {
    let text = answer.context("assistant request failed")?;
    println!("{text}");
    Ok(())
}

fn print_status(status: &BackendStatus, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(status)?);
        return Ok(());
    }

    println!("AI backend:  {}", status.backend);
    println!("Available:   {}", if status.available { "yes" } else { "no" });
    let force_mock = match status.force_mock {
        Some(true) => "on",
        Some(false) => "off",
        None => "unset",
    };
    println!("Force mock:  {force_mock}");
    if let Some(path) = &status.preferences {
        println!("Preferences: {}", path.display());
    }
    Ok(())
}
