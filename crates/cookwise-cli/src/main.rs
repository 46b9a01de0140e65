//! `cookwise`: run the Cookwise assistants from the command line.
//!
//! Every subcommand prints its record as pretty JSON on stdout. Logs go to
//! stderr, so the output can be piped.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cookwise_core::{cost_comparison, health_insights, ChatMessage, MealPlanRequest, SkillLevel};
use cookwise_runtime::{
    Assistants, GenerativeProvider, HealthPreferences, ImagePayload, Orchestrator, ProviderGate,
    ProviderRegistry, RuntimeConfig,
};

#[derive(Debug, Parser)]
#[command(name = "cookwise")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Budget meal planning and wellness assistants with offline fallbacks")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for reproducible fallback selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate budget meal plans
    Plan {
        /// Total budget for the plan
        #[arg(long)]
        budget: f64,

        #[arg(long, default_value_t = 7, value_parser = clap::value_parser!(u32).range(1..))]
        days: u32,

        #[arg(long, default_value_t = 1)]
        people: u32,

        #[arg(long, default_value = "$")]
        currency: String,

        #[arg(long, default_value = "")]
        diet: String,

        /// Health goal, repeatable
        #[arg(long = "goal")]
        goals: Vec<String>,

        /// Beginner, Intermediate or Advanced
        #[arg(long, value_parser = parse_skill, default_value = "Beginner")]
        skill: SkillLevel,

        /// Ingredient already at home, repeatable
        #[arg(long = "have")]
        available: Vec<String>,

        /// Ingredient to use first, repeatable
        #[arg(long = "expiring")]
        expiring: Vec<String>,
    },

    /// Ask the wellness coach a question
    Chat {
        message: String,

        /// JSON file with prior chat messages
        #[arg(long)]
        history: Option<PathBuf>,
    },

    /// Meal ideas for a health condition
    Health {
        condition: String,

        /// Budget per meal
        #[arg(long)]
        budget: Option<f64>,

        #[arg(long)]
        dietary: Option<String>,

        /// Available cooking time in minutes
        #[arg(long)]
        time: Option<u32>,
    },

    /// One quick wellness tip
    Tip {
        #[arg(default_value = "healthy eating")]
        topic: String,
    },

    /// Recognise a dish in a food photo
    Scan { image: PathBuf },

    /// List the ingredients in a pantry photo
    PantryScan { image: PathBuf },

    /// Recipes from pantry items
    Pantry {
        #[arg(required = true)]
        items: Vec<String>,

        /// Preferred cuisine, repeatable
        #[arg(long = "cuisine")]
        cuisines: Vec<String>,

        #[arg(long, default_value_t = 3)]
        max_missing: usize,
    },

    /// Ideas for using up leftovers
    Leftovers {
        #[arg(required = true)]
        items: Vec<String>,
    },

    /// Report whether the configured API key would be used
    CheckKey,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct KeyReport {
    /// The gate accepts the credential
    available: bool,
    source: String,
    provider: String,
    /// The provider itself reports it can serve requests
    provider_healthy: bool,
}

async fn key_report(gate: &ProviderGate, provider: &dyn GenerativeProvider) -> KeyReport {
    KeyReport {
        available: gate.is_available(),
        source: gate.credential_source().to_string(),
        provider: provider.name().to_string(),
        provider_healthy: provider.health_check().await,
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScanReport {
    analysis: cookwise_core::FoodAnalysis,
    cost_comparison: cookwise_core::CostComparison,
    health_insights: Vec<String>,
}

fn parse_skill(value: &str) -> Result<SkillLevel, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown skill level '{}'", value))
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<RuntimeConfig> {
    let mut config = match path {
        Some(path) => RuntimeConfig::from_yaml_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => RuntimeConfig::default(),
    };
    if seed.is_some() {
        config.fallback_seed = seed;
    }
    Ok(config)
}

fn read_image(path: &Path) -> Result<ImagePayload> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mime_type = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        _ => "image/jpeg",
    };
    Ok(ImagePayload::new(bytes, mime_type))
}

fn read_history(path: Option<&Path>) -> Result<Vec<ChatMessage>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing chat history {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref(), cli.seed)?;
    let registry = ProviderRegistry::with_defaults();
    let provider = registry.create_or_unavailable(&config.provider.kind, &config.provider.options);
    let provider_name = provider.name().to_string();
    let report_provider = provider.clone();
    let gate = ProviderGate::init_global(
        config.resolve_credential(),
        config.credential_policy.clone(),
    );

    let orchestrator = Orchestrator::builder()
        .provider(provider)
        .gate(gate.clone())
        .config(config)
        .build()
        .context("building orchestrator")?;
    let assistants = Assistants::new(Arc::new(orchestrator));
    tracing::debug!(provider = %provider_name, "Assistants ready");

    match cli.command {
        Command::Plan {
            budget,
            days,
            people,
            currency,
            diet,
            goals,
            skill,
            available,
            expiring,
        } => {
            let mut request = MealPlanRequest::new(budget, days);
            request.number_of_people = people;
            request.currency = currency;
            request.diet_type = diet;
            request.health_goals = goals;
            request.skill_level = skill;
            request.available_ingredients = available;
            request.expiring_ingredients = expiring;
            print_json(&assistants.meal_planner.generate_plan(&request).await)
        }
        Command::Chat { message, history } => {
            let history = read_history(history.as_deref())?;
            print_json(&assistants.wellness_coach.reply(&message, &history).await)
        }
        Command::Health {
            condition,
            budget,
            dietary,
            time,
        } => {
            let preferences = HealthPreferences {
                budget,
                dietary,
                time_minutes: time,
            };
            print_json(
                &assistants
                    .wellness_coach
                    .health_suggestion(&condition, &preferences)
                    .await,
            )
        }
        Command::Tip { topic } => print_json(&assistants.wellness_coach.quick_tip(&topic).await),
        Command::Scan { image } => {
            let image = read_image(&image)?;
            let analysis = assistants.food_scanner.analyze_photo(&image).await;
            print_json(&ScanReport {
                cost_comparison: cost_comparison(&analysis),
                health_insights: health_insights(&analysis),
                analysis,
            })
        }
        Command::PantryScan { image } => {
            let image = read_image(&image)?;
            print_json(&assistants.food_scanner.identify_pantry_items(&image).await)
        }
        Command::Pantry {
            items,
            cuisines,
            max_missing,
        } => {
            let cuisines = (!cuisines.is_empty()).then_some(cuisines.as_slice());
            print_json(
                &assistants
                    .pantry_chef
                    .suggest_recipes(&items, cuisines, max_missing)
                    .await,
            )
        }
        Command::Leftovers { items } => {
            print_json(&assistants.pantry_chef.suggest_leftover_usage(&items).await)
        }
        Command::CheckKey => print_json(&key_report(&gate, report_provider.as_ref()).await),
    }
}
