//! catalog-pricer - Catalog feed importer with tiered-markup localized pricing

use anyhow::{Context, Result};
use catalog_pricer::commands::{rules, AddCommand, ImportCommand, PriceCommand};
use catalog_pricer::config::{Config, OutputFormat};
use catalog_pricer::pricing::RuleDraft;
use catalog_pricer::rate::{FixedRate, RateClient, RateSource};
use catalog_pricer::store::AppState;
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "catalog-pricer",
    version,
    about = "Catalog feed importer with tiered-markup localized pricing",
    long_about = "Parses pasted product feeds into catalog entries and computes localized sale prices from a currency rate and tiered profit rules."
)]
struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the state file
    #[arg(long, global = true, env = "CATALOG_STATE")]
    state: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Fixed currency rate, skipping the rate API
    #[arg(short, long, global = true, env = "CATALOG_RATE")]
    rate: Option<f64>,

    /// Local currency label
    #[arg(long, global = true, env = "CATALOG_CURRENCY")]
    currency: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a catalog feed (from a file, or stdin when omitted)
    #[command(alias = "i")]
    Import {
        /// Feed file to read
        file: Option<PathBuf>,
    },

    /// Re-price the stored catalog at the current rate
    #[command(alias = "p")]
    Price,

    /// Add a single entry by hand
    Add {
        /// Entry name
        name: String,

        /// Price in USD
        price: Option<f64>,

        /// Category
        #[arg(default_value = "")]
        category: String,
    },

    /// Manage tiered profit rules
    Rules {
        #[command(subcommand)]
        action: RulesAction,
    },

    /// Set the global fallback markup percentage
    Markup {
        /// Markup in percent (15 = 15%)
        percent: f64,
    },

    /// Show the current currency rate
    Rate,
}

#[derive(Subcommand)]
enum RulesAction {
    /// List rules in precedence order
    List,

    /// Create a rule
    Add {
        /// Profit percentage to apply
        percent: f64,

        /// Inclusive lower bound in USD
        #[arg(long)]
        min: Option<f64>,

        /// Inclusive upper bound in USD
        #[arg(long)]
        max: Option<f64>,

        /// Free-text label
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Update an existing rule
    Update {
        /// Rule id
        id: u64,

        /// Profit percentage to apply
        percent: f64,

        /// Inclusive lower bound in USD
        #[arg(long)]
        min: Option<f64>,

        /// Inclusive upper bound in USD
        #[arg(long)]
        max: Option<f64>,

        /// Free-text label
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Remove a rule
    Remove {
        /// Rule id
        id: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::WARN.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    config.format = cli.format;

    if let Some(rate) = cli.rate {
        config.rate = Some(rate);
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }
    if let Some(state) = cli.state {
        config.state_path = Some(state);
    }

    let state_path = config.state_path.clone().unwrap_or_else(AppState::default_path);
    let mut state = AppState::load(&state_path)?;

    let rate_source: Box<dyn RateSource> = match config.rate {
        Some(rate) => Box::new(FixedRate(rate)),
        None => match &config.rate_url {
            Some(url) => Box::new(RateClient::with_base_url(url.clone())?),
            None => Box::new(RateClient::new()?),
        },
    };

    let output = match cli.command {
        Commands::Import { file } => {
            let raw_text = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read feed file: {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read feed from stdin")?;
                    buf
                }
            };

            let cmd = ImportCommand::new(config);
            let output = cmd.execute(&raw_text, &mut state, rate_source.as_ref()).await?;
            state.save(&state_path)?;
            output
        }

        Commands::Price => {
            let cmd = PriceCommand::new(config);
            let output = cmd.execute(&mut state, rate_source.as_ref()).await?;
            state.save(&state_path)?;
            output
        }

        Commands::Add { name, price, category } => {
            let cmd = AddCommand::new(config);
            let output =
                cmd.execute(&name, price, &category, &mut state, rate_source.as_ref()).await?;
            state.save(&state_path)?;
            output
        }

        Commands::Rules { action } => {
            let output = match action {
                RulesAction::List => rules::list_rules(&state.rules, config.format)?,
                RulesAction::Add { percent, min, max, description } => rules::add_rule(
                    &mut state.rules,
                    RuleDraft { min_usd: min, max_usd: max, profit_percent: percent, description },
                ),
                RulesAction::Update { id, percent, min, max, description } => rules::update_rule(
                    &mut state.rules,
                    id,
                    RuleDraft { min_usd: min, max_usd: max, profit_percent: percent, description },
                )?,
                RulesAction::Remove { id } => rules::remove_rule(&mut state.rules, id),
            };
            state.save(&state_path)?;
            output
        }

        Commands::Markup { percent } => {
            state.global_markup_percent = percent;
            state.save(&state_path)?;
            format!("Global markup set to {}%", percent)
        }

        Commands::Rate => {
            let rate = rate_source.sell_rate().await.context("Currency rate unavailable")?;
            format!("1 USD = {} {}", rate, config.currency)
        }
    };

    println!("{}", output);

    Ok(())
}
