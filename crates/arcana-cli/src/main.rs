//! CLI frontend for the Arcana tarot ritual engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_CATALOG: &str = "data/major-arcana.json";

#[derive(Parser)]
#[command(
    name = "arcana",
    about = "Arcana: a three-card tarot ritual with remote interpretation",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the cards in the catalog
    Cards {
        /// Only cards whose name or keywords contain this text
        query: Option<String>,

        /// Card catalog (JSON array)
        #[arg(short, long, env = "ARCANA_CATALOG", default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,
    },

    /// Show both orientations of one card
    Show {
        /// Card name (case-insensitive)
        name: String,

        /// Card catalog (JSON array)
        #[arg(short, long, env = "ARCANA_CATALOG", default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,
    },

    /// Validate a catalog without starting a ritual
    Check {
        /// Card catalog (JSON array)
        #[arg(short, long, env = "ARCANA_CATALOG", default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,
    },

    /// Start the interactive ritual console
    Ritual {
        /// Card catalog (JSON array)
        #[arg(short, long, env = "ARCANA_CATALOG", default_value = DEFAULT_CATALOG)]
        catalog: PathBuf,

        /// Topic of the reading (love, career, finance, health, growth, general)
        #[arg(short, long)]
        topic: Option<String>,

        /// Question for the reading
        #[arg(short, long)]
        question: Option<String>,

        /// Base URL of the interpretation service
        #[arg(short, long, env = "ARCANA_ENDPOINT", default_value = arcana_oracle::DEFAULT_BASE_URL)]
        endpoint: String,

        /// Full URL of the concise interpretation endpoint (overrides --endpoint)
        #[arg(long, env = "ARCANA_CONCISE_URL")]
        concise_url: Option<String>,

        /// Full URL of the detailed advice endpoint (overrides --endpoint)
        #[arg(long, env = "ARCANA_DETAILED_URL")]
        detailed_url: Option<String>,

        /// RNG seed for a reproducible ritual
        #[arg(short, long)]
        seed: Option<u64>,

        /// Skip the shuffle and cut pauses
        #[arg(long)]
        fast: bool,

        /// Request timeout for the interpretation service, in milliseconds
        #[arg(long, default_value = "60000")]
        timeout_ms: u64,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Cards { query, catalog } => commands::cards::run(&catalog, query.as_deref()),
        Commands::Show { name, catalog } => commands::show::run(&catalog, &name),
        Commands::Check { catalog } => commands::check::run(&catalog),
        Commands::Ritual {
            catalog,
            topic,
            question,
            endpoint,
            concise_url,
            detailed_url,
            seed,
            fast,
            timeout_ms,
        } => commands::ritual::run(commands::ritual::RitualArgs {
            catalog: &catalog,
            topic: topic.as_deref(),
            question: question.as_deref(),
            endpoint: &endpoint,
            concise_url: concise_url.as_deref(),
            detailed_url: detailed_url.as_deref(),
            seed,
            fast,
            timeout_ms,
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
