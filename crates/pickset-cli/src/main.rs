use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pickset_core::config::PicksetConfig;
use pickset_infrastructure::ConfigService;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

#[derive(Parser)]
#[command(name = "pickset")]
#[command(about = "Pickset - session-based interest editor", long_about = None)]
struct Cli {
    /// Configuration file (default: ~/.config/pickset/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Catalog file (default: ~/.config/pickset/catalog.toml)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Data directory, overrides [storage] data_dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Feed interaction tokens to the editor and print each screen as JSON
    Replay {
        /// User the interactions belong to
        #[arg(long)]
        user: i64,

        /// Chat the interactions come from
        #[arg(long, default_value_t = 0)]
        chat: i64,

        /// Keep sessions and selections in memory for this run only
        #[arg(long)]
        memory: bool,

        /// Tokens to replay; read one per line from stdin when omitted
        tokens: Vec<String>,
    },
    /// Validate configuration and catalog
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = match &cli.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new().context("Failed to resolve config path")?,
    };
    let config = config_service
        .get_config()
        .with_context(|| format!("Failed to load {}", config_service.path().display()))?;

    init_tracing(&config);
    tracing::debug!(config = %config_service.path().display(), "Configuration loaded");

    let paths = commands::ResolvedPaths::resolve(&config, cli.catalog, cli.data_dir)?;

    match cli.command {
        Commands::Replay {
            user,
            chat,
            memory,
            tokens,
        } => commands::replay::run(&config, &paths, user, chat, memory, tokens).await?,
        Commands::Check => commands::check::run(&config, &paths).await?,
    }

    Ok(())
}

/// Logs go to stderr so stdout stays machine-readable.
///
/// `RUST_LOG` wins over `[logging] level`.
fn init_tracing(config: &PicksetConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
