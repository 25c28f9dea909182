//! newsrelay CLI
//!
//! Runs the poll loop, a single cycle, or a configuration check.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use newsrelay::{
    error::Result,
    models::{Config, Credentials, SourceRegistry},
    notify::TelegramNotifier,
    pipeline::Scheduler,
    utils::http::{HttpFetcher, create_async_client},
};

/// newsrelay - News listing to Telegram relay
#[derive(Parser, Debug)]
#[command(
    name = "newsrelay",
    version,
    about = "Relays newly published articles to a Telegram chat"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Telegram bot token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true, global = true)]
    bot_token: Option<String>,

    /// Destination chat identifier
    #[arg(long, env = "CHAT_ID", global = true)]
    chat_id: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll all sources forever (default)
    Run,

    /// Run a single cycle and print its report
    Once,

    /// Validate the configuration and list the sources
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Configuration plus its compiled source registry.
fn load(cli: &Cli) -> Result<(Config, SourceRegistry)> {
    let config = Config::load_or_default(&cli.config);
    config.validate()?;
    let registry = SourceRegistry::from_config(&config)?;
    log::info!(
        "Loaded configuration from {} ({} source(s))",
        cli.config.display(),
        registry.len()
    );
    Ok((config, registry))
}

fn build_scheduler(cli: &Cli, config: &Config, registry: SourceRegistry) -> Result<Scheduler> {
    let credentials = Credentials::from_parts(cli.bot_token.clone(), cli.chat_id.clone())?;
    let fetcher = HttpFetcher::new(&config.crawler)?;
    let notifier = TelegramNotifier::new(
        create_async_client(&config.crawler)?,
        credentials.bot_token,
        credentials.chat_id,
    );
    Ok(Scheduler::new(
        config,
        registry,
        Arc::new(fetcher),
        Arc::new(notifier),
    ))
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.as_ref().unwrap_or(&Command::Run) {
        Command::Run => {
            let (config, registry) = load(&cli)?;
            let mut scheduler = build_scheduler(&cli, &config, registry)?;

            #[cfg(feature = "health")]
            let _health = newsrelay::health::spawn(&config.health);

            scheduler.run_forever().await;
        }

        Command::Once => {
            let (mut config, registry) = load(&cli)?;
            config.schedule.announce_on_startup = false;
            let mut scheduler = build_scheduler(&cli, &config, registry)?;

            scheduler.startup().await;
            let report = scheduler.run_cycle().await?;
            print!("{report}");
        }

        Command::Validate => {
            let config = Config::load(&cli.config)?;
            config.validate()?;
            let registry = SourceRegistry::from_config(&config)?;

            println!("Configuration OK: {}", cli.config.display());
            println!("Sources ({}):", registry.len());
            for source in &registry {
                let fallback = source
                    .fallback_query
                    .as_deref()
                    .map(|q| format!(" [alternate: ?{q}]"))
                    .unwrap_or_default();
                println!("  - {} <{}>{}", source.name, source.url, fallback);
            }
        }
    }

    Ok(())
}
