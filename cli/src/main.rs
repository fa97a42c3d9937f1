//! CLI entrypoint for paperbot
//!
//! This is the main binary that wires together all layers using
//! dependency injection, runs a single tick and persists the result.

use anyhow::{Context, Result, bail};
use clap::Parser;
use paperbot_application::{
    NoRoundEventLogger, PlatformClient, RecordStore, RoundEventLogger, RoundStateRepository,
    RunTickUseCase,
};
use paperbot_infrastructure::{
    ConfigLoader, FileConfig, JsonFileStore, JsonlRoundEventLogger, RedditClient, TomlStateFile,
};
use paperbot_presentation::{Cli, TickReportFormatter};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        let config = ConfigLoader::load(cli.config.as_ref())?;
        println!("\n{config:#?}");
        return Ok(());
    }

    let config = ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?;

    // Keep the guard alive so buffered log lines reach the file
    let _guard = init_logging(cli.verbose, &config.storage.log_dir)?;

    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_fatal()) {
        warn!("{}", issue.message);
    }
    let fatal: Vec<&str> = issues
        .iter()
        .filter(|i| i.is_fatal())
        .map(|i| i.message.as_str())
        .collect();
    if !fatal.is_empty() {
        bail!("Invalid configuration:\n  {}", fatal.join("\n  "));
    }

    info!("Starting paperbot for /r/{}", config.community.destination());
    let today = chrono::Local::now().date_naive();

    // === Dependency Injection ===
    let store = Arc::new(
        JsonFileStore::open(&config.storage.database).context("Failed to open paper database")?,
    );
    let state_file = TomlStateFile::new(&config.storage.state_file);
    let mut state = match state_file.load().context("Failed to load round state")? {
        Some(state) => state.with_moderator_mode(config.community.moderator_mode),
        None => {
            info!("No round state found, starting from the configured schedule");
            config.initial_state(today)
        }
    };

    let event_logger = event_logger(&config);

    let platform = Arc::new(RedditClient::new().context("Failed to create Reddit client")?);
    platform
        .authenticate(&config.account.credentials())
        .await
        .context("Failed to authenticate with Reddit")?;

    let use_case = RunTickUseCase::new(platform, store.clone(), config.to_round_settings())
        .with_event_logger(event_logger);
    let report = use_case.execute(today, &mut state).await;

    state_file
        .save(&state)
        .context("Failed to save round state")?;
    store.close().context("Failed to write paper database")?;

    if report.is_aborted() {
        error!("Tick aborted; it will be retried on the next run");
    }

    if cli.quiet {
        println!("{}", TickReportFormatter::format_summary(&report));
    } else {
        println!("{}", TickReportFormatter::format(&report));
    }

    Ok(())
}

/// Console logging by verbosity plus a plain-text log file in `log_dir`
fn init_logging(verbose: u8, log_dir: &Path) -> Result<WorkerGuard> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(log_dir, "paperbot.log"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_writer(writer).with_ansi(false))
        .init();

    Ok(guard)
}

fn event_logger(config: &FileConfig) -> Arc<dyn RoundEventLogger> {
    let logger = config
        .storage
        .event_log
        .as_ref()
        .and_then(JsonlRoundEventLogger::new);
    match logger {
        Some(logger) => Arc::new(logger),
        None => Arc::new(NoRoundEventLogger),
    }
}
