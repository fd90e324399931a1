use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use reqwest::StatusCode;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod discord;
mod error;
mod models;
mod parsers;
mod report;
mod scrapers;
mod utils;

use crate::config::Settings;
use crate::discord::{choose_greeting, DiscordNotifier, WebhookPayload};
use crate::parsers::PageExtractor;
use crate::report::{FailureMode, ReportAssembler};
use crate::scrapers::{HttpPageSource, ProductScraper};

#[derive(Parser)]
#[command(
    name = "price-tracker",
    about = "Checks product prices against budgets and posts a summary to a Discord webhook",
    version
)]
struct Cli {
    /// Path to the JSON settings file.
    settings: PathBuf,

    /// Abort the run on the first product that cannot be fetched or read.
    #[arg(long)]
    fail_fast: bool,

    /// Seed for the greeting pick.
    #[arg(long)]
    seed: Option<u64>,

    /// Print the webhook payload instead of posting it.
    #[arg(long)]
    dry_run: bool,

    /// Emit logs as JSON lines.
    #[arg(long)]
    json_logs: bool,
}

#[derive(Debug, Clone, Default)]
struct RunOptions {
    failure_mode: FailureMode,
    seed: Option<u64>,
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.json_logs);

    info!("Starting price check at {}", Local::now().format("%Y-%m-%d %H:%M:%S"));

    let settings = Settings::load(&cli.settings)
        .with_context(|| format!("Failed to load settings from {}", cli.settings.display()))?;

    let options = RunOptions {
        failure_mode: if cli.fail_fast {
            FailureMode::FailFast
        } else {
            FailureMode::Isolate
        },
        seed: cli.seed,
        dry_run: cli.dry_run,
    };

    match run(&settings, &options).await? {
        Some(status) => info!("Webhook answered {}", status),
        None => info!("Dry run, nothing posted"),
    }

    Ok(())
}

const DEFAULT_LOG_DIRECTIVE: &str = "price_tracker=info";

/// `RUST_LOG` when it is set and valid, otherwise info for this crate.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
}

fn init_logging(json: bool) {
    let rust_log = std::env::var("RUST_LOG").ok();
    let builder = tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref()))
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// One full pass: build the report, then deliver it (or print it on a dry run).
async fn run(settings: &Settings, options: &RunOptions) -> Result<Option<StatusCode>> {
    let timeout = Duration::from_secs(settings.request_timeout_seconds);

    let page_client = utils::http::create_client(&settings.headers, timeout)?;
    let extractor = PageExtractor::new(&settings.selectors)?;
    let scraper = ProductScraper::new(HttpPageSource::new(page_client), extractor);
    let assembler = ReportAssembler::new(scraper, options.failure_mode);

    info!("Checking {} products", settings.products.len());
    let report = assembler
        .assemble(&settings.products)
        .await
        .context("Price check aborted")?;

    let greeting = choose_greeting(&settings.greetings, options.seed)
        .context("Greeting pool is empty")?;
    let payload = WebhookPayload::compose(&settings.bot_name, greeting, &report);

    if options.dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(None);
    }

    let notifier = DiscordNotifier::new(
        utils::http::create_webhook_client(timeout)?,
        settings.webhook_url.as_str(),
    );
    let status = notifier
        .send(&payload)
        .await
        .context("Failed to deliver report")?;

    Ok(Some(status))
}
