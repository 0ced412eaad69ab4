use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use bestbuy_availability_checker::checker::Checker;
use bestbuy_availability_checker::notify::{LogNotifier, Notifier, SlackNotifier};
use bestbuy_availability_checker::parser::{MarkerConfig, StockMarkers};
use bestbuy_availability_checker::trigger::{self, TriggerPayload};
use bestbuy_availability_checker::{AvailabilityResult, DEFAULT_PRODUCT_URL};

#[derive(Parser, Debug)]
#[command(
    name = "bestbuy_availability_checker",
    version,
    about = "Check the availability of a product at the given URL"
)]
struct Cli {
    /// The Best Buy product page URL. Defaults to the ASUS ROG Zephyrus G14.
    #[arg(default_value = DEFAULT_PRODUCT_URL)]
    url: String,

    /// Set logging to DEBUG
    #[arg(short, long)]
    debug: bool,

    /// Print the result as JSON instead of a human-readable line
    #[arg(long)]
    json: bool,

    /// Path to a marker config JSON overriding the built-in Best Buy selectors
    #[arg(long, value_name = "PATH")]
    markers: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Run as if invoked by the scheduled trigger, with this JSON payload
    #[arg(long, value_name = "JSON", conflicts_with = "url")]
    event: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let markers = match &cli.markers {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading marker config {}", path.display()))?;
            StockMarkers::compile(&MarkerConfig::from_json(&json)?)?
        }
        None => StockMarkers::default(),
    };
    let checker = Checker::new(markers, Duration::from_secs(cli.timeout))?;
    let notifier = build_notifier()?;

    let result = match &cli.event {
        Some(event) => {
            let payload = TriggerPayload::from_json(event)?;
            trigger::handle(&checker, notifier.as_ref(), &payload)?
        }
        None => {
            let result = checker.check(&cli.url)?;
            if let Err(e) = notifier.notify(&result) {
                tracing::warn!(error = %e, "notification sink failed");
            }
            result
        }
    };

    print_result(&result, cli.json)?;
    Ok(())
}

fn init_tracing(debug: bool) {
    let default = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn build_notifier() -> Result<Box<dyn Notifier>> {
    match SlackNotifier::from_env() {
        Some(slack) => Ok(Box::new(slack?)),
        None => {
            tracing::debug!(
                "no Slack webhook configured (SLACK_WEB_HOOK_URL unset), logging only"
            );
            Ok(Box::new(LogNotifier))
        }
    }
}

fn print_result(result: &AvailabilityResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        match &result.detail {
            Some(detail) => println!("{} - {}", result.status, detail),
            None => println!("{}", result.status),
        }
    }
    Ok(())
}
