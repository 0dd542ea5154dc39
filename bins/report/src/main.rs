//! Splitledger report
//!
//! Reads exported groups and prints balances, settle-up transfers and,
//! for a given email, totals across all groups.
//!
//! Usage: `splitledger-report <groups.json> [email]`

mod report;

use std::path::PathBuf;

use anyhow::{Context, bail};
use splitledger_core::currency::{FixedRates, RateSource};
use splitledger_core::ledger::{Group, LedgerService};
use splitledger_rates::{CachedRateSource, HttpRateSource};
use splitledger_shared::config::RatesConfig;
use splitledger_shared::{AppConfig, AppResult};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "splitledger=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let mut args = std::env::args().skip(1);
    let Some(path) = args.next().map(PathBuf::from) else {
        bail!("usage: splitledger-report <groups.json> [email]");
    };
    let email = args.next();

    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let groups: Vec<Group> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse groups from {}", path.display()))?;
    info!(groups = groups.len(), path = %path.display(), "Loaded groups");

    if config.rates.is_offline() {
        let rates = offline_rates(&config.rates)?;
        run(rates, &groups, email.as_deref(), &config).await
    } else {
        let rates = http_rates(&config.rates)?;
        run(rates, &groups, email.as_deref(), &config).await
    }
}

/// Rate source backed by the configured `rates.fixed` table.
fn offline_rates(config: &RatesConfig) -> AppResult<FixedRates> {
    let rates = FixedRates::from_table(&config.fixed)?;
    info!(pairs = rates.len(), "Using configured rate table");
    Ok(rates)
}

/// Rate source backed by the HTTP service, with a TTL cache in front.
fn http_rates(config: &RatesConfig) -> AppResult<CachedRateSource<HttpRateSource>> {
    let http = HttpRateSource::new(config)?;
    info!(base_url = %config.base_url, "Using HTTP rate service");
    Ok(CachedRateSource::from_config(http, config))
}

async fn run<S: RateSource>(
    source: S,
    groups: &[Group],
    email: Option<&str>,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let service = LedgerService::new(source);
    let report = report::build(&service, groups, email, &config.ledger.default_currency).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
