use anyhow::{Context, bail};
use dotenvy::dotenv;
use std::env;
use tokio_util::sync::CancellationToken;

use preprint_analytics::{ApiClient, AuthorAnalytics, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    // RUST_LOG wins; otherwise LOG_LEVEL, defaulting to "warn" (only warnings and errors)
    let default_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "warn".to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let query = env::args().skip(1).collect::<Vec<_>>().join(" ");
    if query.trim().is_empty() {
        bail!("usage: preprint-analytics <author query>");
    }

    let config = Config::from_env().context("Failed to load configuration")?;
    log::info!("Using API at {}", config.base_url);
    let client = ApiClient::new(&config)?;

    // Ctrl-C abandons the search, including any pending backoff
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            log::warn!("Interrupted, cancelling outstanding requests");
            on_signal.cancel();
        }
    });

    let report = AuthorAnalytics::new(client)
        .report(&query, &cancel)
        .await
        .with_context(|| format!("Author analytics for '{}' failed", query.trim()))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
