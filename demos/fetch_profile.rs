use anyhow::{Context, Result};
use steamdb_profile::{Config, SteamDbParser};

/// Fetches one profile and prints it as JSON.
///
/// Usage: `cargo run --example fetch_profile -- <steam_id> [currency]`
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let steam_id = args
        .next()
        .context("usage: fetch_profile <steam_id> [currency]")?;

    let config = Config::from_env()?;
    let currency = args.next().unwrap_or_else(|| config.currency().to_string());
    let parser = SteamDbParser::new(config)?;

    if !parser.can_connect().await {
        eprintln!("SteamDB is not reachable, the profile will only carry its URLs");
    }

    let profile = parser.get_profile_in(&steam_id, &currency).await?;
    println!("{}", serde_json::to_string_pretty(&profile)?);
    Ok(())
}
