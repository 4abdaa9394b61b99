use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::fetcher::HttpClient;
use crate::parser::request_headers;

/// Checks whether the SteamDB endpoint answers.
///
/// Makes up to `attempts` sequential GETs against the base URL (at least one)
/// and succeeds on the first 200, or on any response whose body carries the
/// configured maintenance marker. There is no delay between attempts.
#[instrument(skip(client, config), fields(url = %config.base_url()))]
pub async fn can_connect<C>(client: &C, config: &Config, attempts: u32) -> bool
where
    C: HttpClient + ?Sized,
{
    let headers = match request_headers(config) {
        Ok(headers) => headers,
        Err(err) => {
            warn!(error = %err, "could not build request headers");
            return false;
        }
    };
    let marker = config.maintenance_marker();

    for attempt in 1..=attempts.max(1) {
        match client.get(config.base_url(), headers.clone()).await {
            Ok(page) if page.is_ok() => {
                info!(attempt, "SteamDB is reachable");
                return true;
            }
            Ok(page) if !marker.is_empty() && page.body_utf8.contains(marker) => {
                info!(attempt, status = %page.status, "SteamDB is under maintenance");
                return true;
            }
            Ok(page) => warn!(attempt, status = %page.status, "connectivity check failed"),
            Err(err) => warn!(attempt, error = %err, "connectivity check failed"),
        }
    }

    false
}
