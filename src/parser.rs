use std::fmt;

use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::extractor::{Field, ProfileRecord, extract_profile};
use crate::fetcher::{FetchError, HttpClient, ReqwestClient};
use crate::health;
use crate::steam_id::SteamId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProfileError {
    #[error("{0} is not a valid Steam profile id")]
    InvalidSteamId(String),
}

/// Fetches SteamDB calculator pages and turns them into [`ProfileRecord`]s.
///
/// Only identifier validation can fail. Transport errors, non-200 responses
/// and broken markup are logged and yield a record with fewer fields set.
pub struct SteamDbParser<C = ReqwestClient> {
    config: Config,
    client: C,
}

impl SteamDbParser<ReqwestClient> {
    pub fn new(config: Config) -> Result<Self, FetchError> {
        let client = ReqwestClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }
}

impl<C: HttpClient> SteamDbParser<C> {
    pub fn with_client(config: Config, client: C) -> Self {
        info!(base_url = %config.base_url(), "SteamDB profile parser created");
        Self { config, client }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// `{base_url}/{steam_id}/?cc={currency}`
    pub fn profile_url(&self, steam_id: &SteamId, currency: &str) -> String {
        let currency: String = url::form_urlencoded::byte_serialize(currency.as_bytes()).collect();
        format!(
            "{}/{}/?cc={}",
            self.config.base_url().trim_end_matches('/'),
            steam_id,
            currency
        )
    }

    pub fn community_url(&self, steam_id: &SteamId) -> String {
        format!(
            "{}/{}",
            self.config.community_url().trim_end_matches('/'),
            steam_id
        )
    }

    /// Fetches a profile priced in the configured default currency.
    pub async fn get_profile(
        &self,
        steam_id: impl fmt::Display,
    ) -> Result<ProfileRecord, ProfileError> {
        self.get_profile_in(steam_id, self.config.currency()).await
    }

    #[instrument(skip(self, steam_id), fields(steam_id = %steam_id))]
    pub async fn get_profile_in(
        &self,
        steam_id: impl fmt::Display,
        currency: &str,
    ) -> Result<ProfileRecord, ProfileError> {
        let steam_id = SteamId::parse(steam_id)
            .inspect_err(|err| warn!(error = %err, "rejected profile request"))?;

        let url = self.profile_url(&steam_id, currency);
        let mut record =
            ProfileRecord::new(steam_id.as_str(), self.community_url(&steam_id), url.as_str());

        let headers = match request_headers(&self.config) {
            Ok(headers) => headers,
            Err(err) => {
                warn!(error = %err, "could not build request headers");
                return Ok(record);
            }
        };

        info!(url = %url, "requesting profile");
        let page = match self.client.get(&url, headers).await {
            Ok(page) => page,
            Err(err) => {
                warn!(error = %err, "profile request failed");
                return Ok(record);
            }
        };

        if !page.is_ok() {
            warn!(status = %page.status, "profile page not available");
            return Ok(record);
        }

        let extracted = extract_profile(&page.body_utf8, &mut record);
        info!(extracted, total = Field::ALL.len(), "request completed");
        Ok(record)
    }

    /// Connectivity check using the configured attempt bound.
    pub async fn can_connect(&self) -> bool {
        self.can_connect_with_retries(self.config.connect_retries())
            .await
    }

    pub async fn can_connect_with_retries(&self, attempts: u32) -> bool {
        health::can_connect(&self.client, &self.config, attempts).await
    }
}

/// Spoofed user-agent plus the configured cookies.
pub(crate) fn request_headers(config: &Config) -> Result<HeaderMap, FetchError> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(config.user_agent()).map_err(|e| FetchError::InvalidHeader {
            name: "user-agent",
            reason: e.to_string(),
        })?,
    );
    if let Some(cookie) = config.cookie_header() {
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&cookie).map_err(|e| FetchError::InvalidHeader {
                name: "cookie",
                reason: e.to_string(),
            })?,
        );
    }
    Ok(headers)
}
