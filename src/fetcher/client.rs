use crate::config::Config;
use crate::fetcher::{errors::FetchError, pipeline::process_response, types::PageResponse};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, header::HeaderMap};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB

/// The HTTP transport the parser talks through.
///
/// Implementations perform a single GET with the given headers and return the
/// response whatever its status code; only transport failures are errors.
/// Timeouts belong to the implementation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<PageResponse, FetchError>;
}

/// [`HttpClient`] backed by a `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: Client,
}

impl ReqwestClient {
    pub fn new(connect_timeout: Duration, read_timeout: Duration) -> Result<Self, FetchError> {
        let inner = ClientBuilder::new()
            .connect_timeout(connect_timeout)
            .read_timeout(read_timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(
                    reqwest::header::ACCEPT,
                    reqwest::header::HeaderValue::from_static(
                        "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                    ),
                );
                headers
            })
            .build()
            .map_err(|e| FetchError::ClientBuild(e.to_string()))?;
        Ok(Self { inner })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.connect_timeout(), config.read_timeout())
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    #[instrument(skip_all, fields(url = %url))]
    async fn get(&self, url: &str, headers: HeaderMap) -> Result<PageResponse, FetchError> {
        let parsed_url = url::Url::parse(url)?;

        let response = self
            .inner
            .get(parsed_url)
            .headers(headers)
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > MAX_BODY_SIZE
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let final_url = response.url().clone();
        let status = response.status();
        let headers = response.headers().clone();

        let body_bytes = response
            .bytes()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        // Content-Length may be missing or lie about compressed bodies
        if body_bytes.len() as u64 > MAX_BODY_SIZE {
            return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
        }

        debug!(%status, bytes = body_bytes.len(), "response received");
        Ok(process_response(final_url, status, headers, body_bytes))
    }
}
