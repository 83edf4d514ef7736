//! HTTP client for the fortnite-api.com shop endpoints.

use std::time::Duration;

use fnshop_core::AppConfig;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use crate::error::ScraperError;
use crate::rate_limit::retry_with_backoff;
use crate::types::{Shop, ShopResponse};

pub const DEFAULT_BASE_URL: &str = "https://fortnite-api.com";
pub const DEFAULT_LANGUAGE: &str = "es-MX";

/// How much of an unexpected response body is kept for logging.
const BODY_PREVIEW_CHARS: usize = 300;

const USER_AGENT: &str = "fnshop/0.1 (item-shop-snapshot)";

/// Client for the two shop endpoints.
///
/// [`fetch_typed_shop`](Self::fetch_typed_shop) is attempted once;
/// [`fetch_raw_shop`](Self::fetch_raw_shop) is wrapped in retry with backoff.
/// Use [`FortniteApiClient::with_base_url`] to point at a mock server in tests.
pub struct FortniteApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    language: String,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl FortniteApiClient {
    /// Creates a client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, ScraperError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout_secs)
    }

    /// Creates a client with a custom base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`ScraperError::InvalidBaseUrl`] if `base_url` does
    /// not parse.
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()?;

        // Exactly one trailing slash, so `join` appends instead of replacing
        // the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let parsed = Url::parse(&normalised).map_err(|e| ScraperError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            base_url: parsed,
            api_key: None,
            language: DEFAULT_LANGUAGE.to_owned(),
            max_retries: 0,
            backoff_base_ms: 0,
        })
    }

    /// Builds a client from the loaded configuration.
    ///
    /// # Errors
    ///
    /// Same as [`FortniteApiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Ok(
            Self::with_base_url(&config.fn_api_base_url, config.request_timeout_secs)?
                .with_api_key(config.fn_api_key.clone())
                .with_language(&config.fn_api_language)
                .with_retry(config.max_retries, config.retry_backoff_base_ms),
        )
    }

    /// Sends `key` verbatim in the `Authorization` header.
    #[must_use]
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    #[must_use]
    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_owned();
        self
    }

    /// Retry policy for the raw endpoint. `max_retries` counts attempts after
    /// the first.
    #[must_use]
    pub fn with_retry(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Fetches `GET /v2/shop` into typed structs. Not retried.
    ///
    /// A response without `data` yields an empty [`Shop`].
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`] for any non-2xx status.
    /// - [`ScraperError::Http`] on network failure or timeout.
    /// - [`ScraperError::Deserialize`] if the body does not match the typed
    ///   shape.
    pub async fn fetch_typed_shop(&self) -> Result<Shop, ScraperError> {
        let url = self.shop_url("v2/shop")?;
        let response = self.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = preview(response.text().await.unwrap_or_default());
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
                body,
            });
        }

        let body = response.text().await?;
        let parsed: ShopResponse =
            serde_json::from_str(&body).map_err(|e| ScraperError::Deserialize {
                context: format!("typed shop from {url}"),
                source: e,
            })?;

        Ok(parsed.data.unwrap_or_default())
    }

    /// Fetches `GET /v2/shop/br` as untyped JSON, retrying transient failures.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::RateLimited`] for HTTP 429 after all retries.
    /// - [`ScraperError::UnexpectedStatus`] for any other non-200 status
    ///   (5xx retried, the rest not), carrying the first 300 characters of
    ///   the body.
    /// - [`ScraperError::Http`] on network failure or timeout after all
    ///   retries.
    /// - [`ScraperError::Deserialize`] if the body is not JSON.
    pub async fn fetch_raw_shop(&self) -> Result<Value, ScraperError> {
        let url = self.shop_url("v2/shop/br")?;

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.clone();
            async move {
                let response = self.get(&url).send().await?;
                let status = response.status();

                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.trim().parse::<u64>().ok());
                    return Err(ScraperError::RateLimited { retry_after_secs });
                }

                if status != StatusCode::OK {
                    let body = preview(response.text().await.unwrap_or_default());
                    return Err(ScraperError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                        body,
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Value>(&body).map_err(|e| ScraperError::Deserialize {
                    context: format!("raw shop from {url}"),
                    source: e,
                })
            }
        })
        .await
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        match &self.api_key {
            Some(key) => request.header(reqwest::header::AUTHORIZATION, key),
            None => request,
        }
    }

    /// Joins `path` onto the base URL and appends the `language` parameter.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidBaseUrl`] if the join fails.
    fn shop_url(&self, path: &str) -> Result<String, ScraperError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| ScraperError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;
        url.query_pairs_mut().append_pair("language", &self.language);
        Ok(url.to_string())
    }
}

fn preview(body: String) -> String {
    if body.chars().count() <= BODY_PREVIEW_CHARS {
        return body;
    }
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
