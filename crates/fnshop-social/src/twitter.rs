//! Twitter/X thread posting through API v2 with OAuth 1.0a user context.

use std::time::Duration;

use chrono::Utc;
use fnshop_core::TwitterCredentials;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::SocialError;
use crate::oauth::{authorization_header, generate_nonce};

pub const DEFAULT_TWITTER_BASE_URL: &str = "https://api.twitter.com";

const PLATFORM: &str = "Twitter";

#[derive(Debug, Serialize)]
struct CreateTweet<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply: Option<Reply<'a>>,
}

#[derive(Debug, Serialize)]
struct Reply<'a> {
    in_reply_to_tweet_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: TweetData,
}

#[derive(Debug, Deserialize)]
struct TweetData {
    id: String,
}

pub struct TwitterClient {
    client: Client,
    base_url: String,
    credentials: TwitterCredentials,
}

impl TwitterClient {
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(credentials: TwitterCredentials, timeout_secs: u64) -> Result<Self, SocialError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_TWITTER_BASE_URL)
    }

    /// Creates a client with a custom API base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        credentials: TwitterCredentials,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SocialError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            credentials,
        })
    }

    /// Posts one tweet, optionally as a reply. Returns the new tweet id.
    ///
    /// # Errors
    ///
    /// - [`SocialError::Api`] on a non-2xx status (403 for missing write
    ///   permission is the common one).
    /// - [`SocialError::Http`] on network failure.
    /// - [`SocialError::Deserialize`] if the reply carries no `data.id`.
    /// - [`SocialError::Signing`] if the request cannot be signed.
    pub async fn create_tweet(
        &self,
        text: &str,
        in_reply_to: Option<&str>,
    ) -> Result<String, SocialError> {
        let url = format!("{}/2/tweets", self.base_url);
        let auth = authorization_header(
            &self.credentials,
            "POST",
            &url,
            &generate_nonce(),
            Utc::now().timestamp(),
        )?;

        let payload = CreateTweet {
            text,
            reply: in_reply_to.map(|id| Reply {
                in_reply_to_tweet_id: id,
            }),
        };

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(SocialError::Api {
                platform: PLATFORM,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: CreateTweetResponse =
            serde_json::from_str(&body).map_err(|e| SocialError::Deserialize {
                context: "create tweet response".to_owned(),
                source: e,
            })?;
        Ok(parsed.data.id)
    }

    /// Posts `tweets` in order, each replying to the previous one. Stops at
    /// the first failure.
    ///
    /// # Errors
    ///
    /// [`SocialError::NothingToPost`] for an empty thread; otherwise the
    /// first [`TwitterClient::create_tweet`] error.
    pub async fn post_thread(&self, tweets: &[String]) -> Result<Vec<String>, SocialError> {
        if tweets.is_empty() {
            return Err(SocialError::NothingToPost("empty thread".to_owned()));
        }

        let mut ids: Vec<String> = Vec::with_capacity(tweets.len());
        for text in tweets {
            let id = self
                .create_tweet(text, ids.last().map(String::as_str))
                .await?;
            ids.push(id);
        }

        tracing::info!(tweets = ids.len(), "published Twitter thread");
        Ok(ids)
    }
}
