//! Facebook Page multi-image post through the Graph API.
//!
//! Each image is uploaded unpublished first; the feed post then attaches
//! the returned photo ids.

use std::time::Duration;

use fnshop_core::{FacebookCredentials, FlatItem};
use reqwest::Client;
use serde::Deserialize;

use crate::compose::photo_caption;
use crate::error::SocialError;

pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com/v24.0";

const PLATFORM: &str = "Facebook";

#[derive(Debug, Deserialize)]
struct IdResponse {
    id: String,
}

/// Graph API client bound to one page.
pub struct FacebookClient {
    client: Client,
    base_url: String,
    credentials: FacebookCredentials,
}

impl FacebookClient {
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(credentials: FacebookCredentials, timeout_secs: u64) -> Result<Self, SocialError> {
        Self::with_base_url(credentials, timeout_secs, DEFAULT_GRAPH_BASE_URL)
    }

    /// Creates a client with a custom Graph base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SocialError::Http`] if the `reqwest::Client` cannot be built.
    pub fn with_base_url(
        credentials: FacebookCredentials,
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

    /// Uploads `image_url` as an unpublished page photo and returns its id.
    ///
    /// # Errors
    ///
    /// [`SocialError::Api`] on a non-2xx status, [`SocialError::Http`] on
    /// network failure, [`SocialError::Deserialize`] if the reply has no id.
    pub async fn upload_unpublished_photo(
        &self,
        image_url: &str,
        caption: Option<&str>,
    ) -> Result<String, SocialError> {
        let url = format!("{}/{}/photos", self.base_url, self.credentials.page_id);
        let mut form = vec![
            ("published", "false"),
            ("url", image_url),
            ("access_token", self.credentials.page_token.as_str()),
        ];
        if let Some(caption) = caption {
            form.push(("caption", caption));
        }

        let response = self.client.post(&url).form(&form).send().await?;
        parse_id(response, "photo upload").await
    }

    /// Publishes a feed post with the given photos attached. Returns the post
    /// id.
    ///
    /// # Errors
    ///
    /// Same as [`FacebookClient::upload_unpublished_photo`].
    pub async fn create_multi_image_post(
        &self,
        message: &str,
        media_fbids: &[String],
    ) -> Result<String, SocialError> {
        let url = format!("{}/{}/feed", self.base_url, self.credentials.page_id);
        let mut form: Vec<(String, String)> = vec![
            ("message".to_owned(), message.to_owned()),
            (
                "access_token".to_owned(),
                self.credentials.page_token.clone(),
            ),
        ];
        for (i, id) in media_fbids.iter().enumerate() {
            form.push((
                format!("attached_media[{i}]"),
                serde_json::json!({ "media_fbid": id }).to_string(),
            ));
        }

        let response = self.client.post(&url).form(&form).send().await?;
        parse_id(response, "feed post").await
    }

    /// Uploads up to `max_images` item icons, captioned, then posts them
    /// together under `message`.
    ///
    /// # Errors
    ///
    /// [`SocialError::NothingToPost`] when no photo was uploaded; otherwise
    /// the first upload or post error.
    pub async fn post_shop(
        &self,
        items: &[FlatItem],
        message: &str,
        max_images: usize,
    ) -> Result<String, SocialError> {
        let mut media_fbids = Vec::new();
        for item in items.iter().take(max_images) {
            let caption = photo_caption(item);
            let id = self
                .upload_unpublished_photo(&item.image, Some(&caption))
                .await?;
            tracing::debug!(item = %item.id, photo_id = %id, "uploaded unpublished photo");
            media_fbids.push(id);
        }

        if media_fbids.is_empty() {
            return Err(SocialError::NothingToPost(
                "no photos uploaded for the multi-image post".to_owned(),
            ));
        }

        let post_id = self.create_multi_image_post(message, &media_fbids).await?;
        tracing::info!(post_id = %post_id, images = media_fbids.len(), "published Facebook post");
        Ok(post_id)
    }
}

async fn parse_id(response: reqwest::Response, context: &str) -> Result<String, SocialError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(SocialError::Api {
            platform: PLATFORM,
            status: status.as_u16(),
            body,
        });
    }

    serde_json::from_str::<IdResponse>(&body)
        .map(|r| r.id)
        .map_err(|e| SocialError::Deserialize {
            context: format!("Facebook {context} response"),
            source: e,
        })
}
