//! Optional posting steps.
//!
//! Each platform is attempted once. Failures are logged and swallowed so a
//! posting problem never changes the exit status or the written snapshot.

use chrono::Utc;
use fnshop_core::{AppConfig, FacebookCredentials, ShopSnapshot, TwitterCredentials};
use fnshop_social::{facebook_message, twitter_thread, FacebookClient, SocialError, TwitterClient};

pub(crate) async fn publish_all(config: &AppConfig, snapshot: &ShopSnapshot) {
    if snapshot.items.is_empty() {
        tracing::info!("skipping posting: snapshot has no items");
        return;
    }

    match &config.facebook {
        Some(credentials) => {
            if let Err(e) = post_facebook(config, credentials.clone(), snapshot).await {
                tracing::error!(error = %e, "Facebook post failed");
            }
        }
        None => tracing::warn!("skipping Facebook: FB_PAGE_ID or FB_PAGE_TOKEN not set"),
    }

    match &config.twitter {
        Some(credentials) => {
            if let Err(e) = post_twitter(config, credentials.clone(), snapshot).await {
                tracing::error!(error = %e, "Twitter thread failed");
            }
        }
        None => tracing::warn!("skipping Twitter: TW_* credentials incomplete"),
    }
}

async fn post_facebook(
    config: &AppConfig,
    credentials: FacebookCredentials,
    snapshot: &ShopSnapshot,
) -> Result<String, SocialError> {
    let client = FacebookClient::new(credentials, config.post_timeout_secs)?;
    let message = facebook_message(Utc::now(), &snapshot.items);
    tracing::info!(
        max_images = config.facebook_max_images,
        "posting multi-image Facebook update"
    );
    client
        .post_shop(&snapshot.items, &message, config.facebook_max_images)
        .await
}

async fn post_twitter(
    config: &AppConfig,
    credentials: TwitterCredentials,
    snapshot: &ShopSnapshot,
) -> Result<Vec<String>, SocialError> {
    let client = TwitterClient::new(credentials, config.post_timeout_secs)?;
    let thread = twitter_thread(
        Utc::now(),
        &snapshot.items,
        config.facebook_page_url.as_deref(),
    );
    tracing::info!(tweets = thread.len(), "posting Twitter thread");
    client.post_thread(&thread).await
}
