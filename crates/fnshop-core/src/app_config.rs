use std::path::PathBuf;

/// Facebook Page credentials. Present only when both the page id and the page
/// access token are configured.
#[derive(Clone)]
pub struct FacebookCredentials {
    pub page_id: String,
    pub page_token: String,
}

impl std::fmt::Debug for FacebookCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FacebookCredentials")
            .field("page_id", &self.page_id)
            .field("page_token", &"[redacted]")
            .finish()
    }
}

/// OAuth 1.0a user-context credentials for posting tweets. Present only when
/// all four values are configured.
#[derive(Clone)]
pub struct TwitterCredentials {
    pub api_key: String,
    pub api_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

impl std::fmt::Debug for TwitterCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwitterCredentials")
            .field("api_key", &"[redacted]")
            .field("api_secret", &"[redacted]")
            .field("access_token", &"[redacted]")
            .field("access_secret", &"[redacted]")
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub fn_api_key: Option<String>,
    pub fn_api_base_url: String,
    pub fn_api_language: String,
    pub log_level: String,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub post_timeout_secs: u64,
    pub facebook: Option<FacebookCredentials>,
    pub facebook_page_url: Option<String>,
    pub facebook_max_images: usize,
    pub twitter: Option<TwitterCredentials>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "fn_api_key",
                &self.fn_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("fn_api_base_url", &self.fn_api_base_url)
            .field("fn_api_language", &self.fn_api_language)
            .field("log_level", &self.log_level)
            .field("output_dir", &self.output_dir)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("post_timeout_secs", &self.post_timeout_secs)
            .field("facebook", &self.facebook)
            .field("facebook_page_url", &self.facebook_page_url)
            .field("facebook_max_images", &self.facebook_max_images)
            .field("twitter", &self.twitter)
            .finish()
    }
}
