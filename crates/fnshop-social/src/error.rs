use thiserror::Error;

#[derive(Debug, Error)]
pub enum SocialError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{platform} API returned HTTP {status}: {body}")]
    Api {
        platform: &'static str,
        status: u16,
        body: String,
    },

    #[error("nothing to post: {0}")]
    NothingToPost(String),

    #[error("request signing failed: {0}")]
    Signing(String),
}
