//! Posting collaborators: a Facebook multi-image post and a Twitter/X thread
//! built from the flat shop items.

pub mod compose;
pub mod error;
pub mod facebook;
pub mod oauth;
pub mod twitter;

pub use compose::{chunk_lines_into_tweets, facebook_message, highlights, twitter_thread};
pub use error::SocialError;
pub use facebook::FacebookClient;
pub use twitter::TwitterClient;
