use crate::app_config::{AppConfig, FacebookCredentials, TwitterCredentials};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, for tests
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric env var cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional. Blank values count as absent, so an exported
/// but empty `FB_PAGE_TOKEN=` disables Facebook posting the same way an unset
/// one does.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let fn_api_key = optional("FN_API_KEY");
    let fn_api_base_url = or_default("FN_API_BASE_URL", "https://fortnite-api.com");
    let fn_api_language = or_default("FN_API_LANGUAGE", "es-MX");
    let log_level = or_default("FNSHOP_LOG_LEVEL", "info");
    let output_dir = PathBuf::from(or_default("WEB_OUT", "fortnite"));

    let request_timeout_secs = parse_u64("FNSHOP_REQUEST_TIMEOUT_SECS", "30")?;
    let max_retries = parse_u32("FNSHOP_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("FNSHOP_RETRY_BACKOFF_BASE_MS", "500")?;
    let post_timeout_secs = parse_u64("FNSHOP_POST_TIMEOUT_SECS", "120")?;

    let facebook = match (optional("FB_PAGE_ID"), optional("FB_PAGE_TOKEN")) {
        (Some(page_id), Some(page_token)) => Some(FacebookCredentials {
            page_id,
            page_token,
        }),
        _ => None,
    };
    let facebook_page_url = optional("FB_PAGE_URL");
    let facebook_max_images = parse_usize("FB_MAX_IMAGES", "40")?;

    let twitter = match (
        optional("TW_API_KEY"),
        optional("TW_API_SECRET"),
        optional("TW_ACCESS_TOKEN"),
        optional("TW_ACCESS_SECRET"),
    ) {
        (Some(api_key), Some(api_secret), Some(access_token), Some(access_secret)) => {
            Some(TwitterCredentials {
                api_key,
                api_secret,
                access_token,
                access_secret,
            })
        }
        _ => None,
    };

    Ok(AppConfig {
        fn_api_key,
        fn_api_base_url,
        fn_api_language,
        log_level,
        output_dir,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        post_timeout_secs,
        facebook,
        facebook_page_url,
        facebook_max_images,
        twitter,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
