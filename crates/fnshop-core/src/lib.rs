pub mod app_config;
pub mod config;
pub mod display;
pub mod shop;

use thiserror::Error;

pub use app_config::{AppConfig, FacebookCredentials, TwitterCredentials};
pub use config::{load_app_config, load_app_config_from_env};
pub use display::{format_item_line, format_price, rarity_label};
pub use shop::{
    CosmeticItem, CosmeticType, FlatItem, Group, GroupMember, Rarity, ShopEntry, ShopSnapshot,
    SourceKind,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
