pub mod client;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod group;
pub mod normalize;
pub(crate) mod rate_limit;
pub mod types;

pub use client::FortniteApiClient;
pub use error::ScraperError;
pub use extract::{CosmeticFields, EntryFields};
pub use fetch::{fetch_shop, normalize_raw_shop, normalize_typed_shop, FetchOutcome};
pub use group::{assign_groups, group_id_for, project, Projection};
pub use normalize::{clean_url, classify_type, normalize_entry, normalize_rarity};
pub use types::{Shop, ShopOffer, ShopResponse};
