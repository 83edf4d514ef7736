//! Response types for the typed `GET /v2/shop` endpoint of fortnite-api.com.
//!
//! ## Observed shape
//!
//! ```text
//! { "status": 200,
//!   "data": { "hash": "...", "date": "2026-10-16T00:00:00Z",
//!             "entries": [ { "regularPrice": 1500, "finalPrice": 1200,
//!                            "offerId": "v2:/...", "outDate": "2026-10-17T00:00:00Z",
//!                            "bundle": { "name": "..." },
//!                            "layout": { "name": "Jam Tracks", "category": "..." },
//!                            "brItems": [ ... ], "tracks": [ ... ] } ] } }
//! ```
//!
//! ### Per-field variability
//! `rarity`, `type`, `series` and `images` arrive as objects
//! (`{"value": "epic", "displayValue": "Épico", "backendValue": "EFortRarity::Epic"}`)
//! but older payloads and localized mirrors have sent plain strings for some of
//! them. They are kept as raw [`serde_json::Value`] and interpreted by
//! [`crate::normalize`], which accepts either shape.
//!
//! ### Nullable arrays
//! `entries`, `brItems` and `tracks` are sometimes `null` rather than absent,
//! so they are modelled as `Option<Vec<_>>`.

use serde::Deserialize;
use serde_json::Value;

/// Top-level envelope.
#[derive(Debug, Deserialize)]
pub struct ShopResponse {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub data: Option<Shop>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(default)]
    pub hash: Option<String>,
    /// Shop rotation date, ISO-8601.
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub entries: Option<Vec<ShopOffer>>,
}

/// One purchasable offer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopOffer {
    #[serde(default)]
    pub regular_price: Option<u32>,
    #[serde(default)]
    pub final_price: Option<u32>,
    #[serde(default)]
    pub offer_id: Option<String>,
    #[serde(default)]
    pub dev_name: Option<String>,
    #[serde(default)]
    pub in_date: Option<String>,
    #[serde(default)]
    pub out_date: Option<String>,
    #[serde(default)]
    pub bundle: Option<Bundle>,
    #[serde(default)]
    pub layout: Option<Layout>,
    #[serde(default)]
    pub br_items: Option<Vec<BrCosmetic>>,
    #[serde(default)]
    pub tracks: Option<Vec<JamTrack>>,
}

#[derive(Debug, Deserialize)]
pub struct Bundle {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub info: Option<String>,
}

/// Shop section the offer is displayed in.
#[derive(Debug, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A Battle Royale cosmetic inside an offer.
#[derive(Debug, Deserialize)]
pub struct BrCosmetic {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub item_type: Option<Value>,
    #[serde(default)]
    pub rarity: Option<Value>,
    #[serde(default)]
    pub series: Option<Value>,
    /// `{ "smallIcon": ..., "icon": ..., "featured": ... }`.
    #[serde(default)]
    pub images: Option<Value>,
}

/// A Festival jam track sold in the shop.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JamTrack {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album_art: Option<Value>,
}
