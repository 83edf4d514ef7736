//! Normalized item-shop model.
//!
//! A fetch produces a list of [`ShopEntry`] values, each holding the
//! [`CosmeticItem`]s sold under one offer. Two projections are derived from
//! that list for output: [`FlatItem`] rows (entry fields denormalized onto
//! every item) and [`Group`] records (one per offer, items nested).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rarity tier of a cosmetic. Closed set; anything unrecognized upstream is
/// normalized to [`Rarity::Common`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
}

impl Rarity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Epic => "epic",
            Self::Legendary => "legendary",
            Self::Mythic => "mythic",
        }
    }
}

impl std::fmt::Display for Rarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of cosmetic. Closed set; never passed through from upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CosmeticType {
    #[default]
    Outfit,
    BackBling,
    Pickaxe,
    Glider,
    Wrap,
    Emote,
    Companion,
    MusicTrack,
    LoadingScreen,
}

impl CosmeticType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Outfit => "outfit",
            Self::BackBling => "backbling",
            Self::Pickaxe => "pickaxe",
            Self::Glider => "glider",
            Self::Wrap => "wrap",
            Self::Emote => "emote",
            Self::Companion => "companion",
            Self::MusicTrack => "musictrack",
            Self::LoadingScreen => "loadingscreen",
        }
    }
}

impl std::fmt::Display for CosmeticType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which upstream source produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Typed `/v2/shop` endpoint.
    Typed,
    /// Raw `/v2/shop/br` fallback.
    Raw,
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Typed => f.write_str("typed"),
            Self::Raw => f.write_str("raw"),
        }
    }
}

/// A single cosmetic that survived normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CosmeticItem {
    /// Upstream id, or a hash of name + icon URL when upstream has none.
    pub id: String,
    pub name: String,
    /// Always an absolute `http`/`https` URL.
    pub icon_url: String,
    pub rarity: Rarity,
    pub cosmetic_type: CosmeticType,
    /// Collaboration or set label, e.g. `"Marvel Series"`.
    pub series: Option<String>,
    /// Individual price, only when the upstream record carries one.
    pub price: Option<u32>,
}

/// One purchasable offer as sold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopEntry {
    pub offer_id: Option<String>,
    /// V-Bucks charged for the whole entry.
    pub price: Option<u32>,
    /// Upstream expiry timestamp, or the computed next-rotation fallback.
    pub expiry: String,
    /// Human section label (`"Featured"`, `"Daily"`, ...).
    pub section: Option<String>,
    /// Bundle display name.
    pub group_name: Option<String>,
    pub items: Vec<CosmeticItem>,
}

/// Flat projection row: one cosmetic with its entry's fields attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlatItem {
    pub id: String,
    pub name: String,
    pub image: String,
    pub rarity: Rarity,
    #[serde(rename = "type")]
    pub cosmetic_type: CosmeticType,
    pub series: Option<String>,
    pub price: Option<u32>,
    pub expires: String,
    pub section: Option<String>,
    pub group: Option<String>,
    pub group_id: String,
    pub group_price: Option<u32>,
}

/// A cosmetic nested inside a [`Group`], carrying only its own price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupMember {
    pub id: String,
    pub name: String,
    pub image: String,
    pub rarity: Rarity,
    #[serde(rename = "type")]
    pub cosmetic_type: CosmeticType,
    pub series: Option<String>,
    pub price: Option<u32>,
}

impl From<&CosmeticItem> for GroupMember {
    fn from(item: &CosmeticItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            image: item.icon_url.clone(),
            rarity: item.rarity,
            cosmetic_type: item.cosmetic_type,
            series: item.series.clone(),
            price: item.price,
        }
    }
}

/// Items sold together under one offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: String,
    pub name: Option<String>,
    pub price: Option<u32>,
    pub expires: String,
    pub section: Option<String>,
    pub items: Vec<GroupMember>,
}

/// The `shop.json` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSnapshot {
    pub updated_at: DateTime<Utc>,
    pub source_date: Option<String>,
    pub source: Option<SourceKind>,
    pub count: usize,
    pub ok: bool,
    pub items: Vec<FlatItem>,
    pub groups: Vec<Group>,
}

impl ShopSnapshot {
    /// Builds a snapshot, deriving `count` and `ok` from `items`.
    #[must_use]
    pub fn new(
        updated_at: DateTime<Utc>,
        source_date: Option<String>,
        source: Option<SourceKind>,
        items: Vec<FlatItem>,
        groups: Vec<Group>,
    ) -> Self {
        let count = items.len();
        Self {
            updated_at,
            source_date,
            source,
            count,
            ok: count > 0,
            items,
            groups,
        }
    }
}
