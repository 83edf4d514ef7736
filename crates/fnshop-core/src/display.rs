//! Human-readable rendering of shop items for social posts (es-MX copy).

use crate::shop::{FlatItem, Rarity};

/// Emoji-prefixed Spanish label for a rarity tier.
#[must_use]
pub fn rarity_label(rarity: Rarity) -> &'static str {
    match rarity {
        Rarity::Common => "⚪ Común",
        Rarity::Uncommon => "🟢 Poco común",
        Rarity::Rare => "🔵 Raro",
        Rarity::Epic => "🟣 Épico",
        Rarity::Legendary => "🟠 Legendario",
        Rarity::Mythic => "🔴 Mítico",
    }
}

/// `"1500 V-Bucks"`, or `"?"` when the price is unknown.
#[must_use]
pub fn format_price(price: Option<u32>) -> String {
    price.map_or_else(|| "?".to_string(), |p| format!("{p} V-Bucks"))
}

/// One bullet line per item, e.g.
/// `• Wild Card Pickaxe (🟣 Épico) - 1500 V-Bucks | Sale: 05/01/2026`.
#[must_use]
pub fn format_item_line(item: &FlatItem) -> String {
    format!(
        "• {} ({}) - {} | Sale: {}",
        item.name,
        rarity_label(item.rarity),
        format_price(item.price),
        item.expires
    )
}
