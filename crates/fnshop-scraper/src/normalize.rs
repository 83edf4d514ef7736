//! Normalization from upstream shapes to [`fnshop_core::CosmeticItem`] and
//! [`fnshop_core::ShopEntry`].
//!
//! Every field helper here takes the raw [`serde_json::Value`] exposed by the
//! [`crate::extract`] traits, so the same rules apply to both upstream sources.
//! None of them fail: malformed values are defaulted (rarity, type) or
//! filtered (icon).

use chrono::{DateTime, Days, NaiveDate};
use fnshop_core::{CosmeticItem, CosmeticType, Rarity, ShopEntry};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::extract::{CosmeticFields, EntryFields};

/// Expiry label used when neither the entry nor the shop date gives one.
pub const NEXT_ROTATION_LABEL: &str = "Próxima rotación";

/// Display name used when upstream sends none.
pub const UNNAMED_ITEM: &str = "Sin nombre";

/// Attributes checked, in order, when a rarity arrives as an object.
const RARITY_ATTRS: [&str; 5] = ["value", "apiValue", "api_value", "name", "backendValue"];

/// Substring classification order. `uncommon` must precede `common`.
const RARITY_ORDER: [(&str, Rarity); 6] = [
    ("uncommon", Rarity::Uncommon),
    ("common", Rarity::Common),
    ("rare", Rarity::Rare),
    ("epic", Rarity::Epic),
    ("legendary", Rarity::Legendary),
    ("mythic", Rarity::Mythic),
];

/// Name-keyword groups for [`infer_type_from_name`], checked in this order.
const TYPE_KEYWORDS: [(CosmeticType, &[&str]); 7] = [
    (
        CosmeticType::Companion,
        &[
            "compañero",
            "companero",
            "companion",
            "buddy",
            "pet",
            "petcarrier",
            "pet carrier",
        ],
    ),
    (
        CosmeticType::MusicTrack,
        &[
            "pista",
            "improvisacion",
            "improvisación",
            "jam",
            "track",
            "music",
            "música",
        ],
    ),
    (CosmeticType::Emote, &["gesto", "emote", "baile", "dance"]),
    (CosmeticType::Pickaxe, &["pico", "hacha", "pickaxe"]),
    (
        CosmeticType::Glider,
        &["ala", "ala delta", "planeador", "glider"],
    ),
    (CosmeticType::Wrap, &["envoltorio", "wrap", "camo"]),
    (
        CosmeticType::BackBling,
        &["mochila", "back", "back bling", "accesorio"],
    ),
];

/// JSON truthiness: `null`, `""`, `false`, `0`, `[]` and `{}` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Renders a scalar without JSON quoting.
fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns the first truthy attribute of an object, rendered as a string.
fn first_attr(value: &Value, attrs: &[&str]) -> Option<String> {
    let map = value.as_object()?;
    attrs
        .iter()
        .filter_map(|attr| map.get(*attr))
        .find(|v| is_truthy(v))
        .map(scalar_string)
}

/// Returns a trimmed, non-empty string value.
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

/// Normalizes an upstream rarity to one of the six canonical tiers.
///
/// Accepts a plain string (`"Epic"`, `"EFortRarity::Epic"`), an object with a
/// `value`-like attribute, or nothing. Absent and unrecognized values are
/// [`Rarity::Common`].
#[must_use]
pub fn normalize_rarity(raw: Option<&Value>) -> Rarity {
    let Some(raw) = raw.filter(|v| is_truthy(v)) else {
        return Rarity::Common;
    };

    let scalar = first_attr(raw, &RARITY_ATTRS).unwrap_or_else(|| scalar_string(raw));
    let lowered = scalar.trim().to_lowercase();
    let cleaned = lowered
        .rsplit("::")
        .next()
        .and_then(|s| s.rsplit('.').next())
        .unwrap_or(&lowered);

    RARITY_ORDER
        .iter()
        .find(|(token, _)| cleaned.contains(token))
        .map_or(Rarity::Common, |(_, rarity)| *rarity)
}

/// Extracts an explicit type code (`type.value`, else `type.name`, else
/// `type.backendValue`, or a plain string), lowercased.
#[must_use]
pub fn type_code(raw: Option<&Value>) -> Option<String> {
    let raw = raw.filter(|v| is_truthy(v))?;
    let code = match raw {
        Value::Object(_) => first_attr(raw, &["value", "name", "backendValue"])?,
        other => scalar_string(other),
    };
    non_blank(Some(code.as_str())).map(|c| c.to_lowercase())
}

/// Maps an upstream type code onto [`CosmeticType`] through the synonym
/// table. Returns `None` for codes outside the table.
#[must_use]
pub fn map_type_code(code: &str) -> Option<CosmeticType> {
    let t = code.trim().to_lowercase();
    let mapped = match t.as_str() {
        "emote" | "emoji" | "athenadance" | "athenaemoji" => CosmeticType::Emote,
        "outfit" | "athenacharacter" => CosmeticType::Outfit,
        "backpack" | "backbling" | "back bling" | "athenabackpack" => CosmeticType::BackBling,
        "pickaxe" | "athenapickaxe" => CosmeticType::Pickaxe,
        "glider" | "athenaglider" => CosmeticType::Glider,
        "wrap" | "weaponwrap" | "weapon wrap" | "athenaitemwrap" => CosmeticType::Wrap,
        "pet" | "petcarrier" | "companion" | "buddy" | "athenapet" | "athenapetcarrier"
        | "sidekick" => CosmeticType::Companion,
        "music" | "musicpack" | "athenamusicpack" | "jam" | "jamtrack" | "jam track"
        | "festival_track" | "sparks_song" | "track" => CosmeticType::MusicTrack,
        "loadingscreen" | "loading screen" | "athenaloadingscreen" => CosmeticType::LoadingScreen,
        _ => return None,
    };
    Some(mapped)
}

/// Guesses a type from the display name. Keyword groups are checked in a
/// fixed order and the first hit wins, so `"Dance Pickaxe"` is an emote.
#[must_use]
pub fn infer_type_from_name(name: &str) -> CosmeticType {
    let n = name.to_lowercase();
    TYPE_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| n.contains(k)))
        .map_or(CosmeticType::Outfit, |(kind, _)| *kind)
}

/// Explicit code when recognized, else the name heuristic.
#[must_use]
pub fn classify_type(code: Option<&str>, name: &str) -> CosmeticType {
    code.and_then(map_type_code)
        .unwrap_or_else(|| infer_type_from_name(name))
}

/// Cleans an upstream image reference into an absolute `http(s)` URL.
///
/// Unwraps one container level (`url`, then `icon`, then the first value),
/// strips quotes and the `asset_url=` artifact, and promotes `//host/...` to
/// `https://host/...`. Returns `None` for anything else.
#[must_use]
pub fn clean_url(raw: Option<&Value>) -> Option<String> {
    let raw = raw.filter(|v| is_truthy(v))?;

    let inner = match raw {
        Value::Object(map) => ["url", "icon"]
            .iter()
            .filter_map(|k| map.get(*k))
            .find(|v| is_truthy(v))
            .or_else(|| map.values().next())?,
        other => other,
    };

    let text = match inner {
        Value::String(s) => s.clone(),
        Value::Null | Value::Object(_) | Value::Array(_) => return None,
        other => other.to_string(),
    };

    let mut url = strip_quotes(&text).to_owned();
    let lowered = url.to_lowercase();
    if lowered.starts_with("asset url=") || lowered.starts_with("asset_url=") {
        if let Some((_, rest)) = url.split_once('=') {
            url = strip_quotes(rest).to_owned();
        }
    }
    if url.starts_with("//") {
        url = format!("https:{url}");
    }

    if url.starts_with("http://") || url.starts_with("https://") {
        Some(url)
    } else {
        None
    }
}

fn strip_quotes(s: &str) -> &str {
    s.trim().trim_matches('\'').trim_matches('"')
}

/// Series label from `series.value` / `series.name`, or a plain string.
#[must_use]
pub fn series_label(raw: Option<&Value>) -> Option<String> {
    let raw = raw.filter(|v| is_truthy(v))?;
    match raw {
        Value::String(s) => non_blank(Some(s.as_str())),
        Value::Object(_) => first_attr(raw, &["value", "name"]).and_then(|s| non_blank(Some(s.as_str()))),
        _ => None,
    }
}

/// Reads a V-Bucks amount from a number or a digit string. Whole-valued
/// floats such as `1500.0` count; fractional or negative amounts do not.
#[must_use]
pub fn price_value(raw: Option<&Value>) -> Option<u32> {
    match raw? {
        Value::Number(n) => match n.as_u64() {
            Some(p) => u32::try_from(p).ok(),
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(f))
                .map(|f| f as u32),
        },
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Lowercase hex SHA-256, truncated to 16 characters.
pub(crate) fn short_hash(input: &str) -> String {
    let mut hex = format!("{:x}", Sha256::digest(input.as_bytes()));
    hex.truncate(16);
    hex
}

/// Upstream id when present, else a hash of name and icon URL.
#[must_use]
pub fn item_id(upstream: Option<&str>, name: &str, icon_url: &str) -> String {
    non_blank(upstream).unwrap_or_else(|| format!("i-{}", short_hash(&format!("{name}|{icon_url}"))))
}

/// Day after the shop date as `dd/mm/YYYY`, or [`NEXT_ROTATION_LABEL`] when
/// the date is missing or unparseable.
#[must_use]
pub fn next_rotation_label(shop_date: Option<&str>) -> String {
    let Some(raw) = shop_date.map(str::trim).filter(|s| !s.is_empty()) else {
        return NEXT_ROTATION_LABEL.to_string();
    };

    let date = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .ok()
        .or_else(|| {
            raw.get(..10)
                .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        });

    date.and_then(|d| d.checked_add_days(Days::new(1)))
        .map_or_else(
            || NEXT_ROTATION_LABEL.to_string(),
            |d| d.format("%d/%m/%Y").to_string(),
        )
}

/// Normalizes one upstream cosmetic. Returns `None` when it has no usable
/// icon; that is a filter, not an error.
#[must_use]
pub fn normalize_cosmetic(cosmetic: &dyn CosmeticFields) -> Option<CosmeticItem> {
    let icon_url = clean_url(cosmetic.icon())?;
    let name = non_blank(cosmetic.name().as_deref()).unwrap_or_else(|| UNNAMED_ITEM.to_string());
    let code = cosmetic.type_code();

    Some(CosmeticItem {
        id: item_id(cosmetic.id().as_deref(), &name, &icon_url),
        rarity: normalize_rarity(cosmetic.rarity()),
        cosmetic_type: classify_type(code.as_deref(), &name),
        series: series_label(cosmetic.series()),
        price: cosmetic.price(),
        name,
        icon_url,
    })
}

/// Normalizes one upstream offer. Cosmetics without an icon are dropped;
/// an entry may therefore end up with no items.
#[must_use]
pub fn normalize_entry(entry: &dyn EntryFields, fallback_expiry: &str) -> ShopEntry {
    let cosmetics = entry.cosmetics();
    let total = cosmetics.len();
    let items: Vec<CosmeticItem> = cosmetics.into_iter().filter_map(normalize_cosmetic).collect();

    let offer_id = non_blank(entry.offer_id().as_deref());
    if items.len() < total {
        tracing::debug!(
            offer_id = offer_id.as_deref().unwrap_or("-"),
            dropped = total - items.len(),
            "dropped cosmetics without a usable icon"
        );
    }

    ShopEntry {
        offer_id,
        price: entry.price(),
        expiry: non_blank(entry.expiry().as_deref()).unwrap_or_else(|| fallback_expiry.to_string()),
        section: non_blank(entry.section().as_deref()),
        group_name: non_blank(entry.group_name().as_deref()),
        items,
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
