//! Field access for the untyped `/v2/shop/br` response.
//!
//! The payload is walked as plain JSON: `data.<section>.entries[]`, with each
//! entry carrying an `items` array. Field names differ from the typed
//! endpoint and several have historical aliases, tried in order below.

use serde_json::Value;

use super::{CosmeticFields, EntryFields};
use crate::normalize::{non_blank, price_value, type_code};

/// Section keys read from `data`, in output order.
pub const SECTION_KEYS: [&str; 6] = [
    "featured",
    "specialFeatured",
    "specialDaily",
    "daily",
    "votes",
    "voteWinners",
];

/// Display label for a section key. Unknown keys are returned as-is.
#[must_use]
pub fn human_section(key: &str) -> String {
    match key {
        "featured" => "Featured",
        "specialFeatured" => "Special Featured",
        "specialDaily" => "Special Daily",
        "daily" => "Daily",
        "votes" => "Votes",
        "voteWinners" => "Vote Winners",
        other => other,
    }
    .to_owned()
}

/// One entry of the raw payload together with the section it was found in.
#[derive(Debug, Clone, Copy)]
pub struct RawEntry<'a> {
    pub section_key: &'a str,
    pub value: &'a Value,
}

/// Collects every entry under the known sections of `data`.
///
/// Missing sections, sections without `entries` and non-object entries are
/// skipped.
#[must_use]
pub fn raw_entries(data: &Value) -> Vec<RawEntry<'_>> {
    SECTION_KEYS
        .iter()
        .filter_map(|key| {
            let entries = data.get(*key)?.get("entries")?.as_array()?;
            Some((*key, entries))
        })
        .flat_map(|(section_key, entries)| {
            entries
                .iter()
                .filter(|value| value.is_object())
                .map(move |value| RawEntry { section_key, value })
        })
        .collect()
}

fn text(value: &Value, key: &str) -> Option<String> {
    non_blank(value.get(key).and_then(Value::as_str))
}

impl EntryFields for RawEntry<'_> {
    fn offer_id(&self) -> Option<String> {
        text(self.value, "offerId")
    }

    fn price(&self) -> Option<u32> {
        ["regularPrice", "finalPrice", "price"]
            .iter()
            .find_map(|key| price_value(self.value.get(*key)))
    }

    fn expiry(&self) -> Option<String> {
        text(self.value, "offerExpires").or_else(|| text(self.value, "expiresAt"))
    }

    fn section(&self) -> Option<String> {
        Some(human_section(self.section_key))
    }

    fn group_name(&self) -> Option<String> {
        self.value
            .get("bundle")
            .and_then(|b| text(b, "name"))
            .or_else(|| text(self.value, "category"))
            .or_else(|| text(self.value, "devName"))
    }

    fn cosmetics(&self) -> Vec<&dyn CosmeticFields> {
        self.value
            .get("items")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter(|item| item.is_object())
                    .map(|item| item as &dyn CosmeticFields)
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A raw cosmetic is a bare JSON object.
impl CosmeticFields for Value {
    fn id(&self) -> Option<String> {
        text(self, "id")
    }

    fn name(&self) -> Option<String> {
        text(self, "name")
    }

    fn rarity(&self) -> Option<&Value> {
        self.get("rarity")
    }

    fn type_code(&self) -> Option<String> {
        type_code(self.get("type"))
    }

    fn series(&self) -> Option<&Value> {
        self.get("series")
    }

    fn icon(&self) -> Option<&Value> {
        let images = self.get("images")?;
        Some(images.get("icon").unwrap_or(images))
    }

    fn price(&self) -> Option<u32> {
        price_value(self.get("price"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data() -> Value {
        json!({
            "date": "2026-10-16T00:00:00Z",
            "daily": { "entries": [
                {
                    "regularPrice": "800",
                    "offerExpires": "2026-10-17T00:00:00Z",
                    "devName": "[VIRTUAL]1 x Raven",
                    "items": [{ "id": "CID_001", "name": "Raven", "images": { "icon": "https://cdn.example.com/r.png" }, "price": 800 }]
                }
            ]},
            "featured": { "entries": [
                {
                    "finalPrice": 1500,
                    "offerId": "v2:/bundle",
                    "bundle": { "name": "Lote Caos" },
                    "category": "Ignored",
                    "items": [{ "name": "Caos", "images": { "icon": "https://cdn.example.com/c.png" } }, "junk"]
                }
            ]},
            "votes": null,
            "unknownSection": { "entries": [{ "items": [] }] }
        })
    }

    #[test]
    fn entries_follow_section_order() {
        let data = data();
        let entries = raw_entries(&data);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].section_key, "featured");
        assert_eq!(entries[1].section_key, "daily");
        assert_eq!(entries[1].section().as_deref(), Some("Daily"));
    }

    #[test]
    fn entry_fields_use_aliases_in_order() {
        let data = data();
        let entries = raw_entries(&data);

        let featured = &entries[0];
        assert_eq!(EntryFields::price(featured), Some(1500));
        assert_eq!(featured.group_name().as_deref(), Some("Lote Caos"));
        assert_eq!(featured.offer_id().as_deref(), Some("v2:/bundle"));
        assert_eq!(featured.expiry(), None);
        assert_eq!(featured.cosmetics().len(), 1);

        let daily = &entries[1];
        assert_eq!(EntryFields::price(daily), Some(800));
        assert_eq!(daily.group_name().as_deref(), Some("[VIRTUAL]1 x Raven"));
        assert_eq!(daily.expiry().as_deref(), Some("2026-10-17T00:00:00Z"));
    }

    #[test]
    fn raw_cosmetic_carries_individual_price() {
        let data = data();
        let entries = raw_entries(&data);
        let cosmetics = entries[1].cosmetics();
        assert_eq!(cosmetics[0].price(), Some(800));
        assert_eq!(
            cosmetics[0].icon(),
            Some(&json!("https://cdn.example.com/r.png"))
        );
    }

    #[test]
    fn human_section_labels() {
        assert_eq!(human_section("specialFeatured"), "Special Featured");
        assert_eq!(human_section("voteWinners"), "Vote Winners");
        assert_eq!(human_section("other"), "other");
    }
}
