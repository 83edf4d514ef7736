//! Source selection: typed endpoint first, raw endpoint as fallback.

use chrono::{DateTime, Utc};
use fnshop_core::{ShopEntry, ShopSnapshot, SourceKind};
use serde_json::Value;

use crate::client::FortniteApiClient;
use crate::extract::raw::raw_entries;
use crate::extract::EntryFields;
use crate::group::project;
use crate::normalize::{next_rotation_label, normalize_entry};
use crate::types::Shop;

/// Normalized entries from whichever source succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub entries: Vec<ShopEntry>,
    /// Upstream shop date, verbatim.
    pub source_date: Option<String>,
    /// `None` when both sources failed.
    pub source: Option<SourceKind>,
}

impl FetchOutcome {
    /// Outcome of a run where nothing could be fetched.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Total cosmetics across all entries.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.entries.iter().map(|e| e.items.len()).sum()
    }

    /// Projects the entries into the output document.
    #[must_use]
    pub fn into_snapshot(self, updated_at: DateTime<Utc>) -> ShopSnapshot {
        let projection = project(&self.entries);
        ShopSnapshot::new(
            updated_at,
            self.source_date,
            self.source,
            projection.items,
            projection.groups,
        )
    }
}

fn normalize_all<'a>(
    entries: impl Iterator<Item = &'a dyn EntryFields>,
    shop_date: Option<&str>,
) -> Vec<ShopEntry> {
    let fallback_expiry = next_rotation_label(shop_date);
    entries
        .map(|entry| normalize_entry(entry, &fallback_expiry))
        .collect()
}

/// Normalizes a typed `/v2/shop` payload.
#[must_use]
pub fn normalize_typed_shop(shop: &Shop) -> FetchOutcome {
    let offers = shop
        .entries
        .iter()
        .flatten()
        .map(|offer| offer as &dyn EntryFields);

    FetchOutcome {
        entries: normalize_all(offers, shop.date.as_deref()),
        source_date: shop.date.clone(),
        source: Some(SourceKind::Typed),
    }
}

/// Normalizes a raw `/v2/shop/br` body (the whole envelope, `data` included).
#[must_use]
pub fn normalize_raw_shop(body: &Value) -> FetchOutcome {
    let Some(data) = body.get("data").filter(|d| d.is_object()) else {
        return FetchOutcome {
            source: Some(SourceKind::Raw),
            ..FetchOutcome::empty()
        };
    };

    let shop_date = data.get("date").and_then(Value::as_str);
    let entries = raw_entries(data);

    FetchOutcome {
        entries: normalize_all(
            entries.iter().map(|entry| entry as &dyn EntryFields),
            shop_date,
        ),
        source_date: shop_date.map(str::to_owned),
        source: Some(SourceKind::Raw),
    }
}

/// Fetches and normalizes the current shop. Never fails.
///
/// The typed endpoint is tried first. An error there, or a result with no
/// usable cosmetics, falls through to the raw endpoint. If that fails too
/// the outcome is [`FetchOutcome::empty`].
pub async fn fetch_shop(client: &FortniteApiClient) -> FetchOutcome {
    match client.fetch_typed_shop().await {
        Ok(shop) => {
            let outcome = normalize_typed_shop(&shop);
            let count = outcome.item_count();
            if count > 0 {
                tracing::info!(count, source = "typed", "fetched item shop");
                return outcome;
            }
            tracing::warn!("typed shop returned no usable items; trying raw fallback");
        }
        Err(e) => {
            tracing::warn!(error = %e, "typed shop request failed; trying raw fallback");
        }
    }

    match client.fetch_raw_shop().await {
        Ok(body) => {
            let outcome = normalize_raw_shop(&body);
            tracing::info!(count = outcome.item_count(), source = "raw", "fetched item shop");
            outcome
        }
        Err(e) => {
            tracing::error!(error = %e, "raw shop request failed; writing empty snapshot");
            FetchOutcome::empty()
        }
    }
}
