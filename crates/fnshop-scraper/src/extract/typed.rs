//! Field access for the typed `/v2/shop` response.

use serde_json::Value;

use super::{CosmeticFields, EntryFields};
use crate::normalize::non_blank;
use crate::types::{BrCosmetic, JamTrack, ShopOffer};

/// Type code given to jam tracks, which carry no `type` of their own.
const JAM_TRACK_CODE: &str = "sparks_song";

impl EntryFields for ShopOffer {
    fn offer_id(&self) -> Option<String> {
        self.offer_id.clone()
    }

    fn price(&self) -> Option<u32> {
        self.final_price.or(self.regular_price)
    }

    fn expiry(&self) -> Option<String> {
        self.out_date.clone()
    }

    fn section(&self) -> Option<String> {
        let layout = self.layout.as_ref()?;
        non_blank(layout.name.as_deref()).or_else(|| non_blank(layout.category.as_deref()))
    }

    fn group_name(&self) -> Option<String> {
        self.bundle.as_ref().and_then(|b| b.name.clone())
    }

    fn cosmetics(&self) -> Vec<&dyn CosmeticFields> {
        let items = self
            .br_items
            .iter()
            .flatten()
            .map(|c| c as &dyn CosmeticFields);
        let tracks = self
            .tracks
            .iter()
            .flatten()
            .map(|t| t as &dyn CosmeticFields);
        items.chain(tracks).collect()
    }
}

impl CosmeticFields for BrCosmetic {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    fn rarity(&self) -> Option<&Value> {
        self.rarity.as_ref()
    }

    fn type_code(&self) -> Option<String> {
        crate::normalize::type_code(self.item_type.as_ref())
    }

    fn series(&self) -> Option<&Value> {
        self.series.as_ref()
    }

    /// `images.icon` when the key is present, even if null. Same lookup as
    /// the raw source so both drop the same cosmetics.
    fn icon(&self) -> Option<&Value> {
        let images = self.images.as_ref()?;
        Some(images.get("icon").unwrap_or(images))
    }
}

impl CosmeticFields for JamTrack {
    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn name(&self) -> Option<String> {
        self.title.clone()
    }

    fn rarity(&self) -> Option<&Value> {
        None
    }

    fn type_code(&self) -> Option<String> {
        Some(JAM_TRACK_CODE.to_owned())
    }

    fn series(&self) -> Option<&Value> {
        None
    }

    fn icon(&self) -> Option<&Value> {
        self.album_art.as_ref()
    }
}
