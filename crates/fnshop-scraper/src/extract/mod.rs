//! Narrow field-access interface over the two upstream shapes.
//!
//! The typed `/v2/shop` structs and the raw `/v2/shop/br` JSON disagree on
//! field names and nesting. Each source implements [`EntryFields`] and
//! [`CosmeticFields`] once, and [`crate::normalize`] only ever talks to these
//! traits.

pub mod raw;
pub mod typed;

use serde_json::Value;

/// Per-cosmetic accessors. Opaque fields stay as [`Value`] so the normalizer
/// can accept either the string or the object form.
pub trait CosmeticFields {
    fn id(&self) -> Option<String>;
    fn name(&self) -> Option<String>;
    fn rarity(&self) -> Option<&Value>;
    /// Explicit type code, already reduced to a string.
    fn type_code(&self) -> Option<String>;
    fn series(&self) -> Option<&Value>;
    fn icon(&self) -> Option<&Value>;

    /// Individual price. Only the raw source carries one.
    fn price(&self) -> Option<u32> {
        None
    }
}

/// Per-offer accessors.
pub trait EntryFields {
    fn offer_id(&self) -> Option<String>;
    fn price(&self) -> Option<u32>;
    fn expiry(&self) -> Option<String>;
    fn section(&self) -> Option<String>;
    fn group_name(&self) -> Option<String>;
    fn cosmetics(&self) -> Vec<&dyn CosmeticFields>;
}
