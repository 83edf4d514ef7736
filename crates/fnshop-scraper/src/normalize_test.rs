use super::*;
use serde_json::json;

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

#[derive(Default)]
struct FakeCosmetic {
    id: Option<&'static str>,
    name: Option<&'static str>,
    rarity: Option<Value>,
    type_code: Option<&'static str>,
    series: Option<Value>,
    icon: Option<Value>,
    price: Option<u32>,
}

impl CosmeticFields for FakeCosmetic {
    fn id(&self) -> Option<String> {
        self.id.map(str::to_owned)
    }
    fn name(&self) -> Option<String> {
        self.name.map(str::to_owned)
    }
    fn rarity(&self) -> Option<&Value> {
        self.rarity.as_ref()
    }
    fn type_code(&self) -> Option<String> {
        self.type_code.map(str::to_owned)
    }
    fn series(&self) -> Option<&Value> {
        self.series.as_ref()
    }
    fn icon(&self) -> Option<&Value> {
        self.icon.as_ref()
    }
    fn price(&self) -> Option<u32> {
        self.price
    }
}

#[derive(Default)]
struct FakeEntry {
    offer_id: Option<&'static str>,
    price: Option<u32>,
    expiry: Option<&'static str>,
    section: Option<&'static str>,
    group_name: Option<&'static str>,
    cosmetics: Vec<FakeCosmetic>,
}

impl EntryFields for FakeEntry {
    fn offer_id(&self) -> Option<String> {
        self.offer_id.map(str::to_owned)
    }
    fn price(&self) -> Option<u32> {
        self.price
    }
    fn expiry(&self) -> Option<String> {
        self.expiry.map(str::to_owned)
    }
    fn section(&self) -> Option<String> {
        self.section.map(str::to_owned)
    }
    fn group_name(&self) -> Option<String> {
        self.group_name.map(str::to_owned)
    }
    fn cosmetics(&self) -> Vec<&dyn CosmeticFields> {
        self.cosmetics
            .iter()
            .map(|c| c as &dyn CosmeticFields)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// normalize_rarity
// ---------------------------------------------------------------------------

#[test]
fn rarity_strips_backend_namespace() {
    assert_eq!(
        normalize_rarity(Some(&json!("EFortRarity::Epic"))),
        Rarity::Epic
    );
    assert_eq!(
        normalize_rarity(Some(&json!("EFortRarity.Legendary"))),
        Rarity::Legendary
    );
}

#[test]
fn rarity_reads_object_attributes_in_order() {
    let raw = json!({ "value": "rare", "displayValue": "Raro", "backendValue": "EFortRarity::Rare" });
    assert_eq!(normalize_rarity(Some(&raw)), Rarity::Rare);

    let backend_only = json!({ "value": "", "backendValue": "EFortRarity::Mythic" });
    assert_eq!(normalize_rarity(Some(&backend_only)), Rarity::Mythic);
}

#[test]
fn uncommon_is_not_misread_as_common() {
    assert_eq!(normalize_rarity(Some(&json!("Uncommon"))), Rarity::Uncommon);
    assert_eq!(
        normalize_rarity(Some(&json!({ "value": "uncommon" }))),
        Rarity::Uncommon
    );
}

#[test]
fn missing_or_unknown_rarity_is_common() {
    assert_eq!(normalize_rarity(None), Rarity::Common);
    assert_eq!(normalize_rarity(Some(&Value::Null)), Rarity::Common);
    assert_eq!(normalize_rarity(Some(&json!(""))), Rarity::Common);
    assert_eq!(normalize_rarity(Some(&json!({}))), Rarity::Common);
    assert_eq!(normalize_rarity(Some(&json!("marvel"))), Rarity::Common);
}

// ---------------------------------------------------------------------------
// Type classification
// ---------------------------------------------------------------------------

#[test]
fn type_code_prefers_value_then_backend_value() {
    assert_eq!(
        type_code(Some(&json!({ "value": "Pickaxe", "backendValue": "AthenaPickaxe" }))),
        Some("pickaxe".to_owned())
    );
    assert_eq!(
        type_code(Some(&json!({ "backendValue": "AthenaGlider" }))),
        Some("athenaglider".to_owned())
    );
    assert_eq!(type_code(Some(&json!("Emote"))), Some("emote".to_owned()));
    assert_eq!(type_code(Some(&json!({ "value": "  " }))), None);
    assert_eq!(type_code(None), None);
}

#[test]
fn synonym_table_covers_backend_codes() {
    assert_eq!(map_type_code("AthenaDance"), Some(CosmeticType::Emote));
    assert_eq!(map_type_code("athenabackpack"), Some(CosmeticType::BackBling));
    assert_eq!(map_type_code("weapon wrap"), Some(CosmeticType::Wrap));
    assert_eq!(map_type_code("sidekick"), Some(CosmeticType::Companion));
    assert_eq!(map_type_code("sparks_song"), Some(CosmeticType::MusicTrack));
    assert_eq!(
        map_type_code("AthenaLoadingScreen"),
        Some(CosmeticType::LoadingScreen)
    );
    assert_eq!(map_type_code("bannertoken"), None);
}

#[test]
fn name_heuristic_follows_keyword_group_order() {
    assert_eq!(infer_type_from_name("Wild Card Pickaxe"), CosmeticType::Pickaxe);
    assert_eq!(infer_type_from_name("Dance Pickaxe"), CosmeticType::Emote);
    assert_eq!(infer_type_from_name("Mochila del Caos"), CosmeticType::BackBling);
    assert_eq!(infer_type_from_name("Compañero Perruno"), CosmeticType::Companion);
    assert_eq!(infer_type_from_name("Renegade Raider"), CosmeticType::Outfit);
}

#[test]
fn explicit_code_beats_name_heuristic() {
    assert_eq!(
        classify_type(Some("outfit"), "Dance Pickaxe"),
        CosmeticType::Outfit
    );
    assert_eq!(
        classify_type(Some("bannertoken"), "Planeador Veloz"),
        CosmeticType::Glider
    );
    assert_eq!(classify_type(None, "Jam Session"), CosmeticType::MusicTrack);
}

// ---------------------------------------------------------------------------
// clean_url
// ---------------------------------------------------------------------------

#[test]
fn protocol_relative_url_is_promoted_to_https() {
    assert_eq!(
        clean_url(Some(&json!("//cdn.example.com/icon.png"))),
        Some("https://cdn.example.com/icon.png".to_owned())
    );
}

#[test]
fn asset_url_artifact_is_unwrapped_then_validated() {
    assert_eq!(
        clean_url(Some(&json!("asset_url='https://cdn.example.com/a.png'"))),
        Some("https://cdn.example.com/a.png".to_owned())
    );
    assert_eq!(
        clean_url(Some(&json!("Asset URL=\"//cdn.example.com/b.png\""))),
        Some("https://cdn.example.com/b.png".to_owned())
    );
    assert_eq!(
        clean_url(Some(&json!("asset_url='ftp://bad.example/x.png'"))),
        None
    );
}

#[test]
fn object_unwraps_url_then_icon_then_first_value() {
    let with_url = json!({ "icon": "https://cdn.example.com/icon.png", "url": "https://cdn.example.com/url.png" });
    assert_eq!(
        clean_url(Some(&with_url)),
        Some("https://cdn.example.com/url.png".to_owned())
    );

    let with_icon = json!({ "smallIcon": "https://cdn.example.com/small.png", "icon": "https://cdn.example.com/icon.png" });
    assert_eq!(
        clean_url(Some(&with_icon)),
        Some("https://cdn.example.com/icon.png".to_owned())
    );

    let other = json!({ "featured": "'https://cdn.example.com/featured.png'" });
    assert_eq!(
        clean_url(Some(&other)),
        Some("https://cdn.example.com/featured.png".to_owned())
    );
}

#[test]
fn unusable_urls_are_none() {
    assert_eq!(clean_url(None), None);
    assert_eq!(clean_url(Some(&json!(""))), None);
    assert_eq!(clean_url(Some(&json!("icon.png"))), None);
    assert_eq!(clean_url(Some(&json!({ "icon": null }))), None);
    assert_eq!(clean_url(Some(&json!(["https://cdn.example.com/a.png"]))), None);
}

// ---------------------------------------------------------------------------
// Small field helpers
// ---------------------------------------------------------------------------

#[test]
fn series_label_accepts_object_or_string() {
    assert_eq!(
        series_label(Some(&json!({ "value": "Marvel Series", "image": "x" }))),
        Some("Marvel Series".to_owned())
    );
    assert_eq!(
        series_label(Some(&json!("Icon Series"))),
        Some("Icon Series".to_owned())
    );
    assert_eq!(series_label(Some(&json!(" "))), None);
    assert_eq!(series_label(None), None);
}

#[test]
fn price_value_reads_numbers_and_digit_strings() {
    assert_eq!(price_value(Some(&json!(1500))), Some(1500));
    assert_eq!(price_value(Some(&json!(" 800 "))), Some(800));
    assert_eq!(price_value(Some(&json!(0))), Some(0));
    assert_eq!(price_value(Some(&json!(-5))), None);
    assert_eq!(price_value(Some(&json!(1500.0))), Some(1500));
    assert_eq!(price_value(Some(&json!(1499.5))), None);
    assert_eq!(price_value(Some(&json!(-800.0))), None);
    assert_eq!(price_value(Some(&json!("gratis"))), None);
    assert_eq!(price_value(None), None);
}

#[test]
fn synthesized_item_id_is_deterministic() {
    let a = item_id(None, "Raven", "https://cdn.example.com/raven.png");
    let b = item_id(Some("  "), "Raven", "https://cdn.example.com/raven.png");
    assert_eq!(a, b);
    assert!(a.starts_with("i-"));
    assert_eq!(a.len(), 18);
    assert_ne!(a, item_id(None, "Raven", "https://cdn.example.com/other.png"));
    assert_eq!(item_id(Some("CID_001"), "Raven", "x"), "CID_001");
}

#[test]
fn next_rotation_label_is_day_after_shop_date() {
    assert_eq!(
        next_rotation_label(Some("2026-01-04T00:00:00Z")),
        "05/01/2026"
    );
    assert_eq!(next_rotation_label(Some("2025-12-31")), "01/01/2026");
    assert_eq!(next_rotation_label(Some("not a date")), NEXT_ROTATION_LABEL);
    assert_eq!(next_rotation_label(None), NEXT_ROTATION_LABEL);
}

// ---------------------------------------------------------------------------
// normalize_cosmetic / normalize_entry
// ---------------------------------------------------------------------------

#[test]
fn wild_card_pickaxe_scenario() {
    let entry = FakeEntry {
        price: Some(1500),
        expiry: Some("05/01/2026"),
        cosmetics: vec![FakeCosmetic {
            name: Some("Wild Card Pickaxe"),
            rarity: Some(json!("EFortRarity::Epic")),
            icon: Some(json!("//cdn.example.com/icon.png")),
            ..FakeCosmetic::default()
        }],
        ..FakeEntry::default()
    };

    let normalized = normalize_entry(&entry, NEXT_ROTATION_LABEL);
    assert_eq!(normalized.price, Some(1500));
    assert_eq!(normalized.expiry, "05/01/2026");
    assert_eq!(normalized.items.len(), 1);

    let item = &normalized.items[0];
    assert_eq!(item.rarity, Rarity::Epic);
    assert_eq!(item.cosmetic_type, CosmeticType::Pickaxe);
    assert_eq!(item.icon_url, "https://cdn.example.com/icon.png");
    assert!(item.id.starts_with("i-"));
    assert_eq!(item.price, None);
}

#[test]
fn cosmetic_without_icon_is_dropped_and_entry_survives() {
    let entry = FakeEntry {
        offer_id: Some("v2:/offer-bad"),
        price: Some(800),
        cosmetics: vec![FakeCosmetic {
            name: Some("Broken"),
            icon: Some(json!("asset_url='ftp://bad.example/x.png'")),
            ..FakeCosmetic::default()
        }],
        ..FakeEntry::default()
    };

    let normalized = normalize_entry(&entry, "05/01/2026");
    assert!(normalized.items.is_empty());
    assert_eq!(normalized.offer_id.as_deref(), Some("v2:/offer-bad"));
    assert_eq!(normalized.expiry, "05/01/2026");
}

#[test]
fn blank_fields_fall_back() {
    let entry = FakeEntry {
        offer_id: Some(" "),
        expiry: Some(""),
        section: Some("Daily"),
        group_name: Some("  "),
        cosmetics: vec![FakeCosmetic {
            id: Some("CID_A"),
            name: Some("   "),
            type_code: Some("AthenaBackpack"),
            series: Some(json!({ "value": "Icon Series" })),
            icon: Some(json!({ "icon": "https://cdn.example.com/a.png" })),
            price: Some(300),
            ..FakeCosmetic::default()
        }],
        ..FakeEntry::default()
    };

    let normalized = normalize_entry(&entry, NEXT_ROTATION_LABEL);
    assert_eq!(normalized.offer_id, None);
    assert_eq!(normalized.group_name, None);
    assert_eq!(normalized.section.as_deref(), Some("Daily"));
    assert_eq!(normalized.expiry, NEXT_ROTATION_LABEL);

    let item = &normalized.items[0];
    assert_eq!(item.id, "CID_A");
    assert_eq!(item.name, UNNAMED_ITEM);
    assert_eq!(item.cosmetic_type, CosmeticType::BackBling);
    assert_eq!(item.series.as_deref(), Some("Icon Series"));
    assert_eq!(item.price, Some(300));
}
