//! Group assignment and the two output projections.

use std::collections::{HashMap, HashSet};

use fnshop_core::{FlatItem, Group, GroupMember, ShopEntry};

use crate::normalize::{non_blank, short_hash};

/// Flat and grouped views of the same entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    pub items: Vec<FlatItem>,
    pub groups: Vec<Group>,
}

/// Stable identity of the group an entry belongs to.
///
/// The upstream offer id when present; otherwise `g-` followed by 16 hex
/// characters of `sha256(sorted item ids | price | expiry)`. Items are sorted
/// so upstream reordering does not change the id.
#[must_use]
pub fn group_id_for(entry: &ShopEntry) -> String {
    if let Some(offer_id) = non_blank(entry.offer_id.as_deref()) {
        return offer_id;
    }

    let mut ids: Vec<&str> = entry.items.iter().map(|i| i.id.as_str()).collect();
    ids.sort_unstable();
    let price = entry.price.map(|p| p.to_string()).unwrap_or_default();
    let key = format!("{}|{price}|{}", ids.join("|"), entry.expiry);
    format!("g-{}", short_hash(&key))
}

/// Folds entries into groups keyed by [`group_id_for`].
///
/// Groups keep first-seen order and take their name, price, expiry and
/// section from the first entry with that id. Later entries with the same id
/// append items not already present. An entry whose items were all filtered
/// out still yields an (empty) group.
#[must_use]
pub fn assign_groups(entries: &[ShopEntry]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut members: Vec<HashSet<String>> = Vec::new();

    for entry in entries {
        let group_id = group_id_for(entry);
        let slot = *index.entry(group_id.clone()).or_insert_with(|| {
            groups.push(Group {
                group_id,
                name: entry.group_name.clone(),
                price: entry.price,
                expires: entry.expiry.clone(),
                section: entry.section.clone(),
                items: Vec::new(),
            });
            members.push(HashSet::new());
            groups.len() - 1
        });

        for item in &entry.items {
            if members[slot].insert(item.id.clone()) {
                groups[slot].items.push(GroupMember::from(item));
            }
        }
    }

    groups
}

/// Builds both projections from one entry list.
///
/// Every flat row and every group member is derived from the same
/// [`fnshop_core::CosmeticItem`], so shared fields agree and the set of member
/// ids equals the set of flat ids. A row's `group` and `groupPrice` are read
/// from the group its `groupId` points to.
#[must_use]
pub fn project(entries: &[ShopEntry]) -> Projection {
    let groups = assign_groups(entries);
    let by_id: HashMap<&str, &Group> = groups.iter().map(|g| (g.group_id.as_str(), g)).collect();

    let items: Vec<FlatItem> = entries
        .iter()
        .flat_map(|entry| {
            let group_id = group_id_for(entry);
            let group = by_id.get(group_id.as_str()).copied();
            let group_name = group.map_or_else(|| entry.group_name.clone(), |g| g.name.clone());
            let group_price = group.map_or(entry.price, |g| g.price);
            entry.items.iter().map(move |item| FlatItem {
                id: item.id.clone(),
                name: item.name.clone(),
                image: item.icon_url.clone(),
                rarity: item.rarity,
                cosmetic_type: item.cosmetic_type,
                series: item.series.clone(),
                price: entry.price,
                expires: entry.expiry.clone(),
                section: entry.section.clone(),
                group: group_name.clone(),
                group_id: group_id.clone(),
                group_price,
            })
        })
        .collect();
    drop(by_id);

    Projection { items, groups }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fnshop_core::{CosmeticItem, CosmeticType, Rarity};

    fn item(id: &str) -> CosmeticItem {
        CosmeticItem {
            id: id.to_owned(),
            name: format!("Item {id}"),
            icon_url: format!("https://cdn.example.com/{id}.png"),
            rarity: Rarity::Rare,
            cosmetic_type: CosmeticType::Outfit,
            series: None,
            price: None,
        }
    }

    fn entry(offer_id: Option<&str>, price: u32, ids: &[&str]) -> ShopEntry {
        ShopEntry {
            offer_id: offer_id.map(str::to_owned),
            price: Some(price),
            expiry: "2026-10-17T00:00:00Z".to_owned(),
            section: Some("Featured".to_owned()),
            group_name: Some("Lote".to_owned()),
            items: ids.iter().map(|id| item(id)).collect(),
        }
    }

    #[test]
    fn offer_id_is_the_group_id() {
        assert_eq!(group_id_for(&entry(Some("v2:/abc"), 1500, &["a"])), "v2:/abc");
    }

    #[test]
    fn hashed_group_id_ignores_item_order() {
        let a = group_id_for(&entry(None, 1500, &["a", "b"]));
        let b = group_id_for(&entry(None, 1500, &["b", "a"]));
        assert_eq!(a, b);
        assert!(a.starts_with("g-"));
        assert_eq!(a.len(), 18);
        assert_ne!(a, group_id_for(&entry(None, 1200, &["a", "b"])));
    }

    #[test]
    fn assignment_is_deterministic() {
        let entries = vec![
            entry(None, 800, &["a"]),
            entry(Some("v2:/x"), 1500, &["b", "c"]),
        ];
        assert_eq!(assign_groups(&entries), assign_groups(&entries));
    }

    #[test]
    fn shared_offer_id_merges_into_one_group() {
        let entries = vec![
            entry(Some("v2:/x"), 1500, &["a", "b"]),
            entry(None, 800, &["z"]),
            entry(Some("v2:/x"), 1500, &["b", "c"]),
        ];
        let groups = assign_groups(&entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].group_id, "v2:/x");
        let ids: Vec<&str> = groups[0].items.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn empty_entry_still_creates_a_group() {
        let entries = vec![entry(Some("v2:/empty"), 500, &[])];
        let projection = project(&entries);
        assert!(projection.items.is_empty());
        assert_eq!(projection.groups.len(), 1);
        assert!(projection.groups[0].items.is_empty());
    }

    #[test]
    fn member_ids_match_flat_ids() {
        let entries = vec![
            entry(None, 800, &["a"]),
            entry(Some("v2:/x"), 1500, &["b", "c"]),
            entry(None, 200, &[]),
            entry(Some("v2:/x"), 800, &["d"]),
        ];
        let projection = project(&entries);
        assert_eq!(projection.groups.len(), 3);

        let flat: HashSet<&str> = projection.items.iter().map(|i| i.id.as_str()).collect();
        let grouped: HashSet<&str> = projection
            .groups
            .iter()
            .flat_map(|g| g.items.iter().map(|m| m.id.as_str()))
            .collect();
        assert_eq!(flat, grouped);

        for row in &projection.items {
            let group = projection
                .groups
                .iter()
                .find(|g| g.group_id == row.group_id)
                .unwrap();
            assert_eq!(group.price, row.group_price);
            assert_eq!(group.name, row.group);
            assert_eq!(group.expires, row.expires);
            let member = group.items.iter().find(|m| m.id == row.id).unwrap();
            assert_eq!(member.image, row.image);
            assert_eq!(member.rarity, row.rarity);
        }
    }

    #[test]
    fn merged_row_keeps_own_price_and_reports_group_price() {
        let entries = vec![
            entry(Some("same"), 1500, &["a"]),
            entry(Some("same"), 800, &["b"]),
        ];
        let projection = project(&entries);
        let b = projection.items.iter().find(|i| i.id == "b").unwrap();
        assert_eq!(b.price, Some(800));
        assert_eq!(b.group_price, Some(1500));
        assert_eq!(projection.groups[0].price, Some(1500));
    }
}
