//! The exported artifact and the records it is made of.
//!
//! Everything here is plain data: exporters fill it in through
//! [`crate::export::AssetOutput`], and the binary serializes it as JSON.

mod ignore_case;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_types::Rarity;

pub use ignore_case::{IgnoreCase, IgnoreCaseMap};

/// Quest line id -> ordered pages of ordered quest step names.
pub type QuestLines = BTreeMap<String, Vec<Vec<String>>>;

/// One item variant, as exported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedItemData {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub rarity: Rarity,
    pub tier: u32,
    /// Survivors only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub personality: Option<String>,
}

/// Power rating bounds for a mission difficulty row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyInfo {
    pub required_rating: i32,
    pub maximum_rating: i32,
    pub recommended_rating: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// Sampled item rating curve values for one rarity and tier.
///
/// `ratings[i]` is the rating at level `first_level + i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRatingTier {
    pub first_level: i32,
    pub ratings: Vec<f32>,
}

impl ItemRatingTier {
    pub fn rating_at(&self, level: i32) -> Option<f32> {
        let index = usize::try_from(level.checked_sub(self.first_level)?).ok()?;
        self.ratings.get(index).copied()
    }
}

/// Rating tiers keyed by `"{rarity}_T{tier:02}"`, e.g. `"SR_T03"`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemRatingTable {
    pub tiers: IgnoreCaseMap<ItemRatingTier>,
}

impl ItemRatingTable {
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRatingTables {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ItemRatingTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub survivor: Option<ItemRatingTable>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lead_survivor: Option<ItemRatingTable>,
}

impl ItemRatingTables {
    /// Takes each table from `other` that is present and populated.
    pub fn merge(&mut self, other: ItemRatingTables) {
        fn take(slot: &mut Option<ItemRatingTable>, incoming: Option<ItemRatingTable>) {
            if let Some(table) = incoming.filter(|table| !table.is_empty()) {
                *slot = Some(table);
            }
        }

        take(&mut self.default, other.default);
        take(&mut self.survivor, other.survivor);
        take(&mut self.lead_survivor, other.lead_survivor);
    }
}

/// The full export artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedAssets {
    pub exported_at: DateTime<Utc>,
    #[serde(default)]
    pub named_items: IgnoreCaseMap<NamedItemData>,
    #[serde(default)]
    pub item_ratings: ItemRatingTables,
    #[serde(default)]
    pub difficulty_info: IgnoreCaseMap<DifficultyInfo>,
    #[serde(default)]
    pub main_quest_lines: QuestLines,
    #[serde(default)]
    pub event_quest_lines: QuestLines,
}

impl Default for ExportedAssets {
    fn default() -> Self {
        Self::new(Utc::now())
    }
}

impl ExportedAssets {
    pub fn new(exported_at: DateTime<Utc>) -> Self {
        Self {
            exported_at,
            named_items: IgnoreCaseMap::new(),
            item_ratings: ItemRatingTables::default(),
            difficulty_info: IgnoreCaseMap::new(),
            main_quest_lines: QuestLines::new(),
            event_quest_lines: QuestLines::new(),
        }
    }

    /// Merges `other` into `self`.
    ///
    /// Keyed entries from `other` overwrite same-keyed entries here. Rating tables are
    /// only replaced by populated ones. The timestamp always becomes `other`'s.
    ///
    /// Not transactional: merge into a copy if the original must survive a failure
    /// further up.
    pub fn merge(&mut self, other: ExportedAssets) {
        self.exported_at = other.exported_at;
        self.named_items.extend_overwriting(other.named_items);
        self.item_ratings.merge(other.item_ratings);
        self.difficulty_info.extend_overwriting(other.difficulty_info);
        self.main_quest_lines.extend(other.main_quest_lines);
        self.event_quest_lines.extend(other.event_quest_lines);
    }
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    fn tier(first_level: i32, ratings: &[f32]) -> ItemRatingTier {
        ItemRatingTier {
            first_level,
            ratings: ratings.to_vec(),
        }
    }

    fn table(keys: &[&str]) -> ItemRatingTable {
        ItemRatingTable {
            tiers: keys.iter().map(|k| (*k, tier(1, &[1.0, 2.0]))).collect(),
        }
    }

    fn difficulty(rating: i32) -> DifficultyInfo {
        DifficultyInfo {
            required_rating: rating,
            maximum_rating: rating * 2,
            recommended_rating: rating,
            display_name: None,
        }
    }

    fn item(name: &str, display_name: &str) -> NamedItemData {
        NamedItemData {
            name: name.to_string(),
            item_type: "Worker".to_string(),
            sub_type: None,
            display_name: display_name.to_string(),
            description: None,
            rarity: Rarity::Legendary,
            tier: 2,
            personality: Some("IsCompetitive".to_string()),
        }
    }

    fn sample(at_secs: i64) -> ExportedAssets {
        let mut assets = ExportedAssets::new(Utc.timestamp_opt(at_secs, 0).unwrap());
        assets
            .named_items
            .insert("Worker:WorkerBasic_SR_T02", item("WorkerBasic_SR_T02", "Survivor"));
        assets.difficulty_info.insert("Easy", difficulty(1));
        assets.item_ratings.default = Some(table(&["C_T01"]));
        assets
            .main_quest_lines
            .insert("Stonewood".to_string(), vec![vec!["a".into(), "b".into()]]);
        assets
    }

    #[test]
    fn merge_with_self_keeps_content() {
        let mut a = sample(10);
        let copy = a.clone();
        a.merge(copy.clone());
        assert_eq!(a, copy);
    }

    #[test]
    fn merge_overwrites_and_takes_timestamp() {
        let mut a = sample(10);
        let mut b = ExportedAssets::new(Utc.timestamp_opt(20, 0).unwrap());
        b.difficulty_info.insert("easy", difficulty(2));
        b.difficulty_info.insert("Hard", difficulty(3));
        b.named_items
            .insert("worker:workerbasic_sr_t02", item("WorkerBasic_SR_T02", "Renamed"));
        b.named_items
            .insert("Worker:WorkerBasic_C_T01", item("WorkerBasic_C_T01", "Survivor"));

        a.merge(b);

        assert_eq!(a.named_items.len(), 2);
        assert_eq!(
            a.named_items.get("Worker:WorkerBasic_SR_T02").map(|i| i.display_name.as_str()),
            Some("Renamed")
        );
        assert!(a.named_items.contains_key("WORKER:WORKERBASIC_C_T01"));

        assert_eq!(a.exported_at.timestamp(), 20);
        assert_eq!(a.difficulty_info.len(), 2);
        assert_eq!(a.difficulty_info.get("EASY"), Some(&difficulty(2)));
        assert_eq!(a.main_quest_lines.len(), 1);
    }

    #[test]
    fn absent_or_empty_tables_do_not_clobber() {
        let mut a = sample(10);
        let mut b = ExportedAssets::new(Utc.timestamp_opt(20, 0).unwrap());
        b.item_ratings.default = Some(ItemRatingTable::default());
        b.item_ratings.survivor = Some(table(&["R_T04"]));

        a.merge(b);

        assert_eq!(a.item_ratings.default, Some(table(&["C_T01"])));
        assert_eq!(a.item_ratings.survivor, Some(table(&["R_T04"])));
        assert_eq!(a.item_ratings.lead_survivor, None);
    }

    #[test]
    fn rating_lookup_by_level() {
        let t = tier(10, &[5.0, 6.0, 7.0]);
        assert_eq!(t.rating_at(10), Some(5.0));
        assert_eq!(t.rating_at(12), Some(7.0));
        assert_eq!(t.rating_at(9), None);
        assert_eq!(t.rating_at(13), None);
    }

    #[test]
    fn json_field_names() {
        let json = serde_json::to_value(sample(0)).unwrap();
        let object = json.as_object().unwrap();
        for key in [
            "exportedAt",
            "namedItems",
            "itemRatings",
            "difficultyInfo",
            "mainQuestLines",
            "eventQuestLines",
        ] {
            assert!(object.contains_key(key), "missing {key}");
        }
        assert!(json["itemRatings"]["default"]["C_T01"]["firstLevel"].is_number());
        assert_eq!(json["namedItems"]["Worker:WorkerBasic_SR_T02"]["type"], "Worker");
        assert!(json["itemRatings"].get("survivor").is_none());

        let back: ExportedAssets = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample(0));
    }
}
