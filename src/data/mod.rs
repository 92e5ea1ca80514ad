/// Curve tables and the curve evaluation interface
pub mod curve;
/// Asset provider backed by a JSON dump of decoded objects
pub mod dump;

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use variantly::Variantly;

use self::curve::CurveTable;

/// Access to the game's packaged assets.
///
/// Archive decryption and object deserialization happen behind this trait; exporters
/// only see paths and already-decoded [`AssetObject`]s.
#[async_trait::async_trait]
pub trait AssetProvider: Send + Sync {
    /// Every asset path in the archive, in a stable order.
    fn asset_paths(&self) -> &[String];

    /// Finds the first path whose file name, minus extension, is exactly `stem`.
    fn find_by_file_stem(&self, stem: &str) -> Option<&str> {
        self.asset_paths()
            .iter()
            .find(|path| file_stem(path) == stem)
            .map(String::as_str)
    }

    /// Loads and decodes the object at `path`, or `None` if it can't be loaded.
    async fn load_object(&self, path: &str) -> Option<AssetObject>;
}

/// The file name of `path` without its extension.
pub fn file_stem(path: &str) -> &str {
    Path::new(path)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or(path)
}

/// A decoded asset object.
#[derive(Debug, Clone, PartialEq, Variantly, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AssetObject {
    CurveTable(CurveTable),
    WorkerType(WorkerType),
    DifficultyTable(DifficultyTable),
    QuestLine(QuestLine),
}

/// A survivor or lead survivor item definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerType {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_manager: bool,
    /// Gameplay tags from `FixedPersonalityTag`.
    #[serde(default)]
    pub personality_tags: Vec<String>,
    #[serde(default)]
    pub manager_synergy_tags: Vec<String>,
}

/// One row of the difficulty growth bounds table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyRow {
    pub required_rating: i32,
    pub maximum_rating: i32,
    pub recommended_rating: i32,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub rows: BTreeMap<String, DifficultyRow>,
}

/// A quest line: ordered pages, each an ordered list of quest step names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestLine {
    /// Event quest lines are exported separately from the main campaign.
    #[serde(default)]
    pub event: bool,
    pub pages: Vec<Vec<String>>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn stems() {
        assert_eq!(
            file_stem("FortniteGame/Content/Balance/BaseItemRating.uasset"),
            "BaseItemRating"
        );
        assert_eq!(file_stem("BaseItemRating"), "BaseItemRating");
        assert_eq!(file_stem("a/b/Worker_Karolina_UR_T02.uasset"), "Worker_Karolina_UR_T02");
    }

    #[test]
    fn objects_are_tagged() {
        let object: AssetObject = serde_json::from_str(
            r#"{"type": "workerType", "isManager": true, "managerSynergyTags": ["Homebase.Manager.IsDoctor"]}"#,
        )
        .unwrap();
        assert!(object.is_worker_type());
        assert!(!object.is_curve_table());

        let AssetObject::WorkerType(worker) = object else {
            unreachable!()
        };
        assert!(worker.is_manager);
        assert_eq!(worker.display_name, None);
    }
}
