use std::sync::atomic::{AtomicUsize, Ordering};

use crate::artifacts::{DifficultyInfo, ItemRatingTable, NamedItemData};
use crate::data::{AssetObject, AssetProvider, file_stem};
use crate::error::IResult;

pub mod aggregate;
pub mod difficulty;
pub mod groups;
pub mod item_ratings;
pub mod keys;
pub mod names;
pub mod quest_lines;
pub mod survivors;

/// A progress checkpoint reported by the aggregator and by individual exporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProgress {
    pub total_steps: usize,
    pub completed_steps: usize,
    pub assets_loaded: usize,
    pub current_item: String,
}

pub trait ProgressSink: Send + Sync {
    fn report(&self, progress: ExportProgress);
}

impl<F> ProgressSink for F
where
    F: Fn(ExportProgress) + Send + Sync,
{
    fn report(&self, progress: ExportProgress) {
        self(progress)
    }
}

/// Where exporters put their results. Must tolerate writes from concurrent exporters.
pub trait AssetOutput: Send + Sync {
    fn add_named_item(&self, id: String, item: NamedItemData);
    fn add_default_item_ratings(&self, table: ItemRatingTable);
    fn add_survivor_item_ratings(&self, table: ItemRatingTable);
    fn add_lead_survivor_item_ratings(&self, table: ItemRatingTable);
    fn add_difficulty_info(&self, id: String, info: DifficultyInfo);
    fn add_main_quest_line(&self, id: String, pages: Vec<Vec<String>>);
    fn add_event_quest_line(&self, id: String, pages: Vec<Vec<String>>);
}

/// What a single exporter gets to work with: the provider, the asset paths it said it
/// was interested in, and the run-wide loaded-assets counter.
pub struct ExportContext<'a> {
    provider: &'a dyn AssetProvider,
    asset_paths: Vec<&'a str>,
    assets_loaded: &'a AtomicUsize,
}

impl<'a> ExportContext<'a> {
    pub fn new(
        provider: &'a dyn AssetProvider,
        asset_paths: Vec<&'a str>,
        assets_loaded: &'a AtomicUsize,
    ) -> Self {
        Self {
            provider,
            asset_paths,
            assets_loaded,
        }
    }

    pub fn asset_paths(&self) -> &[&'a str] {
        &self.asset_paths
    }

    /// Finds an interesting path by its file name without extension.
    pub fn find_by_file_stem(&self, stem: &str) -> Option<&'a str> {
        self.asset_paths
            .iter()
            .copied()
            .find(|path| file_stem(path) == stem)
    }

    /// Loads an object through the provider, counting the attempt.
    pub async fn load(&self, path: &str) -> Option<AssetObject> {
        self.assets_loaded.fetch_add(1, Ordering::Relaxed);
        self.provider.load_object(path).await
    }

    pub fn assets_loaded(&self) -> usize {
        self.assets_loaded.load(Ordering::Relaxed)
    }

    pub fn progress(
        &self,
        total_steps: usize,
        completed_steps: usize,
        current_item: impl Into<String>,
    ) -> ExportProgress {
        ExportProgress {
            total_steps,
            completed_steps,
            assets_loaded: self.assets_loaded(),
            current_item: current_item.into(),
        }
    }
}

/// One independent unit of export work.
#[async_trait::async_trait]
pub trait Exporter: Send + Sync {
    /// Short name used for logging and for selecting exporters on the command line.
    fn name(&self) -> &'static str;

    fn interested_in_asset(&self, path: &str) -> bool;

    async fn export_assets(
        &self,
        ctx: &ExportContext<'_>,
        progress: &dyn ProgressSink,
        output: &dyn AssetOutput,
    ) -> IResult<()>;
}

/// All exporters, in the order a full run drives them.
pub fn standard_exporters() -> Vec<Box<dyn Exporter>> {
    vec![
        Box::new(item_ratings::ItemRatingExporter),
        Box::new(survivors::SurvivorExporter),
        Box::new(difficulty::DifficultyExporter),
        Box::new(quest_lines::QuestLineExporter),
    ]
}

pub fn exporter_by_name(name: &str) -> Option<Box<dyn Exporter>> {
    standard_exporters()
        .into_iter()
        .find(|exporter| exporter.name() == name)
}
