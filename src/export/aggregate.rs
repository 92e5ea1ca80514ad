//! Runs every exporter against one provider and collects their output.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use futures::future::join_all;
use tracing::{debug, info};

use crate::artifacts::{DifficultyInfo, ExportedAssets, ItemRatingTable, NamedItemData};
use crate::data::AssetProvider;
use crate::error::IResult;
use crate::export::{AssetOutput, ExportContext, ExportProgress, Exporter, ProgressSink};

/// An [`AssetOutput`] that accumulates into an [`ExportedAssets`].
#[derive(Debug, Default)]
pub struct AssetCollector {
    assets: Mutex<ExportedAssets>,
}

impl AssetCollector {
    pub fn new() -> Self {
        Self::default()
    }

    fn assets(&self) -> MutexGuard<'_, ExportedAssets> {
        // a panicking writer can only have left a partially inserted entry behind
        self.assets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_assets(self) -> ExportedAssets {
        self.assets.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl AssetOutput for AssetCollector {
    fn add_named_item(&self, id: String, item: NamedItemData) {
        self.assets().named_items.insert(id, item);
    }

    fn add_default_item_ratings(&self, table: ItemRatingTable) {
        self.assets().item_ratings.default = Some(table);
    }

    fn add_survivor_item_ratings(&self, table: ItemRatingTable) {
        self.assets().item_ratings.survivor = Some(table);
    }

    fn add_lead_survivor_item_ratings(&self, table: ItemRatingTable) {
        self.assets().item_ratings.lead_survivor = Some(table);
    }

    fn add_difficulty_info(&self, id: String, info: DifficultyInfo) {
        self.assets().difficulty_info.insert(id, info);
    }

    fn add_main_quest_line(&self, id: String, pages: Vec<Vec<String>>) {
        self.assets().main_quest_lines.insert(id, pages);
    }

    fn add_event_quest_line(&self, id: String, pages: Vec<Vec<String>>) {
        self.assets().event_quest_lines.insert(id, pages);
    }
}

/// Runs `exporters` concurrently, each over the provider paths it is interested in.
///
/// Progress is reported once before anything runs, once as each exporter finishes,
/// and once at the end. The first exporter error, in exporter order, fails the run.
pub async fn run_exporters(
    provider: &dyn AssetProvider,
    exporters: &[Box<dyn Exporter>],
    progress: &dyn ProgressSink,
) -> IResult<ExportedAssets> {
    let total = exporters.len();
    let assets_loaded = AtomicUsize::new(0);
    let finished = AtomicUsize::new(0);
    let collector = AssetCollector::new();

    let checkpoint = |completed: usize, item: String| ExportProgress {
        total_steps: total,
        completed_steps: completed,
        assets_loaded: assets_loaded.load(Ordering::Relaxed),
        current_item: item,
    };

    progress.report(checkpoint(0, "Starting export".to_string()));

    let runs = exporters.iter().map(|exporter| {
        let paths: Vec<&str> = provider
            .asset_paths()
            .iter()
            .map(String::as_str)
            .filter(|path| exporter.interested_in_asset(path))
            .collect();
        debug!("{} is interested in {} assets", exporter.name(), paths.len());

        let ctx = ExportContext::new(provider, paths, &assets_loaded);
        let collector = &collector;
        let finished = &finished;
        let checkpoint = &checkpoint;
        async move {
            let result = exporter
                .export_assets(&ctx, progress, collector)
                .await
                .map_err(|err| err.in_exporter(exporter.name()));

            let completed = finished.fetch_add(1, Ordering::Relaxed) + 1;
            progress.report(checkpoint(completed, format!("Finished {}", exporter.name())));
            result
        }
    });

    join_all(runs).await.into_iter().collect::<IResult<Vec<()>>>()?;

    progress.report(checkpoint(total, "Export complete".to_string()));
    info!(
        "export finished: {} assets loaded by {total} exporters",
        assets_loaded.load(Ordering::Relaxed)
    );

    Ok(collector.into_assets())
}
