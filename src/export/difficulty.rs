use tracing::{info, warn};

use crate::artifacts::DifficultyInfo;
use crate::data::{AssetObject, DifficultyRow, DifficultyTable, file_stem};
use crate::error::IResult;
use crate::export::keys::DIFFICULTY_GROWTH_BOUNDS;
use crate::export::{AssetOutput, ExportContext, Exporter, ProgressSink};

/// Mission power rating bounds from the difficulty growth table.
pub struct DifficultyExporter;

impl From<DifficultyRow> for DifficultyInfo {
    fn from(row: DifficultyRow) -> Self {
        DifficultyInfo {
            required_rating: row.required_rating,
            maximum_rating: row.maximum_rating,
            recommended_rating: row.recommended_rating,
            display_name: row.display_name,
        }
    }
}

impl DifficultyExporter {
    async fn load_table(ctx: &ExportContext<'_>) -> Option<DifficultyTable> {
        let Some(path) = ctx.find_by_file_stem(DIFFICULTY_GROWTH_BOUNDS) else {
            warn!("Specific asset not found: {DIFFICULTY_GROWTH_BOUNDS}");
            return None;
        };

        match ctx.load(path).await {
            Some(AssetObject::DifficultyTable(table)) => Some(table),
            Some(_) => {
                warn!("Asset is not a difficulty table: {path}");
                None
            }
            None => {
                warn!("Could not load asset: {path}");
                None
            }
        }
    }
}

#[async_trait::async_trait]
impl Exporter for DifficultyExporter {
    fn name(&self) -> &'static str {
        "difficulty"
    }

    fn interested_in_asset(&self, path: &str) -> bool {
        file_stem(path) == DIFFICULTY_GROWTH_BOUNDS
    }

    async fn export_assets(
        &self,
        ctx: &ExportContext<'_>,
        progress: &dyn ProgressSink,
        output: &dyn AssetOutput,
    ) -> IResult<()> {
        progress.report(ctx.progress(1, 0, "Exporting difficulty"));

        if let Some(table) = Self::load_table(ctx).await {
            info!("exporting {} difficulty rows", table.rows.len());
            for (name, row) in table.rows {
                output.add_difficulty_info(name, row.into());
            }
        }

        progress.report(ctx.progress(1, 1, "Exported difficulty"));
        Ok(())
    }
}
