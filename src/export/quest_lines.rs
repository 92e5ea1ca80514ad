use futures::future::join_all;
use tracing::{info, warn};

use crate::data::{AssetObject, file_stem};
use crate::error::IResult;
use crate::export::keys::QUEST_LINES_PATH;
use crate::export::{AssetOutput, ExportContext, Exporter, ProgressSink};

/// Main campaign and event quest lines, keyed by asset name.
pub struct QuestLineExporter;

#[async_trait::async_trait]
impl Exporter for QuestLineExporter {
    fn name(&self) -> &'static str {
        "quest-lines"
    }

    fn interested_in_asset(&self, path: &str) -> bool {
        path.contains(QUEST_LINES_PATH)
    }

    async fn export_assets(
        &self,
        ctx: &ExportContext<'_>,
        progress: &dyn ProgressSink,
        output: &dyn AssetOutput,
    ) -> IResult<()> {
        let paths = ctx.asset_paths();
        progress.report(ctx.progress(paths.len(), 0, "Exporting quest lines"));

        let loaded = join_all(paths.iter().map(|&path| async move { (path, ctx.load(path).await) })).await;

        let (mut main, mut event) = (0usize, 0usize);
        for (completed, (path, object)) in loaded.into_iter().enumerate() {
            let id = file_stem(path).to_string();
            match object {
                Some(AssetObject::QuestLine(line)) if line.event => {
                    output.add_event_quest_line(id, line.pages);
                    event += 1;
                }
                Some(AssetObject::QuestLine(line)) => {
                    output.add_main_quest_line(id, line.pages);
                    main += 1;
                }
                Some(_) => warn!("Asset is not a quest line: {path}"),
                None => warn!("Could not load asset: {path}"),
            }
            progress.report(ctx.progress(paths.len(), completed + 1, file_stem(path)));
        }

        info!("exported {main} main and {event} event quest lines");
        Ok(())
    }
}
