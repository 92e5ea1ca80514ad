//! Item rating tables: curve rows sampled at every level of every rarity/tier.

use std::fmt;

use tracing::{debug, warn};

use crate::artifacts::{ItemRatingTable, ItemRatingTier};
use crate::data::AssetObject;
use crate::data::curve::{Curve, CurveSource, CurveTable};
use crate::error::IResult;
use crate::export::keys::{BASE_ITEM_RATING, ITEM_RATING_SUFFIX, SURVIVOR_ITEM_RATING};
use crate::export::{AssetOutput, ExportContext, Exporter, ProgressSink};
use crate::game_types::Rarity;

/// The inclusive level range covered by one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLevels {
    pub tier: u32,
    pub first_level: i32,
    pub last_level: i32,
}

/// Level ranges per tier. Adjacent ranges share their boundary level; the game data
/// is laid out that way.
pub const TIER_LEVELS: &[TierLevels] = &[
    TierLevels {
        tier: 1,
        first_level: 1,
        last_level: 10,
    },
    TierLevels {
        tier: 2,
        first_level: 10,
        last_level: 20,
    },
    TierLevels {
        tier: 3,
        first_level: 20,
        last_level: 30,
    },
    TierLevels {
        tier: 4,
        first_level: 30,
        last_level: 40,
    },
    // tier 5 goes up to LV 60 with superchargers
    TierLevels {
        tier: 5,
        first_level: 40,
        last_level: 60,
    },
];

/// Which family of rows to read from a rating curve table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowPrefix {
    Default,
    Manager,
}

impl fmt::Display for RowPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Manager => f.write_str("Manager"),
        }
    }
}

/// `{rarity}_T{tier:02}`, the key used in the exported table.
pub fn tier_key(rarity: Rarity, tier: u32) -> String {
    format!("{}_T{tier:02}", rarity.code().unwrap_or_default())
}

/// `{prefix}_{rarity}_T{tier:02}`, the curve table row holding a tier's curve.
pub fn row_name(prefix: RowPrefix, rarity: Rarity, tier: u32) -> String {
    format!("{prefix}_{}", tier_key(rarity, tier))
}

/// Evaluates `curve` at every level in `levels`, lowest level first.
pub fn sample_curve(curve: &dyn Curve, levels: &TierLevels) -> ItemRatingTier {
    ItemRatingTier {
        first_level: levels.first_level,
        ratings: (levels.first_level..=levels.last_level)
            .map(|level| curve.eval(level as f32))
            .collect(),
    }
}

/// Builds a rating table from every `{prefix}_*` row in `source`.
///
/// Rows that are missing or can't be loaded leave their tier out of the table.
/// `skip_ur` leaves out Mythic entirely, for tables that have no Mythic rows.
pub fn build_rating_table(source: &dyn CurveSource, prefix: RowPrefix, skip_ur: bool) -> ItemRatingTable {
    let mut table = ItemRatingTable::default();

    for &rarity in Rarity::PARSEABLE {
        if skip_ur && rarity == Rarity::Mythic {
            continue;
        }

        for levels in TIER_LEVELS {
            if levels.tier > rarity.max_tier() {
                break;
            }

            let row = row_name(prefix, rarity, levels.tier);
            if !source.has_row(&row) {
                warn!("Missing curve table row {row}");
                continue;
            }

            let Some(curve) = source.find_curve(&row) else {
                warn!("Could not load curve table row {row}");
                continue;
            };

            table
                .tiers
                .insert(tier_key(rarity, levels.tier), sample_curve(curve, levels));
        }
    }

    debug!("built {prefix} rating table with {} tiers", table.tiers.len());
    table
}

pub struct ItemRatingExporter;

impl ItemRatingExporter {
    async fn load_curve_table(ctx: &ExportContext<'_>, stem: &str) -> Option<CurveTable> {
        let Some(path) = ctx.find_by_file_stem(stem) else {
            warn!("Specific asset not found: {stem}");
            return None;
        };

        match ctx.load(path).await {
            Some(AssetObject::CurveTable(table)) => Some(table),
            Some(_) => {
                warn!("Asset is not a curve table: {path}");
                None
            }
            None => {
                warn!("Could not load asset: {path}");
                None
            }
        }
    }

    async fn export_default_ratings(ctx: &ExportContext<'_>, output: &dyn AssetOutput) {
        if let Some(table) = Self::load_curve_table(ctx, BASE_ITEM_RATING).await {
            output.add_default_item_ratings(build_rating_table(&table, RowPrefix::Default, false));
        }
    }

    async fn export_survivor_ratings(ctx: &ExportContext<'_>, output: &dyn AssetOutput) {
        if let Some(table) = Self::load_curve_table(ctx, SURVIVOR_ITEM_RATING).await {
            output.add_survivor_item_ratings(build_rating_table(&table, RowPrefix::Default, false));
            // leads top out below mythic, so there are no Manager_UR rows
            output.add_lead_survivor_item_ratings(build_rating_table(
                &table,
                RowPrefix::Manager,
                true,
            ));
        }
    }
}

#[async_trait::async_trait]
impl Exporter for ItemRatingExporter {
    fn name(&self) -> &'static str {
        "item-ratings"
    }

    fn interested_in_asset(&self, path: &str) -> bool {
        path.to_ascii_lowercase().ends_with(ITEM_RATING_SUFFIX)
    }

    async fn export_assets(
        &self,
        ctx: &ExportContext<'_>,
        progress: &dyn ProgressSink,
        output: &dyn AssetOutput,
    ) -> IResult<()> {
        progress.report(ctx.progress(2, 0, "Exporting item ratings"));
        Self::export_default_ratings(ctx, output).await;

        progress.report(ctx.progress(2, 1, "Exporting item ratings"));
        Self::export_survivor_ratings(ctx, output).await;

        progress.report(ctx.progress(2, 2, "Exported item ratings"));
        Ok(())
    }
}
