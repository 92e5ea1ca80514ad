//! Shared driver for item types that come as families of rarity/tier variants.

use itertools::Itertools;
use tracing::{debug, warn};

use crate::artifacts::NamedItemData;
use crate::data::{AssetObject, WorkerType, file_stem};
use crate::error::IResult;
use crate::export::names::ParsedItemName;
use crate::export::{AssetOutput, ExportContext, ProgressSink};
use crate::game_types::Rarity;

/// Fields shared by every variant in an item group, extracted once from the group's
/// representative asset.
#[derive(Debug, Clone, PartialEq, bon::Builder)]
pub struct ItemGroupFields {
    #[builder(into)]
    pub display_name: String,
    #[builder(into)]
    pub description: Option<String>,
    #[builder(into)]
    pub sub_type: Option<String>,
    #[builder(into)]
    pub personality: Option<String>,
}

/// The part of an item definition every item type has.
pub trait ItemDefinition {
    fn display_name(&self) -> Option<&str>;
    fn description(&self) -> Option<&str>;
}

impl ItemDefinition for WorkerType {
    fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// Fields read straight off the definition. `fallback_name` is used when the asset
/// has no display name of its own.
pub fn common_item_fields(asset: &impl ItemDefinition, fallback_name: &str) -> ItemGroupFields {
    ItemGroupFields::builder()
        .display_name(asset.display_name().unwrap_or(fallback_name))
        .maybe_description(asset.description())
        .build()
}

pub trait GroupExporter: Send + Sync {
    type Asset: Send + Sync;
    type Fields: Send + Sync;

    /// Item type prefix for ids, e.g. `Worker` in `Worker:workerbasic_sr_t02`.
    const TYPE: &'static str;

    fn interested_in_asset(&self, path: &str) -> bool;

    fn parse_asset_name(&self, path: &str) -> Option<ParsedItemName>;

    /// Picks this exporter's asset out of a loaded object.
    fn asset_from_object(&self, object: AssetObject) -> Option<Self::Asset>;

    /// Reads the fields shared by a group from its representative asset. `group` is
    /// every path in the group, representative first.
    fn extract_common_fields(&self, asset: &Self::Asset, group: &[&str]) -> IResult<Self::Fields>;

    fn rarity(&self, parsed: &ParsedItemName, _asset: &Self::Asset, _fields: &Self::Fields) -> Rarity {
        parsed.rarity
    }

    /// Fills in `item` for one variant. Returning `Ok(false)` drops the variant.
    fn export_asset(
        &self,
        parsed: &ParsedItemName,
        asset: &Self::Asset,
        fields: &Self::Fields,
        path: &str,
        item: &mut NamedItemData,
    ) -> IResult<bool>;
}

/// `{TYPE}:{file stem}`, the named item id for `path`.
pub fn item_id(item_type: &str, path: &str) -> String {
    format!("{item_type}:{}", file_stem(path))
}

async fn load_asset<E: GroupExporter>(exporter: &E, ctx: &ExportContext<'_>, path: &str) -> Option<E::Asset> {
    let Some(object) = ctx.load(path).await else {
        warn!("Could not load asset: {path}");
        return None;
    };
    let asset = exporter.asset_from_object(object);
    if asset.is_none() {
        warn!("Asset is not a {}: {path}", E::TYPE);
    }
    asset
}

/// Exports every interesting asset of a [`GroupExporter`], one group of variants at a
/// time.
pub async fn export_item_groups<E: GroupExporter>(
    exporter: &E,
    ctx: &ExportContext<'_>,
    progress: &dyn ProgressSink,
    output: &dyn AssetOutput,
) -> IResult<()> {
    let parsed = ctx.asset_paths().iter().filter_map(|&path| {
        let name = exporter.parse_asset_name(path);
        if name.is_none() {
            warn!("Could not parse item name: {path}");
        }
        name.map(|name| (path, name))
    });

    let groups: Vec<(String, Vec<(&str, ParsedItemName)>)> = parsed
        .into_group_map_by(|(_, name)| name.base_name.clone())
        .into_iter()
        .sorted_by(|(a, _), (b, _)| a.cmp(b))
        .collect();

    let total = groups.len();
    let mut exported = 0usize;

    for (completed, (base_name, mut members)) in groups.into_iter().enumerate() {
        progress.report(ctx.progress(total, completed, base_name.as_str()));

        members.sort_by(|(a, _), (b, _)| a.cmp(b));
        let paths: Vec<&str> = members.iter().map(|(path, _)| *path).collect();
        let primary_path = paths[0];

        let Some(primary) = load_asset(exporter, ctx, primary_path).await else {
            continue;
        };
        let fields = exporter.extract_common_fields(&primary, &paths)?;

        for (path, name) in &members {
            let loaded;
            let asset = if *path == primary_path {
                &primary
            } else {
                match load_asset(exporter, ctx, path).await {
                    Some(asset) => {
                        loaded = asset;
                        &loaded
                    }
                    None => continue,
                }
            };

            let mut item = NamedItemData {
                name: file_stem(path).to_string(),
                item_type: E::TYPE.to_string(),
                sub_type: None,
                display_name: String::new(),
                description: None,
                rarity: exporter.rarity(name, asset, &fields),
                tier: name.tier,
                personality: None,
            };

            if exporter.export_asset(name, asset, &fields, path, &mut item)? {
                output.add_named_item(item_id(E::TYPE, path), item);
                exported += 1;
            }
        }
    }

    debug!("exported {exported} {} items in {total} groups", E::TYPE);
    progress.report(ctx.progress(total, total, format!("Exported {} items", E::TYPE)));

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builder_defaults_optional_fields() {
        let fields = ItemGroupFields::builder().display_name("Survivor").build();
        assert_eq!(fields.display_name, "Survivor");
        assert_eq!(fields.description, None);
        assert_eq!(fields.sub_type, None);
        assert_eq!(fields.personality, None);
    }

    #[test]
    fn common_fields_fall_back_to_given_name() {
        let worker = WorkerType {
            description: Some("Keeps the lights on".into()),
            ..Default::default()
        };
        let fields = common_item_fields(&worker, "Survivor");
        assert_eq!(fields.display_name, "Survivor");
        assert_eq!(fields.description.as_deref(), Some("Keeps the lights on"));

        let named = WorkerType {
            display_name: Some("Karolina".into()),
            ..Default::default()
        };
        assert_eq!(common_item_fields(&named, "Survivor").display_name, "Karolina");
    }

    #[test]
    fn ids_use_the_file_stem() {
        assert_eq!(
            item_id("Worker", "Game/Workers/WorkerBasic_SR_T02.uasset"),
            "Worker:WorkerBasic_SR_T02"
        );
    }
}
