use crate::artifacts::NamedItemData;
use crate::data::{AssetObject, WorkerType};
use crate::error::{AssetFormatError, IResult};
use crate::export::groups::{GroupExporter, ItemGroupFields, common_item_fields, export_item_groups};
use crate::export::keys::{MANAGERS_PATH, WORKER_TYPE, WORKERS_PATH};
use crate::export::names::{ParsedItemName, parse_survivor_name};
use crate::export::{AssetOutput, ExportContext, Exporter, ProgressSink};
use crate::game_types::{ManagerJob, Rarity};

/// Survivors and lead survivors.
pub struct SurvivorExporter;

/// The job of a lead survivor, from its first synergy tag.
pub fn manager_job(worker: &WorkerType) -> Result<ManagerJob, AssetFormatError> {
    if !worker.is_manager {
        return Err(AssetFormatError::NotAManager);
    }

    let tag = worker
        .manager_synergy_tags
        .first()
        .ok_or(AssetFormatError::MissingManagerSynergy)?;

    ManagerJob::from_tag(tag).ok_or_else(AssetFormatError::UnexpectedManagerSynergy)
}

/// `Homebase.Worker.Personality.IsCompetitive` -> `IsCompetitive`, only for workers with
/// exactly one fixed personality.
fn fixed_personality(worker: &WorkerType) -> Option<String> {
    match worker.personality_tags.as_slice() {
        [tag] => tag.rsplit('.').next().map(str::to_string),
        _ => None,
    }
}

impl GroupExporter for SurvivorExporter {
    type Asset = WorkerType;
    type Fields = ItemGroupFields;

    const TYPE: &'static str = WORKER_TYPE;

    fn interested_in_asset(&self, path: &str) -> bool {
        path.contains(WORKERS_PATH) || path.contains(MANAGERS_PATH)
    }

    fn parse_asset_name(&self, path: &str) -> Option<ParsedItemName> {
        parse_survivor_name(path)
    }

    fn asset_from_object(&self, object: AssetObject) -> Option<WorkerType> {
        object.worker_type()
    }

    fn extract_common_fields(&self, asset: &WorkerType, _group: &[&str]) -> IResult<ItemGroupFields> {
        let common = if asset.is_manager {
            let job = manager_job(asset)?;
            let fields = common_item_fields(asset, &format!("Lead {job}"));
            ItemGroupFields {
                sub_type: Some(job.label().to_string()),
                ..fields
            }
        } else {
            common_item_fields(asset, "Survivor")
        };

        Ok(ItemGroupFields {
            personality: fixed_personality(asset),
            ..common
        })
    }

    fn rarity(&self, parsed: &ParsedItemName, asset: &WorkerType, _fields: &ItemGroupFields) -> Rarity {
        // leads are one rarity above the item they are named after
        if asset.is_manager {
            parsed.rarity.promoted()
        } else {
            parsed.rarity
        }
    }

    fn export_asset(
        &self,
        _parsed: &ParsedItemName,
        _asset: &WorkerType,
        fields: &ItemGroupFields,
        _path: &str,
        item: &mut NamedItemData,
    ) -> IResult<bool> {
        item.display_name = fields.display_name.clone();
        item.description = fields.description.clone();
        item.sub_type = fields.sub_type.clone();
        item.personality = fields.personality.clone();
        Ok(true)
    }
}

#[async_trait::async_trait]
impl Exporter for SurvivorExporter {
    fn name(&self) -> &'static str {
        "survivors"
    }

    fn interested_in_asset(&self, path: &str) -> bool {
        GroupExporter::interested_in_asset(self, path)
    }

    async fn export_assets(
        &self,
        ctx: &ExportContext<'_>,
        progress: &dyn ProgressSink,
        output: &dyn AssetOutput,
    ) -> IResult<()> {
        export_item_groups(self, ctx, progress, output).await
    }
}

#[cfg(test)]
mod test {
    use std::collections::BTreeMap;
    use std::sync::atomic::AtomicUsize;

    use futures::executor::block_on;

    use super::*;
    use crate::artifacts::ExportedAssets;
    use crate::data::AssetProvider;
    use crate::data::dump::DumpProvider;
    use crate::error::ErrorKind;
    use crate::export::ExportProgress;
    use crate::export::aggregate::AssetCollector;

    fn manager(tag: &str) -> WorkerType {
        WorkerType {
            is_manager: true,
            manager_synergy_tags: vec![tag.to_string()],
            ..Default::default()
        }
    }

    fn run(objects: Vec<(&str, WorkerType)>) -> IResult<ExportedAssets> {
        let provider = DumpProvider::from_objects(
            objects
                .into_iter()
                .map(|(path, worker)| (path.to_string(), AssetObject::WorkerType(worker)))
                .collect::<BTreeMap<_, _>>(),
        )
        .with_unloadable("Game/Workers/WorkerBasic_VR_T05.uasset");

        let counter = AtomicUsize::new(0);
        let paths = provider
            .asset_paths()
            .iter()
            .map(String::as_str)
            .filter(|path| Exporter::interested_in_asset(&SurvivorExporter, path))
            .collect();
        let ctx = ExportContext::new(&provider, paths, &counter);
        let collector = AssetCollector::new();
        let sink = |_: ExportProgress| {};

        block_on(SurvivorExporter.export_assets(&ctx, &sink, &collector))?;
        Ok(collector.into_assets())
    }

    #[test]
    fn manager_jobs() {
        assert_eq!(manager_job(&manager("Homebase.Manager.IsDoctor")), Ok(ManagerJob::Doctor));
        assert_eq!(manager_job(&manager("Homebase.Manager.IsSoldier")), Ok(ManagerJob::Marksman));
        assert_eq!(
            manager_job(&WorkerType::default()),
            Err(AssetFormatError::NotAManager)
        );
        assert_eq!(
            manager_job(&WorkerType {
                is_manager: true,
                ..Default::default()
            }),
            Err(AssetFormatError::MissingManagerSynergy)
        );
    }

    #[test]
    fn unknown_synergy_is_a_format_error() {
        assert_eq!(
            manager_job(&manager("Homebase.Manager.IsJanitor")),
            Err(AssetFormatError::UnexpectedManagerSynergy(
                "Homebase.Manager.IsJanitor".to_string()
            ))
        );

        let err = run(vec![(
            "Game/Managers/ManagerJanitor_R_T01.uasset",
            manager("Homebase.Manager.IsJanitor"),
        )])
        .unwrap_err();
        assert!(matches!(err, ErrorKind::AssetFormat(_)));
        assert_eq!(
            err.asset_format(),
            Some(&AssetFormatError::UnexpectedManagerSynergy(
                "Homebase.Manager.IsJanitor".to_string()
            ))
        );
    }

    #[test]
    fn leads_are_promoted_survivors_are_not() {
        let assets = run(vec![
            (
                "Game/Managers/ManagerDoctor_UR_T05.uasset",
                manager("Homebase.Manager.IsDoctor"),
            ),
            ("Game/Workers/Worker_Karolina_UR_T05.uasset", WorkerType::default()),
        ])
        .unwrap();

        let lead = assets.named_items.get("Worker:ManagerDoctor_UR_T05").unwrap();
        assert_eq!(lead.rarity, Rarity::Transcendent);
        assert_eq!(lead.name, "ManagerDoctor_UR_T05");

        let survivor = assets.named_items.get("worker:worker_karolina_ur_t05").unwrap();
        assert_eq!(survivor.rarity, Rarity::Mythic);
    }

    #[test]
    fn group_fields_are_shared_by_every_variant() {
        let basic = WorkerType {
            personality_tags: vec!["Homebase.Worker.Personality.IsCompetitive".to_string()],
            ..Default::default()
        };
        let assets = run(vec![
            ("Game/Workers/WorkerBasic_C_T01.uasset", basic.clone()),
            ("Game/Workers/WorkerBasic_SR_T03.uasset", basic),
            (
                "Game/Managers/ManagerMartialArtist_SR_samurai_T03.uasset",
                WorkerType {
                    display_name: Some("Samurai Scrapper".to_string()),
                    ..manager("Homebase.Manager.IsMartialArtist")
                },
            ),
            ("Game/Workers/WorkerBasic_SR.uasset", WorkerType::default()),
        ])
        .unwrap();

        // the unparseable path and the unloadable T05 contribute nothing
        assert_eq!(assets.named_items.len(), 3);

        for id in ["Worker:WorkerBasic_C_T01", "Worker:WorkerBasic_SR_T03"] {
            let item = assets.named_items.get(id).unwrap();
            assert_eq!(item.item_type, "Worker");
            assert_eq!(item.display_name, "Survivor");
            assert_eq!(item.personality.as_deref(), Some("IsCompetitive"));
            assert_eq!(item.sub_type, None);
        }

        let samurai = assets
            .named_items
            .get("Worker:ManagerMartialArtist_SR_samurai_T03")
            .unwrap();
        assert_eq!(samurai.name, "ManagerMartialArtist_SR_samurai_T03");
        assert_eq!(samurai.display_name, "Samurai Scrapper");
        assert_eq!(samurai.sub_type.as_deref(), Some("Martial Artist"));
        assert_eq!(samurai.rarity, Rarity::Mythic);
        assert_eq!(samurai.tier, 3);
        assert_eq!(samurai.personality, None);
    }

    #[test]
    fn names_match_the_asset_file() {
        let assets = run(vec![("Game/Workers/WorkerBasic_C_T2.uasset", WorkerType::default())]).unwrap();
        let item = assets.named_items.get("Worker:WorkerBasic_C_T2").unwrap();
        assert_eq!(item.name, "WorkerBasic_C_T2");
        assert_eq!(item.tier, 2);
    }

    #[test]
    fn unnamed_leads_are_named_after_their_job() {
        let assets = run(vec![(
            "Game/Managers/ManagerEngineer_R_T04.uasset",
            manager("Homebase.Manager.IsEngineer"),
        )])
        .unwrap();
        let lead = assets.named_items.get("Worker:ManagerEngineer_R_T04").unwrap();
        assert_eq!(lead.display_name, "Lead Engineer");
        assert_eq!(lead.rarity, Rarity::Epic);
    }

    #[test]
    fn interest() {
        let exporter = SurvivorExporter;
        assert!(Exporter::interested_in_asset(&exporter, "Game/Workers/WorkerBasic_SR_T02.uasset"));
        assert!(Exporter::interested_in_asset(&exporter, "Game/Managers/ManagerDoctor_R_T01.uasset"));
        assert!(!Exporter::interested_in_asset(&exporter, "Game/Heroes/HID_Commando_SR_T01.uasset"));
    }
}
