//! An [`AssetProvider`] over a JSON dump of already-decoded asset objects.
//!
//! The dump is produced by an external unpacker and looks like:
//!
//! ```json
//! { "assets": { "FortniteGame/Content/Balance/BaseItemRating.uasset": { "type": "curveTable", "rows": {} } } }
//! ```

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::data::{AssetObject, AssetProvider};
use crate::error::IResult;

#[derive(Deserialize)]
struct DumpFile {
    assets: BTreeMap<String, AssetObject>,
}

#[derive(Debug, Clone, Default)]
pub struct DumpProvider {
    paths: Vec<String>,
    objects: BTreeMap<String, AssetObject>,
}

impl DumpProvider {
    pub fn from_reader<R: Read>(reader: R) -> IResult<Self> {
        let dump: DumpFile = serde_json::from_reader(reader)?;
        Ok(Self::from_objects(dump.assets))
    }

    pub fn open<P: AsRef<Path>>(path: P) -> IResult<Self> {
        let path = path.as_ref();
        debug!("loading asset dump from {}", path.display());
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_objects(objects: BTreeMap<String, AssetObject>) -> Self {
        let paths = objects.keys().cloned().collect();
        Self { paths, objects }
    }

    /// Adds a path that is listed but can't be loaded.
    pub fn with_unloadable(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        if let Err(index) = self.paths.binary_search(&path) {
            self.paths.insert(index, path);
        }
        self
    }
}

#[async_trait::async_trait]
impl AssetProvider for DumpProvider {
    fn asset_paths(&self) -> &[String] {
        &self.paths
    }

    async fn load_object(&self, path: &str) -> Option<AssetObject> {
        self.objects.get(path).cloned()
    }
}
