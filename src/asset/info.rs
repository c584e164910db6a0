//! Model info serializer.

use serde::{Deserialize, Serialize};

use super::Asset;
use crate::container::AssetFile;
use crate::core::{AssetKind, CURRENT_VERSION};
use crate::util::Result;

/// Asset counts for one model directory.
///
/// Tells the loader how many `mesh<N>` and `texture<N>` files to read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(rename = "numMeshes")]
    pub num_meshes: u32,
    #[serde(rename = "numTextures")]
    pub num_textures: u32,
}

impl Asset for ModelInfo {
    const KIND: AssetKind = AssetKind::ModelInfo;

    fn encode(&self) -> Result<AssetFile> {
        Ok(AssetFile::new(
            Self::KIND,
            CURRENT_VERSION,
            serde_json::to_string(self)?,
            Vec::new(),
        ))
    }

    fn decode(file: &AssetFile) -> Result<Self> {
        file.expect_kind(Self::KIND)?;
        if !file.blob.is_empty() {
            tracing::warn!("ignoring {} byte blob in model info", file.blob.len());
        }
        Ok(serde_json::from_str(&file.json)?)
    }
}
