//! Typed asset serializers.
//!
//! Each asset kind defines its JSON metadata schema and the raw layout of
//! its blob:
//! - [`Mesh`] - `MESH`: vertex records followed by `u32` indices
//! - [`Texture`] - `TEXI`: raw 8-bit-per-channel pixels
//! - [`ModelInfo`] - `INFO`: asset counts, empty blob

mod info;
mod mesh;
mod texture;
mod vertex;

pub use info::ModelInfo;
pub use mesh::Mesh;
pub use texture::{PixelFormat, Texture, TextureKind};
pub use vertex::{Vertex, VertexFormat};

use std::path::Path;

use crate::container::{self, AssetFile};
use crate::core::{AssetKind, COMPRESSION_NAME};
use crate::util::{Error, Result};

/// An asset that converts to and from a container.
pub trait Asset: Sized {
    /// Tag this asset is stored under.
    const KIND: AssetKind;

    /// Build the container for this asset.
    fn encode(&self) -> Result<AssetFile>;

    /// Rebuild the asset from a container.
    ///
    /// Implementations call [`AssetFile::expect_kind`] first.
    fn decode(file: &AssetFile) -> Result<Self>;

    /// Encode and write to `path`.
    fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        container::write(path, &self.encode()?)
    }

    /// Read from `path` and decode.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::decode(&container::read(path)?)
    }
}

/// Reject blobs compressed with anything but the block compressor.
pub(crate) fn check_compression(name: &str) -> Result<()> {
    if name == COMPRESSION_NAME {
        Ok(())
    } else {
        Err(Error::schema(format!("unsupported compression '{}'", name)))
    }
}
