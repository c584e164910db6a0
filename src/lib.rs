//! # modelcache
//!
//! Compact binary asset containers for imported models, and skeletal
//! animation sampling over the restored data.
//!
//! ## Modules
//!
//! - [`util`] - Errors, bounding box, math re-exports
//! - [`core`] - Type tags, versions and LZ4 block compression
//! - [`container`] - Length-prefixed container files
//! - [`asset`] - Mesh, texture and model info serializers
//! - [`anim`] - Bone weights, node hierarchy, keyframes and the sampler
//! - [`cache`] - Asset directory layout and the import-on-miss cache
//! - [`config`] - Cache settings
//!
//! ## Example
//!
//! ```ignore
//! use modelcache::prelude::*;
//!
//! let cache = ModelCache::new(CacheConfig::load());
//! let model = cache.load_or_import(Path::new("models/helmet.gltf"), &mut importer)?;
//!
//! // once per frame
//! let bones = skin.bone_transforms(elapsed, &clips, 0, &mut nodes);
//! ```

pub mod util;
pub mod core;
pub mod container;
pub mod asset;
pub mod anim;
pub mod cache;
pub mod config;

// Re-export commonly used types
pub use util::{Error, Result};
pub use container::AssetFile;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{BoundingBox, Error, Result};
    pub use crate::core::AssetKind;
    pub use crate::container::AssetFile;
    pub use crate::asset::{Asset, Mesh, ModelInfo, Texture, TextureKind, Vertex};
    pub use crate::anim::{AnimationClip, NodeChannel, NodeHierarchy, RawBone, Skin, VertexBoneData};
    pub use crate::cache::{ModelAssets, ModelCache, SceneImporter};
    pub use crate::config::CacheConfig;
}
