//! On-disk model cache.
//!
//! A model is exported once into an asset directory (see [`layout`]) and
//! loaded from there on later runs. The directory's presence is the cache
//! hit signal. Exports are staged in a sibling `.partial` directory and
//! renamed into place, so an interrupted export never looks like a hit.

pub mod layout;
mod model;

pub use layout::AssetDir;
pub use model::ModelAssets;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::asset::{Asset, Mesh, ModelInfo, Texture};
use crate::config::CacheConfig;
use crate::util::{Error, Result};

/// Source of models on a cache miss, e.g. a glTF/OBJ importer.
pub trait SceneImporter {
    /// Import the model at `source`.
    fn import(&mut self, source: &Path) -> Result<ModelAssets>;
}

impl<F> SceneImporter for F
where
    F: FnMut(&Path) -> Result<ModelAssets>,
{
    fn import(&mut self, source: &Path) -> Result<ModelAssets> {
        self(source)
    }
}

/// An asset that failed to load and was left out.
#[derive(Debug)]
pub struct SkippedAsset {
    pub path: PathBuf,
    pub error: Error,
}

/// Result of loading an asset directory.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub assets: ModelAssets,
    pub skipped: Vec<SkippedAsset>,
}

/// Write `assets` to `dir`, replacing anything already there.
#[tracing::instrument(skip_all, fields(dir = %dir.root().display()))]
pub fn save_model(dir: &AssetDir, assets: &ModelAssets, parallel: bool) -> Result<()> {
    let staging = dir.staging();
    if staging.root().exists() {
        fs::remove_dir_all(staging.root())?;
    }

    if let Err(e) = write_all(&staging, assets, parallel) {
        let _ = fs::remove_dir_all(staging.root());
        return Err(e);
    }

    if dir.exists() {
        fs::remove_dir_all(dir.root())?;
    }
    fs::rename(staging.root(), dir.root())?;

    let info = assets.info();
    tracing::info!(meshes = info.num_meshes, textures = info.num_textures, "model exported");
    Ok(())
}

fn write_all(dir: &AssetDir, assets: &ModelAssets, parallel: bool) -> Result<()> {
    fs::create_dir_all(dir.mesh_dir())?;
    fs::create_dir_all(dir.texture_dir())?;

    let save_mesh = |(i, mesh): (usize, &Mesh)| {
        tracing::debug!(index = i, vertices = mesh.vertices.len(), "writing mesh");
        mesh.save(dir.mesh_path(i))
    };
    let save_texture = |(i, texture): (usize, &Texture)| {
        tracing::debug!(index = i, path = %texture.path, "writing texture");
        texture.save(dir.texture_path(i))
    };

    if parallel {
        assets.meshes.par_iter().enumerate().try_for_each(save_mesh)?;
        assets.textures().par_iter().enumerate().try_for_each(save_texture)?;
    } else {
        assets.meshes.iter().enumerate().try_for_each(save_mesh)?;
        assets.textures().iter().enumerate().try_for_each(save_texture)?;
    }

    assets.info().save(dir.main_path())
}

/// Load an asset directory, skipping meshes and textures that fail.
///
/// A missing or unreadable `main.object` is an error.
#[tracing::instrument(skip_all, fields(dir = %dir.root().display()))]
pub fn load_model(dir: &AssetDir) -> Result<LoadReport> {
    let info = ModelInfo::load(dir.main_path())?;
    let mut report = LoadReport::default();

    for i in 0..info.num_meshes as usize {
        let path = dir.mesh_path(i);
        match Mesh::load(&path) {
            Ok(mesh) => {
                report.assets.add_mesh(mesh);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), "skipping mesh: {}", error);
                report.skipped.push(SkippedAsset { path, error });
            }
        }
    }

    for i in 0..info.num_textures as usize {
        let path = dir.texture_path(i);
        match Texture::load(&path) {
            Ok(mut texture) => {
                if texture.path.is_empty() {
                    texture.path = path.display().to_string();
                }
                report.assets.add_texture(texture);
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), "skipping texture: {}", error);
                report.skipped.push(SkippedAsset { path, error });
            }
        }
    }

    tracing::debug!(
        meshes = report.assets.meshes.len(),
        textures = report.assets.textures().len(),
        skipped = report.skipped.len(),
        "model loaded"
    );
    Ok(report)
}

/// Loads models from their asset directory, importing on a miss.
#[derive(Debug, Clone, Default)]
pub struct ModelCache {
    config: CacheConfig,
}

impl ModelCache {
    /// Create a cache with the given settings.
    pub fn new(config: CacheConfig) -> Self {
        Self { config }
    }

    /// Active settings.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Asset directory used for `source`.
    pub fn asset_dir(&self, source: &Path) -> Result<AssetDir> {
        AssetDir::for_source(source, self.config.asset_root.as_deref())
    }

    /// True if `source` already has an asset directory.
    pub fn is_cached(&self, source: &Path) -> bool {
        self.asset_dir(source).map(|d| d.exists()).unwrap_or(false)
    }

    /// Load `source` from its asset directory, or import and export it.
    pub fn load_or_import(
        &self,
        source: &Path,
        importer: &mut impl SceneImporter,
    ) -> Result<ModelAssets> {
        let dir = self.asset_dir(source)?;
        if dir.exists() {
            tracing::info!(source = %source.display(), "cache hit");
            return Ok(load_model(&dir)?.assets);
        }

        tracing::info!(source = %source.display(), "cache miss, importing");
        self.reimport(source, importer)
    }

    /// Import `source` and replace its asset directory.
    pub fn reimport(
        &self,
        source: &Path,
        importer: &mut impl SceneImporter,
    ) -> Result<ModelAssets> {
        let dir = self.asset_dir(source)?;
        let assets = importer.import(source)?;
        save_model(&dir, &assets, self.config.parallel_export)?;
        Ok(assets)
    }

    /// Delete the asset directory for `source`, if any.
    pub fn invalidate(&self, source: &Path) -> Result<()> {
        let dir = self.asset_dir(source)?;
        if dir.exists() {
            fs::remove_dir_all(dir.root())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::{TextureKind, Vertex};
    use crate::util::Vec3;

    fn sample_model() -> ModelAssets {
        let mut model = ModelAssets::new();
        for m in 0..3 {
            let vertices = (0..4)
                .map(|i| Vertex::at(Vec3::new(i as f32, m as f32, 0.0), i))
                .collect();
            model.add_mesh(Mesh::new(vertices, vec![0, 1, 2, 2, 3, 0], m as usize));
        }
        model.add_texture(Texture::new(TextureKind::Diffuse, "albedo.png", 2, 2, 4, vec![128; 16]).unwrap());
        model.add_texture(Texture::new(TextureKind::Normal, "normal.png", 1, 2, 3, vec![7; 6]).unwrap());
        model
    }

    #[test]
    fn test_save_load_sequential_and_parallel() {
        for parallel in [false, true] {
            let tmp = tempfile::tempdir().unwrap();
            let dir = AssetDir::new(tmp.path().join("model"));
            let model = sample_model();

            save_model(&dir, &model, parallel).unwrap();
            assert!(dir.main_path().is_file());
            assert!(dir.mesh_path(2).is_file());
            assert!(dir.texture_path(1).is_file());
            assert!(!dir.staging().root().exists());

            let report = load_model(&dir).unwrap();
            assert!(report.skipped.is_empty());
            assert_eq!(report.assets, model);
        }
    }

    #[test]
    fn test_reexport_replaces() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = AssetDir::new(tmp.path().join("model"));

        save_model(&dir, &sample_model(), false).unwrap();
        let mut smaller = ModelAssets::new();
        smaller.add_mesh(Mesh::default());
        save_model(&dir, &smaller, false).unwrap();

        assert!(!dir.mesh_path(1).exists());
        assert!(!dir.texture_path(0).exists());
        assert_eq!(load_model(&dir).unwrap().assets.meshes.len(), 1);
    }

    #[test]
    fn test_corrupt_mesh_is_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = AssetDir::new(tmp.path().join("model"));
        save_model(&dir, &sample_model(), false).unwrap();

        fs::write(dir.mesh_path(1), b"MESH").unwrap();
        fs::remove_file(dir.texture_path(0)).unwrap();

        let report = load_model(&dir).unwrap();
        assert_eq!(report.assets.meshes.len(), 2);
        assert_eq!(report.assets.textures().len(), 1);
        assert_eq!(report.skipped.len(), 2);
        assert!(matches!(report.skipped[0].error, Error::CorruptContainer(_)));
        assert!(matches!(report.skipped[1].error, Error::NotFound(_)));
    }

    #[test]
    fn test_missing_main_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = AssetDir::new(tmp.path().join("model"));
        fs::create_dir_all(dir.root()).unwrap();
        assert!(matches!(load_model(&dir), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_failed_export_leaves_no_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = AssetDir::new(tmp.path().join("model"));

        let mut bad = sample_model();
        bad.meshes[0].indices.push(99);
        assert!(save_model(&dir, &bad, true).is_err());
        assert!(!dir.exists());
        assert!(!dir.staging().root().exists());
    }
}
