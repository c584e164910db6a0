//! Asset directory layout.
//!
//! ```text
//! <asset>/main.object
//! <asset>/meshes/mesh<N>.object
//! <asset>/textures/texture<N>.object
//! ```

use std::path::{Path, PathBuf};

use crate::util::{Error, Result};

/// Model info file name.
pub const MAIN_FILE: &str = "main.object";
/// Mesh subdirectory.
pub const MESH_DIR: &str = "meshes";
/// Texture subdirectory.
pub const TEXTURE_DIR: &str = "textures";

/// Paths inside one asset directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    /// Wrap an asset directory path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Asset directory for `source`.
    ///
    /// Named after the source file stem, inside `asset_root` when given and
    /// next to the source otherwise.
    pub fn for_source(source: &Path, asset_root: Option<&Path>) -> Result<Self> {
        let stem = source
            .file_stem()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| Error::Import(format!("no file name in {}", source.display())))?;

        let parent = match asset_root {
            Some(root) => root.to_path_buf(),
            None => source.parent().map(Path::to_path_buf).unwrap_or_default(),
        };
        Ok(Self::new(parent.join(stem)))
    }

    /// Directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// True if the directory exists, which marks a cache hit.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }

    /// `main.object` path.
    pub fn main_path(&self) -> PathBuf {
        self.root.join(MAIN_FILE)
    }

    /// Mesh subdirectory path.
    pub fn mesh_dir(&self) -> PathBuf {
        self.root.join(MESH_DIR)
    }

    /// Texture subdirectory path.
    pub fn texture_dir(&self) -> PathBuf {
        self.root.join(TEXTURE_DIR)
    }

    /// Path of mesh `index`.
    pub fn mesh_path(&self, index: usize) -> PathBuf {
        self.mesh_dir().join(format!("mesh{}.object", index))
    }

    /// Path of texture `index`.
    pub fn texture_path(&self, index: usize) -> PathBuf {
        self.texture_dir().join(format!("texture{}.object", index))
    }

    /// Sibling directory used while an export is in progress.
    pub(crate) fn staging(&self) -> Self {
        let mut name = self.root.file_name().unwrap_or_default().to_os_string();
        name.push(".partial");
        Self::new(self.root.with_file_name(name))
    }
}
