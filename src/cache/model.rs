//! In-memory assets of one model.

use std::collections::HashMap;

use crate::asset::{ModelInfo, Mesh, Texture};

/// Meshes and textures of one model.
///
/// Textures are deduplicated by source path; their order is the order in
/// which they are first added and decides the `texture<N>` file numbering.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModelAssets {
    pub meshes: Vec<Mesh>,
    textures: Vec<Texture>,
    by_path: HashMap<String, usize>,
}

impl ModelAssets {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mesh and return its index.
    pub fn add_mesh(&mut self, mesh: Mesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Add a texture unless one with the same non-empty path exists.
    ///
    /// Returns the index of the stored texture.
    pub fn add_texture(&mut self, texture: Texture) -> usize {
        if !texture.path.is_empty() {
            if let Some(&index) = self.by_path.get(&texture.path) {
                return index;
            }
            self.by_path.insert(texture.path.clone(), self.textures.len());
        }
        self.textures.push(texture);
        self.textures.len() - 1
    }

    /// Texture with source path `path`.
    pub fn texture_by_path(&self, path: &str) -> Option<&Texture> {
        self.by_path.get(path).map(|&i| &self.textures[i])
    }

    /// Textures in file order.
    pub fn textures(&self) -> &[Texture] {
        &self.textures
    }

    /// Take the textures, e.g. to hand their pixels to the uploader.
    pub fn take_textures(&mut self) -> Vec<Texture> {
        self.by_path.clear();
        std::mem::take(&mut self.textures)
    }

    /// Counts stored in `main.object`.
    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            num_meshes: self.meshes.len() as u32,
            num_textures: self.textures.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::TextureKind;

    fn tex(path: &str, value: u8) -> Texture {
        Texture::new(TextureKind::Diffuse, path, 1, 1, 1, vec![value]).unwrap()
    }

    #[test]
    fn test_texture_dedup() {
        let mut model = ModelAssets::new();
        assert_eq!(model.add_texture(tex("a.png", 1)), 0);
        assert_eq!(model.add_texture(tex("b.png", 2)), 1);
        assert_eq!(model.add_texture(tex("a.png", 3)), 0);

        assert_eq!(model.textures().len(), 2);
        assert_eq!(model.texture_by_path("a.png").unwrap().pixels(), &[1]);
        assert_eq!(model.info(), ModelInfo { num_meshes: 0, num_textures: 2 });
    }

    #[test]
    fn test_unnamed_textures_kept() {
        let mut model = ModelAssets::new();
        model.add_texture(tex("", 1));
        model.add_texture(tex("", 2));
        assert_eq!(model.textures().len(), 2);
    }

    #[test]
    fn test_take_textures() {
        let mut model = ModelAssets::new();
        model.add_texture(tex("a.png", 1));
        let taken = model.take_textures();
        assert_eq!(taken.len(), 1);
        assert!(model.textures().is_empty());
        assert!(model.texture_by_path("a.png").is_none());
    }
}
