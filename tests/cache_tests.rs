//! Integration tests for the import-on-miss model cache.

use std::fs;
use std::path::Path;

use modelcache::asset::{Mesh, Texture, TextureKind, Vertex};
use modelcache::cache::{AssetDir, ModelAssets, ModelCache};
use modelcache::config::CacheConfig;
use modelcache::util::Vec3;
use modelcache::{Error, Result};

use tempfile::tempdir;

fn triangle_model(textures: usize) -> ModelAssets {
    let mut model = ModelAssets::new();
    let vertices = vec![
        Vertex::at(Vec3::ZERO, 0),
        Vertex::at(Vec3::X, 1),
        Vertex::at(Vec3::Y, 2),
    ];
    model.add_mesh(Mesh::new(vertices, vec![0, 1, 2], 0));
    for i in 0..textures {
        let path = format!("tex{}.png", i);
        model.add_texture(Texture::new(TextureKind::Diffuse, path, 1, 1, 4, vec![i as u8; 4]).unwrap());
    }
    model
}

fn cache_in(root: &Path) -> ModelCache {
    ModelCache::new(CacheConfig { asset_root: Some(root.to_path_buf()), parallel_export: true })
}

#[test]
fn test_miss_imports_once_then_hits() {
    let tmp = tempdir().unwrap();
    let cache = cache_in(tmp.path());
    let source = tmp.path().join("sources/crate.obj");

    let mut calls = 0;
    let mut importer = |_: &Path| -> Result<ModelAssets> {
        calls += 1;
        Ok(triangle_model(2))
    };

    assert!(!cache.is_cached(&source));
    let first = cache.load_or_import(&source, &mut importer).unwrap();
    assert!(cache.is_cached(&source));
    let second = cache.load_or_import(&source, &mut importer).unwrap();

    assert_eq!(calls, 1);
    assert_eq!(first.meshes, second.meshes);
    assert_eq!(second.textures().len(), 2);
    assert!(tmp.path().join("crate/main.object").is_file());
    assert!(tmp.path().join("crate/textures/texture1.object").is_file());
}

#[test]
fn test_import_failure_leaves_no_cache() {
    let tmp = tempdir().unwrap();
    let cache = cache_in(tmp.path());
    let source = tmp.path().join("broken.fbx");

    let mut importer = |p: &Path| -> Result<ModelAssets> {
        Err(Error::Import(format!("cannot parse {}", p.display())))
    };

    assert!(matches!(cache.load_or_import(&source, &mut importer), Err(Error::Import(_))));
    assert!(!cache.is_cached(&source));
}

#[test]
fn test_reimport_and_invalidate() {
    let tmp = tempdir().unwrap();
    let cache = cache_in(tmp.path());
    let source = tmp.path().join("lamp.gltf");

    cache.load_or_import(&source, &mut |_: &Path| -> Result<ModelAssets> { Ok(triangle_model(3)) }).unwrap();
    cache.reimport(&source, &mut |_: &Path| -> Result<ModelAssets> { Ok(triangle_model(1)) }).unwrap();

    let dir = cache.asset_dir(&source).unwrap();
    assert!(!dir.texture_path(2).exists());

    let mut calls = 0;
    let loaded = cache
        .load_or_import(&source, &mut |_: &Path| -> Result<ModelAssets> {
            calls += 1;
            Ok(ModelAssets::new())
        })
        .unwrap();
    assert_eq!(calls, 0);
    assert_eq!(loaded.textures().len(), 1);

    cache.invalidate(&source).unwrap();
    assert!(!cache.is_cached(&source));
    cache.invalidate(&source).unwrap();
}

#[test]
fn test_asset_dir_next_to_source() {
    let tmp = tempdir().unwrap();
    let cache = ModelCache::new(CacheConfig { asset_root: None, parallel_export: false });
    let source = tmp.path().join("chair.obj");

    cache.load_or_import(&source, &mut |_: &Path| -> Result<ModelAssets> { Ok(triangle_model(0)) }).unwrap();
    assert_eq!(cache.asset_dir(&source).unwrap(), AssetDir::new(tmp.path().join("chair")));
    assert!(tmp.path().join("chair/meshes/mesh0.object").is_file());
}

#[test]
fn test_hit_with_damaged_mesh_skips_it() {
    let tmp = tempdir().unwrap();
    let cache = cache_in(tmp.path());
    let source = tmp.path().join("robot.gltf");

    let mut model = triangle_model(0);
    model.add_mesh(Mesh::default());
    cache.load_or_import(&source, &mut |_: &Path| -> Result<ModelAssets> { Ok(model.clone()) }).unwrap();

    let dir = cache.asset_dir(&source).unwrap();
    fs::write(dir.mesh_path(0), b"garbage").unwrap();

    let loaded = cache
        .load_or_import(&source, &mut |_: &Path| -> Result<ModelAssets> { unreachable!() })
        .unwrap();
    assert_eq!(loaded.meshes.len(), 1);
    assert!(loaded.meshes[0].vertices.is_empty());
}

#[test]
fn test_unreadable_mesh_fails_export() {
    let tmp = tempdir().unwrap();
    let cache = cache_in(tmp.path());
    let source = tmp.path().join("nan.obj");

    let mut model = triangle_model(1);
    model.meshes[0].bounds.min.x = f32::NAN;

    let result = cache.load_or_import(&source, &mut |_: &Path| -> Result<ModelAssets> { Ok(model.clone()) });
    assert!(matches!(result, Err(Error::CorruptAsset(_))));
    assert!(!cache.is_cached(&source));
}
