//! Integration tests for writing asset containers and reading them back.

use std::fs;

use modelcache::asset::{Asset, Mesh, ModelInfo, PixelFormat, Texture, TextureKind, Vertex};
use modelcache::container::{self, AssetFile};
use modelcache::core::{AssetKind, CURRENT_VERSION};
use modelcache::util::{Vec2, Vec3};
use modelcache::Error;

use tempfile::{tempdir, NamedTempFile};

fn quad() -> Mesh {
    let corners = [
        Vec3::new(-1.0, -1.0, 0.0),
        Vec3::new(1.0, -1.0, 0.0),
        Vec3::new(1.0, 1.0, 0.0),
        Vec3::new(-1.0, 1.0, 0.0),
    ];
    let vertices = corners
        .iter()
        .enumerate()
        .map(|(i, &p)| Vertex {
            position: p,
            normal: Vec3::Z,
            tex_coords: Vec2::new((p.x + 1.0) * 0.5, (p.y + 1.0) * 0.5),
            tangent: Vec3::X,
            bitangent: Vec3::Y,
            id: i as u32,
        })
        .collect();
    Mesh::new(vertices, vec![0, 1, 2, 2, 3, 0], 1)
}

#[test]
fn test_container_file_roundtrip() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");

    let file = AssetFile::new(
        AssetKind::Texture,
        CURRENT_VERSION,
        r#"{"width":2}"#.to_string(),
        vec![9, 8, 7],
    );
    container::write(temp.path(), &file).expect("Failed to write container");

    let bytes = fs::read(temp.path()).unwrap();
    assert_eq!(&bytes[..4], b"TEXI");
    assert_eq!(bytes.len(), 16 + 11 + 3);

    let back = container::read(temp.path()).expect("Failed to read container");
    assert_eq!(back, file);
    assert_eq!(back.kind(), Some(AssetKind::Texture));
}

#[test]
fn test_container_empty_fields() {
    let temp = NamedTempFile::new().unwrap();
    let file = AssetFile::new(AssetKind::ModelInfo, CURRENT_VERSION, String::new(), Vec::new());
    container::write(temp.path(), &file).unwrap();

    assert_eq!(fs::metadata(temp.path()).unwrap().len(), 16);
    assert_eq!(container::read(temp.path()).unwrap(), file);
}

#[test]
fn test_container_missing_file() {
    let dir = tempdir().unwrap();
    let result = container::read(dir.path().join("nope.object"));
    assert!(matches!(result, Err(Error::NotFound(_))));
}

#[test]
fn test_container_truncated_and_trailing() {
    let temp = NamedTempFile::new().unwrap();
    let file = AssetFile::new(AssetKind::Mesh, CURRENT_VERSION, "{}".into(), vec![1; 32]);
    container::write(temp.path(), &file).unwrap();
    let bytes = fs::read(temp.path()).unwrap();

    fs::write(temp.path(), &bytes[..bytes.len() - 1]).unwrap();
    assert!(matches!(container::read(temp.path()), Err(Error::CorruptContainer(_))));

    let mut longer = bytes.clone();
    longer.push(0);
    fs::write(temp.path(), &longer).unwrap();
    assert!(matches!(container::read(temp.path()), Err(Error::CorruptContainer(_))));

    fs::write(temp.path(), &bytes[..10]).unwrap();
    assert!(matches!(container::read(temp.path()), Err(Error::CorruptContainer(_))));
}

#[test]
fn test_mesh_file_roundtrip() {
    let temp = NamedTempFile::new().unwrap();
    let mesh = quad();
    mesh.save(temp.path()).expect("Failed to save mesh");

    let back = Mesh::load(temp.path()).expect("Failed to load mesh");
    assert_eq!(back.vertices.len(), 4);
    assert_eq!(back.indices, vec![0, 1, 2, 2, 3, 0]);
    assert_eq!(back.material_index, 1);
    for (a, b) in mesh.vertices.iter().zip(&back.vertices) {
        assert_eq!(bytemuck::bytes_of(a), bytemuck::bytes_of(b));
    }
    assert_eq!(back.bounds, mesh.bounds);
    assert_eq!(back.bounds.size(), Vec3::new(2.0, 2.0, 0.0));
}

#[test]
fn test_mesh_metadata_fields() {
    let file = quad().encode().unwrap();
    let meta: serde_json::Value = serde_json::from_str(&file.json).unwrap();

    assert_eq!(meta["vertex_format"], "PNTTB_F32");
    assert_eq!(meta["vertex_buffer_size"], 4 * 60);
    assert_eq!(meta["indices_buffer_size"], 6 * 4);
    assert_eq!(meta["compression"], "LZ4");
    assert_eq!(meta["bounds"].as_array().unwrap().len(), 8);
}

#[test]
fn test_large_mesh_compresses() {
    let vertices: Vec<Vertex> = (0..4096)
        .map(|i| Vertex::at(Vec3::new((i % 64) as f32, (i / 64) as f32, 0.0), i))
        .collect();
    let indices: Vec<u32> = (0..4095).flat_map(|i| [i, i + 1, 0]).collect();
    let mesh = Mesh::new(vertices, indices, 0);

    let file = mesh.encode().unwrap();
    assert!(file.blob.len() < 4096 * 60);
    assert_eq!(Mesh::decode(&file).unwrap(), mesh);
}

#[test]
fn test_mesh_rejects_other_kind() {
    let temp = NamedTempFile::new().unwrap();
    ModelInfo { num_meshes: 1, num_textures: 0 }.save(temp.path()).unwrap();

    let result = Mesh::load(temp.path());
    assert!(matches!(result, Err(Error::KindMismatch { .. })));
}

#[test]
fn test_mesh_bad_metadata() {
    let mut file = quad().encode().unwrap();
    file.json = r#"{"vertex_format":"PNTTB_F32"}"#.to_string();
    assert!(Mesh::decode(&file).unwrap_err().is_schema());

    let mut file = quad().encode().unwrap();
    file.json.truncate(file.json.len() / 2);
    assert!(Mesh::decode(&file).unwrap_err().is_schema());
}

#[test]
fn test_mesh_corrupt_blob() {
    let mut file = quad().encode().unwrap();
    file.blob.truncate(file.blob.len() / 2);
    assert!(matches!(Mesh::decode(&file), Err(Error::CorruptBlob(_))));
}

#[test]
fn test_texture_file_roundtrip() {
    let temp = NamedTempFile::new().unwrap();
    let pixels: Vec<u8> = (0..4 * 4 * 3).map(|i| (i * 5) as u8).collect();
    let tex = Texture::new(TextureKind::Specular, "specular.png", 4, 4, 3, pixels.clone()).unwrap();
    tex.save(temp.path()).unwrap();

    let back = Texture::load(temp.path()).unwrap();
    assert_eq!(back.kind, TextureKind::Specular);
    assert_eq!(back.path, "specular.png");
    assert_eq!((back.width, back.height), (4, 4));
    assert_eq!(back.format(), PixelFormat::RGB8);
    assert_eq!(back.pixels(), pixels.as_slice());
}

#[test]
fn test_texture_metadata_fields() {
    let tex = Texture::new(TextureKind::Diffuse, "albedo.png", 2, 1, 4, vec![0; 8]).unwrap();
    let meta: serde_json::Value = serde_json::from_str(&tex.encode().unwrap().json).unwrap();

    assert_eq!(meta["type"], "texture_diffuse");
    assert_eq!(meta["width"], 2);
    assert_eq!(meta["height"], 1);
    assert_eq!(meta["nrComponents"], 4);
    assert_eq!(meta["compression"], "LZ4");
}

#[test]
fn test_texture_wrong_pixel_count() {
    assert!(Texture::new(TextureKind::Diffuse, "a.png", 2, 2, 4, vec![0; 15]).is_err());
    assert!(Texture::new(TextureKind::Diffuse, "a.png", 1, 1, 5, vec![0; 5]).is_err());
}

#[test]
fn test_model_info_file() {
    let temp = NamedTempFile::new().unwrap();
    let info = ModelInfo { num_meshes: 12, num_textures: 3 };
    info.save(temp.path()).unwrap();

    let file = container::read(temp.path()).unwrap();
    assert_eq!(file.kind(), Some(AssetKind::ModelInfo));
    assert!(file.blob.is_empty());
    assert!(file.json.contains("\"numMeshes\":12"));
    assert_eq!(ModelInfo::load(temp.path()).unwrap(), info);
}

#[test]
fn test_future_version_rejected() {
    let mut file = ModelInfo { num_meshes: 1, num_textures: 1 }.encode().unwrap();
    file.version = CURRENT_VERSION + 1;
    assert!(matches!(ModelInfo::decode(&file), Err(Error::UnsupportedVersion(_))));
}

#[test]
fn test_texture_oversized_dimensions() {
    let json = serde_json::json!({
        "type": "texture_diffuse",
        "format": "RGBA8",
        "width": 1u32 << 20,
        "height": 1u32 << 20,
        "nrComponents": 4,
        "buffer_size": 1u64 << 42,
        "compression": "LZ4",
    });
    let blob = modelcache::core::compress(&[0, 0, 0, 255]);
    let file = AssetFile::new(AssetKind::Texture, CURRENT_VERSION, json.to_string(), blob);

    assert!(matches!(Texture::decode(&file), Err(Error::CorruptBlob(_))));
}
