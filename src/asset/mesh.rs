//! Mesh serializer.
//!
//! Blob layout (before compression): `vertex_buffer_size` bytes of
//! [`Vertex`] records, then `indices_buffer_size` bytes of `u32` indices.
//! Records are written in host byte order, which is little-endian on every
//! target this crate is built for.

use serde::{Deserialize, Serialize};

use super::vertex::{Vertex, VertexFormat};
use super::{check_compression, Asset};
use crate::container::AssetFile;
use crate::core::{compress, decompress, AssetKind, COMPRESSION_NAME, CURRENT_VERSION};
use crate::util::{BoundingBox, Error, Result};

const INDEX_SIZE: usize = std::mem::size_of::<u32>();

/// Triangle mesh ready for upload.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list, three indices per face.
    pub indices: Vec<u32>,
    pub bounds: BoundingBox,
    /// Index into the owning model's material list.
    pub material_index: usize,
}

#[derive(Serialize, Deserialize)]
struct MeshMetadata {
    vertex_format: String,
    vertex_buffer_size: usize,
    indices_buffer_size: usize,
    bounds: [f32; 8],
    compression: String,
    #[serde(default)]
    material_index: usize,
}

impl Mesh {
    /// Build a mesh and compute its bounds from the vertex positions.
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material_index: usize) -> Self {
        let bounds = BoundingBox::from_points(vertices.iter().map(|v| v.position));
        Self { vertices, indices, bounds, material_index }
    }

    /// Number of whole triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Check that every index refers to an existing vertex and that the
    /// bounds are finite.
    pub fn validate(&self) -> Result<()> {
        if !self.bounds.to_array().iter().all(|v| v.is_finite()) {
            return Err(Error::corrupt_asset(format!(
                "non-finite bounds {:?}",
                self.bounds
            )));
        }

        let count = self.vertices.len();
        if let Some((pos, idx)) = self
            .indices
            .iter()
            .enumerate()
            .find(|(_, &i)| i as usize >= count)
        {
            return Err(Error::corrupt_asset(format!(
                "index {} at position {} out of range for {} vertices",
                idx, pos, count
            )));
        }
        Ok(())
    }
}

impl Asset for Mesh {
    const KIND: AssetKind = AssetKind::Mesh;

    fn encode(&self) -> Result<AssetFile> {
        self.validate()?;

        let format = VertexFormat::default();
        let vertex_bytes: &[u8] = bytemuck::cast_slice(&self.vertices);
        let index_bytes: &[u8] = bytemuck::cast_slice(&self.indices);

        let mut merged = Vec::with_capacity(vertex_bytes.len() + index_bytes.len());
        merged.extend_from_slice(vertex_bytes);
        merged.extend_from_slice(index_bytes);

        let metadata = MeshMetadata {
            vertex_format: format.tag().to_string(),
            vertex_buffer_size: vertex_bytes.len(),
            indices_buffer_size: index_bytes.len(),
            bounds: self.bounds.to_array(),
            compression: COMPRESSION_NAME.to_string(),
            material_index: self.material_index,
        };

        Ok(AssetFile::new(
            Self::KIND,
            CURRENT_VERSION,
            serde_json::to_string(&metadata)?,
            compress(&merged),
        ))
    }

    fn decode(file: &AssetFile) -> Result<Self> {
        file.expect_kind(Self::KIND)?;

        let metadata: MeshMetadata = serde_json::from_str(&file.json)?;
        let format = VertexFormat::from_tag(&metadata.vertex_format)?;
        check_compression(&metadata.compression)?;

        let vertex_size = metadata.vertex_buffer_size;
        let total = vertex_size
            .checked_add(metadata.indices_buffer_size)
            .ok_or_else(|| Error::schema("buffer sizes overflow"))?;

        let merged = decompress(&file.blob, total)?;
        let (vertex_bytes, index_bytes) = merged.split_at(vertex_size);

        let record = format.record_size();
        if vertex_bytes.len() % record != 0 {
            return Err(Error::RecordAlignment {
                segment: "vertex",
                len: vertex_bytes.len(),
                record_size: record,
            });
        }
        if index_bytes.len() % INDEX_SIZE != 0 {
            return Err(Error::RecordAlignment {
                segment: "index",
                len: index_bytes.len(),
                record_size: INDEX_SIZE,
            });
        }

        let mesh = Self {
            vertices: bytemuck::pod_collect_to_vec(vertex_bytes),
            indices: bytemuck::pod_collect_to_vec(index_bytes),
            bounds: BoundingBox::from_array(metadata.bounds),
            material_index: metadata.material_index,
        };
        mesh.validate()?;

        Ok(mesh)
    }
}
