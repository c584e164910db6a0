//! Vertex record layout.

use bytemuck::{Pod, Zeroable};

use crate::util::{Error, Result, Vec2, Vec3};

/// Interleaved mesh vertex.
///
/// Stored on disk exactly as laid out in memory, so the field order and
/// `repr(C)` are part of the file format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub tex_coords: Vec2,
    pub tangent: Vec3,
    pub bitangent: Vec3,
    /// Stable id, the vertex's index in the imported mesh.
    pub id: u32,
}

impl Vertex {
    /// Vertex with only a position and id set.
    pub fn at(position: Vec3, id: u32) -> Self {
        Self { position, id, ..Self::default() }
    }
}

/// Declared layout of the vertex segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VertexFormat {
    /// Position, normal, texcoord, tangent, bitangent as f32, then a u32 id.
    #[default]
    PnttbF32,
}

impl VertexFormat {
    /// Metadata tag.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::PnttbF32 => "PNTTB_F32",
        }
    }

    /// Parse a metadata tag.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "PNTTB_F32" => Ok(Self::PnttbF32),
            other => Err(Error::schema(format!("unknown vertex format '{}'", other))),
        }
    }

    /// Bytes per vertex record.
    pub const fn record_size(self) -> usize {
        match self {
            Self::PnttbF32 => std::mem::size_of::<Vertex>(),
        }
    }
}
