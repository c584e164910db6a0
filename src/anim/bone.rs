//! Bone tables and per-vertex skinning weights.

use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};

use crate::util::Mat4;

/// Maximum number of bones that can influence one vertex.
pub const MAX_BONES_PER_VERTEX: usize = 4;

/// Bone influences for one vertex, laid out for direct GPU upload.
///
/// A slot with weight `0.0` is unused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct VertexBoneData {
    pub bone_ids: [u32; MAX_BONES_PER_VERTEX],
    pub weights: [f32; MAX_BONES_PER_VERTEX],
}

impl VertexBoneData {
    /// Record one bone contribution.
    ///
    /// Ignored if the bone already occupies a slot (the first weight wins),
    /// if the weight is not a positive finite number, or if all slots are
    /// taken. Otherwise it fills the first empty slot, so results depend on
    /// the order contributions arrive in.
    pub fn add_bone(&mut self, bone_id: u32, weight: f32) {
        if self.contains(bone_id) {
            return;
        }
        if !(weight.is_finite() && weight > 0.0) {
            return;
        }

        if let Some(slot) = self.weights.iter().position(|&w| w == 0.0) {
            self.bone_ids[slot] = bone_id;
            self.weights[slot] = weight;
        }
    }

    /// True if `bone_id` is in an occupied slot.
    pub fn contains(&self, bone_id: u32) -> bool {
        self.slots().any(|(id, _)| id == bone_id)
    }

    /// Occupied `(bone id, weight)` slots in slot order.
    pub fn slots(&self) -> impl Iterator<Item = (u32, f32)> + '_ {
        self.bone_ids
            .iter()
            .zip(&self.weights)
            .filter(|(_, &w)| w != 0.0)
            .map(|(&id, &w)| (id, w))
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots().count()
    }

    /// True if no bone influences this vertex.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> f32 {
        self.weights.iter().sum()
    }
}

/// Per-bone data, indexed by bone index.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoneInfo {
    /// Inverse bind pose: mesh space to bone-local space.
    pub offset: Mat4,
}

impl Default for BoneInfo {
    fn default() -> Self {
        Self { offset: Mat4::IDENTITY }
    }
}

/// Bone as delivered by the importer.
#[derive(Clone, Debug, PartialEq)]
pub struct RawBone {
    pub name: String,
    pub offset: Mat4,
    /// `(vertex id, weight)` contributions.
    pub weights: Vec<(u32, f32)>,
}

/// Skinning tables for one mesh.
///
/// Bone indices are the positions of the bones passed to
/// [`Skin::from_bones`] and stay stable for the lifetime of the value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Skin {
    pub bone_info: Vec<BoneInfo>,
    pub bone_data: Vec<VertexBoneData>,
    bone_index: HashMap<String, u32>,
}

impl Skin {
    /// Build the tables from raw bones.
    ///
    /// Contributions are applied bone by bone in slice order, and within a
    /// bone in weight order. Contributions naming a vertex outside
    /// `0..vertex_count` are dropped. A bone name that appears twice keeps
    /// its first index.
    pub fn from_bones(vertex_count: usize, bones: &[RawBone]) -> Self {
        let mut bone_data = vec![VertexBoneData::default(); vertex_count];
        let mut bone_info = Vec::with_capacity(bones.len());
        let mut bone_index = HashMap::with_capacity(bones.len());

        for (index, bone) in bones.iter().enumerate() {
            let index = index as u32;
            bone_info.push(BoneInfo { offset: bone.offset });
            if bone_index.contains_key(&bone.name) {
                tracing::warn!(bone = %bone.name, "duplicate bone name");
            } else {
                bone_index.insert(bone.name.clone(), index);
            }

            for &(vertex, weight) in &bone.weights {
                match bone_data.get_mut(vertex as usize) {
                    Some(data) => data.add_bone(index, weight),
                    None => tracing::warn!(
                        bone = %bone.name,
                        vertex,
                        vertex_count,
                        "bone weight for missing vertex"
                    ),
                }
            }
        }

        Self { bone_info, bone_data, bone_index }
    }

    /// Number of bones.
    pub fn bone_count(&self) -> usize {
        self.bone_info.len()
    }

    /// Index of the bone driven by node `name`.
    pub fn bone_index(&self, name: &str) -> Option<u32> {
        self.bone_index.get(name).copied()
    }
}
