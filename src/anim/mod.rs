//! Skeletal animation.
//!
//! - [`Skin`] - bone offsets, per-vertex weights and the bone name map
//! - [`NodeHierarchy`] - parent-first node arena
//! - [`AnimationClip`] / [`NodeChannel`] - keyframe tracks
//! - [`Skin::bone_transforms`] - per-frame skinning matrices

mod bone;
mod node;
mod sampler;
mod track;

pub use bone::{BoneInfo, RawBone, Skin, VertexBoneData, MAX_BONES_PER_VERTEX};
pub use node::{NodeData, NodeHierarchy};
pub use sampler::{pose_hierarchy, ChannelBinding};
pub use track::{
    interpolate_rotation, interpolate_vector, AnimationClip, Key, NodeChannel, QuatKey, VectorKey,
    DEFAULT_TICKS_PER_SECOND,
};
