//! Skeletal animation sampling.
//!
//! Turns a playback time into one skinning matrix per bone:
//!
//! 1. wrap the time into the clip (`tick = seconds * tps mod duration`)
//! 2. walk the hierarchy parents first, sampling each node's channel or
//!    falling back to its bind pose
//! 3. `world = parent_world * local`
//! 4. `bone = world * offset` for nodes that drive a bone
//!
//! Sampling never fails. The hierarchy's world transforms are overwritten
//! on every call.

use super::bone::Skin;
use super::node::{NodeData, NodeHierarchy};
use super::track::{AnimationClip, NodeChannel};
use crate::util::Mat4;

/// How a node gets its local transform for one sample.
#[derive(Clone, Copy, Debug)]
pub enum ChannelBinding<'a> {
    /// Keyframed by a channel of the active clip.
    Animated(&'a NodeChannel),
    /// No channel; the bind pose is used unchanged.
    Static(Mat4),
}

impl<'a> ChannelBinding<'a> {
    /// Resolve the binding for `node` in `clip`.
    pub fn resolve(clip: Option<&'a AnimationClip>, node: &NodeData) -> Self {
        match clip.and_then(|c| c.channel(&node.name)) {
            Some(channel) => Self::Animated(channel),
            None => Self::Static(node.original_transform),
        }
    }

    /// Local transform at `tick`.
    pub fn local_transform(&self, tick: f64) -> Mat4 {
        match self {
            Self::Animated(channel) => channel.local_transform(tick),
            Self::Static(bind) => *bind,
        }
    }
}

impl Skin {
    /// Sample clip `animation_index` at `time_seconds`.
    ///
    /// Returns one matrix per bone, indexed by bone index. An out-of-range
    /// clip index samples the bind pose. Bones with no matching node stay
    /// at identity.
    pub fn bone_transforms(
        &self,
        time_seconds: f64,
        clips: &[AnimationClip],
        animation_index: usize,
        nodes: &mut NodeHierarchy,
    ) -> Vec<Mat4> {
        let mut out = Vec::with_capacity(self.bone_count());
        self.sample_into(time_seconds, clips.get(animation_index), nodes, &mut out);
        out
    }

    /// Sample `clip` into a caller-owned buffer, resized to the bone count.
    pub fn sample_into(
        &self,
        time_seconds: f64,
        clip: Option<&AnimationClip>,
        nodes: &mut NodeHierarchy,
        out: &mut Vec<Mat4>,
    ) {
        out.clear();
        out.resize(self.bone_count(), Mat4::IDENTITY);

        pose_hierarchy(time_seconds, clip, nodes);

        for node in nodes.nodes() {
            if let Some(bone) = self.bone_index(&node.name) {
                let bone = bone as usize;
                out[bone] = node.world_transform * self.bone_info[bone].offset;
            }
        }
    }
}

/// Sample a clip at `time_seconds` into world transforms only.
///
/// Useful for posing nodes that carry no skin, e.g. rigid attachments.
pub fn pose_hierarchy(time_seconds: f64, clip: Option<&AnimationClip>, nodes: &mut NodeHierarchy) {
    let tick = clip.map_or(0.0, |c| c.tick_at(time_seconds));
    nodes.update_world(|_, node| ChannelBinding::resolve(clip, node).local_transform(tick));
}
