//! Keyframe tracks and animation clips.
//!
//! Key times are in ticks. Tracks are expected to be sorted by time.

use std::collections::HashMap;

use crate::util::{Mat4, Quat, Vec3};

/// Fallback rate when a clip declares zero ticks per second.
pub const DEFAULT_TICKS_PER_SECOND: f64 = 25.0;

/// Timed sample of one transform component.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Key<T> {
    pub time: f64,
    pub value: T,
}

impl<T> Key<T> {
    pub const fn new(time: f64, value: T) -> Self {
        Self { time, value }
    }
}

pub type VectorKey = Key<Vec3>;
pub type QuatKey = Key<Quat>;

/// Find the bracketing segment `(i, factor)` for `tick`.
///
/// `i` is the first index with `tick < keys[i + 1].time`, or the last
/// segment when none matches. `factor` is the position inside the segment,
/// clamped to `[0, 1]`. Requires at least two keys.
fn bracket<T>(keys: &[Key<T>], tick: f64) -> (usize, f32) {
    debug_assert!(keys.len() >= 2);
    let last_segment = keys.len() - 2;
    let index = (0..=last_segment)
        .find(|&i| tick < keys[i + 1].time)
        .unwrap_or(last_segment);

    let (t1, t2) = (keys[index].time, keys[index + 1].time);
    let span = t2 - t1;
    let factor = if span > 0.0 { ((tick - t1) / span).clamp(0.0, 1.0) } else { 0.0 };

    (index, factor as f32)
}

/// Sample a position or scale track by linear interpolation.
///
/// An empty track yields `default`; a single key is returned as is.
pub fn interpolate_vector(keys: &[VectorKey], tick: f64, default: Vec3) -> Vec3 {
    match keys {
        [] => default,
        [only] => only.value,
        _ => {
            let (i, factor) = bracket(keys, tick);
            let (start, end) = (keys[i].value, keys[i + 1].value);
            start + factor * (end - start)
        }
    }
}

/// Sample a rotation track by shortest-arc slerp, renormalized.
///
/// An empty track yields the identity; a single key is returned as is.
pub fn interpolate_rotation(keys: &[QuatKey], tick: f64) -> Quat {
    match keys {
        [] => Quat::IDENTITY,
        [only] => only.value,
        _ => {
            let (i, factor) = bracket(keys, tick);
            keys[i].value.slerp(keys[i + 1].value, factor).normalize()
        }
    }
}

/// Keyframes driving one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeChannel {
    /// Name of the node this channel animates.
    pub node_name: String,
    pub positions: Vec<VectorKey>,
    pub rotations: Vec<QuatKey>,
    pub scalings: Vec<VectorKey>,
}

impl NodeChannel {
    /// Create an empty channel for `node_name`.
    pub fn new(node_name: impl Into<String>) -> Self {
        Self { node_name: node_name.into(), ..Self::default() }
    }

    /// Local transform at `tick`: translation * rotation * scale.
    pub fn local_transform(&self, tick: f64) -> Mat4 {
        let scale = interpolate_vector(&self.scalings, tick, Vec3::ONE);
        let rotation = interpolate_rotation(&self.rotations, tick);
        let translation = interpolate_vector(&self.positions, tick, Vec3::ZERO);

        Mat4::from_translation(translation) * Mat4::from_quat(rotation) * Mat4::from_scale(scale)
    }
}

/// One named animation.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationClip {
    pub name: String,
    /// Length in ticks.
    pub duration: f64,
    /// Declared rate, `0.0` when the source left it unspecified.
    pub ticks_per_second: f64,
    channels: Vec<NodeChannel>,
    by_node: HashMap<String, usize>,
}

impl AnimationClip {
    /// Create a clip and index its channels by node name.
    ///
    /// If two channels target the same node, the first one is used.
    pub fn new(
        name: impl Into<String>,
        duration: f64,
        ticks_per_second: f64,
        channels: Vec<NodeChannel>,
    ) -> Self {
        let mut by_node = HashMap::with_capacity(channels.len());
        for (i, channel) in channels.iter().enumerate() {
            by_node.entry(channel.node_name.clone()).or_insert(i);
        }

        Self { name: name.into(), duration, ticks_per_second, channels, by_node }
    }

    /// Ticks per second, falling back to [`DEFAULT_TICKS_PER_SECOND`].
    pub fn effective_ticks_per_second(&self) -> f64 {
        if self.ticks_per_second != 0.0 {
            self.ticks_per_second
        } else {
            DEFAULT_TICKS_PER_SECOND
        }
    }

    /// Convert seconds into a looping tick in `[0, duration)`.
    ///
    /// A clip with no positive duration always samples tick 0.
    pub fn tick_at(&self, time_seconds: f64) -> f64 {
        if !(self.duration > 0.0) {
            return 0.0;
        }
        let mut tick = (time_seconds * self.effective_ticks_per_second()) % self.duration;
        if tick < 0.0 {
            tick += self.duration;
        }
        // A tiny negative remainder can round up to exactly `duration`
        if tick >= self.duration {
            0.0
        } else {
            tick
        }
    }

    /// Channel for the node called `name`.
    pub fn channel(&self, name: &str) -> Option<&NodeChannel> {
        self.by_node.get(name).map(|&i| &self.channels[i])
    }

    /// All channels in declaration order.
    pub fn channels(&self) -> &[NodeChannel] {
        &self.channels
    }

    /// Clip length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.duration / self.effective_ticks_per_second()
    }
}
