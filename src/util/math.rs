//! Math type re-exports and the mesh bounding box.

pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use bytemuck::{Pod, Zeroable};
use std::fmt;

/// Axis-aligned bounding box.
///
/// Corners are homogeneous points (`w = 1`) so they can be multiplied by
/// a model matrix directly.
#[derive(Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct BoundingBox {
    pub min: Vec4,
    pub max: Vec4,
}

impl BoundingBox {
    /// Create a bounding box from min and max corners.
    #[inline]
    pub const fn new(min: Vec4, max: Vec4) -> Self {
        Self { min, max }
    }

    /// Create a bounding box from two 3D corners, using `w = 1`.
    #[inline]
    pub fn from_corners(min: Vec3, max: Vec3) -> Self {
        Self { min: min.extend(1.0), max: max.extend(1.0) }
    }

    /// Tight box around a set of points.
    ///
    /// An empty set gives a degenerate box at the origin.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut iter = points.into_iter();
        let Some(first) = iter.next() else {
            return Self::from_corners(Vec3::ZERO, Vec3::ZERO);
        };
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Self::from_corners(min, max)
    }

    /// Expand this box to include another box.
    #[inline]
    pub fn expand_by_box(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    /// Serialized form: max.xyzw followed by min.xyzw.
    pub fn to_array(&self) -> [f32; 8] {
        let (max, min) = (self.max.to_array(), self.min.to_array());
        [max[0], max[1], max[2], max[3], min[0], min[1], min[2], min[3]]
    }

    /// Inverse of [`BoundingBox::to_array`].
    pub fn from_array(v: [f32; 8]) -> Self {
        Self {
            max: Vec4::new(v[0], v[1], v[2], v[3]),
            min: Vec4::new(v[4], v[5], v[6], v[7]),
        }
    }

    /// Get the center of the box.
    #[inline]
    pub fn center(&self) -> Vec3 {
        ((self.min + self.max) * 0.5).truncate()
    }

    /// Get the size (extents) of the box.
    #[inline]
    pub fn size(&self) -> Vec3 {
        (self.max - self.min).truncate()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::from_corners(Vec3::ZERO, Vec3::ZERO)
    }
}

impl fmt::Debug for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BoundingBox({:?} - {:?})", self.min, self.max)
    }
}
