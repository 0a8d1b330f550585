//! Translation / rotation / scale transform
//!
//! glam's affine types do not keep rotation and scale separable, and the
//! audio cores need both: rotation feeds angular velocity tracking and the
//! collision delta gate compares rotations by angle.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Tolerance used for scale comparison when only location/rotation
/// tolerances are supplied.
pub const SCALE_TOLERANCE: f32 = 1e-4;

/// A rigid transform with non-uniform scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    /// Position in the parent space
    pub translation: Vec3,
    /// Orientation in the parent space (unit quaternion)
    pub rotation: Quat,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Creates a transform with only a translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Creates a unit-scale transform from a rotation and a translation.
    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Whether translation, rotation and scale are all finite.
    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }

    /// Position of this transform.
    #[inline]
    pub fn location(&self) -> Vec3 {
        self.translation
    }

    /// Applies `local` on top of this transform, producing `local` expressed
    /// in this transform's parent space.
    pub fn compose(&self, local: &Transform) -> Transform {
        Transform {
            translation: self.translation + self.rotation * (self.scale * local.translation),
            rotation: (self.rotation * local.rotation).normalize(),
            scale: self.scale * local.scale,
        }
    }

    /// Expresses this transform in the space of `parent`.
    ///
    /// Inverse of [`Transform::compose`]: `parent.compose(&t.relative_to(&parent)) == t`
    /// (up to float error). Zero scale axes on the parent collapse to zero.
    pub fn relative_to(&self, parent: &Transform) -> Transform {
        let inv_rotation = parent.rotation.inverse();
        let inv_scale = safe_recip(parent.scale);
        Transform {
            translation: inv_rotation * (self.translation - parent.translation) * inv_scale,
            rotation: (inv_rotation * self.rotation).normalize(),
            scale: self.scale * inv_scale,
        }
    }

    /// Tolerance-based equality.
    ///
    /// Translations are equal if every axis differs by at most
    /// `location_tolerance`; rotations are equal if the angle between them is
    /// at most `rotation_tolerance_deg` degrees; scales use
    /// [`SCALE_TOLERANCE`] per axis.
    pub fn nearly_equal(
        &self,
        other: &Transform,
        location_tolerance: f32,
        rotation_tolerance_deg: f32,
    ) -> bool {
        let location_equal =
            (self.translation - other.translation).abs().max_element() <= location_tolerance;
        let rotation_equal =
            self.rotation.angle_between(other.rotation) <= rotation_tolerance_deg.to_radians();
        let scale_equal = (self.scale - other.scale).abs().max_element() <= SCALE_TOLERANCE;

        location_equal && rotation_equal && scale_equal
    }
}

fn safe_recip(v: Vec3) -> Vec3 {
    let r = |c: f32| if c.abs() > f32::EPSILON { 1.0 / c } else { 0.0 };
    Vec3::new(r(v.x), r(v.y), r(v.z))
}
