//! Magnitude/delta sampler
//!
//! Keeps the previous and current pose sample of a tracked point. Velocity
//! is derived from these by the classifier; the sampler only reads poses.

use glam::{Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::physics::Transform;
use crate::pose::PoseSource;

/// Coordinate space a tracked point is sampled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrackingSpace {
    /// Relative to the owning component (ignores whole-body movement)
    #[default]
    Relative,
    /// World space
    World,
}

/// Which motion drives the severity delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VelocitySource {
    /// Positional velocity
    Linear,
    /// Rotational velocity
    #[default]
    Rotational,
    /// Both, from externally supplied transforms, with reversal detection
    Custom,
}

/// Previous and current pose sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub old_position: Vec3,
    pub new_position: Vec3,
    pub old_rotation: Quat,
    pub new_rotation: Quat,
}

impl Default for MotionSample {
    fn default() -> Self {
        Self {
            old_position: Vec3::ZERO,
            new_position: Vec3::ZERO,
            old_rotation: Quat::IDENTITY,
            new_rotation: Quat::IDENTITY,
        }
    }
}

impl MotionSample {
    /// Shift the current sample into the previous slot and store `transform`.
    pub fn push(&mut self, transform: &Transform) {
        self.old_position = self.new_position;
        self.old_rotation = self.new_rotation;
        self.new_position = transform.translation;
        self.new_rotation = transform.rotation;
    }

    /// Collapse the previous sample onto the current one (zero motion).
    pub fn settle(&mut self) {
        self.old_position = self.new_position;
        self.old_rotation = self.new_rotation;
    }

    /// Positional change between the two samples.
    pub fn displacement(&self) -> Vec3 {
        self.new_position - self.old_position
    }

    /// Component-wise quaternion change between the two samples.
    ///
    /// The new rotation is flipped into the old one's hemisphere first, so a
    /// sign flip of an unchanged orientation reads as no motion.
    pub fn rotation_delta(&self) -> Vec4 {
        let new = if self.old_rotation.dot(self.new_rotation) < 0.0 {
            -self.new_rotation
        } else {
            self.new_rotation
        };
        Vec4::from_array(new.to_array()) - Vec4::from_array(self.old_rotation.to_array())
    }
}

/// Read the transform of `identity` from `pose` in the requested space.
///
/// Returns `None` when the source cannot resolve the identity (a bone
/// missing from the current skeleton, or a source without bones). That is
/// a normal "temporarily untracked" state, not an error.
pub fn sample_pose(pose: &PoseSource<'_>, identity: &str, space: TrackingSpace) -> Option<Transform> {
    match space {
        TrackingSpace::Relative => pose.relative_transform(identity),
        TrackingSpace::World => pose.resolve_transform(identity),
    }
}
