//! Pose sources
//!
//! Where tracked points read their transforms from. A skeletal owner can
//! resolve bones by name; a static owner only has its own transform; an
//! external owner has nothing to sample, and the host pushes transforms in
//! directly (custom tracking).
//!
//! The source is an enum so that each tick dispatches on it once, instead of
//! probing the owner's type per tracked point.

use std::collections::HashMap;

use glam::Vec3;

use crate::physics::Transform;

/// A pose that can resolve named bones.
pub trait SkeletalPose {
    /// World transform of the owning mesh component.
    fn component_transform(&self) -> Transform;

    /// World transform of `bone`, or `None` if the skeleton has no such bone.
    fn bone_transform(&self, bone: &str) -> Option<Transform>;
}

/// Kind of owner a motion audio system is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoseKind {
    Skeletal,
    Static,
    External,
}

/// The pose an owner exposes for one tick.
#[derive(Clone, Copy)]
pub enum PoseSource<'a> {
    /// Skeletal mesh: bones are resolvable by name.
    Skeletal(&'a dyn SkeletalPose),
    /// Static mesh: only the owner transform is known.
    Static(Transform),
    /// Transforms are supplied externally; nothing can be sampled.
    External,
}

impl PoseSource<'_> {
    /// The owner kind this source represents.
    pub fn kind(&self) -> PoseKind {
        match self {
            PoseSource::Skeletal(_) => PoseKind::Skeletal,
            PoseSource::Static(_) => PoseKind::Static,
            PoseSource::External => PoseKind::External,
        }
    }

    /// World transform of `identity`, if this source can resolve it.
    pub fn resolve_transform(&self, identity: &str) -> Option<Transform> {
        match self {
            PoseSource::Skeletal(pose) => pose.bone_transform(identity),
            PoseSource::Static(_) | PoseSource::External => None,
        }
    }

    /// Transform of `identity` expressed in the owner component's space.
    pub fn relative_transform(&self, identity: &str) -> Option<Transform> {
        match self {
            PoseSource::Skeletal(pose) => {
                let world = pose.bone_transform(identity)?;
                Some(world.relative_to(&pose.component_transform()))
            }
            PoseSource::Static(_) | PoseSource::External => None,
        }
    }

    /// Where a sound for `identity` should be placed.
    ///
    /// Skeletal sources use the bone location and fall back to the component
    /// location for unknown bones; static sources use the owner location;
    /// external sources have no location of their own.
    pub fn anchor_location(&self, identity: &str) -> Option<Vec3> {
        match self {
            PoseSource::Skeletal(pose) => Some(
                pose.bone_transform(identity)
                    .unwrap_or_else(|| pose.component_transform())
                    .location(),
            ),
            PoseSource::Static(transform) => Some(transform.location()),
            PoseSource::External => None,
        }
    }
}

impl std::fmt::Debug for PoseSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PoseSource::Skeletal(pose) => f
                .debug_tuple("Skeletal")
                .field(&pose.component_transform())
                .finish(),
            PoseSource::Static(t) => f.debug_tuple("Static").field(t).finish(),
            PoseSource::External => f.write_str("External"),
        }
    }
}

// ============================================================================
// BONE POSE
// ============================================================================

/// Map-backed skeletal pose.
///
/// Bones are stored in component space and composed with the component
/// transform on lookup, which is how animated skeletons are usually exposed.
#[derive(Debug, Clone, Default)]
pub struct BonePose {
    component: Transform,
    bones: HashMap<String, Transform>,
}

impl BonePose {
    /// Create an empty skeleton whose component sits at `component`.
    pub fn new(component: Transform) -> Self {
        Self {
            component,
            bones: HashMap::new(),
        }
    }

    /// Move the owning component.
    pub fn set_component_transform(&mut self, component: Transform) {
        self.component = component;
    }

    /// Insert or update a bone in component space.
    pub fn set_bone(&mut self, name: impl Into<String>, local: Transform) {
        self.bones.insert(name.into(), local);
    }

    /// Remove a bone (e.g. after a skeleton swap).
    pub fn remove_bone(&mut self, name: &str) -> Option<Transform> {
        self.bones.remove(name)
    }

    /// Whether `name` exists on this skeleton.
    pub fn has_bone(&self, name: &str) -> bool {
        self.bones.contains_key(name)
    }
}

impl SkeletalPose for BonePose {
    fn component_transform(&self) -> Transform {
        self.component
    }

    fn bone_transform(&self, bone: &str) -> Option<Transform> {
        self.bones.get(bone).map(|local| self.component.compose(local))
    }
}
