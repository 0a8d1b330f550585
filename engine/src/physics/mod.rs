//! Physics math for audio triggering
//!
//! The motion and collision cores only need a small slice of 3D math:
//! transforms, range remapping, and exponential smoothing. Vectors and
//! quaternions come from glam; everything else is defined here.
//!
//! # Unit System
//!
//! Units are whatever the host engine uses (typically centimeters or meters).
//! Thresholds in configuration rows must be authored in the same units.
//!
//! # Submodules
//!
//! - [`types`] - Core mathematical types (Vec3, Vec4, Quat) re-exported from glam
//! - [`transform`] - Translation/rotation/scale transform with tolerance comparison
//! - [`math`] - Scalar helpers: clamped range mapping, interpolation, near-zero tests

pub mod math;
pub mod transform;
pub mod types;

pub use math::{NEARLY_ZERO, interp_step, is_nearly_zero, map_range_clamped};
pub use transform::Transform;
pub use types::{Quat, Vec3, Vec4};
