//! Math type re-exports from glam
//!
//! Positions and linear velocities are `Vec3`, orientations are `Quat`.
//! Rotational velocity is tracked as the component-wise rate of change of
//! the orientation quaternion, so it lives in a `Vec4`.

pub use glam::{Quat, Vec3, Vec4};
