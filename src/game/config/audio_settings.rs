//! Audio System Settings
//!
//! Per-owner settings that live beside the table row name rather than in the
//! row itself.

use serde::{Deserialize, Serialize};

use crate::gate::MovementGate;

/// Settings for a [`MotionAudioSystem`](crate::game::systems::MotionAudioSystem).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionAudioSettings {
    /// Velocity smoothing rate
    pub interp_speed: f32,
    /// Back out global time dilation when estimating velocity
    pub ignore_dilation: bool,
    /// Spawn medium/high one-shots attached to their tracked point
    pub attach_one_shots: bool,
    /// Log per-point deltas every tick
    pub debug: bool,
}

impl Default for MotionAudioSettings {
    fn default() -> Self {
        Self {
            interp_speed: 50.0,
            ignore_dilation: false,
            attach_one_shots: false,
            debug: false,
        }
    }
}

/// Settings for a [`CollisionAudioSystem`](crate::game::systems::CollisionAudioSystem).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionAudioSettings {
    /// Per-axis movement (units) required between accepted hits
    pub location_delta_threshold: f32,
    /// Rotation (degrees) required between accepted hits
    pub rotation_delta_threshold: f32,
    /// Skip the movement requirement
    pub disable_delta_threshold: bool,
    /// Log every accepted impact
    pub debug_impacts: bool,
}

impl Default for CollisionAudioSettings {
    fn default() -> Self {
        Self {
            location_delta_threshold: 25.0,
            rotation_delta_threshold: 90.0,
            disable_delta_threshold: false,
            debug_impacts: false,
        }
    }
}

impl CollisionAudioSettings {
    pub fn movement_gate(&self) -> MovementGate {
        MovementGate {
            location_tolerance: self.location_delta_threshold,
            rotation_tolerance_deg: self.rotation_delta_threshold,
            disabled: self.disable_delta_threshold,
        }
    }
}
