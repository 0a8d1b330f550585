//! Severity classifier
//!
//! Turns per-tick displacement into a smoothed "delta" and sorts it into
//! severity tiers.
//!
//! # Delta
//!
//! Raw velocity is `displacement / dt`. A trailing average of it is kept by
//! exponential interpolation, and delta is the distance between the raw
//! velocity and that average *before* the average is updated. Steady motion
//! (constant rolling, a steady walk cycle) therefore reads as near zero,
//! while sudden jerks read high.

use glam::{Vec3, Vec4};

use crate::physics::{interp_step, map_range_clamped};

/// Severity tier a delta falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityTier {
    Loop,
    Medium,
    High,
}

/// The three ascending thresholds of a tracked point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeverityThresholds {
    pub loop_threshold: f32,
    pub medium: f32,
    pub high: f32,
}

impl SeverityThresholds {
    /// Whether the loop tier should be active (strictly above its threshold).
    pub fn exceeds_loop(&self, delta: f32) -> bool {
        delta > self.loop_threshold
    }

    /// Discrete (one-shot) tier for `delta`, ignoring retrigger gating.
    pub fn discrete_tier(&self, delta: f32) -> Option<SeverityTier> {
        if delta >= self.high {
            Some(SeverityTier::High)
        } else if delta >= self.medium {
            Some(SeverityTier::Medium)
        } else {
            None
        }
    }

    /// Target loop volume: delta normalized over `[loop, high]`.
    pub fn loop_volume_target(&self, delta: f32) -> f32 {
        map_range_clamped(delta, self.loop_threshold, self.high, 0.0, 1.0)
    }

    /// One-shot intensity for a medium hit: delta normalized over `[medium, high]`.
    pub fn medium_intensity(&self, delta: f32) -> f32 {
        map_range_clamped(delta, self.medium, self.high, 0.0, 1.0)
    }
}

/// Raw and smoothed velocity for both tracked axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VelocityFilter {
    linear: Vec3,
    smoothed_linear: Vec3,
    angular: Vec4,
    smoothed_angular: Vec4,
}

impl VelocityFilter {
    /// Feed one positional displacement. Returns its delta.
    pub fn track_linear(&mut self, displacement: Vec3, delta_time: f32, interp_speed: f32) -> f32 {
        self.linear = displacement / delta_time;
        let deviation = self.linear - self.smoothed_linear;
        self.smoothed_linear = interp_step(self.smoothed_linear, self.linear, delta_time, interp_speed);
        deviation.length()
    }

    /// Feed one quaternion difference. Returns its delta.
    pub fn track_angular(&mut self, rotation_delta: Vec4, delta_time: f32, interp_speed: f32) -> f32 {
        self.angular = rotation_delta / delta_time;
        let deviation = self.angular - self.smoothed_angular;
        self.smoothed_angular = interp_step(self.smoothed_angular, self.angular, delta_time, interp_speed);
        deviation.length()
    }

    pub fn linear_velocity(&self) -> Vec3 {
        self.linear
    }

    pub fn smoothed_linear(&self) -> Vec3 {
        self.smoothed_linear
    }

    pub fn smoothed_angular(&self) -> Vec4 {
        self.smoothed_angular
    }
}

/// Detects abrupt reversals of positional motion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionTracker {
    previous: Vec3,
}

impl DirectionTracker {
    /// Compare this tick's displacement direction against the last one.
    ///
    /// Returns true when the directions are opposed or perpendicular
    /// (dot <= 0) and the displacement is at least half of
    /// `medium_threshold`. The direction is remembered either way.
    pub fn observe(&mut self, displacement: Vec3, medium_threshold: f32) -> bool {
        let direction = displacement.normalize_or_zero();
        let changed = direction.dot(self.previous) <= 0.0
            && displacement.length() >= medium_threshold * 0.5;
        self.previous = direction;
        changed
    }
}
