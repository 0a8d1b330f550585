//! Tracked-point state machine
//!
//! One [`TrackedPoint`] per monitored bone or custom transform. Each tick it
//! samples the pose, updates its velocity filter, and emits at most one
//! [`TrackedPointEvent`]:
//!
//! 1. Loop tier (level-triggered, no cooldown): `LoopStart` when delta rises
//!    above the loop threshold and no loop is live; `LoopStop` when the loop
//!    volume has faded to zero.
//! 2. Otherwise, discrete tiers gated by the retrigger rule: `MediumThreshold`
//!    or `HighThreshold`.
//! 3. Otherwise, a live loop's volume chases the delta-derived target.
//!
//! # States
//!
//! `Idle` and `LoopActive`, derived from whether a loop handle is held. The
//! retrigger timer runs independently of the loop state.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::audio::{SoundHandle, SoundId};
use crate::gate::RetriggerTimer;
use crate::physics::{Transform, interp_step, is_nearly_zero};
use crate::pose::PoseSource;
use crate::time::effective_delta_time;

use super::classifier::{DirectionTracker, SeverityThresholds, SeverityTier, VelocityFilter};
use super::sampler::{MotionSample, TrackingSpace, VelocitySource, sample_pose};

/// Duration of the fade applied when a loop is torn down by a reset.
pub const LOOP_RESET_FADE_SECONDS: f32 = 0.5;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Per-point configuration, as authored in a physical audio table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackedPointConfig {
    /// Bone (or custom slot) name
    pub name: String,
    /// Looping layer that fades with motion intensity
    pub sound_loop: Option<SoundId>,
    /// One-shot for medium jerks
    pub sound_medium: Option<SoundId>,
    /// One-shot for high jerks
    pub sound_high: Option<SoundId>,
    pub threshold_loop: f32,
    pub threshold_medium: f32,
    pub threshold_high: f32,
    /// Rate at which the loop volume chases its target
    pub volume_interp_speed: f32,
    /// Minimum seconds between discrete triggers
    pub retrigger_delay: f32,
    pub tracking_space: TrackingSpace,
    pub velocity_type: VelocitySource,
}

impl Default for TrackedPointConfig {
    fn default() -> Self {
        Self {
            name: "Invalid".to_string(),
            sound_loop: None,
            sound_medium: None,
            sound_high: None,
            threshold_loop: 0.2,
            threshold_medium: 3.0,
            threshold_high: 5.0,
            volume_interp_speed: 10.0,
            retrigger_delay: 0.0,
            tracking_space: TrackingSpace::Relative,
            velocity_type: VelocitySource::Rotational,
        }
    }
}

impl TrackedPointConfig {
    pub fn thresholds(&self) -> SeverityThresholds {
        SeverityThresholds {
            loop_threshold: self.threshold_loop,
            medium: self.threshold_medium,
            high: self.threshold_high,
        }
    }
}

// ============================================================================
// EVENTS
// ============================================================================

/// Transition emitted by a tracked point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedPointEvent {
    LoopStart,
    LoopStop,
    MediumThreshold,
    HighThreshold,
}

impl TrackedPointEvent {
    /// Discrete events reset the retrigger timer; loop transitions do not.
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::MediumThreshold | Self::HighThreshold)
    }
}

/// Loop state of a tracked point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    LoopActive,
}

/// Owner-level parameters for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickParams {
    /// Raw frame delta-time (seconds)
    pub delta_time: f32,
    /// Global time dilation
    pub time_dilation: f32,
    /// Back out dilation when estimating velocity
    pub ignore_dilation: bool,
    /// Velocity smoothing rate
    pub interp_speed: f32,
    /// Global output volume scalar
    pub volume_multiplier: f32,
    /// Log per-tick deltas
    pub debug: bool,
}

/// Result of one [`TrackedPoint::update`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointUpdate {
    /// Transition emitted this tick, if any
    pub event: Option<TrackedPointEvent>,
    /// New interpolated loop volume, when a live loop was modulated
    pub loop_volume: Option<f32>,
}

impl PointUpdate {
    fn event(event: TrackedPointEvent) -> Self {
        Self {
            event: Some(event),
            loop_volume: None,
        }
    }
}

// ============================================================================
// TRACKED POINT
// ============================================================================

/// Live state of one tracked point.
pub struct TrackedPoint {
    config: TrackedPointConfig,
    sample: MotionSample,
    filter: VelocityFilter,
    direction: DirectionTracker,
    retrigger: RetriggerTimer,
    delta: f32,
    direction_changed: bool,
    loop_instance: Option<Box<dyn SoundHandle>>,
    interpolated_volume: f32,
}

impl TrackedPoint {
    pub fn new(config: TrackedPointConfig) -> Self {
        Self {
            config,
            sample: MotionSample::default(),
            filter: VelocityFilter::default(),
            direction: DirectionTracker::default(),
            retrigger: RetriggerTimer::new(),
            delta: 0.0,
            direction_changed: false,
            loop_instance: None,
            interpolated_volume: 0.0,
        }
    }

    pub fn config(&self) -> &TrackedPointConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Jerk metric computed on the last successful update (always >= 0).
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Current loop volume in `[0, 1]` (0 when no loop is live).
    pub fn interpolated_volume(&self) -> f32 {
        self.interpolated_volume
    }

    pub fn time_since_last_trigger(&self) -> f32 {
        self.retrigger.elapsed()
    }

    /// Whether the last custom sample reversed direction.
    pub fn direction_changed(&self) -> bool {
        self.direction_changed
    }

    pub fn loop_state(&self) -> LoopState {
        if self.loop_instance.is_some() {
            LoopState::LoopActive
        } else {
            LoopState::Idle
        }
    }

    pub fn sample(&self) -> &MotionSample {
        &self.sample
    }

    /// Latest sampled position (in the point's tracking space).
    pub fn current_position(&self) -> Vec3 {
        self.sample.new_position
    }

    /// Intensity for a medium one-shot at the current delta.
    pub fn medium_intensity(&self) -> f32 {
        self.config.thresholds().medium_intensity(self.delta)
    }

    /// Override the velocity source (owners without a skeleton force `Custom`).
    pub fn set_velocity_source(&mut self, source: VelocitySource) {
        self.config.velocity_type = source;
    }

    /// Forget all motion history and sample the pose without evaluating, so
    /// the next update measures motion from now. Returns false if the pose
    /// could not resolve this point (custom points are never sampled here,
    /// their last supplied transform becomes the resting sample).
    pub fn prime_from_pose(&mut self, pose: &PoseSource<'_>) -> bool {
        self.filter = VelocityFilter::default();
        self.direction = DirectionTracker::default();
        self.direction_changed = false;
        self.delta = 0.0;
        self.sample.settle();

        if self.config.velocity_type == VelocitySource::Custom {
            return false;
        }
        match self.sample_finite(pose) {
            Some(transform) => {
                self.sample.push(&transform);
                self.sample.settle();
                true
            }
            None => false,
        }
    }

    /// Push an externally supplied transform (custom tracking).
    ///
    /// Non-finite transforms are dropped and the previous sample is kept.
    pub fn set_custom_transform(&mut self, transform: &Transform) {
        if !transform.is_finite() {
            debug!(point = %self.config.name, "ignoring non-finite custom transform");
            return;
        }
        self.sample.push(transform);
    }

    fn sample_finite(&self, pose: &PoseSource<'_>) -> Option<Transform> {
        sample_pose(pose, &self.config.name, self.config.tracking_space)
            .filter(Transform::is_finite)
    }

    // ------------------------------------------------------------------------
    // Loop handle ownership
    // ------------------------------------------------------------------------

    /// Take ownership of a freshly spawned loop instance.
    pub fn attach_loop(&mut self, handle: Box<dyn SoundHandle>) {
        self.loop_instance = Some(handle);
    }

    /// Stop and release the loop instance (`LoopStop`).
    pub fn stop_loop(&mut self) {
        if let Some(mut handle) = self.loop_instance.take() {
            handle.stop();
        }
    }

    /// Fade out and release the loop instance, zeroing the loop volume.
    pub fn reset_loop(&mut self) {
        if let Some(mut handle) = self.loop_instance.take() {
            handle.fade_out(LOOP_RESET_FADE_SECONDS, 0.0);
        }
        self.interpolated_volume = 0.0;
    }

    // ------------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------------

    /// Advance one tick.
    pub fn update(&mut self, pose: &PoseSource<'_>, params: &TickParams) -> PointUpdate {
        self.retrigger.advance(params.delta_time);

        let dt = effective_delta_time(params.delta_time, params.time_dilation, params.ignore_dilation);
        if dt <= 0.0 {
            return PointUpdate::default();
        }

        if self.config.velocity_type != VelocitySource::Custom {
            match self.sample_finite(pose) {
                Some(transform) => self.sample.push(&transform),
                None => return PointUpdate::default(),
            }
        }

        self.delta = match self.config.velocity_type {
            VelocitySource::Rotational => {
                self.filter
                    .track_angular(self.sample.rotation_delta(), dt, params.interp_speed)
            }
            VelocitySource::Linear => {
                self.filter
                    .track_linear(self.sample.displacement(), dt, params.interp_speed)
            }
            VelocitySource::Custom => {
                let displacement = self.sample.displacement();
                let rotational =
                    self.filter
                        .track_angular(self.sample.rotation_delta(), dt, params.interp_speed);
                let linear = self.filter.track_linear(displacement, dt, params.interp_speed);
                self.direction_changed = self
                    .direction
                    .observe(displacement, self.config.threshold_medium);
                linear + rotational
            }
        };

        if params.debug && self.delta > 0.0 {
            debug!(
                point = %self.config.name,
                delta = self.delta,
                direction_changed = self.direction_changed,
                time_since_last_trigger = self.retrigger.elapsed(),
                "tracked point delta"
            );
        }

        let thresholds = self.config.thresholds();

        // Loop tier
        if thresholds.exceeds_loop(self.delta) {
            if self.loop_instance.is_none() && self.config.sound_loop.is_some() {
                return self.emit(TrackedPointEvent::LoopStart);
            }
        } else if is_nearly_zero(self.interpolated_volume) && self.loop_instance.is_some() {
            return self.emit(TrackedPointEvent::LoopStop);
        }

        // Discrete tiers
        let bypass = self.direction_changed && self.config.tracking_space == TrackingSpace::World;
        if self.retrigger.allows(self.config.retrigger_delay, bypass) {
            match thresholds.discrete_tier(self.delta) {
                Some(SeverityTier::Medium) if self.config.sound_medium.is_some() => {
                    return self.emit(TrackedPointEvent::MediumThreshold);
                }
                Some(SeverityTier::High) if self.config.sound_high.is_some() => {
                    return self.emit(TrackedPointEvent::HighThreshold);
                }
                _ => {}
            }
        }

        // Loop modulation
        if let Some(handle) = self.loop_instance.as_mut() {
            let target = thresholds.loop_volume_target(self.delta);
            self.interpolated_volume = interp_step(
                self.interpolated_volume,
                target,
                dt,
                self.config.volume_interp_speed,
            );
            handle.set_volume_multiplier(self.interpolated_volume * params.volume_multiplier);
            return PointUpdate {
                event: None,
                loop_volume: Some(self.interpolated_volume),
            };
        }

        PointUpdate::default()
    }

    fn emit(&mut self, event: TrackedPointEvent) -> PointUpdate {
        if event.is_discrete() {
            self.retrigger.reset();
        }
        PointUpdate::event(event)
    }
}

impl std::fmt::Debug for TrackedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackedPoint")
            .field("name", &self.config.name)
            .field("delta", &self.delta)
            .field("loop_state", &self.loop_state())
            .field("interpolated_volume", &self.interpolated_volume)
            .field("time_since_last_trigger", &self.retrigger.elapsed())
            .finish()
    }
}

static_assertions::assert_impl_all!(TrackedPoint: Send);
static_assertions::assert_impl_all!(TrackedPointConfig: Send, Sync, Clone);
