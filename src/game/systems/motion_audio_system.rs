//! Motion audio system.
//!
//! Owns the ordered tracked points of one owner (a skeletal mesh, a static
//! mesh, or an externally driven transform) and turns their per-tick
//! transitions into playback calls on the host's [`AudioSink`].
//!
//! Tracked points are evaluated in configuration order every tick, so the
//! returned [`PointEvent`]s and every listener notification are ordered
//! deterministically.

use glam::Vec3;
use tracing::info;

use crate::audio::{AudioSink, Listeners, Responders, SoundAnchor, SoundId};
use crate::game::config::{ConfigResult, MotionAudioSettings, PhysicalAudioTable};
use crate::motion::{TickParams, TrackedPoint, TrackedPointConfig, TrackedPointEvent, VelocitySource};
use crate::physics::Transform;
use crate::pose::{PoseKind, PoseSource};
use crate::time::TimeSource;

// ============================================================================
// EVENTS
// ============================================================================

/// A transition emitted by one tracked point during [`MotionAudioSystem::tick`].
#[derive(Debug, Clone, PartialEq)]
pub struct PointEvent {
    /// Position of the point in configuration order
    pub index: usize,
    pub name: String,
    pub event: TrackedPointEvent,
}

/// Asks the host for a fresh transform for a `Custom` tracked point.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomTickRequest {
    pub index: usize,
    pub name: String,
}

/// A loop sound was spawned for a tracked point.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopTriggered {
    pub index: usize,
    pub name: String,
    pub sound: SoundId,
}

/// A live loop had its volume updated.
#[derive(Debug, Clone, PartialEq)]
pub struct LoopModulated {
    pub index: usize,
    pub name: String,
    /// Interpolated loop volume in `[0, 1]`, before the global multiplier
    pub volume: f32,
}

/// A medium or high one-shot was spawned attached to a tracked point.
#[derive(Debug, Clone, PartialEq)]
pub struct OneShotTriggered {
    pub index: usize,
    pub name: String,
    pub sound: SoundId,
    /// Volume the sound was spawned at
    pub intensity: f32,
}

/// Event fan-out for a [`MotionAudioSystem`].
#[derive(Debug, Default)]
pub struct MotionAudioListeners {
    /// Polled once per tick for each `Custom` point, before it is evaluated
    pub custom_tick: Responders<CustomTickRequest, Transform>,
    pub loop_triggered: Listeners<LoopTriggered>,
    pub loop_modulated: Listeners<LoopModulated>,
    pub medium_triggered: Listeners<OneShotTriggered>,
    pub heavy_triggered: Listeners<OneShotTriggered>,
}

// ============================================================================
// SYSTEM
// ============================================================================

/// Motion-driven audio for one owner.
#[derive(Debug)]
pub struct MotionAudioSystem {
    row_name: String,
    settings: MotionAudioSettings,
    pose_kind: PoseKind,
    points: Vec<TrackedPoint>,
    can_play: bool,
    volume_multiplier: f32,
    /// Event listeners; register handlers here.
    pub listeners: MotionAudioListeners,
}

impl MotionAudioSystem {
    /// Build a system from the tracked points of `row` in `table`.
    ///
    /// Owners without a skeleton cannot resolve bones, so every point of a
    /// `Static` or `External` owner is switched to custom tracking.
    pub fn from_table(
        table: &PhysicalAudioTable,
        row: &str,
        settings: MotionAudioSettings,
        pose_kind: PoseKind,
    ) -> ConfigResult<Self> {
        let configs = table.require_row(row)?.tracked_points.clone();
        let mut system = Self::with_points(configs, settings, pose_kind);
        system.row_name = row.to_string();
        info!(
            row,
            points = system.points.len(),
            ?pose_kind,
            "motion audio row loaded"
        );
        Ok(system)
    }

    /// Build a system directly from point configurations.
    pub fn with_points(
        configs: Vec<TrackedPointConfig>,
        settings: MotionAudioSettings,
        pose_kind: PoseKind,
    ) -> Self {
        Self {
            row_name: String::new(),
            settings,
            pose_kind,
            points: build_points(configs, pose_kind),
            can_play: false,
            volume_multiplier: 1.0,
            listeners: MotionAudioListeners::default(),
        }
    }

    /// Re-read the tracked points from `row`.
    ///
    /// Live loops of the old points are faded out. If playback is enabled the
    /// new points are primed from `pose` right away.
    pub fn reload_row(
        &mut self,
        table: &PhysicalAudioTable,
        row: &str,
        pose: &PoseSource<'_>,
    ) -> ConfigResult<()> {
        let configs = table.require_row(row)?.tracked_points.clone();
        for point in &mut self.points {
            point.reset_loop();
        }
        self.points = build_points(configs, self.pose_kind);
        self.row_name = row.to_string();
        if self.can_play {
            for point in &mut self.points {
                point.prime_from_pose(pose);
            }
        }
        info!(row, points = self.points.len(), "motion audio row reloaded");
        Ok(())
    }

    pub fn row_name(&self) -> &str {
        &self.row_name
    }

    pub fn settings(&self) -> &MotionAudioSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut MotionAudioSettings {
        &mut self.settings
    }

    pub fn pose_kind(&self) -> PoseKind {
        self.pose_kind
    }

    pub fn can_play(&self) -> bool {
        self.can_play
    }

    pub fn volume_multiplier(&self) -> f32 {
        self.volume_multiplier
    }

    /// Tracked points in configuration order.
    pub fn points(&self) -> &[TrackedPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&TrackedPoint> {
        self.points.get(index)
    }

    /// Index of the first point named `name`.
    pub fn point_index(&self, name: &str) -> Option<usize> {
        self.points.iter().position(|p| p.name() == name)
    }

    /// Enable or disable playback.
    ///
    /// Disabling fades out and releases every live loop before returning.
    /// Enabling also clears loops, then re-samples every non-custom point
    /// from `pose` so the first tick does not read a stale sample as motion.
    /// Setting the current value again does nothing.
    pub fn set_can_play(&mut self, can_play: bool, pose: &PoseSource<'_>) {
        if can_play == self.can_play {
            return;
        }
        self.can_play = can_play;

        for point in &mut self.points {
            point.reset_loop();
            if can_play {
                point.prime_from_pose(pose);
            }
        }
    }

    /// Scale every sound this system plays.
    pub fn set_volume_multiplier(&mut self, volume_multiplier: f32) {
        self.volume_multiplier = volume_multiplier;
    }

    /// Push a host-supplied transform into point `index`.
    ///
    /// Returns false when there is no such point.
    pub fn set_custom_tracked_transform(&mut self, index: usize, transform: &Transform) -> bool {
        match self.points.get_mut(index) {
            Some(point) => {
                point.set_custom_transform(transform);
                true
            }
            None => false,
        }
    }

    /// Evaluate every tracked point for one frame.
    ///
    /// Does nothing while playback is disabled.
    pub fn tick(
        &mut self,
        delta_time: f32,
        time: &dyn TimeSource,
        pose: &PoseSource<'_>,
        sink: &mut dyn AudioSink,
    ) -> Vec<PointEvent> {
        if !self.can_play {
            return Vec::new();
        }

        let params = TickParams {
            delta_time,
            time_dilation: time.global_time_dilation(),
            ignore_dilation: self.settings.ignore_dilation,
            interp_speed: self.settings.interp_speed,
            volume_multiplier: self.volume_multiplier,
            debug: self.settings.debug,
        };
        let dispatch = Dispatch {
            attach_one_shots: self.settings.attach_one_shots,
            volume_multiplier: self.volume_multiplier,
        };

        let mut events = Vec::new();
        for (index, point) in self.points.iter_mut().enumerate() {
            if point.config().velocity_type == VelocitySource::Custom
                && self.listeners.custom_tick.is_bound()
            {
                let request = CustomTickRequest {
                    index,
                    name: point.name().to_string(),
                };
                if let Some(transform) = self.listeners.custom_tick.poll(&request) {
                    point.set_custom_transform(&transform);
                }
            }

            let update = point.update(pose, &params);

            if let Some(volume) = update.loop_volume {
                if self.listeners.loop_modulated.is_bound() {
                    self.listeners.loop_modulated.broadcast(&LoopModulated {
                        index,
                        name: point.name().to_string(),
                        volume,
                    });
                }
            }

            if let Some(event) = update.event {
                dispatch.apply(index, point, event, pose, sink, &mut self.listeners);
                events.push(PointEvent {
                    index,
                    name: point.name().to_string(),
                    event,
                });
            }
        }
        events
    }
}

impl Drop for MotionAudioSystem {
    fn drop(&mut self) {
        for point in &mut self.points {
            point.reset_loop();
        }
    }
}

fn build_points(configs: Vec<TrackedPointConfig>, pose_kind: PoseKind) -> Vec<TrackedPoint> {
    configs
        .into_iter()
        .map(|config| {
            let mut point = TrackedPoint::new(config);
            if pose_kind != PoseKind::Skeletal {
                point.set_velocity_source(VelocitySource::Custom);
            }
            point
        })
        .collect()
}

// ============================================================================
// DISPATCH
// ============================================================================

/// Turns tracked point transitions into playback calls.
struct Dispatch {
    attach_one_shots: bool,
    volume_multiplier: f32,
}

impl Dispatch {
    fn apply(
        &self,
        index: usize,
        point: &mut TrackedPoint,
        event: TrackedPointEvent,
        pose: &PoseSource<'_>,
        sink: &mut dyn AudioSink,
        listeners: &mut MotionAudioListeners,
    ) {
        match event {
            TrackedPointEvent::LoopStart => {
                point.reset_loop();
                let Some(sound) = point.config().sound_loop.clone() else {
                    return;
                };
                let location = sound_location(point, pose);
                let anchor = SoundAnchor {
                    identity: point.name(),
                    location,
                };
                if let Some(handle) = sink.play_attached(&sound, &anchor, 0.0) {
                    point.attach_loop(handle);
                    listeners.loop_triggered.broadcast(&LoopTriggered {
                        index,
                        name: point.name().to_string(),
                        sound,
                    });
                }
            }
            TrackedPointEvent::LoopStop => point.stop_loop(),
            TrackedPointEvent::MediumThreshold => {
                let sound = point.config().sound_medium.clone();
                let intensity = point.medium_intensity() * self.volume_multiplier;
                self.one_shot(
                    index,
                    point,
                    sound,
                    intensity,
                    pose,
                    sink,
                    &mut listeners.medium_triggered,
                );
            }
            TrackedPointEvent::HighThreshold => {
                let sound = point.config().sound_high.clone();
                self.one_shot(
                    index,
                    point,
                    sound,
                    self.volume_multiplier,
                    pose,
                    sink,
                    &mut listeners.heavy_triggered,
                );
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn one_shot(
        &self,
        index: usize,
        point: &TrackedPoint,
        sound: Option<SoundId>,
        volume: f32,
        pose: &PoseSource<'_>,
        sink: &mut dyn AudioSink,
        listeners: &mut Listeners<OneShotTriggered>,
    ) {
        let Some(sound) = sound else {
            return;
        };
        let location = sound_location(point, pose);

        if self.attach_one_shots || listeners.is_bound() {
            let anchor = SoundAnchor {
                identity: point.name(),
                location,
            };
            // The one-shot keeps playing after its handle is released
            if sink.play_attached(&sound, &anchor, volume).is_some() {
                listeners.broadcast(&OneShotTriggered {
                    index,
                    name: point.name().to_string(),
                    sound,
                    intensity: volume,
                });
            }
        } else {
            sink.play_one_shot(&sound, location, volume, 1.0);
        }
    }
}

/// World location for a sound spawned by `point`.
fn sound_location(point: &TrackedPoint, pose: &PoseSource<'_>) -> Vec3 {
    pose.anchor_location(point.name())
        .unwrap_or_else(|| point.current_position())
}
