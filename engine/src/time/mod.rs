//! Simulation time
//!
//! The host engine owns the clock. This module defines what the audio cores
//! need from it ([`TimeSource`]), a simple accumulating [`GameClock`] for
//! hosts without one, and the per-tick delta-time conditioning used by
//! velocity tracking.

/// Largest delta-time used for velocity estimation (seconds).
///
/// Frame hitches would otherwise divide a normal displacement by a tiny
/// number of ticks and read as a huge velocity spike.
pub const MAX_EFFECTIVE_DELTA_TIME: f32 = 1.0 / 45.0;

/// Read access to the host's game clock.
pub trait TimeSource {
    /// Game time in seconds since the session started (already dilated).
    fn game_time_seconds(&self) -> f32;

    /// Global time dilation (1.0 = real time, 0.5 = half speed).
    fn global_time_dilation(&self) -> f32;
}

/// Conditions a raw frame delta-time for velocity estimation.
///
/// Caps the delta at [`MAX_EFFECTIVE_DELTA_TIME`]. With `ignore_dilation`
/// set, the capped delta is further divided by `time_dilation`, so that
/// thresholds stay tuned to real-world speed during slow motion. A
/// non-positive dilation is ignored rather than dividing by it.
pub fn effective_delta_time(raw_delta_time: f32, time_dilation: f32, ignore_dilation: bool) -> f32 {
    let capped = raw_delta_time.min(MAX_EFFECTIVE_DELTA_TIME);
    if ignore_dilation && time_dilation > 0.0 {
        capped / time_dilation
    } else {
        capped
    }
}

/// Accumulating game clock.
#[derive(Debug, Clone)]
pub struct GameClock {
    /// Elapsed game time (seconds)
    game_time: f32,
    /// Global time dilation factor
    time_dilation: f32,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock {
    /// Create a clock at t = 0 running at real time.
    pub fn new() -> Self {
        Self {
            game_time: 0.0,
            time_dilation: 1.0,
        }
    }

    /// Advance by one frame. `delta_time` is the dilated frame time the host
    /// hands to its tick functions.
    pub fn advance(&mut self, delta_time: f32) {
        self.game_time += delta_time.max(0.0);
    }

    /// Change the global time dilation.
    pub fn set_time_dilation(&mut self, dilation: f32) {
        self.time_dilation = dilation;
    }
}

impl TimeSource for GameClock {
    fn game_time_seconds(&self) -> f32 {
        self.game_time
    }

    fn global_time_dilation(&self) -> f32 {
        self.time_dilation
    }
}
