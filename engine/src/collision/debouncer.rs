//! Collision debouncer
//!
//! An impact is accepted only if every gate passes, in this order:
//!
//! 1. Playback is enabled (`can_play` and `can_ever_play`).
//! 2. The owner moved since the last accepted hit (skipped for the first hit
//!    after enabling, or when the movement gate is disabled).
//! 3. The retrigger cooldown has elapsed since the last accepted hit.
//! 4. The impulse magnitude is above the profile minimum.
//!
//! Accepted impacts map their magnitude onto `[0, 1]` between the profile's
//! min/max thresholds. At 1 (inclusive) the heavy sound plays at unit volume
//! and pitch; below it, the light sound plays with volume and pitch mapped
//! from the normalized magnitude.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::audio::SoundId;
use crate::gate::{MovementGate, cooldown_elapsed};
use crate::physics::{Transform, map_range_clamped};

// ============================================================================
// PROFILE
// ============================================================================

/// Collision audio configuration, as authored in an impact table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionProfile {
    /// Minimum seconds between accepted impacts
    pub retrigger_cooldown: f32,
    /// Impulses at or below this magnitude are ignored
    pub impact_magnitude_threshold_min: f32,
    /// Impulses at or above this magnitude play the heavy sound
    pub impact_magnitude_threshold_max: f32,
    /// Light impact sound
    pub sound_default: Option<SoundId>,
    /// Heavy impact sound
    pub sound_heavy: Option<SoundId>,
    pub pitch_modulation_min: f32,
    pub pitch_modulation_max: f32,
    pub volume_modulation_min: f32,
    pub volume_modulation_max: f32,
}

impl Default for CollisionProfile {
    fn default() -> Self {
        Self {
            retrigger_cooldown: 0.0,
            impact_magnitude_threshold_min: 0.0,
            impact_magnitude_threshold_max: 1.0,
            sound_default: None,
            sound_heavy: None,
            pitch_modulation_min: 1.0,
            pitch_modulation_max: 1.0,
            volume_modulation_min: 1.0,
            volume_modulation_max: 1.0,
        }
    }
}

impl CollisionProfile {
    /// Map a raw impulse magnitude onto `[0, 1]` between the thresholds.
    pub fn normalized_magnitude(&self, magnitude: f32) -> f32 {
        map_range_clamped(
            magnitude,
            self.impact_magnitude_threshold_min,
            self.impact_magnitude_threshold_max,
            0.0,
            1.0,
        )
    }

    /// Choose sound, volume and pitch for a normalized magnitude.
    pub fn select_sound(&self, normalized: f32) -> ImpactSound {
        if normalized >= 1.0 {
            ImpactSound {
                sound: self.sound_heavy.clone(),
                volume: 1.0,
                pitch: 1.0,
                heavy: true,
            }
        } else {
            ImpactSound {
                sound: self.sound_default.clone(),
                volume: map_range_clamped(
                    normalized,
                    0.0,
                    1.0,
                    self.volume_modulation_min,
                    self.volume_modulation_max,
                ),
                pitch: map_range_clamped(
                    normalized,
                    0.0,
                    1.0,
                    self.pitch_modulation_min,
                    self.pitch_modulation_max,
                ),
                heavy: false,
            }
        }
    }
}

// ============================================================================
// VERDICT
// ============================================================================

/// Sound chosen for an accepted impact.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactSound {
    /// `None` when the profile has no sound for this weight class
    pub sound: Option<SoundId>,
    pub volume: f32,
    pub pitch: f32,
    pub heavy: bool,
}

/// Details of an accepted impact.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedImpact {
    /// Raw impulse magnitude
    pub magnitude: f32,
    /// Magnitude normalized between the profile thresholds
    pub normalized_magnitude: f32,
    /// Where the contact happened
    pub location: Vec3,
    pub sound: ImpactSound,
}

/// Why an impact was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// `can_play` or `can_ever_play` is off
    PlaybackDisabled,
    /// The owner has not moved enough since the last accepted hit
    NotMoved,
    /// The retrigger cooldown has not elapsed
    Cooldown,
    /// Impulse magnitude not above the minimum threshold
    ImpulseTooWeak,
    /// The owning system has no profile loaded
    NoProfile,
}

/// Outcome of [`CollisionDebouncer::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub enum CollisionVerdict {
    Accepted(AcceptedImpact),
    Rejected(RejectReason),
}

impl CollisionVerdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CollisionVerdict::Accepted(_))
    }
}

// ============================================================================
// DEBOUNCE STATE
// ============================================================================

/// Mutable debounce bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionDebounceState {
    /// Owner transform at the last accepted hit
    pub last_accepted_transform: Transform,
    /// Game time of the last accepted hit (or of the last enable)
    pub last_accepted_time: f32,
    /// Game time of the last rejected hit
    pub last_rejected_time: f32,
    /// True until the first accepted hit after playback is (re-)enabled
    pub first_hit: bool,
    pub can_play: bool,
    pub can_ever_play: bool,
    /// Whether the last accepted hit chose the heavy sound
    pub last_hit_heavy: bool,
}

impl Default for CollisionDebounceState {
    fn default() -> Self {
        Self {
            last_accepted_transform: Transform::IDENTITY,
            last_accepted_time: 0.0,
            last_rejected_time: 0.0,
            first_hit: true,
            can_play: false,
            can_ever_play: true,
            last_hit_heavy: false,
        }
    }
}

// ============================================================================
// DEBOUNCER
// ============================================================================

/// Profile + movement gate + state for one collision audio owner.
#[derive(Debug, Clone)]
pub struct CollisionDebouncer {
    profile: CollisionProfile,
    gate: MovementGate,
    state: CollisionDebounceState,
}

impl CollisionDebouncer {
    pub fn new(profile: CollisionProfile, gate: MovementGate) -> Self {
        Self {
            profile,
            gate,
            state: CollisionDebounceState::default(),
        }
    }

    pub fn profile(&self) -> &CollisionProfile {
        &self.profile
    }

    /// Swap in a new profile. Debounce state is kept.
    pub fn set_profile(&mut self, profile: CollisionProfile) {
        self.profile = profile;
    }

    pub fn gate(&self) -> &MovementGate {
        &self.gate
    }

    pub fn gate_mut(&mut self) -> &mut MovementGate {
        &mut self.gate
    }

    pub fn state(&self) -> &CollisionDebounceState {
        &self.state
    }

    /// Enable or disable playback at game time `now`.
    ///
    /// Either way the cooldown restarts from `now` and the next hit counts
    /// as a first hit.
    pub fn set_can_play(&mut self, can_play: bool, now: f32) {
        self.state.can_play = can_play;
        self.state.last_accepted_time = now;
        self.state.first_hit = true;
    }

    /// Permanently allow or forbid playback. Re-allowing re-arms the first hit.
    pub fn set_can_ever_play(&mut self, can_ever_play: bool) {
        self.state.can_ever_play = can_ever_play;
        if can_ever_play {
            self.state.first_hit = true;
        }
    }

    /// Run every gate against one impact.
    pub fn evaluate(
        &mut self,
        impulse: Vec3,
        contact_location: Vec3,
        owner: &Transform,
        now: f32,
    ) -> CollisionVerdict {
        let magnitude = impulse.length();

        if let Err(reason) = self.check_gates(magnitude, owner, now) {
            self.state.last_rejected_time = now;
            trace!(?reason, magnitude, now, "impact rejected");
            return CollisionVerdict::Rejected(reason);
        }

        let normalized_magnitude = self.profile.normalized_magnitude(magnitude);
        let sound = self.profile.select_sound(normalized_magnitude);

        self.state.last_accepted_transform = *owner;
        self.state.last_accepted_time = now;
        self.state.first_hit = false;
        self.state.last_hit_heavy = sound.heavy;

        CollisionVerdict::Accepted(AcceptedImpact {
            magnitude,
            normalized_magnitude,
            location: contact_location,
            sound,
        })
    }

    fn check_gates(&self, magnitude: f32, owner: &Transform, now: f32) -> Result<(), RejectReason> {
        if !(self.state.can_play && self.state.can_ever_play) {
            return Err(RejectReason::PlaybackDisabled);
        }
        if !self
            .gate
            .passes(self.state.first_hit, &self.state.last_accepted_transform, owner)
        {
            return Err(RejectReason::NotMoved);
        }
        if !cooldown_elapsed(self.state.last_accepted_time, now, self.profile.retrigger_cooldown) {
            return Err(RejectReason::Cooldown);
        }
        if magnitude <= self.profile.impact_magnitude_threshold_min {
            return Err(RejectReason::ImpulseTooWeak);
        }
        Ok(())
    }
}
