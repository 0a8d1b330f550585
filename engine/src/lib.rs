//! Physical Audio Engine Library
//!
//! Turns physical simulation events into sound playback decisions. Collision
//! impulses are debounced and mapped onto light/heavy impact sounds; tracked
//! bone (or custom transform) motion is classified every tick into a looping
//! layer plus medium and high one-shots.
//!
//! Playback itself belongs to the host and is reached through
//! [`audio::AudioSink`].
//!
//! # Modules
//!
//! - [`physics`] - Vector/quaternion re-exports, TRS transforms, scalar helpers
//! - [`time`] - Time source capability and delta-time conditioning
//! - [`pose`] - Pose sources that resolve tracked identities to transforms
//! - [`audio`] - Sound references, sink/handle traits, listener lists
//! - [`gate`] - Retrigger timer, cooldown and movement gating
//! - [`motion`] - Motion tracker core (sampler, classifier, tracked points)
//! - [`collision`] - Collision debouncer
//! - [`game`] - Configuration tables and the host-facing audio systems
//!
//! # Example
//!
//! ```ignore
//! use physical_audio_engine::audio::RecordingAudioSink;
//! use physical_audio_engine::game::config::{CollisionAudioSettings, ImpactTable};
//! use physical_audio_engine::game::systems::CollisionAudioSystem;
//! use physical_audio_engine::{GameClock, Transform, Vec3};
//!
//! let table = ImpactTable::load("assets/audio/collision_impacts.json")?;
//! let mut system = CollisionAudioSystem::from_table(
//!     "crate_01",
//!     &table,
//!     "WoodenCrate",
//!     CollisionAudioSettings::default(),
//! )?;
//! let mut clock = GameClock::new();
//! system.set_can_play(true, &clock);
//! clock.advance(1.5);
//!
//! let mut sink = RecordingAudioSink::new();
//! let owner = Transform::IDENTITY;
//! system.on_impact(Vec3::new(0.0, 450.0, 0.0), Vec3::ZERO, &owner, &clock, &mut sink);
//! ```

pub mod audio;
pub mod collision;
pub mod gate;
pub mod motion;
pub mod physics;
pub mod pose;
pub mod time;

// Game-specific modules (located in src/game/ directory)
#[path = "../../src/game/mod.rs"]
pub mod game;

// Re-export math types for convenience
pub use physics::{Quat, Transform, Vec3, Vec4};
// Re-export the two cores
pub use collision::{CollisionDebouncer, CollisionProfile, CollisionVerdict, RejectReason};
pub use motion::{TrackedPoint, TrackedPointConfig, TrackedPointEvent};
// Re-export host-facing interfaces
pub use audio::{AudioSink, SoundHandle, SoundId};
pub use pose::{PoseKind, PoseSource, SkeletalPose};
pub use time::{GameClock, TimeSource};
