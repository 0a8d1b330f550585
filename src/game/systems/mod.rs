//! Game systems: self-contained modules that own state and logic.

pub mod collision_audio_system;
pub mod motion_audio_system;

pub use collision_audio_system::{CollisionAudioSystem, ImpactSoundPlayed};
pub use motion_audio_system::{
    CustomTickRequest, LoopModulated, LoopTriggered, MotionAudioListeners, MotionAudioSystem,
    OneShotTriggered, PointEvent,
};
