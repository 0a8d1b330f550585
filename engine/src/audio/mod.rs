//! Audio output interface
//!
//! The cores decide *what* to play; mixing and playback belong to the host.
//! Playback goes through [`AudioSink`], live sounds are controlled through
//! [`SoundHandle`], and notifications fan out through [`Listeners`].
//!
//! # Submodules
//!
//! - [`sound`] - Sound references, attachment anchors, sink and handle traits
//! - [`listeners`] - Ordered observer and responder lists for event notifications
//! - [`recording`] - An [`AudioSink`] that records every call (simulation and tests)

pub mod listeners;
pub mod recording;
pub mod sound;

pub use listeners::{ListenerId, Listeners, Responders};
pub use recording::{HandleProbe, HandleState, PlaybackKind, PlaybackRecord, RecordingAudioSink};
pub use sound::{AudioSink, SoundAnchor, SoundHandle, SoundId};
