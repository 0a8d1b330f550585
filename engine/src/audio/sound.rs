//! Sound references and the playback interface.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Reference to a sound asset, as named in configuration rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SoundId(String);

impl SoundId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SoundId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for SoundId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an attached sound follows: the tracked identity (bone name) and
/// its location at spawn time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundAnchor<'a> {
    pub identity: &'a str,
    pub location: Vec3,
}

/// Control over a live, attached sound instance.
///
/// Dropping a handle releases control; it does not stop playback. Call
/// [`SoundHandle::stop`] or [`SoundHandle::fade_out`] first.
pub trait SoundHandle: Send {
    /// Scale the instance's volume.
    fn set_volume_multiplier(&mut self, volume: f32);

    /// Fade toward `target_volume` over `duration` seconds, then stop.
    fn fade_out(&mut self, duration: f32, target_volume: f32);

    /// Stop immediately.
    fn stop(&mut self);
}

/// Host playback service.
pub trait AudioSink {
    /// Fire-and-forget playback at a world location.
    fn play_one_shot(&mut self, sound: &SoundId, location: Vec3, volume: f32, pitch: f32);

    /// Spawn a sound attached to `anchor`. Returns `None` if the host could
    /// not create an instance.
    fn play_attached(
        &mut self,
        sound: &SoundId,
        anchor: &SoundAnchor<'_>,
        volume: f32,
    ) -> Option<Box<dyn SoundHandle>>;
}
