//! Recording audio sink.
//!
//! Stands in for a real mixer: every playback request is appended to a log,
//! and attached sounds hand out handles whose state can be inspected through
//! a shared [`HandleProbe`]. The simulator binary prints this log; tests
//! assert on it.

use std::sync::{Arc, Mutex, MutexGuard};

use glam::Vec3;

use super::sound::{AudioSink, SoundAnchor, SoundHandle, SoundId};

/// Observable state of a handle created by [`RecordingAudioSink`].
#[derive(Debug, Clone, PartialEq)]
pub struct HandleState {
    /// Last volume multiplier applied
    pub volume_multiplier: f32,
    /// `stop()` was called
    pub stopped: bool,
    /// `(duration, target_volume)` of the last `fade_out()` call
    pub fade_out: Option<(f32, f32)>,
    /// The owner dropped the handle
    pub released: bool,
}

/// Shared view onto a recorded handle's state.
#[derive(Debug, Clone)]
pub struct HandleProbe(Arc<Mutex<HandleState>>);

impl HandleProbe {
    fn new(volume: f32) -> Self {
        Self(Arc::new(Mutex::new(HandleState {
            volume_multiplier: volume,
            stopped: false,
            fade_out: None,
            released: false,
        })))
    }

    fn lock(&self) -> MutexGuard<'_, HandleState> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Snapshot of the current handle state.
    pub fn state(&self) -> HandleState {
        self.lock().clone()
    }

    /// Whether the handle was stopped or faded out.
    pub fn is_silenced(&self) -> bool {
        let state = self.lock();
        state.stopped || state.fade_out.is_some()
    }
}

struct RecordedHandle {
    probe: HandleProbe,
}

impl SoundHandle for RecordedHandle {
    fn set_volume_multiplier(&mut self, volume: f32) {
        self.probe.lock().volume_multiplier = volume;
    }

    fn fade_out(&mut self, duration: f32, target_volume: f32) {
        self.probe.lock().fade_out = Some((duration, target_volume));
    }

    fn stop(&mut self) {
        self.probe.lock().stopped = true;
    }
}

impl Drop for RecordedHandle {
    fn drop(&mut self) {
        self.probe.lock().released = true;
    }
}

/// How a recorded sound was dispatched.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackKind {
    OneShot { location: Vec3, pitch: f32 },
    Attached { identity: String, location: Vec3 },
}

/// One playback request.
#[derive(Debug, Clone)]
pub struct PlaybackRecord {
    pub sound: SoundId,
    pub volume: f32,
    pub kind: PlaybackKind,
    /// Present for attached sounds that were granted a handle
    pub handle: Option<HandleProbe>,
}

impl PlaybackRecord {
    pub fn is_attached(&self) -> bool {
        matches!(self.kind, PlaybackKind::Attached { .. })
    }
}

/// [`AudioSink`] that records instead of playing.
#[derive(Debug, Default)]
pub struct RecordingAudioSink {
    records: Vec<PlaybackRecord>,
    refuse_attached: bool,
}

impl RecordingAudioSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, `play_attached` records the request but returns no handle,
    /// like a host that hit its voice limit.
    pub fn set_refuse_attached(&mut self, refuse: bool) {
        self.refuse_attached = refuse;
    }

    pub fn records(&self) -> &[PlaybackRecord] {
        &self.records
    }

    /// Drain the log.
    pub fn take_records(&mut self) -> Vec<PlaybackRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn last(&self) -> Option<&PlaybackRecord> {
        self.records.last()
    }

    /// Records for `sound`, in dispatch order.
    pub fn records_for<'a>(&'a self, sound: &'a SoundId) -> impl Iterator<Item = &'a PlaybackRecord> {
        self.records.iter().filter(move |r| &r.sound == sound)
    }
}

impl AudioSink for RecordingAudioSink {
    fn play_one_shot(&mut self, sound: &SoundId, location: Vec3, volume: f32, pitch: f32) {
        self.records.push(PlaybackRecord {
            sound: sound.clone(),
            volume,
            kind: PlaybackKind::OneShot { location, pitch },
            handle: None,
        });
    }

    fn play_attached(
        &mut self,
        sound: &SoundId,
        anchor: &SoundAnchor<'_>,
        volume: f32,
    ) -> Option<Box<dyn SoundHandle>> {
        let probe = (!self.refuse_attached).then(|| HandleProbe::new(volume));
        self.records.push(PlaybackRecord {
            sound: sound.clone(),
            volume,
            kind: PlaybackKind::Attached {
                identity: anchor.identity.to_string(),
                location: anchor.location,
            },
            handle: probe.clone(),
        });
        probe.map(|probe| Box::new(RecordedHandle { probe }) as Box<dyn SoundHandle>)
    }
}

static_assertions::assert_impl_all!(RecordedHandle: SoundHandle, Send);
