//! Collision audio system.
//!
//! Wraps a [`CollisionDebouncer`] with its table row, reads game time from
//! the host clock, and plays the chosen impact sound.

use glam::Vec3;
use tracing::{debug, info, trace, warn};

use crate::audio::{AudioSink, Listeners, SoundId};
use crate::collision::{CollisionDebouncer, CollisionProfile, CollisionVerdict, RejectReason};
use crate::game::config::{CollisionAudioSettings, ConfigResult, ImpactTable};
use crate::physics::Transform;
use crate::time::TimeSource;

/// Broadcast after an impact sound is dispatched.
#[derive(Debug, Clone, PartialEq)]
pub struct ImpactSoundPlayed {
    /// Id of the system that played the sound
    pub system_id: String,
    pub sound: SoundId,
    pub heavy: bool,
    pub volume: f32,
    pub pitch: f32,
    pub location: Vec3,
}

/// Impact-driven audio for one owner.
#[derive(Debug)]
pub struct CollisionAudioSystem {
    id: String,
    row_name: Option<String>,
    settings: CollisionAudioSettings,
    debouncer: CollisionDebouncer,
    /// Fired once per dispatched impact sound.
    pub sound_played: Listeners<ImpactSoundPlayed>,
}

impl CollisionAudioSystem {
    /// Create a system with no profile. Every impact is rejected until
    /// [`set_impact_row`](Self::set_impact_row) succeeds.
    pub fn new(id: impl Into<String>, settings: CollisionAudioSettings) -> Self {
        let gate = settings.movement_gate();
        Self {
            id: id.into(),
            row_name: None,
            settings,
            debouncer: CollisionDebouncer::new(CollisionProfile::default(), gate),
            sound_played: Listeners::new(),
        }
    }

    /// Create a system using profile `row` from `table`.
    pub fn from_table(
        id: impl Into<String>,
        table: &ImpactTable,
        row: &str,
        settings: CollisionAudioSettings,
    ) -> ConfigResult<Self> {
        let mut system = Self::new(id, settings);
        system.set_impact_row(table, row)?;
        Ok(system)
    }

    /// Point the system at another profile row.
    ///
    /// Debounce state carries over. If the row is missing the current
    /// profile is kept and an error is returned.
    pub fn set_impact_row(&mut self, table: &ImpactTable, row: &str) -> ConfigResult<()> {
        let profile = table.require_row(row)?.clone();
        self.debouncer.set_profile(profile);
        self.row_name = Some(row.to_string());
        info!(system = %self.id, row, "collision audio row loaded");
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Row the current profile came from, if any.
    pub fn row_name(&self) -> Option<&str> {
        self.row_name.as_deref()
    }

    pub fn has_profile(&self) -> bool {
        self.row_name.is_some()
    }

    pub fn profile(&self) -> &CollisionProfile {
        self.debouncer.profile()
    }

    pub fn settings(&self) -> &CollisionAudioSettings {
        &self.settings
    }

    /// Replace the settings, updating the movement gate to match.
    pub fn set_settings(&mut self, settings: CollisionAudioSettings) {
        *self.debouncer.gate_mut() = settings.movement_gate();
        self.settings = settings;
    }

    pub fn debouncer(&self) -> &CollisionDebouncer {
        &self.debouncer
    }

    /// Enable or disable playback. The retrigger cooldown restarts now.
    pub fn set_can_play(&mut self, can_play: bool, time: &dyn TimeSource) {
        self.debouncer.set_can_play(can_play, time.game_time_seconds());
    }

    pub fn set_can_ever_play(&mut self, can_ever_play: bool) {
        self.debouncer.set_can_ever_play(can_ever_play);
    }

    /// Handle one collision reported by the host's physics step.
    ///
    /// Accepted impacts play their sound (if the profile has one for the
    /// chosen weight class) as a one-shot at `contact_location`.
    pub fn on_impact(
        &mut self,
        impulse: Vec3,
        contact_location: Vec3,
        owner: &Transform,
        time: &dyn TimeSource,
        sink: &mut dyn AudioSink,
    ) -> CollisionVerdict {
        if !self.has_profile() {
            trace!(system = %self.id, "impact ignored, no profile loaded");
            return CollisionVerdict::Rejected(RejectReason::NoProfile);
        }

        let verdict =
            self.debouncer
                .evaluate(impulse, contact_location, owner, time.game_time_seconds());

        let CollisionVerdict::Accepted(impact) = &verdict else {
            return verdict;
        };

        if self.settings.debug_impacts {
            debug!(
                system = %self.id,
                impulse = ?impulse,
                magnitude = impact.magnitude,
                normalized = impact.normalized_magnitude,
                heavy = impact.sound.heavy,
                "impact accepted"
            );
        }

        match &impact.sound.sound {
            Some(sound) => {
                sink.play_one_shot(sound, impact.location, impact.sound.volume, impact.sound.pitch);
                self.sound_played.broadcast(&ImpactSoundPlayed {
                    system_id: self.id.clone(),
                    sound: sound.clone(),
                    heavy: impact.sound.heavy,
                    volume: impact.sound.volume,
                    pitch: impact.sound.pitch,
                    location: impact.location,
                });
            }
            None => warn!(
                system = %self.id,
                heavy = impact.sound.heavy,
                "impact accepted but the profile has no sound for it"
            ),
        }

        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{PlaybackKind, RecordingAudioSink};
    use crate::game::config::DataTable;
    use crate::time::GameClock;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn table() -> ImpactTable {
        DataTable::from_json_str(
            r#"{
                "Crate": {
                    "retrigger_cooldown": 1.0,
                    "impact_magnitude_threshold_min": 2.0,
                    "impact_magnitude_threshold_max": 10.0,
                    "sound_default": "crate_light",
                    "sound_heavy": "crate_heavy",
                    "pitch_modulation_min": 0.9,
                    "pitch_modulation_max": 1.1,
                    "volume_modulation_min": 0.3,
                    "volume_modulation_max": 1.0
                },
                "Silent": {
                    "impact_magnitude_threshold_min": 0.0,
                    "impact_magnitude_threshold_max": 1.0
                }
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_no_profile_rejects() {
        let mut system = CollisionAudioSystem::new("crate", CollisionAudioSettings::default());
        let clock = GameClock::new();
        system.set_can_play(true, &clock);
        let mut sink = RecordingAudioSink::new();

        let verdict = system.on_impact(Vec3::X * 50.0, Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);
        assert_eq!(verdict, CollisionVerdict::Rejected(RejectReason::NoProfile));
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_missing_row_keeps_profile() {
        let table = table();
        let mut system =
            CollisionAudioSystem::from_table("crate", &table, "Crate", CollisionAudioSettings::default())
                .unwrap();
        assert!(system.set_impact_row(&table, "Nope").is_err());
        assert_eq!(system.row_name(), Some("Crate"));
        assert_eq!(system.profile().retrigger_cooldown, 1.0);
    }

    #[test]
    fn test_accepted_impact_plays_and_broadcasts() {
        let table = table();
        let mut system =
            CollisionAudioSystem::from_table("crate_7", &table, "Crate", CollisionAudioSettings::default())
                .unwrap();
        let mut clock = GameClock::new();
        system.set_can_play(true, &clock);
        clock.advance(1.5);

        let played = Rc::new(RefCell::new(Vec::new()));
        let p = Rc::clone(&played);
        system
            .sound_played
            .subscribe(move |e: &ImpactSoundPlayed| p.borrow_mut().push((e.system_id.clone(), e.sound.clone())));

        let mut sink = RecordingAudioSink::new();
        let contact = Vec3::new(1.0, 2.0, 3.0);
        let verdict = system.on_impact(Vec3::new(0.0, 12.0, 0.0), contact, &Transform::IDENTITY, &clock, &mut sink);

        assert!(verdict.is_accepted());
        let record = sink.last().unwrap();
        assert_eq!(record.sound, SoundId::new("crate_heavy"));
        assert_eq!(record.volume, 1.0);
        assert_eq!(record.kind, PlaybackKind::OneShot { location: contact, pitch: 1.0 });
        assert_eq!(
            *played.borrow(),
            vec![("crate_7".to_string(), SoundId::new("crate_heavy"))]
        );
    }

    #[test]
    fn test_accepted_without_sound_plays_nothing() {
        let table = table();
        let mut system =
            CollisionAudioSystem::from_table("barrel", &table, "Silent", CollisionAudioSettings::default())
                .unwrap();
        let clock = GameClock::new();
        system.set_can_play(true, &clock);
        let mut sink = RecordingAudioSink::new();

        let verdict = system.on_impact(Vec3::X * 5.0, Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);
        assert!(verdict.is_accepted());
        assert!(sink.records().is_empty());
        assert!(!system.debouncer().state().first_hit);
    }

    #[test]
    fn test_set_settings_updates_gate() {
        let mut system = CollisionAudioSystem::new("crate", CollisionAudioSettings::default());
        system.set_settings(CollisionAudioSettings {
            disable_delta_threshold: true,
            ..CollisionAudioSettings::default()
        });
        assert!(system.debouncer().gate().disabled);
    }
}
