//! Collision Audio Tests - Debounce Gates and Sound Selection
//!
//! Exercises CollisionAudioSystem end to end: enable/disable flags, the
//! movement gate, the retrigger cooldown, and light/heavy selection.

use std::cell::RefCell;
use std::rc::Rc;

use glam::{Quat, Vec3};
use physical_audio_engine::audio::{PlaybackKind, RecordingAudioSink};
use physical_audio_engine::collision::{CollisionProfile, CollisionVerdict, RejectReason};
use physical_audio_engine::game::config::{CollisionAudioSettings, ImpactTable};
use physical_audio_engine::game::systems::{CollisionAudioSystem, ImpactSoundPlayed};
use physical_audio_engine::{GameClock, SoundId, Transform};

fn profile() -> CollisionProfile {
    CollisionProfile {
        retrigger_cooldown: 1.0,
        impact_magnitude_threshold_min: 2.0,
        impact_magnitude_threshold_max: 10.0,
        sound_default: Some(SoundId::new("thud")),
        sound_heavy: Some(SoundId::new("crash")),
        pitch_modulation_min: 0.8,
        pitch_modulation_max: 1.2,
        volume_modulation_min: 0.4,
        volume_modulation_max: 1.0,
    }
}

fn system_with(settings: CollisionAudioSettings) -> CollisionAudioSystem {
    let mut table = ImpactTable::default();
    table.insert("Crate", profile()).unwrap();
    CollisionAudioSystem::from_table("crate_01", &table, "Crate", settings).unwrap()
}

/// Enabled system and a clock 1.5 s past the enable time.
fn ready() -> (CollisionAudioSystem, GameClock) {
    let mut system = system_with(CollisionAudioSettings::default());
    let mut clock = GameClock::new();
    system.set_can_play(true, &clock);
    clock.advance(1.5);
    (system, clock)
}

fn impulse(magnitude: f32) -> Vec3 {
    Vec3::new(0.0, magnitude, 0.0)
}

// ============================================================================
// Cooldown and movement gate
// ============================================================================

#[test]
fn test_second_hit_within_cooldown_rejected_when_stationary() {
    let (mut system, mut clock) = ready();
    let mut sink = RecordingAudioSink::new();
    let owner = Transform::IDENTITY;

    let first = system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink);
    assert!(first.is_accepted());

    clock.advance(0.5);
    let second = system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink);
    assert_eq!(second, CollisionVerdict::Rejected(RejectReason::NotMoved));
    assert_eq!(sink.records().len(), 1);
}

#[test]
fn test_moving_does_not_skip_cooldown() {
    let (mut system, mut clock) = ready();
    let mut sink = RecordingAudioSink::new();

    system.on_impact(impulse(6.0), Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);

    clock.advance(0.5);
    let moved = Transform::from_translation(Vec3::new(100.0, 0.0, 0.0));
    let verdict = system.on_impact(impulse(6.0), Vec3::ZERO, &moved, &clock, &mut sink);
    assert_eq!(verdict, CollisionVerdict::Rejected(RejectReason::Cooldown));

    clock.advance(0.5);
    let verdict = system.on_impact(impulse(6.0), Vec3::ZERO, &moved, &clock, &mut sink);
    assert!(verdict.is_accepted());
    assert_eq!(sink.records().len(), 2);
}

#[test]
fn test_cooldown_elapsed_but_stationary_rejected() {
    let (mut system, mut clock) = ready();
    let mut sink = RecordingAudioSink::new();
    let owner = Transform::from_translation(Vec3::new(5.0, 5.0, 5.0));

    system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink);
    clock.advance(3.0);

    // 20 units on one axis is within the 25-unit tolerance
    let nudged = Transform::from_translation(Vec3::new(25.0, 5.0, 5.0));
    let verdict = system.on_impact(impulse(6.0), Vec3::ZERO, &nudged, &clock, &mut sink);
    assert_eq!(verdict, CollisionVerdict::Rejected(RejectReason::NotMoved));
}

#[test]
fn test_rotation_alone_passes_movement_gate() {
    let (mut system, mut clock) = ready();
    let mut sink = RecordingAudioSink::new();

    system.on_impact(impulse(6.0), Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);
    clock.advance(1.0);

    let flipped = Transform::from_rotation_translation(Quat::from_rotation_y(2.0), Vec3::ZERO);
    let verdict = system.on_impact(impulse(6.0), Vec3::ZERO, &flipped, &clock, &mut sink);
    assert!(verdict.is_accepted());
}

#[test]
fn test_disabled_delta_threshold_needs_only_cooldown() {
    let mut system = system_with(CollisionAudioSettings {
        disable_delta_threshold: true,
        ..CollisionAudioSettings::default()
    });
    let mut clock = GameClock::new();
    system.set_can_play(true, &clock);
    let mut sink = RecordingAudioSink::new();

    let mut accepted = 0;
    for _ in 0..5 {
        clock.advance(1.0);
        if system
            .on_impact(impulse(6.0), Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink)
            .is_accepted()
        {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 5);
}

// ============================================================================
// Enable flags
// ============================================================================

#[test]
fn test_disabled_until_set_can_play() {
    let mut system = system_with(CollisionAudioSettings::default());
    let mut clock = GameClock::new();
    clock.advance(5.0);
    let mut sink = RecordingAudioSink::new();

    let verdict = system.on_impact(impulse(6.0), Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);
    assert_eq!(verdict, CollisionVerdict::Rejected(RejectReason::PlaybackDisabled));
    assert_eq!(system.debouncer().state().last_rejected_time, 5.0);
}

#[test]
fn test_reenable_rearms_first_hit_and_restarts_cooldown() {
    let (mut system, mut clock) = ready();
    let mut sink = RecordingAudioSink::new();
    let owner = Transform::IDENTITY;

    assert!(system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink).is_accepted());

    clock.advance(2.0);
    system.set_can_play(false, &clock);
    system.set_can_play(true, &clock);
    assert!(system.debouncer().state().first_hit);

    // Cooldown now runs from the enable time
    clock.advance(0.5);
    let verdict = system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink);
    assert_eq!(verdict, CollisionVerdict::Rejected(RejectReason::Cooldown));

    // First hit after enabling skips the movement gate
    clock.advance(0.5);
    assert!(system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink).is_accepted());
}

#[test]
fn test_can_ever_play_blocks_and_rearms() {
    let (mut system, mut clock) = ready();
    let mut sink = RecordingAudioSink::new();
    let owner = Transform::IDENTITY;

    system.set_can_ever_play(false);
    let verdict = system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink);
    assert_eq!(verdict, CollisionVerdict::Rejected(RejectReason::PlaybackDisabled));

    system.set_can_ever_play(true);
    assert!(system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink).is_accepted());

    clock.advance(1.0);
    system.set_can_ever_play(true);
    assert!(system.on_impact(impulse(6.0), Vec3::ZERO, &owner, &clock, &mut sink).is_accepted());
}

// ============================================================================
// Sound selection
// ============================================================================

#[test]
fn test_magnitude_at_max_selects_heavy() {
    let (mut system, clock) = ready();
    let mut sink = RecordingAudioSink::new();

    let verdict = system.on_impact(impulse(10.0), Vec3::ONE, &Transform::IDENTITY, &clock, &mut sink);
    let CollisionVerdict::Accepted(impact) = verdict else {
        panic!("expected acceptance");
    };
    assert!(impact.sound.heavy);
    assert!(system.debouncer().state().last_hit_heavy);

    let record = sink.last().unwrap();
    assert_eq!(record.sound, SoundId::new("crash"));
    assert_eq!(record.volume, 1.0);
    assert_eq!(record.kind, PlaybackKind::OneShot { location: Vec3::ONE, pitch: 1.0 });
}

#[test]
fn test_light_hit_maps_volume_and_pitch() {
    let (mut system, clock) = ready();
    let mut sink = RecordingAudioSink::new();

    // (4 - 2) / (10 - 2) = 0.25
    system.on_impact(impulse(4.0), Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);

    let record = sink.last().unwrap();
    assert_eq!(record.sound, SoundId::new("thud"));
    assert!((record.volume - 0.55).abs() < 1e-5);
    match record.kind {
        PlaybackKind::OneShot { pitch, .. } => assert!((pitch - 0.9).abs() < 1e-5),
        ref other => panic!("expected one-shot, got {other:?}"),
    }
    assert!(!system.debouncer().state().last_hit_heavy);
}

#[test]
fn test_weak_impulse_rejected_and_stamped() {
    let (mut system, clock) = ready();
    let mut sink = RecordingAudioSink::new();

    let verdict = system.on_impact(impulse(2.0), Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);
    assert_eq!(verdict, CollisionVerdict::Rejected(RejectReason::ImpulseTooWeak));
    assert_eq!(system.debouncer().state().last_rejected_time, 1.5);
    assert!(system.debouncer().state().first_hit);
    assert!(sink.records().is_empty());
}

#[test]
fn test_sound_played_listeners_in_registration_order() {
    let (mut system, clock) = ready();
    let mut sink = RecordingAudioSink::new();

    let log = Rc::new(RefCell::new(Vec::new()));
    for tag in ["first", "second"] {
        let log = Rc::clone(&log);
        system.sound_played.subscribe(move |e: &ImpactSoundPlayed| {
            log.borrow_mut().push(format!("{tag}:{}:{}", e.system_id, e.sound));
        });
    }

    system.on_impact(impulse(6.0), Vec3::ZERO, &Transform::IDENTITY, &clock, &mut sink);

    assert_eq!(
        *log.borrow(),
        vec!["first:crate_01:thud".to_string(), "second:crate_01:thud".to_string()]
    );
}
