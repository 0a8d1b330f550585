//! Headless physical audio simulator.
//!
//! Loads the audio tables from `assets/audio/` (or the directory given as the
//! first argument), then drives a scripted robot skeleton, an externally
//! driven chain, and a series of crate impacts through the audio systems.
//! Every event and playback call is logged.
//!
//! Set `RUST_LOG=debug` to see per-point deltas and accepted impacts.

use std::cell::Cell;
use std::f32::consts::TAU;
use std::path::PathBuf;
use std::rc::Rc;

use glam::{Quat, Vec3};
use tracing::info;
use tracing_subscriber::EnvFilter;

use physical_audio_engine::audio::{PlaybackKind, RecordingAudioSink};
use physical_audio_engine::game::config::{
    CollisionAudioSettings, ConfigError, ImpactTable, MotionAudioSettings, PhysicalAudioTable,
};
use physical_audio_engine::game::systems::{
    CollisionAudioSystem, CustomTickRequest, LoopModulated, MotionAudioSystem,
};
use physical_audio_engine::pose::{BonePose, PoseKind, PoseSource};
use physical_audio_engine::{GameClock, Transform};

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 240;

fn main() -> Result<(), ConfigError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("===========================================");
    println!("   Physical Audio - Headless Simulator");
    println!("===========================================");

    let assets = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets/audio"));

    let motion_table = PhysicalAudioTable::load(assets.join("physical_audio.json"))?;
    let impact_table = ImpactTable::load(assets.join("collision_impacts.json"))?;

    let mut clock = GameClock::new();
    let mut sink = RecordingAudioSink::new();

    // Robot: skeletal owner, bones sampled from the pose
    let mut robot_pose = BonePose::new(Transform::IDENTITY);
    robot_pose.set_bone("hand_r", Transform::from_translation(Vec3::new(0.0, 40.0, 120.0)));
    robot_pose.set_bone("head", Transform::from_translation(Vec3::new(0.0, 0.0, 170.0)));

    let mut robot = MotionAudioSystem::from_table(
        &motion_table,
        "Robot",
        MotionAudioSettings::default(),
        PoseKind::Skeletal,
    )?;
    robot.listeners.loop_modulated.subscribe(|e: &LoopModulated| {
        tracing::trace!(point = %e.name, volume = e.volume, "loop modulated");
    });
    robot.set_can_play(true, &PoseSource::Skeletal(&robot_pose));

    // Chain: no skeleton, transforms supplied through the custom tick
    let chain_time = Rc::new(Cell::new(0.0_f32));
    let mut chain = MotionAudioSystem::from_table(
        &motion_table,
        "Chain",
        MotionAudioSettings {
            ignore_dilation: true,
            ..MotionAudioSettings::default()
        },
        PoseKind::External,
    )?;
    let t = Rc::clone(&chain_time);
    chain
        .listeners
        .custom_tick
        .subscribe(move |_: &CustomTickRequest| Some(chain_link_transform(t.get())));
    chain.set_can_play(true, &PoseSource::External);

    // Crate: impacts reported by the physics step
    let mut crate_audio = CollisionAudioSystem::from_table(
        "crate_01",
        &impact_table,
        "WoodenCrate",
        CollisionAudioSettings::default(),
    )?;
    crate_audio.set_can_play(true, &clock);
    let mut crate_owner = Transform::from_translation(Vec3::new(200.0, 0.0, 0.0));

    for frame in 0..FRAMES {
        if frame == FRAMES / 2 {
            clock.set_time_dilation(0.5);
            info!("time dilation set to 0.5");
        }
        clock.advance(FRAME_TIME);
        let t = frame as f32 * FRAME_TIME;
        chain_time.set(t);

        animate_robot(&mut robot_pose, frame, t);

        for event in robot.tick(FRAME_TIME, &clock, &PoseSource::Skeletal(&robot_pose), &mut sink) {
            info!(owner = "robot", frame, point = %event.name, event = ?event.event, "motion event");
        }
        for event in chain.tick(FRAME_TIME, &clock, &PoseSource::External, &mut sink) {
            info!(owner = "chain", frame, point = %event.name, event = ?event.event, "motion event");
        }

        if let Some(impulse) = scripted_impulse(frame) {
            crate_owner.translation.x += 30.0;
            let contact = crate_owner.translation - Vec3::Z * 10.0;
            let verdict = crate_audio.on_impact(impulse, contact, &crate_owner, &clock, &mut sink);
            info!(owner = "crate_01", frame, impulse = impulse.length(), ?verdict, "impact");
        }
    }

    robot.set_can_play(false, &PoseSource::Skeletal(&robot_pose));
    chain.set_can_play(false, &PoseSource::External);

    for record in sink.records() {
        match &record.kind {
            PlaybackKind::OneShot { location, pitch } => info!(
                sound = %record.sound,
                volume = record.volume,
                pitch,
                location = ?location,
                "one-shot"
            ),
            PlaybackKind::Attached { identity, location } => info!(
                sound = %record.sound,
                volume = record.volume,
                identity = identity.as_str(),
                location = ?location,
                "attached"
            ),
        }
    }
    info!(playbacks = sink.records().len(), "simulation finished");
    Ok(())
}

/// Slow sway of the hand and head with one sharp jerk of the hand.
fn animate_robot(pose: &mut BonePose, frame: u32, t: f32) {
    let sway = (t * TAU * 0.5).sin();
    let mut hand = Vec3::new(sway * 15.0, 40.0, 120.0);
    if (60..63).contains(&frame) {
        hand.z += (frame - 59) as f32 * 2.0;
    }
    pose.set_bone("hand_r", Transform::from_translation(hand));

    let yaw = Quat::from_rotation_z(sway * 0.6);
    let nod = if frame == 150 { Quat::from_rotation_x(0.35) } else { Quat::IDENTITY };
    pose.set_bone(
        "head",
        Transform::from_rotation_translation(yaw * nod, Vec3::new(0.0, 0.0, 170.0)),
    );
}

/// Swinging chain end; every other second it snaps back.
fn chain_link_transform(t: f32) -> Transform {
    let phase = (t * TAU).sin();
    let snap = if (t as u32) % 2 == 1 && t.fract() < FRAME_TIME { -40.0 } else { 0.0 };
    Transform::from_translation(Vec3::new(phase * 25.0 + snap, 0.0, -80.0))
}

fn scripted_impulse(frame: u32) -> Option<Vec3> {
    match frame {
        20 => Some(Vec3::new(0.0, 0.0, 400.0)),
        24 => Some(Vec3::new(0.0, 0.0, 600.0)),
        80 => Some(Vec3::new(120.0, 0.0, 0.0)),
        110 => Some(Vec3::new(0.0, 950.0, 0.0)),
        200 => Some(Vec3::new(300.0, 300.0, 0.0)),
        _ => None,
    }
}
