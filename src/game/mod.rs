//! Game Module
//!
//! Host-facing audio systems and the data tables that configure them.

pub mod config;
pub mod systems;

pub use config::{
    CollisionAudioSettings, ConfigError, DataTable, ImpactTable, MotionAudioSettings,
    PhysicalAudioRow, PhysicalAudioTable,
};
pub use systems::{CollisionAudioSystem, MotionAudioSystem, PointEvent};
