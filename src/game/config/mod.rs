//! Config Module
//!
//! Audio data tables, per-owner settings, and load-time validation.

pub mod audio_settings;
pub mod audio_tables;
pub mod data_table;
pub mod error;

pub use audio_settings::{CollisionAudioSettings, MotionAudioSettings};
pub use audio_tables::{ImpactTable, PhysicalAudioRow, PhysicalAudioTable};
pub use data_table::{DataTable, ValidateRow};
pub use error::{ConfigError, ConfigResult};
