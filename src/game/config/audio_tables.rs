//! Audio table rows
//!
//! Two tables drive the audio systems: impact tables hold one
//! [`CollisionProfile`] per row, and physical audio tables hold one
//! [`PhysicalAudioRow`] (a list of tracked points) per row.

use serde::{Deserialize, Serialize};

use crate::collision::CollisionProfile;
use crate::motion::TrackedPointConfig;

use super::data_table::{DataTable, ValidateRow};
use super::error::{ConfigError, ConfigResult};

/// Table of collision profiles keyed by row name.
pub type ImpactTable = DataTable<CollisionProfile>;

/// Table of tracked point lists keyed by row name.
pub type PhysicalAudioTable = DataTable<PhysicalAudioRow>;

/// One physical audio row: the tracked points of an owner, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalAudioRow {
    pub tracked_points: Vec<TrackedPointConfig>,
}

fn non_negative(row: &str, field: impl Into<String>, value: f32) -> ConfigResult<()> {
    if value < 0.0 {
        return Err(ConfigError::Negative {
            row: row.to_string(),
            field: field.into(),
            value,
        });
    }
    Ok(())
}

impl ValidateRow for CollisionProfile {
    fn validate(&self, row: &str) -> ConfigResult<()> {
        non_negative(row, "retrigger_cooldown", self.retrigger_cooldown)?;

        let ranges = [
            (
                "impact_magnitude",
                self.impact_magnitude_threshold_min,
                self.impact_magnitude_threshold_max,
                true,
            ),
            (
                "volume_modulation",
                self.volume_modulation_min,
                self.volume_modulation_max,
                false,
            ),
            (
                "pitch_modulation",
                self.pitch_modulation_min,
                self.pitch_modulation_max,
                false,
            ),
        ];
        for (field, min, max, strict) in ranges {
            let ordered = if strict { min < max } else { min <= max };
            if !ordered {
                return Err(ConfigError::InvalidRange {
                    row: row.to_string(),
                    field,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl ValidateRow for TrackedPointConfig {
    fn validate(&self, row: &str) -> ConfigResult<()> {
        let ascending = self.threshold_loop < self.threshold_medium
            && self.threshold_medium < self.threshold_high;
        if !ascending {
            return Err(ConfigError::ThresholdOrder {
                row: row.to_string(),
                point: self.name.clone(),
                loop_threshold: self.threshold_loop,
                medium: self.threshold_medium,
                high: self.threshold_high,
            });
        }
        non_negative(
            row,
            format!("{}.volume_interp_speed", self.name),
            self.volume_interp_speed,
        )?;
        non_negative(
            row,
            format!("{}.retrigger_delay", self.name),
            self.retrigger_delay,
        )
    }
}

impl ValidateRow for PhysicalAudioRow {
    fn validate(&self, row: &str) -> ConfigResult<()> {
        self.tracked_points
            .iter()
            .try_for_each(|point| point.validate(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_is_valid() {
        assert!(CollisionProfile::default().validate("row").is_ok());
    }

    #[test]
    fn test_equal_magnitude_range_rejected() {
        let profile = CollisionProfile {
            impact_magnitude_threshold_min: 5.0,
            impact_magnitude_threshold_max: 5.0,
            ..CollisionProfile::default()
        };
        let err = profile.validate("Crate").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidRange { field: "impact_magnitude", .. }
        ));
    }

    #[test]
    fn test_flat_volume_range_allowed() {
        let profile = CollisionProfile {
            volume_modulation_min: 0.7,
            volume_modulation_max: 0.7,
            ..CollisionProfile::default()
        };
        assert!(profile.validate("Crate").is_ok());
    }

    #[test]
    fn test_inverted_pitch_rejected() {
        let profile = CollisionProfile {
            pitch_modulation_min: 1.2,
            pitch_modulation_max: 0.9,
            ..CollisionProfile::default()
        };
        assert!(matches!(
            profile.validate("Crate"),
            Err(ConfigError::InvalidRange { field: "pitch_modulation", .. })
        ));
    }

    #[test]
    fn test_negative_cooldown_rejected() {
        let profile = CollisionProfile {
            retrigger_cooldown: -0.1,
            ..CollisionProfile::default()
        };
        assert!(matches!(
            profile.validate("Crate"),
            Err(ConfigError::Negative { .. })
        ));
    }

    #[test]
    fn test_tracked_point_threshold_order() {
        let point = TrackedPointConfig {
            name: "hand_r".to_string(),
            threshold_loop: 0.2,
            threshold_medium: 6.0,
            threshold_high: 5.0,
            ..TrackedPointConfig::default()
        };
        let row = PhysicalAudioRow {
            tracked_points: vec![TrackedPointConfig::default(), point],
        };
        let err = row.validate("Robot").unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { ref point, .. } if point == "hand_r"));
    }

    #[test]
    fn test_negative_retrigger_delay_names_point() {
        let point = TrackedPointConfig {
            name: "hand_l".to_string(),
            retrigger_delay: -1.0,
            ..TrackedPointConfig::default()
        };
        let err = point.validate("Robot").unwrap_err();
        assert!(
            matches!(err, ConfigError::Negative { ref field, .. } if field == "hand_l.retrigger_delay")
        );
    }

    #[test]
    fn test_row_defaults_from_json() {
        let row: PhysicalAudioRow =
            serde_json::from_str(r#"{ "tracked_points": [ { "name": "spine_01" } ] }"#).unwrap();
        let point = &row.tracked_points[0];
        assert_eq!(point.name, "spine_01");
        assert_eq!(point.threshold_medium, 3.0);
        assert!(point.sound_loop.is_none());
        assert!(row.validate("Robot").is_ok());
    }
}
