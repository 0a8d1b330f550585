//! Retrigger gating
//!
//! Shared debounce rules. Tracked points count time since their last
//! discrete trigger; collision systems compare game timestamps and
//! additionally require the owner to have moved since the last accepted hit.

use crate::physics::Transform;

/// Seconds since the last discrete trigger.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RetriggerTimer {
    elapsed: f32,
}

impl RetriggerTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame of raw delta-time.
    pub fn advance(&mut self, delta_time: f32) {
        self.elapsed += delta_time.max(0.0);
    }

    /// Restart the count (on a discrete trigger).
    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// A retrigger is allowed once `delay` has elapsed, or unconditionally
    /// when `bypass` is set.
    pub fn allows(&self, delay: f32, bypass: bool) -> bool {
        self.elapsed >= delay || bypass
    }
}

/// True once at least `cooldown` seconds separate `last_time` and `now`.
pub fn cooldown_elapsed(last_time: f32, now: f32, cooldown: f32) -> bool {
    now - last_time >= cooldown
}

/// Spatial/angular gate on the owner's transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementGate {
    /// Per-axis location tolerance (host units)
    pub location_tolerance: f32,
    /// Rotation tolerance (degrees)
    pub rotation_tolerance_deg: f32,
    /// Skip the check entirely
    pub disabled: bool,
}

impl MovementGate {
    /// Whether `current` is far enough from `last` to accept a new trigger.
    ///
    /// Always passes for the first hit or when disabled. Otherwise the
    /// transforms must *not* be nearly equal under the configured
    /// tolerances.
    pub fn passes(&self, first_hit: bool, last: &Transform, current: &Transform) -> bool {
        if self.disabled || first_hit {
            return true;
        }
        !last.nearly_equal(current, self.location_tolerance, self.rotation_tolerance_deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn test_retrigger_timer() {
        let mut timer = RetriggerTimer::new();
        timer.advance(0.3);
        assert!(!timer.allows(0.5, false));
        assert!(timer.allows(0.5, true));

        timer.advance(0.2);
        assert!(timer.allows(0.5, false));

        timer.reset();
        assert_eq!(timer.elapsed(), 0.0);
        assert!(timer.allows(0.0, false));
    }

    #[test]
    fn test_cooldown_elapsed() {
        assert!(!cooldown_elapsed(1.0, 1.5, 1.0));
        assert!(cooldown_elapsed(1.0, 2.0, 1.0));
        assert!(cooldown_elapsed(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_movement_gate() {
        let gate = MovementGate {
            location_tolerance: 25.0,
            rotation_tolerance_deg: 90.0,
            disabled: false,
        };
        let origin = Transform::IDENTITY;
        let nudged = Transform::from_translation(Vec3::new(5.0, 0.0, 0.0));
        let moved = Transform::from_translation(Vec3::new(0.0, 40.0, 0.0));
        let turned =
            Transform::from_rotation_translation(Quat::from_rotation_x(std::f32::consts::PI), Vec3::ZERO);

        assert!(!gate.passes(false, &origin, &nudged));
        assert!(gate.passes(false, &origin, &moved));
        assert!(gate.passes(false, &origin, &turned));
        assert!(gate.passes(true, &origin, &nudged));

        let disabled = MovementGate { disabled: true, ..gate };
        assert!(disabled.passes(false, &origin, &origin));
    }
}
