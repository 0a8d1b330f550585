//! Motion tracker engine
//!
//! Classifies the motion of tracked points (bones or custom transforms) into
//! loop / medium / high severity events.
//!
//! # Submodules
//!
//! - [`sampler`] - Pose sampling, tracking space and velocity source modes
//! - [`classifier`] - Velocity smoothing, jerk delta, severity tiers, reversal detection
//! - [`tracked_point`] - Per-point state machine and its configuration

pub mod classifier;
pub mod sampler;
pub mod tracked_point;

pub use classifier::{DirectionTracker, SeverityThresholds, SeverityTier, VelocityFilter};
pub use sampler::{MotionSample, TrackingSpace, VelocitySource, sample_pose};
pub use tracked_point::{
    LOOP_RESET_FADE_SECONDS, LoopState, PointUpdate, TickParams, TrackedPoint, TrackedPointConfig,
    TrackedPointEvent,
};
