//! Collision trigger
//!
//! Accepts or rejects discrete impacts and picks the sound to play for the
//! accepted ones.
//!
//! # Submodules
//!
//! - [`debouncer`] - Collision profile, debounce state, and impact evaluation

pub mod debouncer;

pub use debouncer::{
    AcceptedImpact, CollisionDebounceState, CollisionDebouncer, CollisionProfile, CollisionVerdict,
    ImpactSound, RejectReason,
};
