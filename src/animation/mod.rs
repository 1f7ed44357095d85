//! Animation system for automatic camera motion.
//!
//! Easing curves plus a tick-driven scheduler that the navigation
//! controllers use for snap-back corrections.

pub mod easing;
pub mod scheduler;

pub use easing::EasingFunction;
pub use scheduler::{
    AnimationDescription, AnimationHandle, AnimationScheduler, AnimationStatus,
};
