//! Camera model and the Columbus-View navigation controllers.
//!
//! [`ColumbusViewController`] is the entry point: it pans the camera over
//! the flattened map, delegates orbit and zoom to [`SpindleController`],
//! and keeps the camera over the map with [`BoundaryCorrector`].

/// Map-boundary enforcement and frame re-centering.
pub mod boundary;
/// Top-level Columbus-View controller.
pub mod controller;
/// Camera state, local frame, and pick rays.
pub mod core;
/// Perspective frustum parameters.
pub mod frustum;
/// Frame-based inertial decay of drag movements.
pub mod inertia;
/// Orbit and zoom sub-controller.
pub mod spindle;

pub use boundary::{BoundaryCorrector, BoundaryState};
pub use controller::{pan_delta, translate_camera, ColumbusViewController, SharedScheduler};
pub use self::core::{Camera, SharedCamera};
pub use frustum::PerspectiveFrustum;
pub use inertia::InertialTranslator;
pub use spindle::{SpindleConfig, SpindleController};
