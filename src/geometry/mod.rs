//! Body geometry and ray helpers shared by the navigation controllers.

/// Reference ellipsoids and the body-geometry provider trait.
pub mod ellipsoid;
/// Rays and the flattening-plane projector.
pub mod ray;

pub use ellipsoid::{BodyGeometry, Ellipsoid};
pub use ray::{project_onto_plane, Ray, PLANE_PARALLEL_EPSILON};
