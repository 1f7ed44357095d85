//! Input handling: event types, the input surface that receives them, and
//! the per-gesture handlers the camera controllers poll each frame.

/// Platform-agnostic input events.
pub mod event;
/// Per-gesture button and movement state.
pub mod handler;
/// Event fan-out to registered handlers.
pub mod surface;

pub use event::{InputEvent, MouseButton};
pub use handler::{CameraEventHandler, CameraEventType, Movement};
pub use surface::InputSurface;
