//! The canvas equivalent: a drawing surface that receives raw input and
//! fans it out to gesture handlers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use glam::DVec2;

use super::event::InputEvent;
use super::handler::{CameraEventHandler, CameraEventType, GestureState};

#[derive(Debug)]
struct SurfaceState {
    size: DVec2,
    cursor: DVec2,
    listeners: Vec<Weak<RefCell<GestureState>>>,
}

/// Input surface shared between the windowing layer and the controllers.
///
/// Cloning yields another reference to the same surface.
#[derive(Debug, Clone)]
pub struct InputSurface {
    inner: Rc<RefCell<SurfaceState>>,
}

impl InputSurface {
    /// Create a surface of the given size in physical pixels.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            inner: Rc::new(RefCell::new(SurfaceState {
                size: DVec2::new(width, height),
                cursor: DVec2::ZERO,
                listeners: Vec::new(),
            })),
        }
    }

    /// Surface size in physical pixels.
    #[must_use]
    pub fn size(&self) -> DVec2 {
        self.inner.borrow().size
    }

    /// Resize the surface.
    pub fn resize(&self, width: f64, height: f64) {
        self.inner.borrow_mut().size = DVec2::new(width, height);
    }

    /// Last known cursor position.
    #[must_use]
    pub fn cursor_position(&self) -> DVec2 {
        self.inner.borrow().cursor
    }

    /// Register a new handler for `event_type`.
    #[must_use]
    pub fn create_handler(&self, event_type: CameraEventType) -> CameraEventHandler {
        let state = Rc::new(RefCell::new(GestureState::new(event_type)));
        self.inner.borrow_mut().listeners.push(Rc::downgrade(&state));
        CameraEventHandler::new(event_type, state)
    }

    /// Deliver one event to every live handler.
    pub fn dispatch(&self, event: InputEvent) {
        let mut inner = self.inner.borrow_mut();
        let cursor = inner.cursor;
        inner.listeners.retain(|listener| {
            listener.upgrade().is_some_and(|state| {
                state.borrow_mut().handle(event, cursor);
                true
            })
        });

        if let InputEvent::CursorMoved { x, y } = event {
            inner.cursor = DVec2::new(x, y);
        }
    }

    /// Number of handlers still registered.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        inner.listeners.retain(|listener| listener.strong_count() > 0);
        inner.listeners.len()
    }
}
