//! Per-gesture input state fed by an input surface.

use std::cell::RefCell;
use std::rc::Rc;

use glam::DVec2;

use super::event::{InputEvent, MouseButton};

/// Pixels of vertical movement synthesized per scrolled line.
pub const WHEEL_PIXELS_PER_LINE: f64 = 15.0;

/// Which gesture a [`CameraEventHandler`] listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraEventType {
    /// Drag with the left button held.
    LeftDrag,
    /// Drag with the middle button held.
    MiddleDrag,
    /// Drag with the right button held.
    RightDrag,
    /// Scroll wheel, reported as vertical movement.
    Wheel,
}

impl CameraEventType {
    /// Button that drives this gesture, if any.
    #[must_use]
    pub fn button(self) -> Option<MouseButton> {
        match self {
            Self::LeftDrag => Some(MouseButton::Left),
            Self::MiddleDrag => Some(MouseButton::Middle),
            Self::RightDrag => Some(MouseButton::Right),
            Self::Wheel => None,
        }
    }
}

/// Screen-space movement accumulated over one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Movement {
    /// Window position where the movement began.
    pub start_position: DVec2,
    /// Window position where the movement ended.
    pub end_position: DVec2,
}

impl Movement {
    /// Create a movement between two window positions.
    #[must_use]
    pub const fn new(start_position: DVec2, end_position: DVec2) -> Self {
        Self {
            start_position,
            end_position,
        }
    }

    /// End minus start.
    #[must_use]
    pub fn delta(&self) -> DVec2 {
        self.end_position - self.start_position
    }

    /// Length of the movement in pixels.
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        self.delta().length()
    }
}

#[derive(Debug)]
pub(crate) struct GestureState {
    event_type: CameraEventType,
    button_down: bool,
    pending: Option<Movement>,
    last_movement: Option<Movement>,
}

impl GestureState {
    pub(crate) fn new(event_type: CameraEventType) -> Self {
        Self {
            event_type,
            button_down: false,
            pending: None,
            last_movement: None,
        }
    }

    /// Fold one event into the gesture. `cursor` is the pointer position
    /// before the event was applied.
    pub(crate) fn handle(&mut self, event: InputEvent, cursor: DVec2) {
        match event {
            InputEvent::MouseButton { button, pressed }
                if Some(button) == self.event_type.button() =>
            {
                self.button_down = pressed;
                if pressed {
                    self.pending = None;
                    self.last_movement = None;
                }
            }
            InputEvent::CursorMoved { x, y } if self.button_down => {
                self.extend(cursor, DVec2::new(x, y));
            }
            InputEvent::Scroll { delta } if self.event_type == CameraEventType::Wheel => {
                let start = self.pending.map_or(DVec2::ZERO, |m| m.end_position);
                let end = start + DVec2::new(0.0, delta * WHEEL_PIXELS_PER_LINE);
                self.extend(start, end);
            }
            _ => {}
        }
    }

    fn extend(&mut self, from: DVec2, to: DVec2) {
        let start = self.pending.map_or(from, |m| m.start_position);
        self.pending = Some(Movement::new(start, to));
    }
}

/// Reports button and movement state for one gesture on an input surface.
///
/// Created through [`InputSurface::create_handler`](super::InputSurface::create_handler).
/// The handler unregisters from its surface when destroyed or dropped.
#[derive(Debug)]
pub struct CameraEventHandler {
    event_type: CameraEventType,
    state: Option<Rc<RefCell<GestureState>>>,
}

impl CameraEventHandler {
    pub(crate) fn new(event_type: CameraEventType, state: Rc<RefCell<GestureState>>) -> Self {
        Self {
            event_type,
            state: Some(state),
        }
    }

    /// Gesture this handler reports.
    #[must_use]
    pub fn event_type(&self) -> CameraEventType {
        self.event_type
    }

    /// Whether the gesture's button is held. Always false for the wheel.
    #[must_use]
    pub fn is_button_down(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.borrow().button_down)
    }

    /// Whether movement arrived since the last [`movement`](Self::movement).
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.state.as_ref().is_some_and(|s| s.borrow().pending.is_some())
    }

    /// Take the movement accumulated since the previous call.
    pub fn movement(&self) -> Option<Movement> {
        let state = self.state.as_ref()?;
        let mut state = state.borrow_mut();
        let movement = state.pending.take()?;
        state.last_movement = Some(movement);
        Some(movement)
    }

    /// Most recent movement handed out by [`movement`](Self::movement)
    /// during the current press.
    #[must_use]
    pub fn last_movement(&self) -> Option<Movement> {
        self.state.as_ref().and_then(|s| s.borrow().last_movement)
    }

    /// Stop listening to the surface.
    pub fn destroy(&mut self) {
        self.state = None;
    }

    /// Whether [`destroy`](Self::destroy) was called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.state.is_none()
    }
}
