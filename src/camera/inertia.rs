//! Post-drag coasting.
//!
//! After a drag ends, the last movement sample is replayed every frame,
//! scaled by a decay factor, until it becomes too small to notice.

use crate::input::{CameraEventHandler, Movement};

/// Decayed movement length, in pixels, at which coasting stops.
pub const DEFAULT_STOP_THRESHOLD: f64 = 0.5;

/// Replays a decaying copy of the last drag movement.
#[derive(Debug, Clone, PartialEq)]
pub struct InertialTranslator {
    factor: f64,
    stop_threshold: f64,
    last_movement: Option<Movement>,
}

impl InertialTranslator {
    /// Create a translator with the given decay factor in `[0, 1)` that
    /// stops once a decayed movement is shorter than `stop_threshold` pixels.
    #[must_use]
    pub fn new(factor: f64, stop_threshold: f64) -> Self {
        Self {
            factor,
            stop_threshold,
            last_movement: None,
        }
    }

    /// Change the decay factor and stop threshold.
    pub fn configure(&mut self, factor: f64, stop_threshold: f64) {
        self.factor = factor;
        self.stop_threshold = stop_threshold;
    }

    /// Decay factor applied each frame.
    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Whether inertia applies at all. A factor of 1 would never decay.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.factor < 1.0
    }

    /// Remember a drag sample to coast from once the drag ends.
    pub fn record(&mut self, movement: Movement) {
        self.last_movement = Some(movement);
    }

    /// Forget any pending sample.
    pub fn clear(&mut self) {
        self.last_movement = None;
    }

    /// Whether a sample is still coasting.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.last_movement.is_some()
    }

    /// The sample the next frame will decay from.
    #[must_use]
    pub fn last_movement(&self) -> Option<Movement> {
        self.last_movement
    }

    /// Advance one frame of coasting.
    ///
    /// Holding the gesture's button without moving cancels the coast. When a
    /// sample is pending, the next movement continues from its end point
    /// with its extent scaled by the factor and is handed to `action`. Once
    /// the scaled extent drops to the stop threshold the sample is cleared.
    /// Returns whether `action` ran.
    pub fn maintain(
        &mut self,
        handler: &CameraEventHandler,
        mut action: impl FnMut(&Movement),
    ) -> bool {
        if handler.is_button_down() || !self.is_enabled() {
            self.clear();
            return false;
        }
        let Some(last) = self.last_movement else {
            return false;
        };

        let motion = last.delta() * self.factor;
        let extent = motion.length();
        if extent.is_nan() || extent <= self.stop_threshold {
            log::debug!("inertia settled");
            self.clear();
            return false;
        }

        let next = Movement::new(last.end_position, last.end_position + motion);
        action(&next);
        self.last_movement = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::input::{CameraEventType, InputEvent, InputSurface, MouseButton};

    fn seeded(factor: f64) -> InertialTranslator {
        let mut inertia = InertialTranslator::new(factor, DEFAULT_STOP_THRESHOLD);
        inertia.record(Movement::new(DVec2::new(100.0, 100.0), DVec2::new(140.0, 70.0)));
        inertia
    }

    #[test]
    fn test_decay_is_monotonic_and_terminates() {
        let surface = InputSurface::new(800.0, 600.0);
        let handler = surface.create_handler(CameraEventType::LeftDrag);

        for factor in [0.0, 0.3, 0.9, 0.99] {
            let mut inertia = seeded(factor);
            let mut deltas = Vec::new();
            for _ in 0..10_000 {
                if !inertia.maintain(&handler, |m| deltas.push(m.delta())) {
                    break;
                }
            }
            assert!(!inertia.is_active(), "factor {factor} never settled");

            let mut previous = 50.0;
            for delta in &deltas {
                assert!(delta.length() < previous);
                assert!(delta.x > 0.0 && delta.y < 0.0);
                previous = delta.length();
            }
        }
    }

    #[test]
    fn test_movements_chain_end_to_start() {
        let surface = InputSurface::new(800.0, 600.0);
        let handler = surface.create_handler(CameraEventType::LeftDrag);
        let mut inertia = seeded(0.5);

        let mut seen = Vec::new();
        assert!(inertia.maintain(&handler, |m| seen.push(*m)));
        assert!(inertia.maintain(&handler, |m| seen.push(*m)));
        assert_eq!(seen[0].start_position, DVec2::new(140.0, 70.0));
        assert_eq!(seen[0].delta(), DVec2::new(20.0, -15.0));
        assert_eq!(seen[1].start_position, seen[0].end_position);
        assert_eq!(seen[1].delta(), DVec2::new(10.0, -7.5));
    }

    #[test]
    fn test_pressing_the_button_cancels_coasting() {
        let surface = InputSurface::new(800.0, 600.0);
        let handler = surface.create_handler(CameraEventType::LeftDrag);
        let mut inertia = seeded(0.9);

        surface.dispatch(InputEvent::MouseButton {
            button: MouseButton::Left,
            pressed: true,
        });
        assert!(!inertia.maintain(&handler, |_| {}));
        assert!(!inertia.is_active());
    }

    #[test]
    fn test_stop_threshold_cuts_coasting_short() {
        let surface = InputSurface::new(800.0, 600.0);
        let handler = surface.create_handler(CameraEventType::LeftDrag);
        let coast = |mut inertia: InertialTranslator| {
            let mut frames = 0;
            while inertia.maintain(&handler, |_| {}) {
                frames += 1;
            }
            frames
        };

        let mut coarse = InertialTranslator::new(0.5, 10.0);
        coarse.record(Movement::new(DVec2::new(100.0, 100.0), DVec2::new(140.0, 70.0)));

        // 50 px halves to 25, 12.5, then 6.25 falls under the threshold
        assert_eq!(coast(coarse), 2);
        assert!(coast(seeded(0.5)) > 2);
    }

    #[test]
    fn test_factor_of_one_disables_inertia() {
        let surface = InputSurface::new(800.0, 600.0);
        let handler = surface.create_handler(CameraEventType::LeftDrag);
        let mut inertia = seeded(1.0);
        assert!(!inertia.is_enabled());
        assert!(!inertia.maintain(&handler, |_| {}));
        assert!(!inertia.is_active());
    }
}
