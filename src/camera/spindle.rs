//! Orbit ("spindle") sub-controller.
//!
//! Spins the camera about an axis through the local origin and zooms it
//! toward the point it looks at. Which gestures drive spin and zoom is part
//! of its configuration.

use glam::{DQuat, DVec3};

use super::core::Camera;
use super::inertia::InertialTranslator;
use crate::input::{CameraEventHandler, CameraEventType, InputSurface, Movement};
use crate::options::NavigationOptions;

/// Gesture bindings and rotation constraint for a [`SpindleController`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpindleConfig {
    /// Gesture that spins and tilts the camera.
    pub spin: CameraEventType,
    /// Gesture that zooms.
    pub zoom: CameraEventType,
    /// Axis every spin turns about. `None` spins about the camera's up.
    pub constrained_axis: Option<DVec3>,
    /// Whether the scroll wheel zooms as well.
    pub wheel_zoom: bool,
}

impl SpindleConfig {
    /// Bindings for the flattened-map view: middle drag spins about the map
    /// normal, right drag zooms.
    #[must_use]
    pub fn columbus_view() -> Self {
        Self {
            spin: CameraEventType::MiddleDrag,
            zoom: CameraEventType::RightDrag,
            constrained_axis: Some(DVec3::Z),
            wheel_zoom: true,
        }
    }
}

impl Default for SpindleConfig {
    fn default() -> Self {
        Self {
            spin: CameraEventType::LeftDrag,
            zoom: CameraEventType::RightDrag,
            constrained_axis: None,
            wheel_zoom: true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SpinParams {
    axis: Option<DVec3>,
    rate: f64,
    min_nadir_cos: f64,
}

#[derive(Debug, Clone, Copy)]
struct ZoomParams {
    rate: f64,
    min_distance: f64,
}

impl SpinParams {
    fn new(axis: Option<DVec3>, options: &NavigationOptions) -> Self {
        Self {
            axis,
            rate: options.spin_rate,
            min_nadir_cos: options.max_tilt_degrees.to_radians().cos(),
        }
    }
}

impl ZoomParams {
    fn new(options: &NavigationOptions) -> Self {
        Self {
            rate: options.zoom_rate,
            min_distance: options.min_zoom_distance,
        }
    }
}

/// Orbit sub-controller driven by its own spin and zoom handlers.
#[derive(Debug)]
pub struct SpindleController {
    spin_handler: CameraEventHandler,
    zoom_handler: CameraEventHandler,
    wheel_handler: Option<CameraEventHandler>,
    spin_inertia: InertialTranslator,
    zoom_inertia: InertialTranslator,
    wheel_inertia: InertialTranslator,
    spin: SpinParams,
    zoom: ZoomParams,
}

impl SpindleController {
    /// Register spin and zoom handlers on `surface` as `config` describes.
    #[must_use]
    pub fn new(surface: &InputSurface, config: SpindleConfig, options: &NavigationOptions) -> Self {
        let threshold = options.inertia_stop_threshold;
        Self {
            spin_handler: surface.create_handler(config.spin),
            zoom_handler: surface.create_handler(config.zoom),
            wheel_handler: config
                .wheel_zoom
                .then(|| surface.create_handler(CameraEventType::Wheel)),
            spin_inertia: InertialTranslator::new(options.inertia_spin, threshold),
            zoom_inertia: InertialTranslator::new(options.inertia_zoom, threshold),
            wheel_inertia: InertialTranslator::new(options.inertia_zoom, threshold),
            spin: SpinParams::new(config.constrained_axis.map(DVec3::normalize), options),
            zoom: ZoomParams::new(options),
        }
    }

    /// Pick up rates, limits and inertia factors.
    pub fn configure(&mut self, options: &NavigationOptions) {
        let threshold = options.inertia_stop_threshold;
        self.spin_inertia.configure(options.inertia_spin, threshold);
        self.zoom_inertia.configure(options.inertia_zoom, threshold);
        self.wheel_inertia.configure(options.inertia_zoom, threshold);
        self.spin = SpinParams::new(self.spin.axis, options);
        self.zoom = ZoomParams::new(options);
    }

    /// Handler for the spin gesture.
    #[must_use]
    pub fn spin_handler(&self) -> &CameraEventHandler {
        &self.spin_handler
    }

    /// Handler for the zoom gesture.
    #[must_use]
    pub fn zoom_handler(&self) -> &CameraEventHandler {
        &self.zoom_handler
    }

    /// Handler for wheel zoom, when the configuration binds it.
    #[must_use]
    pub fn wheel_handler(&self) -> Option<&CameraEventHandler> {
        self.wheel_handler.as_ref()
    }

    /// Apply this frame's spin and zoom input, or their inertia.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let spin = self.spin;
        drive(&self.spin_handler, &mut self.spin_inertia, |m| {
            spin_camera(camera, m, spin);
        });
        let zoom = self.zoom;
        drive(&self.zoom_handler, &mut self.zoom_inertia, |m| {
            zoom_camera(camera, m, zoom);
        });
        if let Some(wheel) = &self.wheel_handler {
            drive(wheel, &mut self.wheel_inertia, |m| {
                zoom_camera(camera, m, zoom);
            });
        }
        true
    }

    /// Release both handlers.
    pub fn destroy(&mut self) {
        self.spin_handler.destroy();
        self.zoom_handler.destroy();
        if let Some(wheel) = &mut self.wheel_handler {
            wheel.destroy();
        }
        self.spin_inertia.clear();
        self.zoom_inertia.clear();
        self.wheel_inertia.clear();
    }

    /// Whether [`destroy`](Self::destroy) was called.
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.spin_handler.is_destroyed()
            && self.zoom_handler.is_destroyed()
            && self.wheel_handler.as_ref().is_none_or(CameraEventHandler::is_destroyed)
    }
}

fn drive(
    handler: &CameraEventHandler,
    inertia: &mut InertialTranslator,
    mut action: impl FnMut(&Movement),
) {
    if let Some(movement) = handler.movement() {
        action(&movement);
        inertia.record(movement);
    } else {
        let _coasted = inertia.maintain(handler, action);
    }
}

fn rotate_about_origin(camera: &mut Camera, rotation: DQuat) {
    camera.position = rotation * camera.position;
    camera.direction = (rotation * camera.direction).normalize();
    camera.up = (rotation * camera.up).normalize();
}

/// Horizontal drag turns about the axis, vertical drag tilts about the
/// camera's right vector while staying within the tilt limit.
fn spin_camera(camera: &mut Camera, movement: &Movement, params: SpinParams) {
    let size = camera.viewport();
    let delta = movement.delta();

    let axis = params.axis.unwrap_or(camera.up);
    let yaw = -delta.x / size.x * std::f64::consts::TAU * params.rate;
    rotate_about_origin(camera, DQuat::from_axis_angle(axis, yaw));

    let right = camera.right();
    if right == DVec3::ZERO {
        return;
    }
    let pitch = -delta.y / size.y * std::f64::consts::PI * params.rate;
    let tilt = DQuat::from_axis_angle(right, pitch);
    let within_limit = params
        .axis
        .is_none_or(|axis| (tilt * camera.direction).dot(-axis) >= params.min_nadir_cos);
    if within_limit {
        rotate_about_origin(camera, tilt);
    }
}

/// Dragging down moves toward the look-at point, never closer than the
/// minimum distance.
fn zoom_camera(camera: &mut Camera, movement: &Movement, params: ZoomParams) {
    let height = camera.viewport().y;
    let distance = camera
        .look_at_local()
        .map_or_else(|| camera.position.length(), |center| center.distance(camera.position));

    let mut amount = movement.delta().y / height * params.rate * distance;
    if amount > 0.0 {
        amount = amount.min((distance - params.min_distance).max(0.0));
    }
    camera.position += camera.direction * amount;
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::*;
    use crate::camera::frustum::PerspectiveFrustum;
    use crate::input::{InputEvent, MouseButton};

    fn camera() -> Camera {
        let frustum = PerspectiveFrustum::new(1.0, 1.0, 0.1, 1e7);
        Camera::looking_down(DVec3::ZERO, 1000.0, frustum, DVec2::new(400.0, 400.0))
    }

    fn drag(surface: &InputSurface, button: MouseButton, from: DVec2, to: DVec2) {
        surface.dispatch(InputEvent::CursorMoved { x: from.x, y: from.y });
        surface.dispatch(InputEvent::MouseButton { button, pressed: true });
        surface.dispatch(InputEvent::CursorMoved { x: to.x, y: to.y });
    }

    #[test]
    fn test_middle_drag_spins_about_the_map_normal() {
        let surface = InputSurface::new(400.0, 400.0);
        let mut spindle =
            SpindleController::new(&surface, SpindleConfig::columbus_view(), &NavigationOptions::default());
        let mut camera = camera();
        camera.position = DVec3::new(0.0, -500.0, 1000.0);

        // Quarter of the surface width is a quarter turn at rate 1
        drag(&surface, MouseButton::Middle, DVec2::new(200.0, 200.0), DVec2::new(300.0, 200.0));
        assert!(spindle.update(&mut camera));

        assert!((camera.position.z - 1000.0).abs() < 1e-9);
        assert!((camera.position.truncate().length() - 500.0).abs() < 1e-9);
        assert!((camera.position - DVec3::new(-500.0, 0.0, 1000.0)).length() < 1e-6);
    }

    #[test]
    fn test_left_drag_is_not_bound_in_columbus_view() {
        let surface = InputSurface::new(400.0, 400.0);
        let mut spindle =
            SpindleController::new(&surface, SpindleConfig::columbus_view(), &NavigationOptions::default());
        let mut camera = camera();
        let before = camera.clone();

        drag(&surface, MouseButton::Left, DVec2::new(200.0, 200.0), DVec2::new(300.0, 250.0));
        let _ = spindle.update(&mut camera);
        assert_eq!(camera, before);
        assert!(!spindle.spin_handler().is_button_down());
    }

    #[test]
    fn test_tilt_stops_at_the_limit() {
        let surface = InputSurface::new(400.0, 400.0);
        let options = NavigationOptions::default();
        let mut spindle = SpindleController::new(&surface, SpindleConfig::columbus_view(), &options);
        let mut camera = camera();

        for _ in 0..20 {
            drag(&surface, MouseButton::Middle, DVec2::new(200.0, 200.0), DVec2::new(200.0, 180.0));
            let _ = spindle.update(&mut camera);
            surface.dispatch(InputEvent::MouseButton {
                button: MouseButton::Middle,
                pressed: false,
            });
        }

        let nadir_angle = camera.direction.angle_between(DVec3::NEG_Z).to_degrees();
        assert!(nadir_angle > 0.0);
        assert!(nadir_angle <= options.max_tilt_degrees + 1e-9);
    }

    #[test]
    fn test_zoom_respects_minimum_distance() {
        let surface = InputSurface::new(400.0, 400.0);
        let options = NavigationOptions::default();
        let mut spindle = SpindleController::new(&surface, SpindleConfig::columbus_view(), &options);
        let mut camera = camera();

        drag(&surface, MouseButton::Right, DVec2::new(200.0, 0.0), DVec2::new(200.0, 400.0));
        let _ = spindle.update(&mut camera);
        assert!((camera.position.z - options.min_zoom_distance).abs() < 1e-9);

        // Dragging up zooms back out
        surface.dispatch(InputEvent::CursorMoved { x: 200.0, y: 300.0 });
        let _ = spindle.update(&mut camera);
        assert!(camera.position.z > options.min_zoom_distance);
    }

    #[test]
    fn test_wheel_zooms_toward_the_map() {
        let surface = InputSurface::new(400.0, 400.0);
        let options = NavigationOptions {
            inertia_zoom: 0.0,
            ..NavigationOptions::default()
        };
        let mut spindle = SpindleController::new(&surface, SpindleConfig::columbus_view(), &options);
        let mut camera = camera();

        surface.dispatch(InputEvent::Scroll { delta: 2.0 });
        assert!(spindle.update(&mut camera));
        assert!(camera.position.z < 1000.0);
        assert!(camera.position.z >= options.min_zoom_distance);

        let zoomed_in = camera.position.z;
        surface.dispatch(InputEvent::Scroll { delta: -2.0 });
        let _ = spindle.update(&mut camera);
        assert!(camera.position.z > zoomed_in);
    }

    #[test]
    fn test_wheel_can_be_left_unbound() {
        let surface = InputSurface::new(400.0, 400.0);
        let config = SpindleConfig {
            wheel_zoom: false,
            ..SpindleConfig::columbus_view()
        };
        let mut spindle = SpindleController::new(&surface, config, &NavigationOptions::default());
        let mut camera = camera();
        let before = camera.clone();

        surface.dispatch(InputEvent::Scroll { delta: 3.0 });
        let _ = spindle.update(&mut camera);
        assert_eq!(camera, before);
        assert!(spindle.wheel_handler().is_none());
        assert_eq!(surface.listener_count(), 2);
    }

    #[test]
    fn test_destroy_releases_handlers() {
        let surface = InputSurface::new(400.0, 400.0);
        let mut spindle =
            SpindleController::new(&surface, SpindleConfig::default(), &NavigationOptions::default());
        assert_eq!(surface.listener_count(), 3);
        assert!(spindle.wheel_handler().is_some());

        spindle.destroy();
        assert!(spindle.is_destroyed());
        assert_eq!(surface.listener_count(), 0);
    }
}
