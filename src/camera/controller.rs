//! Columbus-View camera controller.
//!
//! Drives a camera over the flattened map: left drag pans with inertia,
//! middle drag orbits about the map normal, right drag zooms, and the
//! camera is kept over the finite map by [`BoundaryCorrector`].

use std::cell::RefCell;
use std::rc::Rc;

use glam::{DMat4, DVec2, DVec3};
use web_time::Instant;

use super::boundary::{BoundaryCorrector, BoundaryState};
use super::core::{Camera, SharedCamera};
use super::inertia::InertialTranslator;
use super::spindle::{SpindleConfig, SpindleController};
use crate::animation::AnimationScheduler;
use crate::error::ColumbusError;
use crate::geometry::ellipsoid::validate_radii;
use crate::geometry::{project_onto_plane, BodyGeometry, Ellipsoid, Ray};
use crate::input::{CameraEventHandler, CameraEventType, InputSurface, Movement};
use crate::options::NavigationOptions;

/// Animation scheduler shared between controllers.
pub type SharedScheduler = Rc<RefCell<AnimationScheduler>>;

/// Camera controller for the flattened-map (Columbus View) mode.
///
/// Owns its pan handler and its orbit sub-controller; both stop listening
/// on [`destroy`](Self::destroy) or when the controller is dropped. The
/// camera and the scheduler are shared and outlive the controller.
#[derive(Debug)]
pub struct ColumbusViewController {
    camera: SharedCamera,
    scheduler: SharedScheduler,
    translate_handler: CameraEventHandler,
    spindle: SpindleController,
    inertia: InertialTranslator,
    boundary: BoundaryCorrector,
    options: NavigationOptions,
    last_state: BoundaryState,
    destroyed: bool,
}

impl ColumbusViewController {
    /// Build a controller for `camera`, listening on `surface`, over the
    /// map of `body` (WGS84 when `None`), with its own scheduler.
    ///
    /// # Errors
    ///
    /// See [`with_options`](Self::with_options).
    pub fn new(
        surface: &InputSurface,
        camera: SharedCamera,
        body: Option<&dyn BodyGeometry>,
    ) -> Result<Self, ColumbusError> {
        Self::with_options(
            surface,
            camera,
            body,
            &NavigationOptions::default(),
            Rc::new(RefCell::new(AnimationScheduler::new())),
        )
    }

    /// Build a controller with explicit options and a shared scheduler.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::InvalidCollaborator`] for a camera with a
    /// zero viewport, an invalid frustum or a singular transform, and for
    /// body radii that are not finite and positive.
    pub fn with_options(
        surface: &InputSurface,
        camera: SharedCamera,
        body: Option<&dyn BodyGeometry>,
        options: &NavigationOptions,
        scheduler: SharedScheduler,
    ) -> Result<Self, ColumbusError> {
        let radii = body.map_or_else(|| Ellipsoid::WGS84.radii(), BodyGeometry::radii);
        validate_radii(radii)?;

        let transform = {
            let camera = camera.try_borrow().map_err(|_| ColumbusError::CameraInUse)?;
            camera.validate()?;
            *camera.transform()
        };

        let options = options.sanitized();
        let inertia =
            InertialTranslator::new(options.inertia_translate, options.inertia_stop_threshold);
        let mut boundary = BoundaryCorrector::new(transform, radii);
        boundary.configure(&options);

        log::debug!(
            "columbus view controller over a {:.0} x {:.0} map",
            boundary.map_half_extents().x * 2.0,
            boundary.map_half_extents().y * 2.0
        );

        Ok(Self {
            translate_handler: surface.create_handler(CameraEventType::LeftDrag),
            spindle: SpindleController::new(surface, SpindleConfig::columbus_view(), &options),
            camera,
            scheduler,
            inertia,
            boundary,
            options,
            last_state: BoundaryState::Idle,
            destroyed: false,
        })
    }

    /// Advance one frame. See [`update_at`](Self::update_at).
    ///
    /// # Errors
    ///
    /// As for [`update_at`](Self::update_at).
    pub fn update(&mut self) -> Result<bool, ColumbusError> {
        self.update_at(Instant::now())
    }

    /// Advance one frame with an explicit clock reading.
    ///
    /// In order: cancel animations if any gesture button is held, pan by
    /// this frame's drag or by inertia, tick the orbit sub-controller,
    /// correct against the map boundary, then tick the animations. Always
    /// returns `Ok(true)` while the controller is alive.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::Destroyed`] after [`destroy`](Self::destroy)
    /// and [`ColumbusError::CameraInUse`] if the camera is borrowed
    /// elsewhere.
    pub fn update_at(&mut self, now: Instant) -> Result<bool, ColumbusError> {
        if self.destroyed {
            return Err(ColumbusError::Destroyed);
        }
        let translate = &self.translate_handler;
        let spindle = &mut self.spindle;

        if translate.is_button_down()
            || spindle.zoom_handler().is_button_down()
            || spindle.spin_handler().is_button_down()
        {
            self.scheduler.borrow_mut().remove_all();
        }

        {
            let mut camera = self
                .camera
                .try_borrow_mut()
                .map_err(|_| ColumbusError::CameraInUse)?;

            if let Some(movement) = translate.movement() {
                let _moved = translate_camera(&mut camera, &movement);
                self.inertia.record(movement);
            } else if self.inertia.is_enabled() {
                let _coasted = self.inertia.maintain(translate, |m| {
                    let _moved = translate_camera(&mut camera, m);
                });
            } else {
                self.inertia.clear();
            }

            let _spun = spindle.update(&mut camera);
        }

        let dragging = translate.is_button_down();
        let coasting = self.inertia.is_active();
        let state = self.boundary.correct(
            &self.camera,
            &mut self.scheduler.borrow_mut(),
            dragging,
            coasting,
            now,
        )?;
        if state != self.last_state {
            log::debug!("boundary state {:?} -> {state:?}", self.last_state);
            self.last_state = state;
        }

        self.scheduler.borrow_mut().update_at(now);
        Ok(true)
    }

    /// Current navigation options.
    #[must_use]
    pub fn options(&self) -> &NavigationOptions {
        &self.options
    }

    /// Replace the navigation options; out-of-range values are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::Destroyed`] after [`destroy`](Self::destroy).
    pub fn set_options(&mut self, options: &NavigationOptions) -> Result<(), ColumbusError> {
        if self.destroyed {
            return Err(ColumbusError::Destroyed);
        }
        let options = options.sanitized();
        self.inertia
            .configure(options.inertia_translate, options.inertia_stop_threshold);
        self.boundary.configure(&options);
        self.spindle.configure(&options);
        self.options = options;
        Ok(())
    }

    /// The camera this controller moves.
    #[must_use]
    pub fn camera(&self) -> &SharedCamera {
        &self.camera
    }

    /// The scheduler running snap-back animations.
    #[must_use]
    pub fn scheduler(&self) -> &SharedScheduler {
        &self.scheduler
    }

    /// Half width and half height of the flattened map.
    #[must_use]
    pub fn map_half_extents(&self) -> DVec2 {
        self.boundary.map_half_extents()
    }

    /// Outcome of the most recent boundary correction.
    #[must_use]
    pub fn boundary_state(&self) -> BoundaryState {
        self.last_state
    }

    /// Whether pan inertia is still coasting.
    #[must_use]
    pub fn has_inertia(&self) -> bool {
        self.inertia.is_active()
    }

    /// Whether a snap-back animation started by this controller is running.
    #[must_use]
    pub fn correction_in_flight(&self) -> bool {
        self.boundary.correction_in_flight()
    }

    /// Handler for the pan gesture.
    #[must_use]
    pub fn translate_handler(&self) -> &CameraEventHandler {
        &self.translate_handler
    }

    /// The orbit sub-controller.
    #[must_use]
    pub fn spindle(&self) -> &SpindleController {
        &self.spindle
    }

    /// Returns true if this object was destroyed; otherwise, false.
    ///
    /// Once destroyed, every operation other than this one returns
    /// [`ColumbusError::Destroyed`].
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Release the pan handler and the orbit sub-controller, and cancel
    /// this controller's snap-back animation.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::Destroyed`] if called twice.
    pub fn destroy(&mut self) -> Result<(), ColumbusError> {
        if self.destroyed {
            return Err(ColumbusError::Destroyed);
        }
        self.translate_handler.destroy();
        self.spindle.destroy();
        if let Some(handle) = self.boundary.take_correction() {
            if let Ok(mut scheduler) = self.scheduler.try_borrow_mut() {
                let _removed = scheduler.remove(&handle);
            } else {
                log::warn!("scheduler busy during destroy, boundary correction left running");
            }
        }
        self.inertia.clear();
        self.destroyed = true;
        log::debug!("columbus view controller destroyed");
        Ok(())
    }
}

/// Planar offset that keeps the ground point under `start` under `end`.
///
/// Both world-space rays are brought into the local frame with `inverse`
/// and projected onto the map plane; the result is start point minus end
/// point. `None` when either ray runs parallel to the plane.
#[must_use]
pub fn pan_delta(inverse: &DMat4, start: &Ray, end: &Ray) -> Option<DVec3> {
    let start_point = project_onto_plane(&start.transformed(inverse))?;
    let end_point = project_onto_plane(&end.transformed(inverse))?;
    Some(start_point - end_point)
}

/// Pan `camera` so the ground under the movement's start follows the
/// cursor to its end. Returns whether the camera moved.
pub fn translate_camera(camera: &mut Camera, movement: &Movement) -> bool {
    let start = camera.pick_ray(movement.start_position);
    let end = camera.pick_ray(movement.end_position);

    match pan_delta(camera.inverse_transform(), &start, &end) {
        Some(delta) => {
            camera.position += delta;
            true
        }
        None => {
            log::debug!("pick ray parallel to the map plane, ignoring {movement:?}");
            false
        }
    }
}
