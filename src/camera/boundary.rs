//! Keeps the camera over the finite flattened map.
//!
//! Every frame the local frame is re-centered under the point the camera
//! looks at, the pan envelope is derived from the frustum and the distance
//! to that point, and a camera that drifted past the envelope is clamped
//! and, when nobody is dragging, eased back with a snap-back animation.

use std::rc::Rc;

use glam::{DMat4, DVec2, DVec3};
use web_time::{Duration, Instant};

use super::core::SharedCamera;
use super::frustum::PerspectiveFrustum;
use crate::animation::{AnimationDescription, AnimationHandle, AnimationScheduler, EasingFunction};
use crate::error::ColumbusError;
use crate::options::NavigationOptions;

/// Outcome of one boundary-correction pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryState {
    /// Inside the envelope; nothing to do.
    Idle,
    /// Outside the envelope and clamped, without starting an animation.
    Clamped,
    /// Outside the envelope with a snap-back animation scheduled or running.
    Correcting,
    /// The view direction is parallel to the map; the frame was left alone.
    Skipped,
}

/// Re-centers the local frame and enforces the map boundary.
#[derive(Debug)]
pub struct BoundaryCorrector {
    transform: DMat4,
    map_half_extents: DVec2,
    trigger_margin: f64,
    clamp_margin: f64,
    duration: Duration,
    easing: EasingFunction,
    correction: Option<AnimationHandle>,
}

impl BoundaryCorrector {
    /// Create a corrector for a body with the given radii, starting from the
    /// camera's current transform.
    #[must_use]
    pub fn new(transform: DMat4, radii: DVec3) -> Self {
        let mut corrector = Self {
            transform,
            map_half_extents: DVec2::new(
                radii.x * std::f64::consts::PI,
                radii.y * std::f64::consts::FRAC_PI_2,
            ),
            trigger_margin: 0.0,
            clamp_margin: 0.0,
            duration: Duration::ZERO,
            easing: EasingFunction::DEFAULT,
            correction: None,
        };
        corrector.configure(&NavigationOptions::default());
        corrector
    }

    /// Pick up margins and animation settings.
    pub fn configure(&mut self, options: &NavigationOptions) {
        self.trigger_margin = options.trigger_margin;
        self.clamp_margin = options.clamp_margin;
        self.duration = Duration::from_millis(options.correction_duration_ms);
        self.easing = options.correction_easing;
    }

    /// Half width and half height of the flattened map.
    #[must_use]
    pub fn map_half_extents(&self) -> DVec2 {
        self.map_half_extents
    }

    /// The cached local-to-world transform handed to the camera each frame.
    #[must_use]
    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    /// Whether this corrector's snap-back animation is still running.
    #[must_use]
    pub fn correction_in_flight(&self) -> bool {
        self.correction.as_ref().is_some_and(AnimationHandle::is_running)
    }

    pub(crate) fn take_correction(&mut self) -> Option<AnimationHandle> {
        self.correction.take()
    }

    /// How far the camera may drift from the map center on each axis.
    ///
    /// Far enough that the view still covers the map, never less than the
    /// map's own half extent.
    #[must_use]
    pub fn allowed_extents(
        &self,
        frustum: &PerspectiveFrustum,
        position_wc: DVec3,
        center_wc: DVec3,
    ) -> DVec2 {
        let distance = position_wc.distance(center_wc);
        let visible = DVec2::new(frustum.tan_half_fovx(), frustum.tan_half_fovy()) * distance;
        (visible - self.map_half_extents).max(self.map_half_extents)
    }

    /// Run one pass: re-center, measure, clamp, and schedule a snap-back if
    /// the camera is out of bounds while neither dragging nor coasting.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::CameraInUse`] if the camera is borrowed
    /// elsewhere.
    pub fn correct(
        &mut self,
        shared: &SharedCamera,
        scheduler: &mut AnimationScheduler,
        dragging: bool,
        coasting: bool,
        now: Instant,
    ) -> Result<BoundaryState, ColumbusError> {
        let mut camera = shared.try_borrow_mut().map_err(|_| ColumbusError::CameraInUse)?;

        let Some(center) = camera.look_at_local() else {
            log::debug!("view direction parallel to the map plane, skipping boundary correction");
            return Ok(BoundaryState::Skipped);
        };
        let center_wc = camera.transform().transform_point3(center);
        let mut position_wc = camera.position_wc();

        self.transform.w_axis = center_wc.extend(1.0);
        camera.recenter(self.transform);

        let allowed = self.allowed_extents(&camera.frustum, position_wc, center_wc);
        let trigger = allowed + self.map_half_extents * self.trigger_margin;
        let extended = allowed + self.map_half_extents * self.clamp_margin;
        let mut state = BoundaryState::Idle;

        // The rail applies past either bound, whichever margin is smaller
        if outside(position_wc, trigger.min(extended)) {
            let shift = overshoot(center_wc, extended);
            let shift = shift + overshoot(position_wc - shift, extended);
            position_wc -= shift;
            state = BoundaryState::Clamped;

            if !dragging && !coasting && outside(center_wc, trigger) {
                state = BoundaryState::Correcting;
                if !self.correction_in_flight() {
                    scheduler.remove_all();
                    let target = position_wc - overshoot(center_wc - shift, trigger);
                    log::debug!("scheduling snap-back from {position_wc} to {target}");
                    self.correction = Some(self.schedule(shared, scheduler, position_wc, target, now));
                }
            }
            log::trace!("camera out of bounds ({state:?}), limits {trigger} / {extended}");
        }

        camera.position = camera.inverse_transform().transform_point3(position_wc);
        Ok(state)
    }

    fn schedule(
        &self,
        shared: &SharedCamera,
        scheduler: &mut AnimationScheduler,
        from: DVec3,
        to: DVec3,
        now: Instant,
    ) -> AnimationHandle {
        let camera = Rc::downgrade(shared);
        let description = AnimationDescription::new(move |t| {
            let Some(camera) = camera.upgrade() else {
                return;
            };
            let Ok(mut camera) = camera.try_borrow_mut() else {
                log::warn!("camera busy, dropping a snap-back tick");
                return;
            };
            let point = from.lerp(to, t);
            camera.position = camera.inverse_transform().transform_point3(point);
        })
        .with_easing(self.easing)
        .with_duration(self.duration);

        scheduler.add_at(description, now)
    }
}

fn outside(point: DVec3, bound: DVec2) -> bool {
    point.x.abs() > bound.x || point.y.abs() > bound.y
}

/// Signed distance by which `point` sticks out of `[-bound, bound]` on x and y.
fn overshoot(point: DVec3, bound: DVec2) -> DVec3 {
    DVec3::new(excess(point.x, bound.x), excess(point.y, bound.y), 0.0)
}

fn excess(value: f64, bound: f64) -> f64 {
    if value > bound {
        value - bound
    } else if value < -bound {
        value + bound
    } else {
        0.0
    }
}
