use std::cell::RefCell;
use std::rc::Rc;

use glam::{DMat4, DVec2, DVec3};

use super::frustum::PerspectiveFrustum;
use crate::error::ColumbusError;
use crate::geometry::{project_onto_plane, Ray};

/// Camera shared between the application and the controllers that move it.
pub type SharedCamera = Rc<RefCell<Camera>>;

/// Perspective camera positioned in a local frame.
///
/// `position`, `direction` and `up` are expressed in the local frame;
/// `transform` maps that frame into world space. Its translation column is
/// the world point the local frame is centered on.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye position in the local frame.
    pub position: DVec3,
    /// Unit view direction in the local frame.
    pub direction: DVec3,
    /// Unit up vector in the local frame, orthogonal to `direction`.
    pub up: DVec3,
    /// Projection parameters.
    pub frustum: PerspectiveFrustum,
    viewport: DVec2,
    transform: DMat4,
    inverse_transform: DMat4,
}

impl Camera {
    /// Camera at the local origin looking down the negative z axis, with an
    /// identity transform.
    #[must_use]
    pub fn new(frustum: PerspectiveFrustum, viewport: DVec2) -> Self {
        Self {
            position: DVec3::ZERO,
            direction: DVec3::NEG_Z,
            up: DVec3::Y,
            frustum,
            viewport,
            transform: DMat4::IDENTITY,
            inverse_transform: DMat4::IDENTITY,
        }
    }

    /// Camera `height` above `center_wc`, looking straight down with north up.
    #[must_use]
    pub fn looking_down(
        center_wc: DVec3,
        height: f64,
        frustum: PerspectiveFrustum,
        viewport: DVec2,
    ) -> Self {
        let transform = DMat4::from_translation(center_wc);
        Self {
            position: DVec3::new(0.0, 0.0, height),
            transform,
            inverse_transform: transform.inverse(),
            ..Self::new(frustum, viewport)
        }
    }

    /// Shared handle for use with the controllers.
    #[must_use]
    pub fn into_shared(self) -> SharedCamera {
        Rc::new(RefCell::new(self))
    }

    /// Local-to-world transform.
    #[must_use]
    pub fn transform(&self) -> &DMat4 {
        &self.transform
    }

    /// World-to-local transform.
    #[must_use]
    pub fn inverse_transform(&self) -> &DMat4 {
        &self.inverse_transform
    }

    /// Replace the local-to-world transform and its cached inverse.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::InvalidCollaborator`] if `transform` is
    /// singular or not finite; the camera is left unchanged.
    pub fn set_transform(&mut self, transform: DMat4) -> Result<(), ColumbusError> {
        check_invertible(&transform)?;
        self.transform = transform;
        self.inverse_transform = transform.inverse();
        Ok(())
    }

    /// Adopt a transform already known to be invertible.
    pub(crate) fn recenter(&mut self, transform: DMat4) {
        self.transform = transform;
        self.inverse_transform = transform.inverse();
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> DVec2 {
        self.viewport
    }

    /// Resize the viewport, keeping the frustum's aspect ratio in step.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = DVec2::new(width, height);
        if height > 0.0 {
            self.frustum.aspect_ratio = width / height;
        }
    }

    /// Unit right vector in the local frame.
    #[must_use]
    pub fn right(&self) -> DVec3 {
        self.direction.cross(self.up).normalize_or_zero()
    }

    /// Eye position in world coordinates.
    #[must_use]
    pub fn position_wc(&self) -> DVec3 {
        self.transform.transform_point3(self.position)
    }

    /// View direction in world coordinates.
    #[must_use]
    pub fn direction_wc(&self) -> DVec3 {
        self.transform.transform_vector3(self.direction).normalize_or_zero()
    }

    /// Where the view direction meets the local `z = 0` plane.
    #[must_use]
    pub fn look_at_local(&self) -> Option<DVec3> {
        project_onto_plane(&Ray::new(self.position, self.direction))
    }

    /// World-space ray from the eye through a window position (pixels,
    /// origin at the top left).
    #[must_use]
    pub fn pick_ray(&self, window_position: DVec2) -> Ray {
        let size = self.viewport;
        let x = 2.0 * window_position.x / size.x - 1.0;
        let y = 2.0 * (size.y - window_position.y) / size.y - 1.0;

        let near = self.frustum.near;
        let right = self.right();
        let up = right.cross(self.direction);

        let offset = self.direction * near
            + right * (x * near * self.frustum.tan_half_fovx())
            + up * (y * near * self.frustum.tan_half_fovy());

        Ray::new(self.position, offset.normalize()).transformed(&self.transform)
    }

    pub(crate) fn validate(&self) -> Result<(), ColumbusError> {
        if !(self.viewport.min_element() > 0.0 && self.viewport.is_finite()) {
            return Err(ColumbusError::invalid(
                "camera",
                format!("viewport must be positive, got {}", self.viewport),
            ));
        }
        if !(self.position.is_finite() && self.direction.is_normalized() && self.up.is_finite()) {
            return Err(ColumbusError::invalid(
                "camera",
                "position must be finite and direction a unit vector",
            ));
        }
        self.frustum.validate()?;
        check_invertible(&self.transform)
    }
}

fn check_invertible(transform: &DMat4) -> Result<(), ColumbusError> {
    if !transform.is_finite() || transform.determinant().abs() <= f64::EPSILON {
        return Err(ColumbusError::invalid(
            "camera",
            "transform must be finite and invertible",
        ));
    }
    Ok(())
}
