use glam::DMat4;

use crate::error::ColumbusError;
use crate::options::CameraOptions;

/// Symmetric perspective frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveFrustum {
    /// Vertical field of view in radians.
    pub fovy: f64,
    /// Viewport width over height.
    pub aspect_ratio: f64,
    /// Near clipping plane distance.
    pub near: f64,
    /// Far clipping plane distance.
    pub far: f64,
}

impl PerspectiveFrustum {
    /// Create a frustum from a vertical field of view in radians.
    #[must_use]
    pub const fn new(fovy: f64, aspect_ratio: f64, near: f64, far: f64) -> Self {
        Self {
            fovy,
            aspect_ratio,
            near,
            far,
        }
    }

    /// Build from options (field of view in degrees).
    #[must_use]
    pub fn from_options(options: &CameraOptions, aspect_ratio: f64) -> Self {
        Self::new(options.fovy.to_radians(), aspect_ratio, options.near, options.far)
    }

    /// `tan(fovy / 2)`.
    #[must_use]
    pub fn tan_half_fovy(&self) -> f64 {
        (self.fovy * 0.5).tan()
    }

    /// Tangent of half the horizontal field of view.
    #[must_use]
    pub fn tan_half_fovx(&self) -> f64 {
        self.aspect_ratio * self.tan_half_fovy()
    }

    /// Right-handed projection matrix with a [0,1] depth range.
    #[must_use]
    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fovy, self.aspect_ratio, self.near, self.far)
    }

    pub(crate) fn validate(&self) -> Result<(), ColumbusError> {
        if !(self.fovy > 0.0 && self.fovy < std::f64::consts::PI) {
            return Err(ColumbusError::invalid(
                "frustum",
                format!("fovy must lie in (0, pi), got {}", self.fovy),
            ));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(ColumbusError::invalid(
                "frustum",
                format!("aspect ratio must be positive, got {}", self.aspect_ratio),
            ));
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return Err(ColumbusError::invalid(
                "frustum",
                format!("need 0 < near < far, got near {} far {}", self.near, self.far),
            ));
        }
        Ok(())
    }
}

impl Default for PerspectiveFrustum {
    fn default() -> Self {
        Self::from_options(&CameraOptions::default(), 1.0)
    }
}
