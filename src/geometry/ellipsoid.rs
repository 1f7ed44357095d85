use glam::DVec3;

use crate::error::ColumbusError;

/// Anything that can report the radii of the body being viewed.
///
/// Consumed once when a controller is built to size the flattened map.
pub trait BodyGeometry {
    /// Radii along the body's x, y and z axes, in meters.
    fn radii(&self) -> DVec3;
}

/// Triaxial ellipsoid described by its three radii.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    radii: DVec3,
}

impl Ellipsoid {
    /// WGS84 reference ellipsoid.
    pub const WGS84: Self = Self {
        radii: DVec3::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179_3),
    };

    /// Sphere of radius one.
    pub const UNIT_SPHERE: Self = Self { radii: DVec3::ONE };

    /// Create an ellipsoid.
    ///
    /// # Errors
    ///
    /// Returns [`ColumbusError::InvalidCollaborator`] for non-finite or
    /// non-positive radii.
    pub fn new(radii: DVec3) -> Result<Self, ColumbusError> {
        validate_radii(radii)?;
        Ok(Self { radii })
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}

impl BodyGeometry for Ellipsoid {
    fn radii(&self) -> DVec3 {
        self.radii
    }
}

pub(crate) fn validate_radii(radii: DVec3) -> Result<(), ColumbusError> {
    if !radii.is_finite() || radii.min_element() <= 0.0 {
        return Err(ColumbusError::invalid(
            "body geometry",
            format!("radii must be finite and positive, got {radii}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wgs84_is_the_default() {
        assert_eq!(Ellipsoid::default(), Ellipsoid::WGS84);
        assert_eq!(Ellipsoid::WGS84.radii().x, 6_378_137.0);
    }

    #[test]
    fn rejects_degenerate_radii() {
        assert!(Ellipsoid::new(DVec3::new(1.0, 0.0, 1.0)).is_err());
        assert!(Ellipsoid::new(DVec3::new(1.0, f64::NAN, 1.0)).is_err());
        assert!(Ellipsoid::new(DVec3::splat(2.0)).is_ok());
    }
}
