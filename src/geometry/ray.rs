use glam::{DMat4, DVec3};

/// Below this magnitude a ray's z component is treated as parallel to the
/// flattening plane.
pub const PLANE_PARALLEL_EPSILON: f64 = 1e-12;

/// Half-line with an origin and a direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: DVec3,
    /// Direction of travel; not required to be normalized.
    pub direction: DVec3,
}

impl Ray {
    /// Create a ray from an origin and a direction.
    #[must_use]
    pub const fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Re-express the ray in another frame: the origin as a point, the
    /// direction as a vector.
    #[must_use]
    pub fn transformed(&self, matrix: &DMat4) -> Self {
        Self {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// Intersect a ray with the local `z = 0` plane.
///
/// Returns `None` when the ray runs parallel to the plane or the
/// intersection is not a finite point. The sign of `t` is not checked; a
/// ray pointing away from the plane still reports where its supporting
/// line crosses it.
#[must_use]
pub fn project_onto_plane(ray: &Ray) -> Option<DVec3> {
    let dz = ray.direction.z;
    if dz.abs() < PLANE_PARALLEL_EPSILON {
        return None;
    }
    let t = -ray.origin.z / dz;
    let point = ray.at(t);
    // z is zero by construction; pin it to cancel rounding
    let point = DVec3::new(point.x, point.y, 0.0);
    point.is_finite().then_some(point)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_down_lands_below_origin() {
        let ray = Ray::new(DVec3::new(3.0, -4.0, 10.0), DVec3::NEG_Z);
        assert_eq!(project_onto_plane(&ray), Some(DVec3::new(3.0, -4.0, 0.0)));
    }

    #[test]
    fn oblique_ray_hits_expected_point() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::new(1.0, 0.0, -1.0));
        let hit = project_onto_plane(&ray).unwrap();
        assert!((hit - DVec3::new(10.0, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn parallel_ray_is_not_projectable() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::X);
        assert_eq!(project_onto_plane(&ray), None);

        let nearly = Ray::new(DVec3::new(0.0, 0.0, 10.0), DVec3::new(1.0, 0.0, 1e-15));
        assert_eq!(project_onto_plane(&nearly), None);
    }

    #[test]
    fn transformed_ignores_translation_for_direction() {
        let m = DMat4::from_translation(DVec3::new(5.0, 6.0, 7.0));
        let ray = Ray::new(DVec3::ZERO, DVec3::NEG_Z).transformed(&m);
        assert_eq!(ray.origin, DVec3::new(5.0, 6.0, 7.0));
        assert_eq!(ray.direction, DVec3::NEG_Z);
    }
}
