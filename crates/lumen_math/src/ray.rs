use crate::{Vec3, VecExt};

/// One segment of a light path.
///
/// The direction is always a unit vector. `decay` is the per-channel
/// fraction of light the path still carries: it starts at one and is
/// multiplied by the albedo of every surface the path bounces off.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    origin: Vec3,
    direction: Vec3,
    decay: Vec3,
}

impl Ray {
    /// Create a full-power ray. `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.unit_vec(),
            decay: Vec3::ONE,
        }
    }

    /// Get the origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Get the accumulated attenuation.
    #[inline]
    pub fn decay(&self) -> Vec3 {
        self.decay
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }

    /// The next segment of the path, starting at `origin`, losing light
    /// according to `albedo`.
    #[inline]
    pub fn bounce(self, origin: Vec3, direction: Vec3, albedo: Vec3) -> Self {
        Self {
            origin,
            direction: direction.unit_vec(),
            decay: self.decay * albedo,
        }
    }

    /// The next segment of the path without any loss of light.
    #[inline]
    pub fn redirect(self, origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.unit_vec(),
            decay: self.decay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let ray = Ray::new(origin, Vec3::new(0.0, 5.0, 0.0));

        assert_eq!(ray.origin(), origin);
        assert_eq!(ray.direction(), Vec3::Y);
        assert!(ray.decay().is_one());
    }

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        assert_eq!(ray.at(0.0), Vec3::ZERO);
        assert_eq!(ray.at(1.0), Vec3::X);
        assert_eq!(ray.at(2.0), Vec3::new(2.0, 0.0, 0.0));
        assert_eq!(ray.at(-1.0), Vec3::new(-1.0, 0.0, 0.0));
    }

    #[test]
    fn test_ray_bounce_decays() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let next = ray
            .bounce(Vec3::X, Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.5, 0.25, 1.0))
            .bounce(Vec3::Y, Vec3::Z, Vec3::splat(0.5));

        assert_eq!(next.origin(), Vec3::Y);
        assert_eq!(next.direction(), Vec3::Z);
        assert_eq!(next.decay(), Vec3::new(0.25, 0.125, 0.5));
    }

    #[test]
    fn test_ray_redirect_keeps_decay() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X).bounce(Vec3::X, Vec3::Y, Vec3::splat(0.5));
        let next = ray.redirect(Vec3::ONE, Vec3::new(0.0, 0.0, -3.0));

        assert_eq!(next.decay(), Vec3::splat(0.5));
        assert_eq!(next.direction(), -Vec3::Z);
    }
}
