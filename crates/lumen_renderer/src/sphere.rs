//! Sphere primitive for ray tracing.

use crate::{Hittable, MaterialId};
use lumen_math::{Interval, Ray, Vec3};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
    material: MaterialId,
}

impl Sphere {
    /// Create a new sphere. `radius` must be positive.
    pub fn new(center: Vec3, radius: f64, material: MaterialId) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive, got {radius}");
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether `point` lies on the surface, within a relative tolerance.
    pub fn is_on(&self, point: Vec3) -> bool {
        ((point - self.center).length() - self.radius).abs() <= 1e-6 * self.radius.max(1.0)
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        // |O + tD - C| = r, with b = 2h
        let oc = ray.origin() - self.center;
        let a = ray.direction().length_squared();
        let h = oc.dot(ray.direction());
        let c = oc.length_squared() - self.radius * self.radius;

        // Quarter of the discriminant
        let delta_q = h * h - a * c;
        if delta_q < 0.0 {
            return None;
        }

        let sqrtd = delta_q.sqrt();

        // Find the nearest root in the acceptable range
        let near = (-h - sqrtd) / a;
        if ray_t.contains(near) {
            return Some(near);
        }
        let far = (-h + sqrtd) / a;
        if ray_t.contains(far) {
            return Some(far);
        }
        None
    }

    #[inline]
    fn normal(&self, point: Vec3) -> Vec3 {
        debug_assert!(self.is_on(point), "point {point} is not on the sphere");
        // No normalization: the point is on the surface
        (point - self.center) / self.radius
    }

    fn material(&self) -> MaterialId {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::VecExt;

    fn unit_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, MaterialId(0))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let t = sphere.hit(&ray, Interval::from_min(1e-8)).unwrap();
        assert!((t - 0.5).abs() < 1e-12); // Should hit at t=0.5
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere();
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::from_min(1e-8)).is_none());
    }

    #[test]
    fn test_sphere_hit_round_trip() {
        let sphere = Sphere::new(Vec3::new(1.0, -2.0, 3.0), 2.0, MaterialId(0));
        let targets = [
            Vec3::new(0.3, 0.8, -0.5),
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(0.2, -0.9, 0.4),
        ];
        for dir in targets {
            let surface = sphere.center() + 2.0 * dir.unit_vec();
            let outward = (surface - sphere.center()).unit_vec();
            // Start outside the sphere, aim at the surface point
            let origin = surface + 5.0 * outward + Vec3::new(0.01, 0.0, 0.0);
            let ray = Ray::new(origin, surface - origin);

            let t = sphere.hit(&ray, Interval::from_min(1e-8)).unwrap();
            assert!(ray.at(t).approx_eq(surface, 1e-9), "{} != {}", ray.at(t), surface);
        }
    }

    #[test]
    fn test_sphere_hit_from_inside_takes_far_root() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::X);
        let t = sphere.hit(&ray, Interval::from_min(1e-8)).unwrap();
        assert!((t - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_sphere_respects_interval() {
        let sphere = unit_sphere();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        // Near root 0.5 excluded, far root 1.5 accepted
        assert_eq!(sphere.hit(&ray, Interval::new(0.6, 2.0)), Some(1.5));
        assert_eq!(sphere.hit(&ray, Interval::new(0.6, 1.0)), None);
    }

    #[test]
    fn test_sphere_normal() {
        let sphere = unit_sphere();
        let n = sphere.normal(Vec3::new(0.0, 0.5, -1.0));
        assert!(n.approx_eq(Vec3::Y, 1e-12));
        assert!((n.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "radius must be positive")]
    fn test_sphere_rejects_zero_radius() {
        Sphere::new(Vec3::ZERO, 0.0, MaterialId(0));
    }
}
