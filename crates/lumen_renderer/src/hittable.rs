//! Hittable trait and the closed set of scene primitives.

use crate::{MaterialId, Sphere};
use lumen_math::{Interval, Ray, Vec3};

/// Trait for objects that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Nearest ray parameter `t` within `ray_t` where the ray meets the
    /// surface, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64>;

    /// Outward unit normal at `point`, which must lie on the surface.
    fn normal(&self, point: Vec3) -> Vec3;

    /// Material bound to this object.
    fn material(&self) -> MaterialId;
}

/// A primitive in the world.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Sphere(Sphere),
}

impl From<Sphere> for Object {
    fn from(sphere: Sphere) -> Self {
        Object::Sphere(sphere)
    }
}

impl Hittable for Object {
    #[inline]
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<f64> {
        match self {
            Object::Sphere(s) => s.hit(ray, ray_t),
        }
    }

    #[inline]
    fn normal(&self, point: Vec3) -> Vec3 {
        match self {
            Object::Sphere(s) => s.normal(point),
        }
    }

    #[inline]
    fn material(&self) -> MaterialId {
        match self {
            Object::Sphere(s) => s.material(),
        }
    }
}

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Object that was hit
    pub object: &'a Object,
    /// Parameter t where the intersection occurs
    pub t: f64,
}
