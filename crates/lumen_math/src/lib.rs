//! Math types for the Lumen path tracer.
//!
//! Everything works in double precision: `Vec3` is glam's `DVec3`, extended
//! with the surface operations the tracer needs through [`VecExt`].

pub use glam::{dvec3, DVec2, DVec3};

/// 3D vector used for points, directions and linear colors.
pub type Vec3 = DVec3;

mod interval;
mod ray;
mod vec;

pub use interval::Interval;
pub use ray::Ray;
pub use vec::{VecExt, EPSILON};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a - b, Vec3::new(-3.0, -3.0, -3.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn test_vec3_cross() {
        let a = Vec3::new(3.0, 4.0, 5.0);
        let b = Vec3::new(6.0, 7.0, 8.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
        assert_eq!(Vec3::ONE.cross(Vec3::splat(2.0)), Vec3::ZERO);
    }
}
