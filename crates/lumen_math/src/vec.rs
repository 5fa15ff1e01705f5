//! Surface operations on top of glam's vector type.

use crate::Vec3;

/// Tolerance for the approximate comparisons below.
pub const EPSILON: f64 = 1e-8;

/// Extra vector operations used by the tracer.
///
/// Methods that treat `self` as a surface normal (`reflect_ray`, `refract_ray`)
/// expect it to have unit length. This is checked in debug builds only.
pub trait VecExt: Sized {
    /// General p-norm: `(|x|^p + |y|^p + |z|^p)^(1/p)`.
    fn norm_p(self, p: u32) -> f64;

    /// Unit vector pointing the same way. `self` must not be zero.
    fn unit_vec(self) -> Self;

    /// All components are within [`EPSILON`] of zero.
    fn is_zero(self) -> bool;

    /// All components are within [`EPSILON`] of one.
    fn is_one(self) -> bool;

    /// Whether `self` and `other` lie on the same line.
    fn is_parallel(self, other: Self) -> bool;

    /// Component-wise approximate equality.
    fn approx_eq(self, other: Self, tolerance: f64) -> bool;

    /// Reflect `incident` about the surface whose normal is `self`.
    fn reflect_ray(self, incident: Self) -> Self;

    /// Refract unit vector `incident` through the surface whose normal is
    /// `self`, with `ri` the ratio of refractive indices (outside / inside).
    fn refract_ray(self, incident: Self, ri: f64) -> Self;
}

impl VecExt for Vec3 {
    fn norm_p(self, p: u32) -> f64 {
        assert!(p > 0, "p-norm needs p >= 1");
        match p {
            1 => self.x.abs() + self.y.abs() + self.z.abs(),
            2 => self.length(),
            _ => {
                let p = p as f64;
                (self.x.abs().powf(p) + self.y.abs().powf(p) + self.z.abs().powf(p)).powf(1.0 / p)
            }
        }
    }

    #[inline]
    fn unit_vec(self) -> Self {
        let len = self.length();
        debug_assert!(len > 0.0, "cannot normalize a zero vector");
        self / len
    }

    #[inline]
    fn is_zero(self) -> bool {
        self.abs().max_element() < EPSILON
    }

    #[inline]
    fn is_one(self) -> bool {
        (self - Vec3::ONE).abs().max_element() < EPSILON
    }

    fn is_parallel(self, other: Self) -> bool {
        self.cross(other).is_zero()
    }

    fn approx_eq(self, other: Self, tolerance: f64) -> bool {
        (self - other).abs().max_element() <= tolerance
    }

    #[inline]
    fn reflect_ray(self, incident: Self) -> Self {
        debug_assert!((self.length_squared() - 1.0).abs() < 1e-6, "normal must be a unit vector");
        incident - 2.0 * incident.dot(self) * self
    }

    #[inline]
    fn refract_ray(self, incident: Self, ri: f64) -> Self {
        debug_assert!((self.length_squared() - 1.0).abs() < 1e-6, "normal must be a unit vector");
        let cos_theta = (-incident).dot(self).min(1.0);
        let r_out_perp = ri * (incident + cos_theta * self);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * self;
        r_out_perp + r_out_parallel
    }
}
