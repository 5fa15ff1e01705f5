//! Random sampling for ray generation and scattering.
//!
//! Every render task owns its generators; nothing here is shared between
//! threads. Streams are ChaCha based so a seed gives the same sequence on
//! every platform.

use lumen_math::{DVec2, Vec3};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Generator type for per-task streams.
pub type TaskRng = ChaCha8Rng;

/// Create a per-task generator from a 64-bit seed.
pub fn task_rng(seed: u64) -> TaskRng {
    TaskRng::seed_from_u64(seed)
}

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform f64 in [min, max).
#[inline]
fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Random point inside the unit sphere (rejection sampling).
pub fn random_in_unit_sphere(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Random unit vector, uniformly distributed on the unit sphere.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_in_unit_sphere(rng);
        let len_sq = p.length_squared();
        if len_sq > 1e-12 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random unit vector in the hemisphere around `normal`.
pub fn random_on_hemisphere(normal: Vec3, rng: &mut dyn RngCore) -> Vec3 {
    let v = random_unit_vector(rng);
    if v.dot(normal) >= 0.0 {
        v
    } else {
        -v
    }
}

/// Random point inside the unit disk.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> DVec2 {
    loop {
        let p = DVec2::new(gen_range(rng, -1.0, 1.0), gen_range(rng, -1.0, 1.0));
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Sub-pixel and lens jitter for one render task.
///
/// A disabled context always returns `(0, 0)`, which gives a plain pinhole
/// render with rays through the pixel corners. Single-sample renders use it.
pub struct BiasContext {
    rng: Option<TaskRng>,
}

impl BiasContext {
    /// Jitter driven by a generator seeded with `seed`.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Some(task_rng(seed)),
        }
    }

    /// No jitter at all.
    pub fn disabled() -> Self {
        Self { rng: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.rng.is_some()
    }

    /// Offset inside the pixel, both components in [0, 1).
    pub fn sub_pixel(&mut self) -> DVec2 {
        match &mut self.rng {
            Some(rng) => DVec2::new(gen_f64(rng), gen_f64(rng)),
            None => DVec2::ZERO,
        }
    }

    /// Position on the lens, inside the unit disk.
    pub fn lens(&mut self) -> DVec2 {
        match &mut self.rng {
            Some(rng) => random_in_unit_disk(rng),
            None => DVec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::VecExt;

    #[test]
    fn test_unit_sphere_samples() {
        let mut rng = task_rng(7);
        for _ in 0..1000 {
            assert!(random_in_unit_sphere(&mut rng).length_squared() < 1.0);
            assert!((random_unit_vector(&mut rng).length() - 1.0).abs() < 1e-10);
        }
    }

    #[test]
    fn test_hemisphere_samples() {
        let mut rng = task_rng(11);
        let normal = Vec3::new(1.0, 1.0, 0.0).unit_vec();
        for _ in 0..1000 {
            assert!(random_on_hemisphere(normal, &mut rng).dot(normal) >= 0.0);
        }
    }

    #[test]
    fn test_unit_disk_samples() {
        let mut rng = task_rng(13);
        for _ in 0..1000 {
            assert!(random_in_unit_disk(&mut rng).length_squared() < 1.0);
        }
    }

    #[test]
    fn test_streams_are_reproducible() {
        let mut a = task_rng(42);
        let mut b = task_rng(42);
        for _ in 0..16 {
            assert_eq!(gen_f64(&mut a), gen_f64(&mut b));
        }
    }

    #[test]
    fn test_disabled_bias_is_zero() {
        let mut bias = BiasContext::disabled();
        assert!(!bias.is_enabled());
        for _ in 0..8 {
            assert_eq!(bias.sub_pixel(), DVec2::ZERO);
            assert_eq!(bias.lens(), DVec2::ZERO);
        }
    }

    #[test]
    fn test_enabled_bias_varies() {
        let mut bias = BiasContext::new(99);
        assert!(bias.is_enabled());
        let first = bias.sub_pixel();
        let second = bias.sub_pixel();
        assert_ne!(first, second);
        for _ in 0..100 {
            let j = bias.sub_pixel();
            assert!((0.0..1.0).contains(&j.x) && (0.0..1.0).contains(&j.y));
        }
    }
}
