//! Materials and surface scattering.
//!
//! A material turns an incoming ray at a hit point into the next segment of
//! the light path, or absorbs it. Materials hold no mutable state; all
//! randomness comes from the caller's generator, so a material can be shared
//! by every render thread.

use crate::sampling::{gen_f64, random_in_unit_sphere, random_on_hemisphere, random_unit_vector};
use crate::Hittable;
use lumen_core::{scene::vec3, DiffuseModel, MaterialKind};
use lumen_math::{Interval, Ray, Vec3, VecExt};
use rand::RngCore;

/// Color type alias (RGB values 0-1)
pub type Color = Vec3;

/// Handle to a material stored in a `World`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub(crate) usize);

impl MaterialId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Trait for materials that describe how light interacts with surfaces.
pub trait Scatter: Send + Sync {
    /// Scatter `ray`, which hits `object` at parameter `t`.
    ///
    /// Returns the next ray of the path, or `None` if the ray is absorbed.
    fn scatter(&self, ray: &Ray, object: &dyn Hittable, t: f64, rng: &mut dyn RngCore) -> Option<Ray>;
}

fn assert_albedo(albedo: Color) {
    assert!(
        [albedo.x, albedo.y, albedo.z].iter().all(|&c| Interval::UNIT.contains(c)),
        "albedo components must lie in [0, 1], got {albedo}"
    );
}

/// Diffuse material.
#[derive(Debug, Clone, PartialEq)]
pub struct Diffuse {
    albedo: Color,
    model: DiffuseModel,
}

impl Diffuse {
    pub fn new(albedo: Color, model: DiffuseModel) -> Self {
        assert_albedo(albedo);
        Self { albedo, model }
    }

    /// Scatter along the normal plus a random unit vector.
    pub fn lambertian(albedo: Color) -> Self {
        Self::new(albedo, DiffuseModel::Lambertian)
    }

    /// Scatter along the normal plus a random point in the unit sphere.
    pub fn uniform(albedo: Color) -> Self {
        Self::new(albedo, DiffuseModel::Uniform)
    }

    /// Scatter uniformly over the hemisphere around the normal.
    pub fn hemisphere(albedo: Color) -> Self {
        Self::new(albedo, DiffuseModel::Hemisphere)
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn model(&self) -> DiffuseModel {
        self.model
    }
}

impl Scatter for Diffuse {
    fn scatter(&self, ray: &Ray, object: &dyn Hittable, t: f64, rng: &mut dyn RngCore) -> Option<Ray> {
        let point = ray.at(t);
        let normal = object.normal(point);

        // Hit from the inside
        if normal.dot(ray.direction()) > 0.0 {
            return None;
        }

        let mut direction = match self.model {
            DiffuseModel::Lambertian => normal + random_unit_vector(rng),
            DiffuseModel::Uniform => normal + random_in_unit_sphere(rng),
            DiffuseModel::Hemisphere => random_on_hemisphere(normal, rng),
        };

        // Catch degenerate scatter direction
        if direction.is_zero() {
            direction = normal;
        }

        Some(ray.bounce(point, direction, self.albedo))
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Metal {
    albedo: Color,
    fuzz: f64,
}

impl Metal {
    /// Create a new metal. `fuzz` is clamped to [0, 1]; zero is a mirror.
    pub fn new(albedo: Color, fuzz: f64) -> Self {
        assert_albedo(albedo);
        Self {
            albedo,
            fuzz: Interval::UNIT.clamp(fuzz),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f64 {
        self.fuzz
    }
}

impl Scatter for Metal {
    fn scatter(&self, ray: &Ray, object: &dyn Hittable, t: f64, rng: &mut dyn RngCore) -> Option<Ray> {
        let point = ray.at(t);
        let normal = object.normal(point);

        let mut reflected = normal.reflect_ray(ray.direction());
        if self.fuzz > 0.0 {
            reflected += self.fuzz * random_in_unit_sphere(rng);
        }

        // Fuzz may push the ray below the surface
        if reflected.dot(normal) <= 0.0 {
            return None;
        }

        Some(ray.bounce(point, reflected, self.albedo))
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, PartialEq)]
pub struct Dielectric {
    /// Refractive index relative to the surrounding medium
    ior: f64,
}

impl Dielectric {
    pub fn new(ior: f64) -> Self {
        assert!(ior > 0.0, "refractive index must be positive, got {ior}");
        Self { ior }
    }

    pub fn ior(&self) -> f64 {
        self.ior
    }

    /// Schlick's approximation of the reflectance at incidence cosine
    /// `cosine`, for a refractive index ratio `ri`.
    pub fn reflectance(cosine: f64, ri: f64) -> f64 {
        let r0 = ((1.0 - ri) / (1.0 + ri)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }
}

impl Scatter for Dielectric {
    fn scatter(&self, ray: &Ray, object: &dyn Hittable, t: f64, rng: &mut dyn RngCore) -> Option<Ray> {
        let point = ray.at(t);
        let direction = ray.direction();
        let outward = object.normal(point);

        let (normal, ri) = if direction.dot(outward) < 0.0 {
            (outward, 1.0 / self.ior)
        } else {
            (-outward, self.ior)
        };

        let cos_theta = (-direction).dot(normal).min(1.0);
        let sin2_theta = 1.0 - cos_theta * cos_theta;

        let cannot_refract = sin2_theta * ri * ri > 1.0;
        let next = if cannot_refract || gen_f64(rng) < Self::reflectance(cos_theta, ri) {
            normal.reflect_ray(direction)
        } else {
            normal.refract_ray(direction, ri)
        };

        Some(ray.redirect(point, next))
    }
}

/// Every material a world can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Diffuse(Diffuse),
    Metal(Metal),
    Dielectric(Dielectric),
}

impl Scatter for Material {
    #[inline]
    fn scatter(&self, ray: &Ray, object: &dyn Hittable, t: f64, rng: &mut dyn RngCore) -> Option<Ray> {
        match self {
            Material::Diffuse(m) => m.scatter(ray, object, t, rng),
            Material::Metal(m) => m.scatter(ray, object, t, rng),
            Material::Dielectric(m) => m.scatter(ray, object, t, rng),
        }
    }
}

impl From<Diffuse> for Material {
    fn from(m: Diffuse) -> Self {
        Material::Diffuse(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

impl From<&MaterialKind> for Material {
    /// Values must already be validated.
    fn from(kind: &MaterialKind) -> Self {
        match *kind {
            MaterialKind::Diffuse { albedo, model } => Diffuse::new(vec3(albedo), model).into(),
            MaterialKind::Metal { albedo, fuzz } => Metal::new(vec3(albedo), fuzz).into(),
            MaterialKind::Dielectric { ior } => Dielectric::new(ior).into(),
        }
    }
}
