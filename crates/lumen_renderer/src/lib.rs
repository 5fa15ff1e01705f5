//! Lumen Renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over a world of spheres:
//!
//! - [`World`] stores materials and objects and traces rays through them
//! - [`Camera`] turns pixels into primary rays, with optional depth of field
//! - [`SampleEngine`] renders many jittered samples on a thread pool and
//!   averages them
//!
//! # Example
//!
//! ```ignore
//! use lumen_renderer::{Camera, Diffuse, RenderSettings, SampleEngine, World};
//! use lumen_math::Vec3;
//!
//! let mut world = World::new();
//! let gray = world.add_material(Diffuse::lambertian(Vec3::splat(0.5)));
//! world.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, gray);
//!
//! let camera = Camera::with_fov(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 400, 300, 1.5);
//! let settings = RenderSettings::default().with_samples(32);
//! let image = SampleEngine::new(&camera, &world, settings).render::<u16>()?;
//! ```

mod camera;
mod engine;
mod hittable;
mod material;
mod sphere;
mod world;

pub mod sampling;

pub use camera::Camera;
pub use engine::{sample_seeds, RenderError, RenderSettings, SampleEngine, SampleSeeds, DEFAULT_SEED};
pub use hittable::{HitRecord, Hittable, Object};
pub use material::{Color, Dielectric, Diffuse, Material, MaterialId, Metal, Scatter};
pub use sampling::BiasContext;
pub use sphere::Sphere;
pub use world::{World, DEFAULT_MAX_BOUNCES, T_MIN};

/// Re-export common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec3};
