//! The scene: a material arena, a list of objects and the trace loop.

use crate::hittable::{HitRecord, Hittable, Object};
use crate::material::{Material, MaterialId, Scatter};
use crate::Sphere;
use lumen_core::{scene::vec3, Channel, Pixel, SceneDescription, SceneResult};
use lumen_math::{Interval, Ray, Vec3, VecExt};
use rand::RngCore;

/// Hits closer than this to the ray origin are ignored, so a scattered ray
/// does not hit the surface it starts on.
pub const T_MIN: f64 = 1e-8;

/// Default limit on path segments per primary ray.
pub const DEFAULT_MAX_BOUNCES: u32 = 64;

/// Color of the sky straight up.
const SKY_BLUE: Vec3 = Vec3::new(0.5, 0.7, 1.0);

/// Everything a ray can hit.
///
/// Objects and materials are only ever appended. Rendering borrows the world
/// immutably, so it cannot change while a render is running.
#[derive(Debug, Default)]
pub struct World {
    materials: Vec<Material>,
    objects: Vec<Object>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a material and return its handle.
    pub fn add_material(&mut self, material: impl Into<Material>) -> MaterialId {
        self.materials.push(material.into());
        MaterialId(self.materials.len() - 1)
    }

    /// Add an object. Its material must belong to this world.
    pub fn add_object(&mut self, object: impl Into<Object>) {
        let object = object.into();
        let id = object.material();
        assert!(
            id.0 < self.materials.len(),
            "material {} does not belong to this world",
            id.0
        );
        self.objects.push(object);
    }

    /// Shorthand for `add_object(Sphere::new(..))`.
    pub fn add_sphere(&mut self, center: Vec3, radius: f64, material: MaterialId) {
        self.add_object(Sphere::new(center, radius, material));
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Build a world from a validated scene description.
    pub fn from_description(scene: &SceneDescription) -> SceneResult<World> {
        scene.validate()?;

        let mut world = World::new();
        let ids: Vec<MaterialId> = scene
            .materials
            .iter()
            .map(|m| world.add_material(&m.kind))
            .collect();

        for sphere in &scene.spheres {
            // validate() guarantees the name resolves
            if let Some(index) = scene.material_index(&sphere.material) {
                world.add_sphere(vec3(sphere.center), sphere.radius, ids[index]);
            }
        }

        log::debug!(
            "Built world: {} materials, {} objects",
            world.material_count(),
            world.len()
        );
        Ok(world)
    }

    /// Nearest object hit by `ray` within `ray_t`, by linear scan.
    pub fn nearest_hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut range = ray_t;

        for object in &self.objects {
            if let Some(t) = object.hit(ray, range) {
                range = range.with_max(t);
                closest = Some(HitRecord { object, t });
            }
        }

        closest
    }

    /// Sky gradient seen by a ray that escapes the scene, dimmed by the
    /// ray's decay.
    pub fn background<T: Channel>(ray: &Ray) -> Pixel<T> {
        let u = (ray.direction().y + 1.0) * 0.5;
        let sky = Pixel::mix(Pixel::white(), Pixel::from_color(SKY_BLUE), 1.0 - u, u);
        sky.attenuate(ray.decay())
    }

    /// Follow a primary ray through the scene and return its color.
    ///
    /// `rng` drives material scattering. A path still bouncing after
    /// `max_bounces` segments is black.
    pub fn trace<T: Channel>(&self, ray: Ray, rng: &mut dyn RngCore, max_bounces: u32) -> Pixel<T> {
        debug_assert!(ray.decay().is_one(), "primary rays start at full power");
        log::trace!("trace start (limit={max_bounces}) dir={} ", ray.direction());

        let mut ray = ray;
        for step in 0..max_bounces {
            let Some(hit) = self.nearest_hit(&ray, Interval::from_min(T_MIN)) else {
                log::trace!("step {step}: hit background, decay={}", ray.decay());
                return Self::background(&ray);
            };

            log::trace!("step {step}: hit at t={} point={}", hit.t, ray.at(hit.t));
            let material = self.material(hit.object.material());
            match material.scatter(&ray, hit.object, hit.t, rng) {
                Some(next) => {
                    log::trace!("step {step}: scattered dir={} decay={}", next.direction(), next.decay());
                    ray = next;
                }
                None => {
                    log::trace!("step {step}: absorbed");
                    return Pixel::black();
                }
            }
        }

        log::trace!("bounce limit reached");
        Pixel::black()
    }
}
