//! Built-in demo scenes.

use lumen_renderer::{Camera, Dielectric, Diffuse, Metal, Vec3, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Seed for the layout of the small balls in the final scene.
const FINAL_SCENE_SEED: u64 = 0x793d_ef63_44ef_29d4;

/// A ground sphere, a 22×22 grid of small random balls and three large
/// balls of glass, diffuse brown and mirror metal.
pub fn final_scene(width: u32, height: u32) -> (World, Camera) {
    let mut rng = ChaCha20Rng::seed_from_u64(FINAL_SCENE_SEED);
    let mut world = World::new();

    // Shared by every small glass ball
    let glass = world.add_material(Dielectric::new(1.5));

    let ground = world.add_material(Diffuse::lambertian(Vec3::splat(0.5)));
    world.add_sphere(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground);

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat: f64 = rng.gen();
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            // Keep clear of the large metal ball
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.8 {
                let albedo = Vec3::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                world.add_material(Diffuse::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = Vec3::new(
                    0.5 * rng.gen::<f64>() + 0.5,
                    0.5 * rng.gen::<f64>() + 0.5,
                    0.5 * rng.gen::<f64>() + 0.5,
                );
                let fuzz = 0.5 * rng.gen::<f64>();
                world.add_material(Metal::new(albedo, fuzz))
            } else {
                glass
            };
            world.add_sphere(center, 0.2, material);
        }
    }

    let big_glass = world.add_material(Dielectric::new(1.5));
    world.add_sphere(Vec3::new(0.0, 1.0, 0.0), 1.0, big_glass);

    let brown = world.add_material(Diffuse::lambertian(Vec3::new(0.4, 0.2, 0.1)));
    world.add_sphere(Vec3::new(-4.0, 1.0, 0.0), 1.0, brown);

    let mirror = world.add_material(Metal::new(Vec3::new(0.7, 0.6, 0.5), 0.0));
    world.add_sphere(Vec3::new(4.0, 1.0, 0.0), 1.0, mirror);

    let camera = Camera::with_fov(
        Vec3::new(13.0, 2.0, 3.0),
        Vec3::new(6.5, 1.0, 1.5),
        width,
        height,
        28f64.to_radians(),
    );

    (world, camera)
}

/// A diffuse ball resting on a large ground sphere.
pub fn ground_scene(width: u32, height: u32) -> (World, Camera) {
    let mut world = World::new();
    let gray = world.add_material(Diffuse::lambertian(Vec3::splat(0.5)));
    world.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, gray);
    world.add_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, gray);

    let camera = Camera::with_fov(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), width, height, 90f64.to_radians());
    (world, camera)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_scene_layout() {
        let (world, camera) = final_scene(120, 80);
        // Ground, at most 22×22 small balls, three big ones
        assert!(world.len() > 4 && world.len() <= 1 + 22 * 22 + 3);
        assert_eq!(camera.eye(), Vec3::new(13.0, 2.0, 3.0));
        assert_eq!((camera.image_width(), camera.image_height()), (120, 80));
    }

    #[test]
    fn test_final_scene_is_reproducible() {
        let (a, _) = final_scene(4, 4);
        let (b, _) = final_scene(4, 4);
        assert_eq!(a.objects(), b.objects());
        assert_eq!(a.material_count(), b.material_count());
    }

    #[test]
    fn test_ground_scene() {
        let (world, camera) = ground_scene(16, 12);
        assert_eq!(world.len(), 2);
        assert_eq!(world.material_count(), 1);
        assert!((camera.half_height() - 0.75).abs() < 1e-12);
    }
}
