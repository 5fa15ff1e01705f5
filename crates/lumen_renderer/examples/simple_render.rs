//! Simple path tracer example.
//!
//! Renders glass, diffuse and metal balls on a ground sphere and saves the
//! result to PPM format.

use lumen_renderer::{Camera, Dielectric, Diffuse, Metal, RenderSettings, SampleEngine, Vec3, World};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Lumen Path Tracer - Simple Example");
    println!("==================================");

    let world = build_scene();
    println!("Scene has {} objects", world.len());

    let camera = Camera::with_fov(
        Vec3::new(0.0, 0.5, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
        400,
        225,
        70f64.to_radians(),
    )
    .with_lens(0.05, 2.0);

    let settings = RenderSettings::default().with_samples(32).with_max_bounces(16);
    println!(
        "Rendering {}x{} @ {} spp...",
        camera.image_width(),
        camera.image_height(),
        settings.samples
    );

    let start = std::time::Instant::now();
    let image = SampleEngine::new(&camera, &world, settings).render::<u16>()?;
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    image.gamma2().convert::<u8>().save_ppm(filename)?;
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> World {
    let mut world = World::new();

    let ground = world.add_material(Diffuse::lambertian(Vec3::new(0.8, 0.8, 0.0)));
    let center = world.add_material(Diffuse::lambertian(Vec3::new(0.1, 0.2, 0.5)));
    let glass = world.add_material(Dielectric::new(1.5));
    let gold = world.add_material(Metal::new(Vec3::new(0.8, 0.6, 0.2), 0.1));

    world.add_sphere(Vec3::new(0.0, -100.5, -1.0), 100.0, ground);
    world.add_sphere(Vec3::new(0.0, 0.0, -1.2), 0.5, center);
    world.add_sphere(Vec3::new(-1.0, 0.0, -1.0), 0.5, glass);
    world.add_sphere(Vec3::new(1.0, 0.0, -1.0), 0.5, gold);

    world
}
