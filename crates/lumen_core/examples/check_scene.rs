//! Example: Validate a JSON scene file.
//!
//! Run with: cargo run --example check_scene -- scenes/ground.json

use std::env;

use lumen_core::{MaterialKind, SceneDescription};

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: check_scene <path-to-scene-json>");
        return;
    }

    let path = &args[1];
    println!("Checking scene file: {}", path);

    match SceneDescription::load(path) {
        Ok(scene) => {
            let camera = &scene.camera;
            println!(
                "Camera: eye {:?} -> {:?}, fov {:.1}°, aperture {}",
                camera.eye, camera.screen_center, camera.fov_degrees, camera.aperture
            );

            println!("\n--- Materials ---");
            for material in &scene.materials {
                let users = scene
                    .spheres
                    .iter()
                    .filter(|s| s.material == material.name)
                    .count();
                let kind = match material.kind {
                    MaterialKind::Diffuse { model, .. } => format!("diffuse ({model:?})"),
                    MaterialKind::Metal { fuzz, .. } => format!("metal (fuzz {fuzz})"),
                    MaterialKind::Dielectric { ior } => format!("dielectric (ior {ior})"),
                };
                println!("  {} - {}, used by {} sphere(s)", material.name, kind, users);
            }

            println!("\n{} spheres OK", scene.spheres.len());
        }
        Err(e) => {
            eprintln!("Invalid scene: {}", e);
            std::process::exit(1);
        }
    }
}
