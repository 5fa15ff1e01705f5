//! Lumen Core - pixels, rasters and scene files.
//!
//! This crate provides:
//!
//! - **Color model**: `Pixel<T>` at a fixed channel depth, `Raster<T>` with
//!   averaging, depth conversion and gamma correction
//! - **Output**: plain PPM and PNG writers, caption overlay
//! - **Scene files**: JSON scene descriptions loaded with serde
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::{Pixel8, Raster, SceneDescription};
//!
//! let scene = SceneDescription::load("scene.json")?;
//! println!("{} spheres", scene.spheres.len());
//!
//! let mut image = Raster::<u8>::new(4, 4);
//! image.set(0, 0, Pixel8::white());
//! image.write_ppm(&mut std::io::stdout())?;
//! ```

pub mod font;
pub mod pixel;
pub mod raster;
pub mod scene;

// Re-export commonly used types
pub use font::{text_size, TextStyle};
pub use pixel::{Channel, Pixel, Pixel16, Pixel8};
pub use raster::{OutputError, Raster};
pub use scene::{
    CameraDescription, DiffuseModel, MaterialDescription, MaterialKind, SceneDescription,
    SceneError, SceneResult, SphereDescription,
};
