//! Lumen command line renderer.
//!
//! Renders a built-in or JSON scene and writes the image as plain PPM to
//! stdout. Progress goes to stderr through the logger.

mod cli;
mod logger;
mod scenes;

use std::io::{BufWriter, Write};

use anyhow::{ensure, Context, Result};
use clap::Parser;
use lumen_core::{text_size, Channel, Pixel, Raster, SceneDescription, TextStyle};
use lumen_renderer::{Camera, RenderSettings, SampleEngine, World};

use cli::{Args, Demo, Depth};

/// Setting this variable (to anything) skips writing the image.
const NO_OUTPUT_VAR: &str = "LUMEN_NO_OUTPUT";

/// Distance of the caption from the image edges, in pixels.
const CAPTION_MARGIN: i64 = 4;

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // Usage errors are not failures
            let _ = err.print();
            std::process::exit(0);
        }
    };

    logger::init_logger(args.log_level.into());

    let (world, camera) = build_scene(&args)?;
    let settings = RenderSettings::default()
        .with_samples(args.spp)
        .with_threads(args.threads)
        .with_max_bounces(args.max_bounces)
        .with_seed(args.seed);

    log::info!(
        "Image size: {}x{}, spp: {}, objects: {}",
        args.width,
        args.height,
        args.spp,
        world.len()
    );

    let engine = SampleEngine::new(&camera, &world, settings);
    match args.depth {
        Depth::Eight => output(engine.render::<u8>()?, &args),
        Depth::Sixteen => output(engine.render::<u16>()?, &args),
    }
}

/// Write the image to stdout, and to `--png` if given, unless output is
/// switched off.
fn output<T: Channel>(image: Raster<T>, args: &Args) -> Result<()> {
    if std::env::var_os(NO_OUTPUT_VAR).is_some() {
        log::info!("{NO_OUTPUT_VAR} is set, not writing any image");
        return Ok(());
    }

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    finish(image, args, &mut out)
}

/// World and camera for the requested scene, with lens overrides applied.
fn build_scene(args: &Args) -> Result<(World, Camera)> {
    let (world, camera) = match &args.scene {
        Some(path) => {
            let scene = SceneDescription::load(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            let world = World::from_description(&scene)?;
            let camera = Camera::from_description(&scene.camera, args.width, args.height);
            (world, camera)
        }
        None => match args.demo {
            Demo::Final => scenes::final_scene(args.width, args.height),
            Demo::Ground => scenes::ground_scene(args.width, args.height),
        },
    };

    let camera = match args.aperture {
        Some(aperture) => {
            let focus = args.focus_distance.unwrap_or(camera.focus_distance());
            ensure!(aperture >= 0.0, "aperture must not be negative, got {aperture}");
            ensure!(focus > 0.0, "focus distance must be positive, got {focus}");
            log::info!("Lens: aperture {aperture}, focus distance {focus}");
            camera.with_lens(aperture, focus)
        }
        None => camera,
    };

    Ok((world, camera))
}

/// Gamma-correct, caption and write the rendered image as PPM to `out`.
fn finish<T: Channel, W: Write>(image: Raster<T>, args: &Args, out: &mut W) -> Result<()> {
    let mut image = image.gamma2();

    if let Some(caption) = &args.caption {
        draw_caption(&mut image, caption);
    }

    if let Some(path) = &args.png {
        image
            .convert::<u8>()
            .save_png(path)
            .with_context(|| format!("Failed to save {}", path.display()))?;
    }

    image.write_ppm(out).context("Failed to write image")?;
    out.flush().context("Failed to write image")?;
    Ok(())
}

/// White text at the bottom-left corner, scaled with the image height.
fn draw_caption<T: Channel>(image: &mut Raster<T>, caption: &str) {
    let scale = (image.height() / 120).max(1);
    let (_, text_height) = text_size(caption, scale);
    let style = TextStyle::new(Pixel::white()).with_alpha(0.85).with_scale(scale);
    let y = image.height() as i64 - text_height as i64 - CAPTION_MARGIN;
    image.draw_text(CAPTION_MARGIN, y, caption, &style);
}
