use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Log levels selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Demo {
    /// Field of small random balls around three large ones
    Final,
    /// One diffuse ball on a ground sphere
    Ground,
}

/// Channel depth of the rendered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Depth {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

/// Command line arguments.
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Offline path tracer for sphere scenes, writes a plain PPM image to stdout")]
pub struct Args {
    /// Image width in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub width: u32,

    /// Image height in pixels
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub height: u32,

    /// Samples per pixel
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    pub spp: u32,

    /// Lens radius, 0 for a pinhole camera
    pub aperture: Option<f64>,

    /// Distance to the plane of perfect focus, along the view direction
    pub focus_distance: Option<f64>,

    /// Text drawn at the bottom-left corner of the image
    pub caption: Option<String>,

    /// Worker threads (0 = one per core)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,

    /// Master seed for all sampling streams
    #[arg(long, default_value_t = lumen_renderer::DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum path segments per primary ray
    #[arg(long, default_value_t = lumen_renderer::DEFAULT_MAX_BOUNCES)]
    pub max_bounces: u32,

    /// Load the scene from a JSON file instead of a built-in scene
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Built-in scene to render
    #[arg(long, value_enum, default_value = "final")]
    pub demo: Demo,

    /// Also save an 8-bit PNG
    #[arg(long)]
    pub png: Option<PathBuf>,

    /// Channel depth used while rendering and for the PPM output
    #[arg(long, value_enum, default_value = "16")]
    pub depth: Depth,

    /// Set the logging level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}
