//! Parallel sample accumulation.
//!
//! Every sample is a complete, independent render of the image with its
//! own jitter and scatter streams. Samples are handed out to a fixed set of
//! workers through one atomic counter, then averaged in sample order, so the
//! result depends only on the settings and never on the thread count.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use lumen_core::{Channel, Raster};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::ThreadPoolBuilder;
use thiserror::Error;

use crate::sampling::BiasContext;
use crate::world::DEFAULT_MAX_BOUNCES;
use crate::{Camera, World};

/// Default master seed.
pub const DEFAULT_SEED: u64 = 123_456_789_012_345_678;

/// Errors that can occur while setting up a render.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to start worker threads: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Samples per pixel; each one is a full render
    pub samples: u32,
    /// Worker threads, 0 = one per core
    pub threads: usize,
    /// Maximum path segments per primary ray
    pub max_bounces: u32,
    /// Master seed every per-sample stream derives from
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples: 1,
            threads: 0,
            max_bounces: DEFAULT_MAX_BOUNCES,
            seed: DEFAULT_SEED,
        }
    }
}

impl RenderSettings {
    pub fn with_samples(mut self, samples: u32) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Seeds for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleSeeds {
    /// Drives sub-pixel jitter and lens positions
    pub bias: u64,
    /// Drives material scattering
    pub diffuse: u64,
}

/// Derive per-sample seeds from the master seed, in sample order.
pub fn sample_seeds(master: u64, samples: usize) -> Vec<SampleSeeds> {
    let mut rng = ChaCha20Rng::seed_from_u64(master);
    (0..samples)
        .map(|_| {
            let bias = rng.next_u64();
            let diffuse = rng.next_u64();
            SampleSeeds { bias, diffuse }
        })
        .collect()
}

/// Renders a camera view of a world at many samples per pixel.
pub struct SampleEngine<'a> {
    camera: &'a Camera,
    world: &'a World,
    settings: RenderSettings,
}

impl<'a> SampleEngine<'a> {
    pub fn new(camera: &'a Camera, world: &'a World, settings: RenderSettings) -> Self {
        Self {
            camera,
            world,
            settings,
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Number of workers the render will use.
    pub fn thread_count(&self) -> usize {
        let threads = match self.settings.threads {
            0 => rayon::current_num_threads(),
            n => n,
        };
        threads.min(self.settings.samples as usize).max(1)
    }

    /// Render a single sample.
    ///
    /// A single-sample render uses no jitter, so pixels are sampled at
    /// their corners through the center of the lens.
    pub fn render_sample<T: Channel>(&self, seeds: &SampleSeeds) -> Raster<T> {
        let mut bias = if self.settings.samples > 1 {
            BiasContext::new(seeds.bias)
        } else {
            BiasContext::disabled()
        };
        self.camera
            .render(self.world, &mut bias, seeds.diffuse, self.settings.max_bounces)
    }

    /// Render every sample and average them.
    pub fn render<T: Channel>(&self) -> Result<Raster<T>, RenderError> {
        let samples = self.settings.samples as usize;
        assert!(samples > 0, "at least one sample is needed");

        let start = Instant::now();
        let seeds = sample_seeds(self.settings.seed, samples);
        log::info!("Seeded {} samples in {:.2?}", samples, start.elapsed());

        let workers = self.thread_count();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("lumen-worker-{i}"))
            .build()?;
        log::info!("Dispatcher: atomic counter, {} workers", workers);

        let start = Instant::now();
        let next = AtomicUsize::new(0);
        let finished = pool.broadcast(|ctx| {
            let mut done = Vec::new();
            loop {
                let index = next.fetch_add(1, Ordering::Relaxed);
                if index >= samples {
                    break;
                }
                let task_start = Instant::now();
                done.push((index, self.render_sample::<T>(&seeds[index])));
                log::debug!(
                    "Worker {} rendered sample {} in {:.2?}",
                    ctx.index(),
                    index,
                    task_start.elapsed()
                );
            }
            done
        });

        let mut slots: Vec<Option<Raster<T>>> = (0..samples).map(|_| None).collect();
        for (index, raster) in finished.into_iter().flatten() {
            slots[index] = Some(raster);
        }
        let rasters: Vec<Raster<T>> = slots.into_iter().flatten().collect();
        assert_eq!(rasters.len(), samples, "every sample must be rendered exactly once");

        let elapsed = start.elapsed();
        let rays = samples as f64 * self.camera.image_width() as f64 * self.camera.image_height() as f64;
        log::info!(
            "Rendered {} samples in {:.2?} ({:.2} Mrays/s)",
            samples,
            elapsed,
            rays / elapsed.as_secs_f64().max(f64::EPSILON) / 1e6
        );

        Ok(Raster::average(&rasters))
    }
}
