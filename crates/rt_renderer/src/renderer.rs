//! Image generation.
//!
//! Casts one primary ray per pixel through the [`Tracer`] and fills a
//! [`Framebuffer`]. Rows are independent; with more than one worker they are
//! spread over a dedicated rayon pool, each row written by exactly one task.
//! The result does not depend on the worker count.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Camera, Color, Framebuffer, PackedImage, Scene, SceneError, Tracer};
use rt_math::Interval;

/// Recursion levels shaded below the primary hit.
pub const DEFAULT_MAX_DEPTH: u32 = 4;
/// Offset applied to secondary ray origins.
pub const DEFAULT_EPSILON: f64 = 1e-4;
/// Hits at or beyond this distance are ignored.
pub const DEFAULT_MAX_DISTANCE: f64 = 1000.0;
/// Flat ambient term added to the diffuse light sum.
pub const DEFAULT_AMBIENT_BIAS: f64 = 0.2;
/// Vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f64 = 60.0;
pub const DEFAULT_WIDTH: u32 = 512;
pub const DEFAULT_HEIGHT: u32 = 512;
/// Colour of rays that escape or run out of depth.
pub const DEFAULT_BACKGROUND: Color = Color::new(0.1, 0.05, 0.1);

/// Errors that stop a render before it starts.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid resolution {width}x{height}: both sides must be non-zero")]
    InvalidResolution { width: u32, height: u32 },

    #[error("Invalid field of view {0} degrees: must be strictly between 0 and 180")]
    InvalidFov(f64),

    #[error("Worker count must be at least 1")]
    InvalidWorkers,

    #[error("Invalid epsilon {0}: must be positive and finite")]
    InvalidEpsilon(f64),

    #[error("Invalid max distance {0}: must be positive")]
    InvalidDistance(f64),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Render configuration.
///
/// Every tuning constant of the tracer lives here so that concurrent renders
/// can use different settings. Missing fields in a JSON config take the
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f64,
    /// Rows rendered concurrently; 1 renders on the calling thread
    pub workers: usize,
    /// Deepest recursion level that is still shaded
    pub max_depth: u32,
    /// Offset applied to secondary ray origins
    pub epsilon: f64,
    /// Hits at or beyond this distance count as misses
    pub max_distance: f64,
    /// Returned by rays that escape or exceed `max_depth`
    pub background: Color,
    /// Added to the diffuse light sum of every hit
    pub ambient_bias: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            fov_degrees: DEFAULT_FOV_DEGREES,
            workers: 1,
            max_depth: DEFAULT_MAX_DEPTH,
            epsilon: DEFAULT_EPSILON,
            max_distance: DEFAULT_MAX_DISTANCE,
            background: DEFAULT_BACKGROUND,
            ambient_bias: DEFAULT_AMBIENT_BIAS,
        }
    }
}

impl RenderConfig {
    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the vertical field of view in degrees.
    pub fn with_fov(mut self, fov_degrees: f64) -> Self {
        self.fov_degrees = fov_degrees;
        self
    }

    /// Set the number of render workers.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Set the maximum recursion depth.
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Parse a configuration from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reject settings that would make the camera or tracer misbehave.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if !Interval::new(0.0, 180.0).surrounds(self.fov_degrees) {
            return Err(RenderError::InvalidFov(self.fov_degrees));
        }
        if self.workers == 0 {
            return Err(RenderError::InvalidWorkers);
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(RenderError::InvalidEpsilon(self.epsilon));
        }
        if self.max_distance.is_nan() || self.max_distance <= 0.0 {
            return Err(RenderError::InvalidDistance(self.max_distance));
        }
        Ok(())
    }
}

/// Colour of a single pixel.
pub fn render_pixel(tracer: &Tracer, camera: &Camera, x: u32, y: u32) -> Color {
    tracer.cast_ray(&camera.get_ray(x, y), 0)
}

/// Fill one framebuffer row.
fn render_row(tracer: &Tracer, camera: &Camera, y: u32, row: &mut [Color]) {
    for (x, pixel) in (0u32..).zip(row.iter_mut()) {
        *pixel = render_pixel(tracer, camera, x, y);
    }
}

/// Render the scene to a floating-point framebuffer.
pub fn render_framebuffer(
    scene: &Scene,
    config: &RenderConfig,
) -> Result<Framebuffer, RenderError> {
    render_with_progress(scene, config, |_, _| {})
}

/// Render the scene to a floating-point framebuffer, calling `progress`
/// with `(rows_done, rows_total)` after each finished row.
///
/// With several workers rows finish out of order, so `rows_done` counts
/// rows rather than naming one. The callback cannot influence pixels.
pub fn render_with_progress<F>(
    scene: &Scene,
    config: &RenderConfig,
    progress: F,
) -> Result<Framebuffer, RenderError>
where
    F: Fn(u32, u32) + Sync,
{
    config.validate()?;
    scene.validate()?;

    log::info!(
        "Rendering {}x{} (fov {}°, depth {}) with {} worker(s): {} primitives, {} lights",
        config.width,
        config.height,
        config.fov_degrees,
        config.max_depth,
        config.workers,
        scene.primitives.len(),
        scene.lights.len()
    );
    let start = Instant::now();

    let camera = Camera::new(config.width, config.height, config.fov_degrees);
    let tracer = Tracer::new(scene, config);
    let mut image = Framebuffer::new(config.width, config.height);
    let row_len = config.width as usize;
    let rows_done = AtomicU32::new(0);

    let finish_row = |y: usize, row: &mut [Color]| {
        render_row(&tracer, &camera, y as u32, row);
        let done = rows_done.fetch_add(1, Ordering::Relaxed) + 1;
        progress(done, config.height);
    };

    if config.workers == 1 {
        image
            .pixels
            .chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| finish_row(y, row));
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .build()?;
        pool.install(|| {
            image
                .pixels
                .par_chunks_mut(row_len)
                .enumerate()
                .for_each(|(y, row)| finish_row(y, row));
        });
    }

    log::info!("Rendered in {:?}", start.elapsed());
    Ok(image)
}

/// Render the scene and quantize it into the packed, bottom-up pixel
/// buffer.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<PackedImage, RenderError> {
    Ok(render_framebuffer(scene, config)?.to_packed())
}
