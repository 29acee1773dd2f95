//! RT Renderer - Whitted-style CPU ray tracing
//!
//! Renders spheres, checkerboard planes and triangles lit by point lights.
//! Each pixel gets one primary ray; hits are shaded with Phong direct
//! lighting plus recursive mirror reflection and refraction up to a fixed
//! depth. The nearest-hit search is a plain linear scan over the scene.
//!
//! # Example
//!
//! ```no_run
//! use rt_renderer::{render, save_bmp, Light, Material, RenderConfig, Scene, Sphere, Vec3};
//!
//! let scene = Scene::new()
//!     .with(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 3.0, Material::ivory()))
//!     .with_light(Light::new(Vec3::new(10.0, 10.0, 10.0), 1.5));
//!
//! let config = RenderConfig::default().with_resolution(640, 480).with_workers(4);
//! let image = render(&scene, &config)?;
//! save_bmp(&image, "out.bmp")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod camera;
mod framebuffer;
mod hittable;
mod light;
mod material;
mod output;
mod plane;
mod renderer;
mod scene;
mod sphere;
mod tracer;
mod triangle;

pub use camera::Camera;
pub use framebuffer::{
    color_to_packed, pack_rgb, quantize_channel, tone_map, unpack_rgb, Framebuffer, PackedImage,
};
pub use hittable::{HitRecord, Hittable};
pub use light::Light;
pub use material::{Color, Material};
pub use output::{save_bmp, to_rgb_image, OutputError};
pub use plane::{Plane, DEFAULT_CHECKER_OFFSET, PARALLEL_EPSILON};
pub use renderer::{
    render, render_framebuffer, render_pixel, render_with_progress, RenderConfig, RenderError,
    DEFAULT_AMBIENT_BIAS, DEFAULT_BACKGROUND, DEFAULT_EPSILON, DEFAULT_FOV_DEGREES,
    DEFAULT_HEIGHT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_DISTANCE, DEFAULT_WIDTH,
};
pub use scene::{Primitive, Scene, SceneError, SceneResult};
pub use sphere::Sphere;
pub use tracer::{Illumination, TraceStats, Tracer};
pub use triangle::Triangle;

/// Re-export the math types from rt_math
pub use rt_math::{Interval, Ray, Vec3};
