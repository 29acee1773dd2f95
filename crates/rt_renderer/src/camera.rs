//! Pinhole camera for primary ray generation.

use crate::Ray;
use rt_math::Vec3;

/// Fixed camera at the world origin looking down -Z with +Y up.
///
/// Pixel (0, 0) is the top-left corner of the image.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,
    /// Vertical half extent of the image plane at z = -1, `tan(fov / 2)`
    half_extent: f64,
    aspect: f64,
}

impl Camera {
    /// Create a camera for a `width × height` image and a field of view in
    /// degrees. Sizes and fov are assumed valid; `RenderConfig::validate`
    /// checks them.
    pub fn new(width: u32, height: u32, fov_degrees: f64) -> Self {
        Self {
            image_width: width,
            image_height: height,
            half_extent: (fov_degrees.to_radians() / 2.0).tan(),
            aspect: f64::from(width) / f64::from(height),
        }
    }

    /// Primary ray through the centre of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let u = 2.0 * (f64::from(i) + 0.5) / f64::from(self.image_width) - 1.0;
        let v = 2.0 * (f64::from(j) + 0.5) / f64::from(self.image_height) - 1.0;
        let x = u * self.half_extent * self.aspect;
        let y = -v * self.half_extent;
        Ray::new(Vec3::ZERO, Vec3::new(x, y, -1.0).normalize())
    }
}
