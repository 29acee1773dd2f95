//! Surface materials for the Whitted shader.

use rt_math::Vec3;
use serde::{Deserialize, Serialize};

/// Color type alias (RGB values typically 0-1)
pub use rt_math::Color;

/// How a surface mixes local lighting, mirror reflection and refraction.
///
/// The four albedo weights are independent and deliberately not normalised;
/// a glossy mirror can return more light than it receives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Material {
    /// Weight of the diffuse (Lambert + ambient) term
    pub diffuse_albedo: f64,
    /// Weight of the white Phong highlight
    pub specular_albedo: f64,
    /// Weight of the mirror-reflected colour
    pub reflect_albedo: f64,
    /// Weight of the refracted colour
    pub refract_albedo: f64,
    /// Base colour of the diffuse term
    pub diffuse_color: Color,
    /// Phong exponent; larger is a tighter highlight
    pub specular_exponent: f64,
    /// Index of refraction against vacuum
    pub refractive_index: f64,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_albedo: 1.0,
            specular_albedo: 0.0,
            reflect_albedo: 0.0,
            refract_albedo: 0.0,
            diffuse_color: Color::ZERO,
            specular_exponent: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl Material {
    /// Create a purely local (no mirror, no refraction) material.
    pub fn new(
        diffuse_albedo: f64,
        specular_albedo: f64,
        diffuse_color: Color,
        specular_exponent: f64,
    ) -> Self {
        Self {
            diffuse_albedo,
            specular_albedo,
            diffuse_color,
            specular_exponent,
            ..Self::default()
        }
    }

    /// Set the mirror reflection weight.
    pub fn with_reflection(mut self, reflect_albedo: f64) -> Self {
        self.reflect_albedo = reflect_albedo;
        self
    }

    /// Set the refraction weight and index of refraction.
    pub fn with_refraction(mut self, refract_albedo: f64, refractive_index: f64) -> Self {
        self.refract_albedo = refract_albedo;
        self.refractive_index = refractive_index;
        self
    }

    /// Off-white, moderately glossy.
    pub fn ivory() -> Self {
        Self::new(0.6, 0.3, Color::new(0.4, 0.4, 0.3), 50.0)
    }

    /// Dark red, almost matte.
    pub fn red_rubber() -> Self {
        Self::new(0.9, 0.1, Color::new(0.3, 0.1, 0.1), 10.0)
    }

    /// Near-perfect mirror with a hard highlight.
    pub fn mirror() -> Self {
        Self::new(0.0, 10.0, Color::ONE, 1425.0).with_reflection(0.8)
    }

    /// Clear glass, index 1.5.
    pub fn glass() -> Self {
        Self::new(0.0, 0.5, Color::new(0.6, 0.7, 0.8), 125.0)
            .with_reflection(0.1)
            .with_refraction(0.8, 1.5)
    }

    fn coefficients(&self) -> [f64; 6] {
        [
            self.diffuse_albedo,
            self.specular_albedo,
            self.reflect_albedo,
            self.refract_albedo,
            self.specular_exponent,
            self.refractive_index,
        ]
    }

    /// True if every coefficient is finite.
    pub fn is_finite(&self) -> bool {
        self.diffuse_color.is_finite() && self.coefficients().iter().all(|c| c.is_finite())
    }

    /// True if no colour channel or coefficient is negative.
    ///
    /// A negative exponent turns a grazing highlight into `0^-e = inf`, and
    /// negative weights or channels give negative light.
    pub fn is_non_negative(&self) -> bool {
        self.diffuse_color.min_element() >= 0.0 && self.coefficients().iter().all(|&c| c >= 0.0)
    }

    /// White, used for the specular highlight colour.
    pub const WHITE: Color = Vec3::ONE;
}
