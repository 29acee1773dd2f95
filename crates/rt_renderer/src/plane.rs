//! Infinite plane with a procedural checkerboard.

use crate::{hittable::Hittable, Material, Ray};
use rt_math::Vec3;
use serde::{Deserialize, Serialize};

/// Rays closer to parallel than this never hit a plane.
pub const PARALLEL_EPSILON: f64 = 1e-4;

/// Default shift of the checker grid along x.
pub const DEFAULT_CHECKER_OFFSET: f64 = 100.0;

/// World-space frequency of the checker cells (cells are 2.5 units wide).
const CHECKER_SCALE: f64 = 0.4;

fn default_checker_offset() -> f64 {
    DEFAULT_CHECKER_OFFSET
}

/// An infinite plane alternating between two materials in a checkerboard
/// keyed on world x and z.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    pub point: Vec3,
    /// Unit normal. A zero normal marks a degenerate plane and is rejected
    /// by scene validation.
    pub normal: Vec3,
    #[serde(default)]
    pub material_a: Material,
    #[serde(default)]
    pub material_b: Material,
    #[serde(default = "default_checker_offset")]
    pub checker_offset: f64,
}

impl Plane {
    /// Create a new plane. `normal` is normalised here.
    pub fn new(point: Vec3, normal: Vec3, material_a: Material, material_b: Material) -> Self {
        Self {
            point,
            normal: normal.normalize_or_zero(),
            material_a,
            material_b,
            checker_offset: DEFAULT_CHECKER_OFFSET,
        }
    }

    /// A plane with the same material everywhere.
    pub fn solid(point: Vec3, normal: Vec3, material: Material) -> Self {
        Self::new(point, normal, material, material)
    }

    /// Shift the checker grid along x.
    pub fn with_checker_offset(mut self, offset: f64) -> Self {
        self.checker_offset = offset;
        self
    }

    /// Parity of the checker cell containing `point`: true for odd cells.
    fn is_odd_cell(&self, point: Vec3) -> bool {
        let cell_x = (CHECKER_SCALE * point.x + self.checker_offset).floor();
        let cell_z = (CHECKER_SCALE * point.z).floor();
        (cell_x + cell_z).rem_euclid(2.0) == 1.0
    }
}

impl Hittable for Plane {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let denom = ray.direction().dot(self.normal);
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = -(ray.origin() - self.point).dot(self.normal) / denom;
        (t > 0.0).then_some(t)
    }

    fn normal_at(&self, _point: Vec3) -> Vec3 {
        self.normal
    }

    fn material_at(&self, point: Vec3) -> Material {
        if self.is_odd_cell(point) {
            self.material_a
        } else {
            self.material_b
        }
    }
}
