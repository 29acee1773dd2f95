//! Sphere primitive for ray tracing.

use crate::{hittable::Hittable, Material, Ray};
use rt_math::Vec3;
use serde::{Deserialize, Serialize};

/// A sphere primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f64,
    #[serde(default)]
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere.
    pub fn new(center: Vec3, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }
}

impl Hittable for Sphere {
    /// Projects the centre onto the ray and solves for the two crossings.
    ///
    /// The near root wins; when the origin is inside the sphere the near
    /// root is negative and the far one is used instead.
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        let to_center = self.center - ray.origin();
        let along = to_center.dot(ray.direction());
        let perp_sq = to_center.length_squared() - along * along;
        let radius_sq = self.radius * self.radius;

        // The ray misses the bounding circle
        if perp_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - perp_sq).sqrt();
        let near = along - half_chord;
        let far = along + half_chord;

        let t = if near < 0.0 { far } else { near };
        (t >= 0.0).then_some(t)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize_or_zero()
    }

    fn material_at(&self, _point: Vec3) -> Material {
        self.material
    }
}
