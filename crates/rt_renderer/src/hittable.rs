//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Material, Ray};
use rt_math::Vec3;

/// Record of a ray-object intersection.
///
/// Produced by [`Scene::nearest_hit`](crate::Scene::nearest_hit) and
/// consumed straight away by the shader.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Point of intersection
    pub point: Vec3,
    /// Outward unit surface normal at the intersection
    pub normal: Vec3,
    /// Material at the intersection point
    pub material: Material,
    /// Parameter t along the ray where the intersection occurs
    pub distance: f64,
}

/// Trait for surfaces that can be hit by rays.
///
/// Every method takes a ray whose direction is a unit vector.
pub trait Hittable: Send + Sync {
    /// Nearest non-negative ray parameter at which the ray meets the
    /// surface, or `None` if it never does.
    fn intersect(&self, ray: &Ray) -> Option<f64>;

    /// Outward unit normal at a point on the surface.
    fn normal_at(&self, point: Vec3) -> Vec3;

    /// Material at a point on the surface.
    fn material_at(&self, point: Vec3) -> Material;

    /// Build the hit record for a known ray parameter.
    fn record(&self, ray: &Ray, distance: f64) -> HitRecord {
        let point = ray.at(distance);
        HitRecord {
            point,
            normal: self.normal_at(point),
            material: self.material_at(point),
            distance,
        }
    }

    /// Intersect and, on a hit, fill in the full record.
    fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        self.intersect(ray).map(|distance| self.record(ray, distance))
    }
}
