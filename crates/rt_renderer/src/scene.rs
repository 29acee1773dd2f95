//! Scene description: owned primitives plus point lights.
//!
//! A scene is built once, validated, and then shared read-only by every
//! render worker. It can also be loaded from JSON:
//!
//! ```json
//! {
//!   "primitives": [
//!     { "type": "sphere", "center": [0, 0, -10], "radius": 3,
//!       "material": { "diffuse_color": [0.4, 0.4, 0.3] } }
//!   ],
//!   "lights": [ { "position": [10, 10, 10], "intensity": 1.5 } ]
//! }
//! ```

use std::path::Path;

use rt_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{HitRecord, Hittable, Light, Material, Plane, Ray, Sphere, Triangle};

/// Errors that make a scene unrenderable.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scene parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Scene has no primitives")]
    Empty,

    #[error("Primitive {index}: sphere radius must be positive and finite, got {radius}")]
    InvalidRadius { index: usize, radius: f64 },

    #[error("Primitive {index}: plane normal must be a non-zero unit vector")]
    DegenerateNormal { index: usize },

    #[error("Primitive {index}: triangle has zero area")]
    DegenerateTriangle { index: usize },

    #[error("Primitive {index}: material colours and coefficients must not be negative")]
    InvalidMaterial { index: usize },

    #[error("Light {index}: intensity must not be negative, got {intensity}")]
    NegativeIntensity { index: usize, intensity: f64 },

    #[error("{what} contains a non-finite value")]
    NonFinite { what: String },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Any of the supported surface kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
    Triangle(Triangle),
}

impl Primitive {
    /// Reject geometry the intersection code cannot handle.
    fn validate(&self, index: usize) -> SceneResult<()> {
        let non_finite = |kind: &str| SceneError::NonFinite {
            what: format!("Primitive {index} ({kind})"),
        };

        match self {
            Primitive::Sphere(s) => {
                if !s.center.is_finite() || !s.material.is_finite() {
                    return Err(non_finite("sphere"));
                }
                if !(s.radius.is_finite() && s.radius > 0.0) {
                    return Err(SceneError::InvalidRadius { index, radius: s.radius });
                }
            }
            Primitive::Plane(p) => {
                if !p.point.is_finite()
                    || !p.checker_offset.is_finite()
                    || !p.material_a.is_finite()
                    || !p.material_b.is_finite()
                {
                    return Err(non_finite("plane"));
                }
                if !p.normal.is_finite() || (p.normal.length() - 1.0).abs() > 1e-9 {
                    return Err(SceneError::DegenerateNormal { index });
                }
            }
            Primitive::Triangle(t) => {
                if ![t.v0, t.v1, t.v2].iter().all(|v| v.is_finite()) || !t.material.is_finite() {
                    return Err(non_finite("triangle"));
                }
                if t.face_normal() == Vec3::ZERO {
                    return Err(SceneError::DegenerateTriangle { index });
                }
            }
        }

        let materials_ok = match self {
            Primitive::Sphere(s) => s.material.is_non_negative(),
            Primitive::Plane(p) => {
                p.material_a.is_non_negative() && p.material_b.is_non_negative()
            }
            Primitive::Triangle(t) => t.material.is_non_negative(),
        };
        if !materials_ok {
            return Err(SceneError::InvalidMaterial { index });
        }
        Ok(())
    }

    fn as_hittable(&self) -> &dyn Hittable {
        match self {
            Primitive::Sphere(s) => s,
            Primitive::Plane(p) => p,
            Primitive::Triangle(t) => t,
        }
    }
}

impl Hittable for Primitive {
    fn intersect(&self, ray: &Ray) -> Option<f64> {
        self.as_hittable().intersect(ray)
    }

    fn normal_at(&self, point: Vec3) -> Vec3 {
        self.as_hittable().normal_at(point)
    }

    fn material_at(&self, point: Vec3) -> Material {
        self.as_hittable().material_at(point)
    }
}

impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}

impl From<Plane> for Primitive {
    fn from(p: Plane) -> Self {
        Primitive::Plane(p)
    }
}

impl From<Triangle> for Primitive {
    fn from(t: Triangle) -> Self {
        Primitive::Triangle(t)
    }
}

/// Primitives and lights for one render.
///
/// Primitive order only matters when two hits are at exactly the same
/// distance; the first one wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub primitives: Vec<Primitive>,
    #[serde(default)]
    pub lights: Vec<Light>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a primitive.
    pub fn add(&mut self, primitive: impl Into<Primitive>) {
        self.primitives.push(primitive.into());
    }

    /// Add a light.
    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Builder form of [`add`](Self::add).
    pub fn with(mut self, primitive: impl Into<Primitive>) -> Self {
        self.add(primitive);
        self
    }

    /// Builder form of [`add_light`](Self::add_light).
    pub fn with_light(mut self, light: Light) -> Self {
        self.add_light(light);
        self
    }

    /// Get the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Check if the scene has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Parse a scene from JSON text.
    ///
    /// Plane normals in the file need not be unit length.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let mut scene: Scene = serde_json::from_str(json)?;
        for primitive in &mut scene.primitives {
            if let Primitive::Plane(plane) = primitive {
                plane.normal = plane.normal.normalize_or_zero();
            }
        }
        Ok(scene)
    }

    /// Load a scene from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let scene = Self::from_json_str(&text)?;
        log::debug!(
            "Loaded scene {}: {} primitives, {} lights",
            path.display(),
            scene.primitives.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    /// Check that the scene can be rendered without degenerate numerics.
    ///
    /// A scene without lights is valid; it is lit by the ambient term only.
    pub fn validate(&self) -> SceneResult<()> {
        if self.primitives.is_empty() {
            return Err(SceneError::Empty);
        }
        for (index, primitive) in self.primitives.iter().enumerate() {
            primitive.validate(index)?;
        }
        for (index, light) in self.lights.iter().enumerate() {
            if !light.position.is_finite() || !light.intensity.is_finite() {
                return Err(SceneError::NonFinite {
                    what: format!("Light {index}"),
                });
            }
            if light.intensity < 0.0 {
                return Err(SceneError::NegativeIntensity {
                    index,
                    intensity: light.intensity,
                });
            }
        }
        if self.lights.is_empty() {
            log::warn!("Scene has no lights; only ambient shading will be visible");
        }
        Ok(())
    }

    /// Nearest hit strictly closer than `max_distance`.
    ///
    /// Brute-force scan over every primitive. A ray with a zero direction
    /// never hits anything.
    pub fn nearest_hit(&self, ray: &Ray, max_distance: f64) -> Option<HitRecord> {
        if ray.is_degenerate() {
            return None;
        }

        let mut nearest: Option<(f64, &Primitive)> = None;
        let mut closest_so_far = max_distance;

        for primitive in &self.primitives {
            if let Some(t) = primitive.intersect(ray) {
                if t < closest_so_far {
                    closest_so_far = t;
                    nearest = Some((t, primitive));
                }
            }
        }

        nearest.map(|(distance, primitive)| primitive.record(ray, distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    fn two_spheres() -> Scene {
        Scene::new()
            .with(Sphere::new(Vec3::new(0.0, 0.0, -20.0), 2.0, Material::red_rubber()))
            .with(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 2.0, Material::ivory()))
            .with_light(Light::new(Vec3::new(10.0, 10.0, 10.0), 1.5))
    }

    #[test]
    fn test_nearest_hit_picks_closest() {
        let scene = two_spheres();
        let rec = scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 1000.0).unwrap();

        assert!((rec.distance - 8.0).abs() < 1e-12);
        assert_eq!(rec.material, Material::ivory());
    }

    #[test]
    fn test_nearest_hit_respects_max_distance() {
        let scene = two_spheres();
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert!(scene.nearest_hit(&ray, 8.0).is_none());
        assert!(scene.nearest_hit(&ray, 8.0 + 1e-9).is_some());
    }

    #[test]
    fn test_far_plane_beyond_max_distance_is_ignored() {
        let scene = Scene::new().with(Plane::solid(
            Vec3::new(0.0, 0.0, -2000.0),
            Vec3::Z,
            Material::default(),
        ));
        assert!(scene.nearest_hit(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 1000.0).is_none());
    }

    #[test]
    fn test_zero_direction_never_hits() {
        let scene = two_spheres();
        // Origin inside the near sphere
        let ray = Ray::new(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO);
        assert!(scene.nearest_hit(&ray, 1000.0).is_none());
    }

    #[test]
    fn test_validate() {
        assert!(two_spheres().validate().is_ok());
        assert!(matches!(Scene::new().validate(), Err(SceneError::Empty)));

        let bad_plane =
            Scene::new().with(Plane::solid(Vec3::ZERO, Vec3::ZERO, Material::default()));
        assert!(matches!(
            bad_plane.validate(),
            Err(SceneError::DegenerateNormal { index: 0 })
        ));

        let bad_sphere = two_spheres().with(Sphere::new(Vec3::ZERO, 0.0, Material::default()));
        assert!(matches!(
            bad_sphere.validate(),
            Err(SceneError::InvalidRadius { index: 2, .. })
        ));

        let flat = Scene::new().with(Triangle::new(
            Vec3::ZERO,
            Vec3::X,
            Vec3::X * 3.0,
            Material::default(),
        ));
        assert!(matches!(flat.validate(), Err(SceneError::DegenerateTriangle { index: 0 })));

        let nan_light = two_spheres().with_light(Light::new(Vec3::new(f64::NAN, 0.0, 0.0), 1.0));
        assert!(matches!(nan_light.validate(), Err(SceneError::NonFinite { .. })));

        let dark_light = two_spheres().with_light(Light::new(Vec3::ZERO, -1.0));
        assert!(matches!(
            dark_light.validate(),
            Err(SceneError::NegativeIntensity { index: 1, .. })
        ));
    }

    #[test]
    fn test_negative_materials_are_rejected() {
        let ivory = Material::ivory();
        let bad_materials = [
            Material { diffuse_color: Color::new(-1.0, 0.4, 0.4), ..ivory },
            Material { diffuse_albedo: -0.6, ..ivory },
            Material { specular_albedo: -0.3, ..ivory },
            Material { reflect_albedo: -0.1, ..ivory },
            Material { refract_albedo: -0.8, ..ivory },
            Material { specular_exponent: -2.0, ..ivory },
            Material { refractive_index: -1.5, ..ivory },
        ];

        for bad in bad_materials {
            let sphere = two_spheres().with(Sphere::new(Vec3::ZERO, 1.0, bad));
            assert!(
                matches!(sphere.validate(), Err(SceneError::InvalidMaterial { index: 2 })),
                "{bad:?}"
            );

            let plane = Scene::new().with(Plane::new(Vec3::ZERO, Vec3::Y, ivory, bad));
            assert!(matches!(plane.validate(), Err(SceneError::InvalidMaterial { index: 0 })));

            let triangle = Scene::new().with(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y, bad));
            assert!(matches!(triangle.validate(), Err(SceneError::InvalidMaterial { index: 0 })));
        }

        let from_json = Scene::from_json_str(
            r#"{ "primitives": [ { "type": "sphere", "center": [0, 0, -5], "radius": 1,
                   "material": { "specular_exponent": -2 } } ] }"#,
        )
        .unwrap();
        assert!(matches!(from_json.validate(), Err(SceneError::InvalidMaterial { index: 0 })));
    }

    #[test]
    fn test_scene_from_json() {
        let json = r#"{
            "primitives": [
                { "type": "sphere", "center": [0, 0, -10], "radius": 3,
                  "material": { "diffuse_color": [0.4, 0.4, 0.3], "specular_albedo": 0.3 } },
                { "type": "plane", "point": [0, -4, 0], "normal": [0, 2, 0] },
                { "type": "triangle", "v0": [-1, -1, -5], "v1": [1, -1, -5], "v2": [0, 1, -5] }
            ],
            "lights": [ { "position": [10, 10, 10], "intensity": 1.5 } ]
        }"#;

        let scene = Scene::from_json_str(json).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.lights, vec![Light::new(Vec3::new(10.0, 10.0, 10.0), 1.5)]);
        assert!(scene.validate().is_ok());

        match &scene.primitives[1] {
            Primitive::Plane(p) => {
                assert_eq!(p.normal, Vec3::Y);
                assert_eq!(p.checker_offset, crate::plane::DEFAULT_CHECKER_OFFSET);
            }
            other => panic!("expected a plane, got {other:?}"),
        }
    }

    #[test]
    fn test_scene_json_round_trip() {
        let scene = two_spheres().with(Plane::new(
            Vec3::new(0.0, -4.0, 0.0),
            Vec3::Y,
            Material::ivory(),
            Material::glass(),
        ));
        let json = serde_json::to_string(&scene).unwrap();
        assert_eq!(Scene::from_json_str(&json).unwrap(), scene);
    }

    #[test]
    fn test_unknown_primitive_is_parse_error() {
        let json = r#"{ "primitives": [ { "type": "torus" } ] }"#;
        assert!(matches!(Scene::from_json_str(json), Err(SceneError::Parse(_))));
    }
}
