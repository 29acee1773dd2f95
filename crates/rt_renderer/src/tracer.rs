//! Recursive Whitted shader.
//!
//! Each hit spawns one reflection ray and one refraction ray, both traced
//! one level deeper, and adds Phong direct lighting from every unoccluded
//! point light. Recursion stops past `max_depth` or when a ray escapes,
//! returning the background colour in both cases.

use rt_math::{reflect, refract, Vec3};

use crate::{Color, HitRecord, Material, Ray, RenderConfig, Scene};

/// Light gathered at a surface point, before material weights.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Illumination {
    /// Sum of `intensity * max(0, L·n)`
    pub diffuse: f64,
    /// Sum of `intensity * max(0, reflect(L, n)·d)^exponent`
    pub specular: f64,
}

/// Call counters for one primary ray.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceStats {
    /// Number of `cast_ray` invocations, terminal ones included
    pub calls: u64,
    /// Deepest recursion level that was entered
    pub deepest: u32,
}

/// Shades rays against a borrowed, read-only scene.
///
/// Holds no mutable state, so a single tracer is shared by all workers.
#[derive(Debug, Clone, Copy)]
pub struct Tracer<'a> {
    scene: &'a Scene,
    config: &'a RenderConfig,
}

impl<'a> Tracer<'a> {
    pub fn new(scene: &'a Scene, config: &'a RenderConfig) -> Self {
        Self { scene, config }
    }

    /// Colour seen along `ray`, entered at recursion level `depth`.
    ///
    /// Primary rays start at depth 0.
    pub fn cast_ray(&self, ray: &Ray, depth: u32) -> Color {
        self.trace(ray, depth, &mut TraceStats::default())
    }

    /// Same as [`cast_ray`](Self::cast_ray), also counting the recursion.
    pub fn cast_ray_with_stats(&self, ray: &Ray, depth: u32) -> (Color, TraceStats) {
        let mut stats = TraceStats::default();
        let color = self.trace(ray, depth, &mut stats);
        (color, stats)
    }

    fn trace(&self, ray: &Ray, depth: u32, stats: &mut TraceStats) -> Color {
        stats.calls += 1;
        stats.deepest = stats.deepest.max(depth);

        if depth > self.config.max_depth {
            return self.config.background;
        }
        let Some(hit) = self.scene.nearest_hit(ray, self.config.max_distance) else {
            return self.config.background;
        };

        let reflect_dir = reflect(ray.direction(), hit.normal);
        let reflect_ray = Ray::new(self.offset(&hit, reflect_dir), reflect_dir);
        let reflect_color = self.trace(&reflect_ray, depth + 1, stats);

        // Total internal reflection gives a zero direction; that ray still
        // gets cast and comes back as background.
        let refract_dir = refract(ray.direction(), hit.normal, hit.material.refractive_index);
        let refract_ray = Ray::new(self.offset(&hit, refract_dir), refract_dir);
        let refract_color = self.trace(&refract_ray, depth + 1, stats);

        let light = self.illuminate(&hit, ray.direction());
        composite(&hit.material, light, self.config.ambient_bias, reflect_color, refract_color)
    }

    /// Direct light reaching `hit` from every light it can see.
    ///
    /// The highlight reflects the light direction about the normal and
    /// compares it with the incoming view direction `view`.
    pub fn illuminate(&self, hit: &HitRecord, view: Vec3) -> Illumination {
        let mut sum = Illumination::default();

        for light in &self.scene.lights {
            let to_light = light.position - hit.point;
            let light_distance = to_light.length();
            let Some(light_dir) = to_light.try_normalize() else {
                continue;
            };

            if self.is_occluded(hit, light_dir, light_distance) {
                continue;
            }

            sum.diffuse += light.intensity * light_dir.dot(hit.normal).max(0.0);
            sum.specular += light.intensity
                * reflect(light_dir, hit.normal)
                    .dot(view)
                    .max(0.0)
                    .powf(hit.material.specular_exponent);
        }

        sum
    }

    /// True if something sits strictly between the hit point and the light.
    fn is_occluded(&self, hit: &HitRecord, light_dir: Vec3, light_distance: f64) -> bool {
        let shadow_ray = Ray::new(self.offset(hit, light_dir), light_dir);
        self.scene
            .nearest_hit(&shadow_ray, self.config.max_distance)
            .is_some_and(|blocker| blocker.distance < light_distance)
    }

    /// Nudge the hit point off the surface, to the side `direction` leaves
    /// from, so a secondary ray does not hit its own surface.
    fn offset(&self, hit: &HitRecord, direction: Vec3) -> Vec3 {
        let nudge = hit.normal * self.config.epsilon;
        if direction.dot(hit.normal) < 0.0 {
            hit.point - nudge
        } else {
            hit.point + nudge
        }
    }
}

/// Blend local lighting with the two recursive colours. Nothing is clamped
/// here; the quantizer deals with out-of-range values.
fn composite(
    material: &Material,
    light: Illumination,
    ambient_bias: f64,
    reflect_color: Color,
    refract_color: Color,
) -> Color {
    material.diffuse_color * (light.diffuse + ambient_bias) * material.diffuse_albedo
        + Material::WHITE * light.specular * material.specular_albedo
        + reflect_color * material.reflect_albedo
        + refract_color * material.refract_albedo
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Light, Plane, Sphere};

    fn config() -> RenderConfig {
        RenderConfig::default()
    }

    fn floor_under_light(with_blocker: bool) -> Scene {
        let mut scene = Scene::new()
            .with(Plane::solid(Vec3::ZERO, Vec3::Y, Material::ivory()))
            .with_light(Light::new(Vec3::new(0.0, 10.0, 0.0), 1.5));
        if with_blocker {
            scene.add(Sphere::new(Vec3::new(0.0, 5.0, 0.0), 1.0, Material::red_rubber()));
        }
        scene
    }

    fn floor_hit(scene: &Scene) -> HitRecord {
        let ray = Ray::new(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Y);
        scene.nearest_hit(&ray, 1000.0).expect("floor below the ray")
    }

    #[test]
    fn test_unshadowed_point_is_lit() {
        let scene = floor_under_light(false);
        let config = config();
        let tracer = Tracer::new(&scene, &config);
        let hit = floor_hit(&scene);

        let light = tracer.illuminate(&hit, Vec3::NEG_Y);
        assert!((light.diffuse - 1.5).abs() < 1e-12);
        // reflect(up, up) = down, which is exactly the view direction
        assert!((light.specular - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_shadowed_point_gets_no_direct_light() {
        let scene = floor_under_light(true);
        let config = config();
        let tracer = Tracer::new(&scene, &config);
        let hit = floor_hit(&scene);

        let light = tracer.illuminate(&hit, Vec3::NEG_Y);
        assert_eq!(light.diffuse, 0.0);
        assert_eq!(light.specular, 0.0);
    }

    #[test]
    fn test_blocker_behind_light_does_not_shadow() {
        let scene = floor_under_light(false).with(Sphere::new(
            Vec3::new(0.0, 20.0, 0.0),
            2.0,
            Material::red_rubber(),
        ));
        let config = config();
        let tracer = Tracer::new(&scene, &config);

        let light = tracer.illuminate(&floor_hit(&scene), Vec3::NEG_Y);
        assert!((light.diffuse - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_miss_returns_background() {
        let scene = floor_under_light(false);
        let config = config();
        let tracer = Tracer::new(&scene, &config);

        let color = tracer.cast_ray(&Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Y), 0);
        assert_eq!(color, Color::new(0.1, 0.05, 0.1));
    }

    #[test]
    fn test_past_max_depth_returns_background() {
        let scene = floor_under_light(false);
        let config = config();
        let tracer = Tracer::new(&scene, &config);
        let down = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);

        assert_ne!(tracer.cast_ray(&down, config.max_depth), config.background);

        let (color, stats) = tracer.cast_ray_with_stats(&down, config.max_depth + 1);
        assert_eq!(color, config.background);
        assert_eq!(stats.calls, 1);
    }

    #[test]
    fn test_total_internal_reflection_falls_back_to_background() {
        // Refraction-only glass: the colour is exactly what the refracted ray returns
        let glass = Material::new(0.0, 0.0, Color::ZERO, 1.0).with_refraction(1.0, 1.5);
        let scene = Scene::new().with(Sphere::new(Vec3::ZERO, 1.0, glass));
        let config = config();
        let tracer = Tracer::new(&scene, &config);

        // From inside, meeting the surface at about 64 degrees off the normal
        let ray = Ray::new(Vec3::new(0.0, 0.0, 0.9), Vec3::X);
        let hit = scene.nearest_hit(&ray, 1000.0).unwrap();
        assert_eq!(refract(ray.direction(), hit.normal, 1.5), Vec3::ZERO);

        let color = tracer.cast_ray(&ray, 0);
        assert_eq!(color, config.background);
    }

    #[test]
    fn test_clear_sphere_shows_what_is_behind_it() {
        // Index 1 bends nothing, so both crossings continue straight on
        let clear = Material::new(0.0, 0.0, Color::ZERO, 1.0).with_refraction(1.0, 1.0);
        let red = Material::new(1.0, 0.0, Color::new(1.0, 0.0, 0.0), 1.0);
        let scene = Scene::new()
            .with(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, clear))
            .with(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0, red));
        let config = config();
        let tracer = Tracer::new(&scene, &config);

        let (color, stats) = tracer.cast_ray_with_stats(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 0);

        // Unlit red sphere: ambient bias only
        assert!((color - Color::new(0.2, 0.0, 0.0)).length() < 1e-12, "{color:?}");
        // Entry, exit and the red surface are shaded on three levels
        assert!(stats.deepest >= 3);
    }

    #[test]
    fn test_mirror_plane_shows_the_reflected_sphere() {
        let mirror = Material::new(0.0, 0.0, Color::ZERO, 1.0).with_reflection(1.0);
        let green = Material::new(1.0, 0.0, Color::new(0.0, 1.0, 0.0), 1.0);
        let scene = Scene::new()
            .with(Plane::solid(Vec3::new(0.0, 0.0, -10.0), Vec3::Z, mirror))
            .with(Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0, green))
            .with_light(Light::new(Vec3::new(0.0, 3.0, 0.0), 1.0));
        let config = config();
        let tracer = Tracer::new(&scene, &config);

        let mirrored = tracer.cast_ray(&Ray::new(Vec3::ZERO, Vec3::NEG_Z), 0);

        // The bounce leaves the mirror along +z, one epsilon in front of it
        let bounce = Ray::new(Vec3::new(0.0, 0.0, -10.0 + config.epsilon), Vec3::Z);
        let direct = tracer.cast_ray(&bounce, 1);

        assert!((mirrored - direct).length() < 1e-12, "{mirrored:?} vs {direct:?}");
        assert_ne!(mirrored, config.background);
        assert!(mirrored.y > 0.2 && mirrored.x == 0.0 && mirrored.z == 0.0, "{mirrored:?}");
    }

    #[test]
    fn test_recursion_is_bounded_between_facing_mirrors() {
        let mirror = Material::mirror();
        let scene = Scene::new()
            .with(Plane::solid(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, mirror))
            .with(Plane::solid(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, mirror))
            .with_light(Light::new(Vec3::new(0.0, 3.0, 0.0), 1.0));

        for max_depth in [0, 1, 4, 7] {
            let config = RenderConfig {
                max_depth,
                ..config()
            };
            let tracer = Tracer::new(&scene, &config);
            let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.1, -1.0).normalize());

            let (color, stats) = tracer.cast_ray_with_stats(&ray, 0);
            assert!(color.is_finite());
            // Terminal calls sit one level below the last shaded level
            assert_eq!(stats.deepest, max_depth + 1);
            assert!(stats.calls <= (1u64 << (max_depth + 2)) - 1);
            // The reflection chain alone visits every level
            assert!(stats.calls >= u64::from(max_depth) + 2);
        }
    }

    #[test]
    fn test_composite_weights() {
        let material = Material {
            diffuse_albedo: 0.5,
            specular_albedo: 0.25,
            reflect_albedo: 0.1,
            refract_albedo: 0.2,
            diffuse_color: Color::new(1.0, 0.5, 0.0),
            specular_exponent: 10.0,
            refractive_index: 1.0,
        };
        let light = Illumination {
            diffuse: 0.8,
            specular: 2.0,
        };

        let c = composite(&material, light, 0.2, Color::ONE, Color::new(0.0, 1.0, 0.0));

        // diffuse: color * 1.0 * 0.5, specular: 0.5, mirror: 0.1, refraction: (0, 0.2, 0)
        let expected = Color::new(0.5 + 0.5 + 0.1, 0.25 + 0.5 + 0.1 + 0.2, 0.0 + 0.5 + 0.1);
        assert!((c - expected).length() < 1e-12);
    }
}
