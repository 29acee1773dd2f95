//! Built-in demo scenes selected with `-scene <id>`.
//!
//! Ids 1 to 3 are full scenes, not the flat red, yellow and blue test fills
//! older builds of `rt` produced, and there is no id 0. Omitting `-scene`
//! now renders scene 1.

use rt_renderer::{Color, Light, Material, Plane, Scene, Sphere, Triangle, Vec3};

/// Ids accepted by [`builtin`], with a short description for help output.
pub const BUILTIN_SCENES: &[(u32, &str)] = &[
    (1, "spheres: four ivory and rubber spheres under three lights"),
    (2, "showcase: glass and mirror spheres over a checkerboard, plus a triangle"),
    (3, "mirrors: a sphere between two facing mirror planes"),
];

/// Look up a demo scene by id.
pub fn builtin(id: u32) -> Option<Scene> {
    match id {
        1 => Some(spheres()),
        2 => Some(showcase()),
        3 => Some(mirrors()),
        _ => None,
    }
}

fn three_lights() -> [Light; 3] {
    [
        Light::new(Vec3::new(20.0, 20.0, 20.0), 2.0),
        Light::new(Vec3::new(30.0, 50.0, -25.0), 1.8),
        Light::new(Vec3::new(30.0, 20.0, 30.0), 1.7),
    ]
}

/// Matte spheres only, no recursion visible.
pub fn spheres() -> Scene {
    let ivory = Material::ivory();
    let red_rubber = Material::red_rubber();

    let mut scene = Scene::new()
        .with(Sphere::new(Vec3::new(-3.0, 0.0, -16.0), 3.0, ivory))
        .with(Sphere::new(Vec3::new(-2.0, -1.5, -12.0), 3.0, red_rubber))
        .with(Sphere::new(Vec3::new(3.0, -1.0, -18.0), 4.0, red_rubber))
        .with(Sphere::new(Vec3::new(10.0, 10.0, -18.0), 6.0, ivory));
    for light in three_lights() {
        scene.add_light(light);
    }
    scene
}

/// Every primitive and material kind in one frame.
pub fn showcase() -> Scene {
    let light_tile = Material::new(1.0, 0.0, Color::new(0.3, 0.3, 0.3), 1.0);
    let dark_tile = Material::new(1.0, 0.0, Color::new(0.3, 0.2, 0.1), 1.0);

    let mut scene = Scene::new()
        .with(Sphere::new(Vec3::new(-3.0, 0.0, -16.0), 2.0, Material::ivory().with_reflection(0.1)))
        .with(Sphere::new(Vec3::new(-1.0, -1.5, -12.0), 2.0, Material::glass()))
        .with(Sphere::new(Vec3::new(1.5, -0.5, -18.0), 3.0, Material::red_rubber()))
        .with(Sphere::new(Vec3::new(7.0, 5.0, -18.0), 4.0, Material::mirror()))
        .with(Plane::new(Vec3::new(0.0, -4.0, 0.0), Vec3::Y, light_tile, dark_tile))
        .with(Triangle::new(
            Vec3::new(-9.0, -4.0, -22.0),
            Vec3::new(-5.0, -4.0, -24.0),
            Vec3::new(-7.0, 2.0, -23.0),
            Material::red_rubber(),
        ));
    scene.add_light(Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5));
    for light in three_lights().into_iter().skip(1) {
        scene.add_light(light);
    }
    scene
}

/// Reflections bouncing until the depth limit cuts them off.
pub fn mirrors() -> Scene {
    Scene::new()
        .with(Plane::solid(Vec3::new(0.0, 0.0, -20.0), Vec3::Z, Material::mirror()))
        .with(Plane::solid(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z, Material::mirror()))
        .with(Plane::new(
            Vec3::new(0.0, -3.0, 0.0),
            Vec3::Y,
            Material::ivory(),
            Material::red_rubber(),
        ))
        .with(Sphere::new(Vec3::new(0.0, 0.0, -12.0), 2.0, Material::red_rubber()))
        .with_light(Light::new(Vec3::new(0.0, 10.0, -6.0), 1.5))
        .with_light(Light::new(Vec3::new(-8.0, 6.0, 0.0), 1.0))
}
