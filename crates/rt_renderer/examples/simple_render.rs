//! Simple Whitted ray tracer example.
//!
//! Renders a ring of glass, mirror and matte spheres over a checkerboard
//! and saves it as a BMP.

use rt_renderer::{
    render, save_bmp, Color, Light, Material, Plane, RenderConfig, Scene, Sphere, Vec3,
};

fn main() {
    println!("RT Whitted Tracer - Simple Example");
    println!("==================================");

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let workers = std::thread::available_parallelism().map_or(1, |n| n.get());
    let config = RenderConfig::default()
        .with_resolution(800, 450)
        .with_fov(50.0)
        .with_workers(workers)
        .with_max_depth(5);

    println!(
        "Rendering {}x{} @ depth {} on {} workers...",
        config.width, config.height, config.max_depth, config.workers
    );

    let start = std::time::Instant::now();
    let image = render(&scene, &config).expect("Failed to render");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "simple_render.bmp";
    save_bmp(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new().with(Plane::new(
        Vec3::new(0.0, -2.0, 0.0),
        Vec3::Y,
        Material::new(1.0, 0.0, Color::new(0.35, 0.35, 0.35), 1.0),
        Material::new(1.0, 0.0, Color::new(0.1, 0.1, 0.25), 1.0),
    ));

    let materials = [
        Material::glass(),
        Material::mirror(),
        Material::ivory(),
        Material::red_rubber(),
    ];

    // Ring of spheres around a point in front of the camera
    let centre = Vec3::new(0.0, -0.5, -14.0);
    for i in 0..8 {
        let angle = i as f64 * std::f64::consts::TAU / 8.0;
        let position = centre + Vec3::new(5.0 * angle.cos(), 0.0, 5.0 * angle.sin());
        scene.add(Sphere::new(position, 1.5, materials[i % materials.len()]));
    }
    scene.add(Sphere::new(centre + Vec3::new(0.0, 1.0, 0.0), 2.5, Material::mirror()));

    scene.add_light(Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5));
    scene.add_light(Light::new(Vec3::new(30.0, 50.0, -25.0), 1.8));

    println!("Created {} objects", scene.len());
    scene
}
