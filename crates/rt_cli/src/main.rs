//! `rt`: render a scene to a BMP file.
//!
//! Flags come in `-key value` pairs:
//!
//! ```text
//! rt -scene 2 -width 800 -height 600 -threads 8 -out showcase.bmp
//! rt -scene-file scene.json -config render.json
//! ```

mod scenes;

use std::collections::HashMap;
use std::fmt::Display;
use std::fs;
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use log::LevelFilter;
use rt_renderer::{render_with_progress, save_bmp, RenderConfig, Scene};

const DEFAULT_OUT: &str = "zout.bmp";
const DEFAULT_SCENE: u32 = 1;

const KNOWN_FLAGS: &[&str] = &[
    "-out",
    "-scene",
    "-scene-file",
    "-config",
    "-width",
    "-height",
    "-fov",
    "-threads",
];

/// Collect `-key value` pairs. A key in last position maps to an empty
/// string; anything not starting with `-` outside a value slot is ignored.
fn parse_flags<I>(args: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = String>,
{
    let mut flags = HashMap::new();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if !arg.starts_with('-') {
            continue;
        }
        let value = args.next().unwrap_or_default();
        flags.insert(arg, value);
    }

    flags
}

fn parse_flag<T>(flags: &HashMap<String, String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    flags
        .get(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| anyhow!("Invalid value {raw:?} for {key}: {e}"))
        })
        .transpose()
}

/// Start from `-config` (or the defaults) and apply the size, fov and
/// thread overrides.
fn load_config(flags: &HashMap<String, String>) -> Result<RenderConfig> {
    let mut config = match flags.get("-config") {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {path}"))?;
            RenderConfig::from_json_str(&json)
                .with_context(|| format!("Failed to parse config {path}"))?
        }
        None => RenderConfig::default(),
    };

    if let Some(width) = parse_flag(flags, "-width")? {
        config.width = width;
    }
    if let Some(height) = parse_flag(flags, "-height")? {
        config.height = height;
    }
    if let Some(fov) = parse_flag(flags, "-fov")? {
        config.fov_degrees = fov;
    }
    if let Some(threads) = parse_flag(flags, "-threads")? {
        config.workers = threads;
    }

    Ok(config)
}

fn load_scene(flags: &HashMap<String, String>) -> Result<Scene> {
    if let Some(path) = flags.get("-scene-file") {
        if flags.contains_key("-scene") {
            log::warn!("Both -scene and -scene-file given, using {path}");
        }
        return Scene::load(path).with_context(|| format!("Failed to load scene {path}"));
    }

    let id = parse_flag(flags, "-scene")?.unwrap_or(DEFAULT_SCENE);
    scenes::builtin(id).ok_or_else(|| {
        let known: Vec<String> = scenes::BUILTIN_SCENES
            .iter()
            .map(|(id, about)| format!("  {id}: {about}"))
            .collect();
        anyhow!("Unknown scene id {id}, expected one of:\n{}", known.join("\n"))
    })
}

fn run(flags: &HashMap<String, String>) -> Result<()> {
    for key in flags.keys() {
        if !KNOWN_FLAGS.contains(&key.as_str()) {
            log::warn!("Ignoring unknown flag {key}");
        }
    }

    let out = flags.get("-out").map(String::as_str).unwrap_or(DEFAULT_OUT);
    let config = load_config(flags)?;
    let scene = load_scene(flags)?;
    log::debug!(
        "Scene: {} primitives, {} lights",
        scene.primitives.len(),
        scene.lights.len()
    );

    let framebuffer = render_with_progress(&scene, &config, |done, total| {
        log::debug!("Rows {done}/{total}");
    })
    .context("Render failed")?;

    save_bmp(&framebuffer.to_packed(), out).with_context(|| format!("Failed to write {out}"))?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let flags = parse_flags(std::env::args().skip(1));
    run(&flags)
}
