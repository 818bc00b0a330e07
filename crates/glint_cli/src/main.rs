//! Glint command line renderer.
//!
//! Usage: glint [OUTPUT] [--scene FILE] [--serial]
//!
//! Renders the built-in reference scene (or a JSON scene file) and writes
//! it to OUTPUT (default `out.ppm`; `.png` is also supported).
//! Set `RUST_LOG=debug` for per-bucket progress.

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use glint_core::{load_scene, reference_scene, RenderOverrides, Scene};
use glint_renderer::{render, render_parallel, save_image, Camera, RenderConfig};

const USAGE: &str = "Usage: glint [OUTPUT] [--scene FILE] [--serial]";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct Args {
    output: PathBuf,
    scene: Option<PathBuf>,
    serial: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Args> {
    let mut output = None;
    let mut scene = None;
    let mut serial = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--scene" => {
                let path = args.next().context("--scene needs a file path")?;
                scene = Some(PathBuf::from(path));
            }
            "--serial" => serial = true,
            "-h" | "--help" => bail!("{}", USAGE),
            flag if flag.starts_with('-') => bail!("Unknown option {}\n{}", flag, USAGE),
            path => {
                if output.replace(PathBuf::from(path)).is_some() {
                    bail!("More than one output path given\n{}", USAGE);
                }
            }
        }
    }

    Ok(Args {
        output: output.unwrap_or_else(|| PathBuf::from("out.ppm")),
        scene,
        serial,
    })
}

fn build_camera(overrides: &RenderOverrides) -> Camera {
    let defaults = Camera::new();
    Camera::new().with_resolution(
        overrides.width.unwrap_or(defaults.image_width),
        overrides.height.unwrap_or(defaults.image_height),
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = parse_args(env::args().skip(1))?;

    let (scene, overrides): (Scene, RenderOverrides) = match &args.scene {
        Some(path) => {
            let desc = load_scene(path)
                .with_context(|| format!("Failed to load scene {}", path.display()))?;
            (desc.scene, desc.render)
        }
        None => (reference_scene(), RenderOverrides::default()),
    };
    log::info!(
        "Scene: {} spheres, {} lights",
        scene.sphere_count(),
        scene.light_count()
    );

    let camera = build_camera(&overrides);
    let mut config = RenderConfig::default();
    config.apply(&overrides);

    let start = Instant::now();
    let image = if args.serial {
        render(&camera, &scene, &config)
    } else {
        render_parallel(&camera, &scene, &config)
    };
    let elapsed = start.elapsed();

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("{:.3}", elapsed.as_secs_f64());
    Ok(())
}
