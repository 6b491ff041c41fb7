mod cli;
mod logger;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lumen_renderer::{demo, load_scene_file, render, render_buckets, render_parallel, LoadedScene, RenderContext};

use crate::cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());

    let LoadedScene {
        mut scene,
        camera,
        mut settings,
    } = match &args.scene {
        Some(path) => {
            log::info!("Loading scene {}", path.display());
            load_scene_file(path).with_context(|| format!("failed to load scene {}", path.display()))?
        }
        None => {
            log::info!("No scene given, rendering the demo scene");
            demo().context("failed to build the demo scene")?
        }
    };
    args.apply_overrides(&mut settings);
    settings.validate().context("invalid render settings")?;

    for name in &args.hidden {
        let Some(index) = scene.objects().iter().position(|object| object.name == *name) else {
            bail!("no object named '{name}' in the scene");
        };
        if let Some(object) = scene.object_mut(index) {
            object.visible = false;
        }
        log::debug!("Hid object '{name}'");
    }

    log::info!(
        "Rendering {}x{}: {} objects, {} lights",
        settings.width,
        settings.height,
        scene.object_count(),
        scene.light_count()
    );

    let ctx = RenderContext::new(&scene, &camera, &settings);
    let image = match (args.serial, args.bucket_size) {
        (true, _) => render(&ctx),
        (false, Some(size)) => render_buckets(&ctx, size),
        (false, None) => render_parallel(&ctx),
    }
    .context("render failed")?;

    image
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    Ok(())
}
