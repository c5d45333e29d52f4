//! Render a JSON scene to a PFM image, or to a numbered PFM sequence when
//! the scene is animated.
//!
//! ```text
//! rt_cli <scene.json> [output.pfm] [--png <preview.png>]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use rt_core::load_scene;
use rt_renderer::{render_animation, CameraPath, ImageBuffer, Renderer};

const DEFAULT_OUTPUT: &str = "outputImage.pfm";
const ANIMATION_DIR: &str = "Animation";
const USAGE: &str = "usage: rt_cli <scene.json> [output.pfm] [--png <preview.png>]";

#[derive(Debug, PartialEq)]
struct Args {
    scene: PathBuf,
    output: PathBuf,
    preview: Option<PathBuf>,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Args> {
    let mut positional = Vec::new();
    let mut preview = None;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--png" => match args.next() {
                Some(path) => preview = Some(PathBuf::from(path)),
                None => bail!("--png needs a file name\n{USAGE}"),
            },
            "-h" | "--help" => bail!(USAGE),
            flag if flag.starts_with("--") => bail!("unknown option {flag}\n{USAGE}"),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let Some(scene) = positional.next() else {
        bail!(USAGE);
    };
    let output = positional
        .next()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));
    if let Some(extra) = positional.next() {
        bail!("unexpected argument {}\n{USAGE}", extra.display());
    }

    Ok(Args {
        scene,
        output,
        preview,
    })
}

/// Directory that receives animation frames: `Animation/` beside the output.
fn animation_dir(output: &Path) -> PathBuf {
    output
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(ANIMATION_DIR)
}

fn save_preview(image: &ImageBuffer, preview: Option<&Path>) -> Result<()> {
    if let Some(path) = preview {
        image
            .save_png(path)
            .with_context(|| format!("Failed to write preview {}", path.display()))?;
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let scene = load_scene(&args.scene)
        .with_context(|| format!("Failed to load scene {}", args.scene.display()))?;

    let Some(animation) = &scene.animation else {
        let image = Renderer::new(&scene).render(&scene.camera);
        image
            .save_pfm(&args.output)
            .with_context(|| format!("Failed to write {}", args.output.display()))?;
        return save_preview(&image, args.preview.as_deref());
    };

    let dir = animation_dir(&args.output);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let mut path = CameraPath::load(animation.camera_script.as_deref(), animation.length);
    let frames = render_animation(&scene, &mut path, |frame, image| -> Result<()> {
        let file = dir.join(format!("Frame{frame}.pfm"));
        image
            .save_pfm(&file)
            .with_context(|| format!("Failed to write {}", file.display()))?;
        if frame == 0 {
            save_preview(image, args.preview.as_deref())?;
        }
        Ok(())
    })?;

    log::info!("Wrote {} frames to {}", frames, dir.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let result = parse_args(std::env::args().skip(1)).and_then(run);
    if let Err(error) = result {
        log::error!("{error:#}");
        std::process::exit(1);
    }
}
