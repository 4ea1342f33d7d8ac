//! Headless snapshot tool
//!
//! Run with: cargo run --release --bin rain-snapshot -- <atlas.png> <out.png> [width height time]
//!
//! Renders one frame on the CPU through the reference shader and writes it
//! as a PNG. Effect settings come from the regular config file.

use anyhow::{Context, Result, bail};
use rain_config::Config;
use rain_core::{MeshPlacement, RainMaterial, SoftwareRenderer};
use rain_renderer::AtlasImage;

const DEFAULT_LOG_FILTER: &str = "warn,rain_snapshot=info,rain_renderer=info,rain_config=info";

const USAGE: &str = "usage: rain-snapshot <atlas.png> <out.png> [width height time]";

struct Args {
    atlas: String,
    output: String,
    width: u32,
    height: u32,
    time: f32,
}

fn parse_args() -> Result<Args> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (atlas, output, rest) = match args.as_slice() {
        [atlas, output, rest @ ..] => (atlas.clone(), output.clone(), rest),
        _ => bail!(USAGE),
    };

    let (width, height, time) = match rest {
        [] => (640, 360, 0.0),
        [w, h, t] => (
            w.parse().context("width must be an integer")?,
            h.parse().context("height must be an integer")?,
            t.parse().context("time must be a number of seconds")?,
        ),
        _ => bail!(USAGE),
    };

    if width == 0 || height == 0 {
        bail!("width and height must be non-zero");
    }

    Ok(Args {
        atlas,
        output,
        width,
        height,
        time,
    })
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let args = parse_args()?;
    let config = Config::load();

    let image = AtlasImage::from_path(&args.atlas)?;
    let atlas = image.to_glyph_atlas()?;

    let mut material = RainMaterial::new(config.rain_params());
    material.set_time(args.time);

    let (width, height) = (args.width as f32, args.height as f32);
    let placement = MeshPlacement::centered(width, height, config.effect.quad_scale);
    let frame = SoftwareRenderer::new(args.width, args.height, placement).render(&material, &atlas);

    let out = image::RgbaImage::from_raw(frame.width(), frame.height(), frame.to_rgba8())
        .context("Frame buffer size mismatch")?;
    out.save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output))?;

    log::info!(
        "Wrote {}x{} frame at t={}s to {}",
        args.width,
        args.height,
        args.time,
        args.output
    );
    Ok(())
}
