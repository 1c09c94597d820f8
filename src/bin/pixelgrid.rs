use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use pixelgrid::{
    Color, CpuSurface, ImageMaskConfig, MaskInputs, MaskStatus, PixelGridConfig, PixelGridEffect,
    PointerState, Surface as _, TextMaskConfig,
};

#[derive(Parser, Debug)]
#[command(name = "pixelgrid", version)]
struct Cli {
    /// Log mask loading and state transitions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Simulate a number of ticks and write the final frame as a PNG.
    Frame(FrameArgs),
    /// Simulate and write every Nth frame as numbered PNGs.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Effect configuration JSON. Defaults to a built-in palette with gap 10.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in pixels.
    #[arg(long, default_value_t = 320)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 200)]
    height: u32,

    /// Device scale of the output image.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Number of ticks to simulate.
    #[arg(long, default_value_t = 60)]
    ticks: u32,

    /// Tick length in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    dt: f64,

    /// Pointer position as `x,y`; the pointer is outside when omitted.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<(f64, f64)>,

    /// Ripple origin as `x,y`, triggered before the first tick. Repeatable.
    #[arg(long = "ripple", value_parser = parse_point)]
    ripples: Vec<(f64, f64)>,

    /// Image mask source, overriding the config.
    #[arg(long)]
    image_mask: Option<PathBuf>,

    /// Pre-rendered text mask image, overriding the config.
    #[arg(long)]
    text_mask: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// Write every Nth tick.
    #[arg(long, default_value_t = 1)]
    every: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok((x, y))
}

fn read_config(path: &Path) -> anyhow::Result<PixelGridConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let cfg: PixelGridConfig =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse config JSON")?;
    Ok(cfg)
}

fn default_config() -> PixelGridConfig {
    PixelGridConfig::new(
        vec![
            Color::rgb(0x3b, 0x82, 0xf6),
            Color::rgb(0x8b, 0x5c, 0xf6),
            Color::rgb(0xec, 0x48, 0x99),
        ],
        10.0,
    )
}

fn absolute(path: &Path) -> anyhow::Result<String> {
    let abs = std::path::absolute(path)
        .with_context(|| format!("resolve path '{}'", path.display()))?;
    Ok(abs.to_string_lossy().into_owned())
}

fn build_effect(scene: &SceneArgs) -> anyhow::Result<PixelGridEffect> {
    let (mut cfg, base_dir) = match &scene.config {
        Some(path) => {
            let base = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
            (read_config(path)?, base)
        }
        None => (default_config(), PathBuf::from(".")),
    };

    if let Some(p) = &scene.image_mask {
        cfg.image_mask.get_or_insert_with(ImageMaskConfig::default).src = Some(absolute(p)?);
    }
    if let Some(p) = &scene.text_mask {
        cfg.text_mask.get_or_insert_with(TextMaskConfig::default).src = Some(absolute(p)?);
    }

    let masks = MaskInputs::from_config(&cfg, &base_dir);
    for handle in masks.image.iter().chain(masks.text.iter()) {
        if handle.wait() == MaskStatus::Failed {
            tracing::warn!(
                reason = handle.failure().unwrap_or("unknown"),
                "mask unavailable, continuing without it"
            );
        }
    }

    let mut effect = PixelGridEffect::new(scene.width, scene.height, cfg, masks)?;
    if let Some((x, y)) = scene.pointer {
        effect.set_pointer(PointerState::at(x, y));
    }
    for &(x, y) in &scene.ripples {
        effect.trigger_ripple(x, y);
    }
    Ok(effect)
}

fn write_png(surface: &CpuSurface, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let (w, h) = surface.pixel_size();
    image::save_buffer_with_format(
        out,
        &surface.to_straight_rgba8(),
        w,
        h,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", out.display()))?;
    Ok(())
}

fn new_surface(scene: &SceneArgs) -> CpuSurface {
    let mut surface = CpuSurface::new(scene.width, scene.height);
    surface.resize(scene.width, scene.height, scene.scale);
    surface
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut effect = build_effect(&args.scene)?;
    for _ in 0..args.scene.ticks {
        effect.update(args.scene.dt);
    }

    let mut surface = new_surface(&args.scene);
    effect.render(&mut surface);
    write_png(&surface, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let every = args.every.max(1);
    let mut effect = build_effect(&args.scene)?;
    let mut surface = new_surface(&args.scene);

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0u32;
    for tick in 1..=args.scene.ticks {
        effect.update(args.scene.dt);
        if tick % every != 0 {
            continue;
        }
        effect.render(&mut surface);
        let out = args.out_dir.join(format!("frame_{tick:04}.png"));
        write_png(&surface, &out)?;
        written += 1;
    }

    eprintln!("wrote {written} frames to {}", args.out_dir.display());
    Ok(())
}
