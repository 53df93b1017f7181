use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use cablegrid::{
    DepthConstants, Reloader, Rgb, SystemFiles, Viewport, load_library,
    render::{frame_pattern, frame_sets},
    render_cpu::rasterize,
};

#[derive(Parser, Debug)]
#[command(name = "cablegrid", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a 2-D pattern file and print a per-set summary.
    Check(CheckArgs),
    /// Render one 2-D frame as a PNG.
    Frame(FrameArgs),
    /// Render one 3-D pattern frame as a PNG, with or without depth cues.
    DepthFrame(DepthFrameArgs),
    /// Poll a 2-D pattern file and log every hot reload.
    Watch(WatchArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input pattern text file.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input pattern text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Optional JSON file overriding projection constants.
    #[arg(long)]
    constants: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct DepthFrameArgs {
    /// Pattern library JSON.
    #[arg(long = "lib")]
    lib_path: PathBuf,

    /// Pattern name; defaults to the library's first key.
    #[arg(long)]
    pattern: Option<String>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Enable depth cues (perspective shift, dot scaling, greyscale ramp).
    #[arg(long)]
    depth: bool,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Optional JSON file overriding projection constants.
    #[arg(long)]
    constants: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct WatchArgs {
    /// Input pattern text file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Poll interval in milliseconds.
    #[arg(long, default_value_t = 250)]
    interval_ms: u64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Frame(args) => cmd_frame(args),
        Command::DepthFrame(args) => cmd_depth_frame(args),
        Command::Watch(args) => cmd_watch(args),
    }
}

fn read_constants(path: Option<&Path>) -> anyhow::Result<DepthConstants> {
    let Some(path) = path else {
        return Ok(DepthConstants::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("open constants '{}'", path.display()))?;
    let constants = serde_json::from_str(&text).with_context(|| "parse constants JSON")?;
    Ok(constants)
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let reloader = Reloader::load(&args.in_path, &SystemFiles);
    let sets = reloader.sets();
    println!("{} polyline set(s)", sets.len());
    for set in sets {
        let (r, g, b): (u8, u8, u8) = set.display_colour.into();
        println!("  {} colour ({r},{g},{b})", set.name);
        for (idx, polyline) in set.polylines.iter().enumerate() {
            println!("    polyline {}: {} point(s)", idx + 1, polyline.len());
        }
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let constants = read_constants(args.constants.as_deref())?;
    let reloader = Reloader::load(&args.in_path, &SystemFiles);
    let viewport = Viewport::new(args.width, args.height);
    let cmds = frame_sets(reloader.sets(), viewport, &constants);
    let img = rasterize(&cmds, viewport, Rgb::WHITE);
    img.save(&args.out)
        .with_context(|| format!("write frame '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_depth_frame(args: DepthFrameArgs) -> anyhow::Result<()> {
    let constants = read_constants(args.constants.as_deref())?;
    let library = load_library(&args.lib_path)?;

    let name = match args.pattern {
        Some(name) => name,
        None => library
            .keys()
            .next()
            .cloned()
            .context("pattern library is empty")?,
    };
    let pattern = library
        .get(&name)
        .with_context(|| format!("no pattern named '{name}' in library"))?;

    let viewport = Viewport::new(args.width, args.height);
    let cmds = frame_pattern(pattern, args.depth, viewport, &constants);
    let img = rasterize(&cmds, viewport, Rgb::WHITE);
    img.save(&args.out)
        .with_context(|| format!("write frame '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_watch(args: WatchArgs) -> anyhow::Result<()> {
    let mut reloader = Reloader::load(&args.in_path, &SystemFiles);
    tracing::info!(
        path = %args.in_path.display(),
        sets = reloader.sets().len(),
        "watching pattern file"
    );
    loop {
        std::thread::sleep(Duration::from_millis(args.interval_ms));
        if reloader.poll(&SystemFiles) {
            tracing::info!(sets = reloader.sets().len(), "pattern file reloaded");
        }
    }
}
