use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

use promoreel::{
    ApproxShaper, Canvas, Clip, ClipSession, Drawable, EngineConfig, EngineContext, LayerSource,
    ReviewClipOptions, ReviewRecord,
};

#[derive(Parser, Debug)]
#[command(name = "promoreel", version)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one composited frame of a clip as a PNG.
    Frame(FrameArgs),
    /// Build the clip for one review record and render one frame as a PNG.
    Review(ReviewArgs),
    /// Print the drawables of one frame as JSON.
    Dump(DumpArgs),
}

#[derive(Args, Debug)]
struct EngineArgs {
    /// Engine config JSON (fonts, palette, seed, shrink policies).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Frame width in pixels.
    #[arg(long, default_value_t = 1080)]
    width: u32,

    /// Frame height in pixels.
    #[arg(long, default_value_t = 1920)]
    height: u32,
}

#[derive(Args, Debug)]
struct FrameArgs {
    /// Input clip JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Progress within the clip, in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct ReviewArgs {
    /// JSON array of review records.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Record to render (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Progress within the clip, in [0, 1].
    #[arg(long)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    engine: EngineArgs,
}

#[derive(Args, Debug)]
struct DumpArgs {
    /// Input clip JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Progress within the clip, in [0, 1].
    #[arg(long)]
    progress: f64,

    #[command(flatten)]
    engine: EngineArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Review(args) => cmd_review(args),
        Command::Dump(args) => cmd_dump(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn engine_context(args: &EngineArgs) -> anyhow::Result<(EngineContext, Canvas)> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    config.apply_env_overrides()?;
    let engine = EngineContext::new(config)?;
    let canvas = Canvas::new(args.width, args.height)?;
    Ok((engine, canvas))
}

fn read_clip_json(path: &Path) -> anyhow::Result<Clip> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("open clip '{}'", path.display()))?;
    Clip::from_json_str(&s).with_context(|| format!("parse clip '{}'", path.display()))
}

fn write_frame(session: &mut ClipSession, progress: f64, out: &Path) -> anyhow::Result<()> {
    let frame = session.render_frame(progress)?;
    session.close();
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame.save_png(out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (engine, canvas) = engine_context(&args.engine)?;
    let clip = read_clip_json(&args.in_path)?;
    let mut session = ClipSession::new(canvas, &clip, &engine)?;
    write_frame(&mut session, args.progress, &args.out)
}

fn cmd_review(args: ReviewArgs) -> anyhow::Result<()> {
    let (engine, canvas) = engine_context(&args.engine)?;
    let s = std::fs::read_to_string(&args.in_path)
        .with_context(|| format!("open reviews '{}'", args.in_path.display()))?;
    let records: Vec<ReviewRecord> = serde_json::from_str(&s)
        .with_context(|| format!("parse reviews '{}'", args.in_path.display()))?;
    let clips = promoreel::review_clips(&records, canvas, &ReviewClipOptions::default())?;
    let clip = clips.get(args.index).with_context(|| {
        format!(
            "review index {} is out of range ({} records)",
            args.index,
            clips.len()
        )
    })?;
    let mut session = ClipSession::new(canvas, clip, &engine)?;
    write_frame(&mut session, args.progress, &args.out)
}

fn cmd_dump(args: DumpArgs) -> anyhow::Result<()> {
    let (engine, canvas) = engine_context(&args.engine)?;
    let clip = read_clip_json(&args.in_path)?;

    let drawables: Vec<Drawable> = if engine.fonts().is_empty() {
        // Without fonts text is measured approximately; good enough to inspect geometry.
        tracing::warn!("no fonts configured; text boxes use approximate metrics");
        let mut out = Vec::new();
        for (i, layer) in clip.layers.iter().enumerate() {
            let mut source = LayerSource::init_with_shaper(
                canvas,
                layer,
                &engine,
                i as u64,
                Box::new(ApproxShaper::default()),
            )
            .with_context(|| format!("layers[{i}] ({})", layer.kind()))?;
            out.extend(source.render_drawables(args.progress)?);
            source.close();
        }
        out
    } else {
        let mut session = ClipSession::new(canvas, &clip, &engine)?;
        let out = session.render_drawables(args.progress)?;
        session.close();
        out
    };

    let json = serde_json::to_string_pretty(&drawables).context("serialize drawables")?;
    println!("{json}");
    Ok(())
}
