use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use glowfield::{
    BackdropConfig, HeadlessOpts, HeadlessRun, Point, PngSequenceSink, PointerPath, trace_frame,
    write_png,
};

#[derive(Parser, Debug)]
#[command(name = "glowfield", version)]
struct Cli {
    /// Backdrop configuration JSON. Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Sequence(SequenceArgs),
    /// Dump the draw calls of one frame as JSON.
    Trace(TraceArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct SurfaceArgs {
    /// Logical width.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Logical height.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    /// Device pixel ratio (clamped to [1, 2]).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Simulated refresh rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,
}

impl SurfaceArgs {
    fn opts(&self) -> HeadlessOpts {
        HeadlessOpts {
            width: self.width,
            height: self.height,
            device_pixel_ratio: self.dpr,
            fps: self.fps,
        }
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Timestamp of the frame in milliseconds.
    #[arg(long, default_value_t = 0.0)]
    time_ms: f64,

    /// Pointer position as `x,y` in logical units.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Number of frames.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Move the pointer around the surface center.
    #[arg(long, default_value_t = false)]
    orbit: bool,

    /// Seconds per pointer revolution (with `--orbit`).
    #[arg(long, default_value_t = 6.0)]
    orbit_period: f64,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// File name prefix.
    #[arg(long, default_value = "frame")]
    prefix: String,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    #[command(flatten)]
    surface: SurfaceArgs,

    /// Timestamp of the traced frame in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    time_ms: f64,

    /// Pointer position as `x,y` in logical units.
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Point>,

    /// Output JSON path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Frame(args) => cmd_frame(config, args),
        Command::Sequence(args) => cmd_sequence(config, args),
        Command::Trace(args) => cmd_trace(config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<BackdropConfig> {
    match path {
        Some(p) => BackdropConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(BackdropConfig::default()),
    }
}

fn cmd_frame(config: BackdropConfig, args: FrameArgs) -> anyhow::Result<()> {
    let path = match args.pointer {
        Some(p) => PointerPath::Points(vec![p]),
        None => PointerPath::Still,
    };
    let mut run = HeadlessRun::new(config, args.surface.opts()).context("create backdrop")?;
    let frame = run
        .render_until(args.time_ms, &path)
        .context("render frame")?;
    write_png(&args.out, &frame).context("write png")?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(config: BackdropConfig, args: SequenceArgs) -> anyhow::Result<()> {
    let opts = args.surface.opts();
    let path = if args.orbit {
        PointerPath::Orbit {
            center: Point::new(opts.width * 0.5, opts.height * 0.5),
            radius: opts.width.min(opts.height) * 0.3,
            period_s: args.orbit_period,
        }
    } else {
        PointerPath::Still
    };
    let mut run = HeadlessRun::new(config, opts).context("create backdrop")?;
    let mut sink = PngSequenceSink::new(&args.out_dir, args.prefix);
    let stats = run
        .run(args.frames, &path, &mut sink)
        .context("render sequence")?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn cmd_trace(config: BackdropConfig, args: TraceArgs) -> anyhow::Result<()> {
    let cmds = trace_frame(config, args.surface.opts(), args.time_ms, args.pointer)
        .context("trace frame")?;
    let json = serde_json::to_string_pretty(&cmds)?;
    match args.out {
        Some(out) => {
            std::fs::write(&out, json).with_context(|| format!("write '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y: {e}"))?;
    Ok(Point::new(x, y))
}
