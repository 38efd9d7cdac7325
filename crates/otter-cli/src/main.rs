use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use otter_core::remap_time_unit;
use otter_scene::{AnnotationKind, Scene, ViewportKind};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "otter", version, about = "Plan images and movies from simulation results")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a single image.
    Image(ImageArgs),
    /// Plan every frame of a movie.
    Movie(MovieArgs),
    /// Print the scene's global time axis.
    Times(SceneArg),
    /// List the registered viewport and annotation types.
    Kinds,
}

#[derive(Args, Debug)]
struct SceneArg {
    /// Scene file (TOML).
    scene: PathBuf,
}

#[derive(Args, Debug)]
struct ImageArgs {
    #[command(flatten)]
    scene: SceneArg,

    /// Simulation time in seconds (defaults to the last time).
    #[arg(long)]
    time: Option<f64>,

    /// Output JSON path (defaults to stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct MovieArgs {
    #[command(flatten)]
    scene: SceneArg,

    /// Number of evenly spaced frames (defaults to one per global time).
    #[arg(long)]
    frames: Option<usize>,

    /// Output JSON path (defaults to stdout).
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Command::Image(args) => cmd_image(args),
        Command::Movie(args) => cmd_movie(args),
        Command::Times(args) => cmd_times(&args),
        Command::Kinds => cmd_kinds(),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load(args: &SceneArg) -> anyhow::Result<Scene> {
    let scene = Scene::from_path(&args.scene)
        .with_context(|| format!("load scene '{}'", args.scene.display()))?;
    if scene.has_mesh_viewport() {
        tracing::info!("scene has mesh viewports; time steps index the global time axis");
    }
    Ok(scene)
}

fn cmd_image(args: ImageArgs) -> anyhow::Result<()> {
    let scene = load(&args.scene)?;
    let plan = scene.plan_image(args.time).context("plan image")?;
    write_json(&plan, args.out.as_deref())
}

fn cmd_movie(args: MovieArgs) -> anyhow::Result<()> {
    let scene = load(&args.scene)?;
    let plans = scene.plan_movie(args.frames).context("plan movie")?;
    tracing::info!(frames = plans.len(), "movie planned");
    write_json(&plans, args.out.as_deref())
}

fn cmd_times(args: &SceneArg) -> anyhow::Result<()> {
    let scene = load(args)?;
    let unit = scene.context().time_unit();

    let mut out = io::stdout().lock();
    for (index, &time) in scene.context().global_time_axis().times().iter().enumerate() {
        let (display, label) = remap_time_unit(time, unit);
        writeln!(out, "{index}\t{time}\t{display} {label}")?;
    }
    Ok(())
}

fn cmd_kinds() -> anyhow::Result<()> {
    let mut out = io::stdout().lock();
    for kind in ViewportKind::ALL {
        writeln!(out, "viewport\t{kind}")?;
    }
    for kind in AnnotationKind::ALL {
        writeln!(out, "annotation\t{kind}")?;
    }
    Ok(())
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>) -> anyhow::Result<()> {
    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let file = File::create(path)
                .with_context(|| format!("create output '{}'", path.display()))?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer_pretty(&mut writer, value)?;
            writer.flush()?;
            tracing::info!(path = %path.display(), "wrote frame plan");
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, value)?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
