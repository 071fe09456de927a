use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use softwire::prelude::*;
use softwire::SurfaceError;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineArg {
    Bresenham,
    Midpoint,
}

impl From<LineArg> for LineAlgorithm {
    fn from(arg: LineArg) -> Self {
        match arg {
            LineArg::Bresenham => LineAlgorithm::Bresenham,
            LineArg::Midpoint => LineAlgorithm::Midpoint,
        }
    }
}

/// Spin a wireframe mesh with the CPU rasterizer.
#[derive(Debug, Parser)]
#[command(name = "softwire", version)]
struct Args {
    /// Surface width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Surface height in pixels.
    #[arg(long, default_value_t = 480)]
    height: u32,

    /// Number of frames to render. Defaults to 1 headless, unbounded in a window.
    #[arg(long)]
    frames: Option<u64>,

    /// Load meshes from an OBJ file instead of the built-in cube.
    #[arg(long)]
    obj: Option<PathBuf>,

    /// Line algorithm used for edges.
    #[arg(long, value_enum, default_value_t = LineArg::Bresenham)]
    line: LineArg,

    /// PNG written after the last headless frame.
    #[arg(long, default_value = "frame.png")]
    output: PathBuf,

    /// Open an SDL2 window (requires the `window` feature).
    #[arg(long)]
    window: bool,

    /// Rotation added to every mesh's x and y angles each frame, in radians.
    #[arg(long, default_value_t = 0.01)]
    rotation_step: f32,

    /// Camera distance from the origin along +Z.
    #[arg(long, default_value_t = 10.0)]
    distance: f32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let meshes = match &args.obj {
        Some(path) => Mesh::load_all_from_obj(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => vec![Mesh::cube("Cube")],
    };
    let camera = Camera::new(Vec3::new(0.0, 0.0, args.distance), Vec3::ZERO);
    let config = DeviceConfig::default().with_line_algorithm(args.line.into());

    tracing::info!(
        width = args.width,
        height = args.height,
        meshes = meshes.len(),
        line_algorithm = %config.line_algorithm,
        "starting"
    );

    if args.window {
        run_windowed(&args, config, camera, meshes)
    } else {
        run_headless(&args, config, camera, meshes)
    }
}

/// One animation tick: spin every mesh, then clear, render and present.
fn tick<S: Surface>(
    device: &mut Device<S>,
    camera: &Camera,
    meshes: &mut [Mesh],
    rotation_step: f32,
) -> Result<(), SurfaceError> {
    for mesh in meshes.iter_mut() {
        mesh.rotation.x += rotation_step;
        mesh.rotation.y += rotation_step;
    }
    device.draw_frame(camera, meshes)
}

fn run_headless(
    args: &Args,
    config: DeviceConfig,
    camera: Camera,
    mut meshes: Vec<Mesh>,
) -> anyhow::Result<()> {
    let mut device = Device::with_config(ImageSurface::new(args.width, args.height), config);
    let frames = args.frames.unwrap_or(1);

    for _ in 0..frames {
        tick(&mut device, &camera, &mut meshes, args.rotation_step)?;
    }

    device
        .surface()
        .save_png(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    tracing::info!(
        frames,
        painted = device.backbuffer().painted_pixel_count(),
        output = %args.output.display(),
        "wrote frame"
    );
    Ok(())
}

#[cfg(feature = "window")]
fn run_windowed(
    args: &Args,
    config: DeviceConfig,
    camera: Camera,
    mut meshes: Vec<Mesh>,
) -> anyhow::Result<()> {
    let window = Window::new("softwire", args.width, args.height)?;
    let mut device = Device::with_config(window, config);
    let mut limiter = FrameLimiter::new(device.surface());
    let mut frame: u64 = 0;

    loop {
        if device.surface_mut().poll_events() == WindowEvent::Quit {
            break;
        }

        tick(&mut device, &camera, &mut meshes, args.rotation_step)?;
        frame += 1;
        if args.frames.is_some_and(|limit| frame >= limit) {
            break;
        }

        limiter.wait_and_get_delta(device.surface());
    }

    tracing::info!(frames = frame, "window closed");
    Ok(())
}

#[cfg(not(feature = "window"))]
fn run_windowed(
    _args: &Args,
    _config: DeviceConfig,
    _camera: Camera,
    _meshes: Vec<Mesh>,
) -> anyhow::Result<()> {
    anyhow::bail!("built without the `window` feature; rebuild with `--features window`")
}
