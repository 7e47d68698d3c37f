use anyhow::{Context, Result, bail};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

use footprint3d::api::{DEFAULT_DATA_URL, LoaderConfig, load_building_data, load_building_file};
use footprint3d::config::FileConfig;
use footprint3d::geometry::{SceneOrigin, Units};
use footprint3d::render::{Viewport, renderer_for_path};
use footprint3d::scene::{
    Color, LoadSummary, Material, OrbitControls, PerspectiveCamera, RenderLoop, SceneOptions,
    Session,
};

/// Extrude GeoJSON building footprints into a 3D scene
///
/// Examples:
///   # Export the default dataset to STL
///   footprint3d -o city.stl
///
///   # Load a local file and draw it through the camera
///   footprint3d -i buildings.geojson -o city.svg
///
///   # Render a 120-frame turntable, 3 degrees per frame
///   footprint3d -o frames/city.svg --frames 120 --auto-rotate 3
///
///   # Use a config file
///   footprint3d --config my-settings.toml
#[derive(Parser, Debug)]
#[command(name = "footprint3d")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config file (optional, auto-searches footprint3d.toml if not provided)
    #[arg(long)]
    config: Option<PathBuf>,

    /// URL of the GeoJSON FeatureCollection
    #[arg(short = 'u', long, conflicts_with = "input")]
    url: Option<String>,

    /// Local GeoJSON file instead of a URL
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Output file; the extension selects the renderer (.stl, .obj, .svg)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Height used for buildings without a height property
    #[arg(long)]
    default_height: Option<f64>,

    /// Scene origin: first building or center of the whole dataset
    #[arg(long, value_enum)]
    origin: Option<SceneOrigin>,

    /// Horizontal units of the scene
    #[arg(long, value_enum)]
    units: Option<Units>,

    /// Footprint simplification tolerance in scene units
    #[arg(long)]
    simplify: Option<f64>,

    /// Number of frames to render through the render loop (0 = single frame)
    #[arg(long, default_value = "0")]
    frames: u64,

    /// Frames per second of the render loop
    #[arg(long)]
    fps: Option<u32>,

    /// Orbit in degrees per frame
    #[arg(long, allow_hyphen_values = true)]
    auto_rotate: Option<f64>,

    /// Viewport width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Viewport height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// HTTP timeout in seconds (no timeout by default)
    #[arg(long)]
    timeout: Option<u64>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let total_start = Instant::now();

    let file_config = if let Some(ref config_path) = args.config {
        if !config_path.exists() {
            bail!("Config file not found: {:?}", config_path);
        }
        let contents = std::fs::read_to_string(config_path)
            .context(format!("Failed to read config file: {:?}", config_path))?;
        toml::from_str(&contents).context("Failed to parse config file")?
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = args.verbose || file_config.verbose;
    init_tracing(verbose);

    let input = args.input.clone().or_else(|| file_config.input.clone());
    let url = args
        .url
        .clone()
        .or_else(|| file_config.url.clone())
        .unwrap_or_else(|| DEFAULT_DATA_URL.to_string());
    let output = args
        .output
        .clone()
        .or_else(|| file_config.output.clone())
        .unwrap_or_else(|| PathBuf::from("buildings.stl"));
    let options = SceneOptions {
        origin: args.origin.or(file_config.origin).unwrap_or_default(),
        units: args.units.or(file_config.units).unwrap_or_default(),
        default_height: args.default_height.or(file_config.default_height),
        simplify: args.simplify.or(file_config.simplify),
    };
    let camera_config = &file_config.camera;
    let viewport = Viewport {
        width: args.width.unwrap_or(camera_config.width),
        height: args.height.unwrap_or(camera_config.height),
    };
    let fps = args.fps.unwrap_or(camera_config.fps).max(1);
    let auto_rotate = args.auto_rotate.or(camera_config.auto_rotate);
    let timeout = args.timeout.or(file_config.timeout_secs).map(Duration::from_secs);
    let material = Material {
        fill: parse_color(&file_config.colors.fill)?,
        edge: parse_color(&file_config.colors.edge)?,
        background: parse_color(&file_config.colors.background)?,
    };

    println!("footprint3d - Building Footprint Extruder");
    println!("=========================================");
    println!();

    if verbose {
        println!("Configuration:");
        match &input {
            Some(path) => println!("  Input: {}", path.display()),
            None => println!("  URL: {}", url),
        }
        println!("  Output: {}", output.display());
        println!("  Origin: {:?}", options.origin);
        println!("  Units: {:?}", options.units);
        if let Some(h) = options.default_height {
            println!("  Default height: {}", h);
        }
        if let Some(eps) = options.simplify {
            println!("  Simplify tolerance: {}", eps);
        }
        println!("  Viewport: {}x{}", viewport.width, viewport.height);
        println!();
    }

    let spinner = create_spinner("Loading building data...");
    let start = Instant::now();
    let features = match &input {
        Some(path) => load_building_file(path)
            .with_context(|| format!("Failed to load building data from {}", path.display()))?,
        None => load_building_data(&url, &LoaderConfig { timeout })
            .with_context(|| format!("Failed to load building data from {}", url))?,
    };
    spinner.finish_with_message(format!(
        "Loaded {} features [{:.1}s]",
        features.len(),
        start.elapsed().as_secs_f32()
    ));

    let renderer = renderer_for_path(&output, viewport, args.frames > 0)
        .context("Failed to set up renderer")?;
    let mut camera = PerspectiveCamera::new(
        camera_config.fov,
        1.0,
        0.1,
        camera_config.far,
    );
    camera.set_viewport(viewport.width, viewport.height);
    camera.position = [0.0, 0.0, camera_config.distance];
    let mut controls = OrbitControls::new(camera.target);
    if let Some(degrees) = auto_rotate {
        controls = controls.with_auto_rotate(degrees.to_radians());
    }

    let mut session = Session::new(renderer, camera, controls, options, material);

    let spinner = create_spinner("Building scene...");
    let start = Instant::now();
    let summary = session.load(&features);
    spinner.finish_with_message(format!(
        "Extruded {} buildings, {} triangles [{:.1}s]",
        summary.rendered,
        session.scene().triangle_count(),
        start.elapsed().as_secs_f32()
    ));
    report_skipped(&summary, verbose);

    let spinner = create_spinner("Rendering...");
    let start = Instant::now();
    let frames = if args.frames == 0 {
        session.render_frame().context("Failed to render scene")?;
        session.teardown();
        1
    } else {
        let session = Arc::new(Mutex::new(session));
        let interval = Duration::from_secs_f64(1.0 / fps as f64);
        let render_loop = RenderLoop::start(Arc::clone(&session), interval, Some(args.frames));
        let frames = render_loop.wait().context("Render loop failed")?;
        match session.lock() {
            Ok(mut session) => session.teardown(),
            Err(_) => bail!("Render session lock was poisoned"),
        }
        frames
    };
    spinner.finish_with_message(format!(
        "Rendered {} frame(s) to {} [{:.1}s]",
        frames,
        output.display(),
        start.elapsed().as_secs_f32()
    ));

    println!();
    println!(
        "Done! Total time: {:.1}s",
        total_start.elapsed().as_secs_f32()
    );

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_color(hex: &str) -> Result<Color> {
    Color::from_hex(hex).with_context(|| format!("Invalid color {:?}, expected #rrggbb", hex))
}

fn report_skipped(summary: &LoadSummary, verbose: bool) {
    if summary.skipped.is_empty() {
        return;
    }
    println!("  Skipped {} features", summary.skipped.len());
    if verbose {
        for (label, reason) in &summary.skipped {
            println!("    {}: {}", label, reason);
        }
    }
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]);
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}
