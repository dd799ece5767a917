#![deny(unsafe_code)]
//! gl-experiment: opens a window, builds a shader program from two GLSL
//! files, and draws an indexed rectangle every frame until the window is
//! closed or escape is pressed.

mod app;
mod error;
mod graphics;
mod logging;

use app::App;
use clap::{Parser, ValueEnum};
use error::CliError;
use gl_experiment_core::{AppConfig, MeshKind, ShaderSources, WindowState};
use logging::LoggingConfig;
use std::path::PathBuf;
use std::process;
use winit::event_loop::{ControlFlow, EventLoop};

/// Shader directory shipped with this crate.
const BUNDLED_SHADER_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/shaders");

#[derive(Parser, Debug)]
#[command(
    name = "gl-experiment",
    about = "Draw an indexed rectangle with OpenGL until the window is closed"
)]
struct Cli {
    /// JSON config file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the shader sources.
    #[arg(long)]
    shader_dir: Option<PathBuf>,

    /// Vertex shader file name inside the shader directory.
    #[arg(long)]
    vertex: Option<String>,

    /// Fragment shader file name inside the shader directory.
    #[arg(long)]
    fragment: Option<String>,

    /// Initial window width in pixels.
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Initial window height in pixels.
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Window title.
    #[arg(long)]
    title: Option<String>,

    /// Mesh to draw each frame.
    #[arg(short, long, value_enum)]
    mesh: Option<MeshArg>,

    /// Disable waiting for vertical sync when presenting.
    #[arg(long)]
    no_vsync: bool,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long)]
    log_level: Option<String>,

    /// Print the resolved config as JSON and exit.
    #[arg(long)]
    print_config: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum MeshArg {
    Rectangle,
    Triangle,
}

impl From<MeshArg> for MeshKind {
    fn from(arg: MeshArg) -> Self {
        match arg {
            MeshArg::Rectangle => MeshKind::Rectangle,
            MeshArg::Triangle => MeshKind::Triangle,
        }
    }
}

/// Loads the config file (or the defaults with the bundled shaders) and
/// applies command-line overrides.
fn resolve_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig {
            shader_dir: PathBuf::from(BUNDLED_SHADER_DIR),
            ..AppConfig::default()
        },
    };

    if let Some(dir) = &cli.shader_dir {
        config.shader_dir = dir.clone();
    }
    if let Some(vertex) = &cli.vertex {
        config.vertex_shader = vertex.clone();
    }
    if let Some(fragment) = &cli.fragment {
        config.fragment_shader = fragment.clone();
    }
    if let Some(width) = cli.width {
        config.width = width;
    }
    if let Some(height) = cli.height {
        config.height = height;
    }
    if let Some(title) = &cli.title {
        config.title = title.clone();
    }
    if let Some(mesh) = cli.mesh {
        config.mesh = mesh.into();
    }
    if cli.no_vsync {
        config.vsync = false;
    }

    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<(), CliError> {
    logging::init_logging(LoggingConfig {
        filter: cli.log_level.clone(),
    });

    let config = resolve_config(&cli)?;
    if cli.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let sources = ShaderSources::load(
        &config.shader_dir,
        &config.vertex_shader,
        &config.fragment_shader,
    )?;
    log::debug!(
        "loaded shaders: {} ({} bytes), {} ({} bytes)",
        sources.vertex.path().display(),
        sources.vertex.size(),
        sources.fragment.path().display(),
        sources.fragment.size()
    );

    let state = WindowState::new(config.width, config.height)?;

    let event_loop = EventLoop::new()
        .map_err(|e| CliError::Init(format!("Failed to create event loop: {e}")))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, sources, state);
    event_loop
        .run_app(&mut app)
        .map_err(|e| CliError::Runtime(format!("event loop terminated with error: {e}")))?;

    app.finish()
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        process::exit(e.exit_code());
    }
}
