mod script;

use std::fs;
use std::path::{Path, PathBuf};

use canvas::config::CanvasConfig;
use canvas::engine::Canvas;
use canvas::error::CanvasError;
use canvas::surface::SvgSurface;
use clap::Parser;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read or write {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
    #[error("invalid JSON in {}: {source}", path.display())]
    InvalidJson { path: PathBuf, source: serde_json::Error },
    #[error("canvas error: {0}")]
    Canvas(#[from] CanvasError),
}

#[derive(Parser, Debug)]
#[command(name = "designer", about = "Replay a pointer session on a diagram canvas and write the SVG")]
struct Cli {
    /// Canvas settings (JSON). Defaults apply to missing fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Session script (JSON array of steps).
    #[arg(long)]
    script: PathBuf,

    /// Output file. Stdout when absent.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Override the canvas id from the config.
    #[arg(long, env = "DESIGNER_CANVAS_ID")]
    canvas_id: Option<String>,

    #[arg(long, default_value = "800")]
    width: String,

    #[arg(long, default_value = "600")]
    height: String,
}

fn read(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Io { path: path.to_path_buf(), source })
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CanvasConfig::from_json(&read(path)?)
            .map_err(|source| CliError::InvalidJson { path: path.clone(), source })?,
        None => CanvasConfig::default(),
    };
    if let Some(id) = cli.canvas_id {
        config.id = id;
    }
    let steps = script::parse(&read(&cli.script)?)
        .map_err(|source| CliError::InvalidJson { path: cli.script.clone(), source })?;

    let mut canvas = Canvas::with_default_tools(config, SvgSurface::new());
    canvas.render()?;
    let report = script::replay(&mut canvas, &steps);
    tracing::info!(
        applied = report.applied,
        failed = report.failed,
        nodes = canvas.nodes().len(),
        edges = canvas.edges().len(),
        "replay finished"
    );

    let svg = canvas.surface().to_svg(&cli.width, &cli.height);
    match &cli.out {
        Some(path) => fs::write(path, svg).map_err(|source| CliError::Io { path: path.clone(), source })?,
        None => print!("{svg}"),
    }
    Ok(())
}
