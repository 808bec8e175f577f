//! Headless terrain analyzer demo.
//!
//! Generates a terrain sample, prints its statistics and suitability
//! coverage, replays a pointer session against the viewport, and optionally
//! writes the colorized raster as PNG and a JSON report.
//!
//! ```bash
//! cargo run -p demo-headless -- --seed 42 --png terrain.png --json report.json
//! ```

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use nalgebra::Point2;
use serde::Serialize;
use terrain_analyzer_core::classify::LegendEntry;
use terrain_analyzer_core::{
    AnalyzerConfig, ContainerRect, EventOutcome, HoveredPixel, Suitability, SuitabilityCoverage,
    SummaryStats, TerrainAnalyzer, ViewportEvent,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

type DemoResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Terrain analyzer demo with configurable parameters
#[derive(Parser, Debug)]
#[command(name = "terrain-analyzer-demo")]
#[command(about = "Synthetic slope/aspect terrain analyzer demo", long_about = None)]
struct Args {
    /// Grid width in cells (overrides the config file)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height in cells (overrides the config file)
    #[arg(long)]
    height: Option<usize>,

    /// Generator seed (random if omitted)
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON configuration file; missing fields take defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the colorized raster to this PNG file
    #[arg(long)]
    png: Option<PathBuf>,

    /// Write a JSON report (stats, coverage, legend, session) to this file
    #[arg(long)]
    json: Option<PathBuf>,

    /// JSON file with an array of viewport events to replay instead of the built-in session
    #[arg(short, long)]
    events: Option<PathBuf>,

    /// Container pixels per grid cell
    #[arg(long, default_value_t = 2.0)]
    scale: f32,
}

/// One replayed event and the state it produced
#[derive(Debug, Serialize)]
struct SessionStep {
    event: ViewportEvent,
    outcome: EventOutcome,
    zoom: f32,
    pan: [f32; 2],
    hovered: Option<HoveredPixel>,
}

#[derive(Debug, Serialize)]
struct Report<'a> {
    config: &'a AnalyzerConfig,
    seed: Option<u64>,
    stats: &'a SummaryStats,
    coverage: &'a SuitabilityCoverage,
    legend: Vec<LegendEntry>,
    session: Vec<SessionStep>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match run(&Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> DemoResult<()> {
    println!("=== Terrain Analyzer Demo ===\n");

    let mut config = match &args.config {
        Some(path) => serde_json::from_str::<AnalyzerConfig>(&fs::read_to_string(path)?)?,
        None => AnalyzerConfig::default(),
    };
    if let Some(width) = args.width {
        config.grid_width = width;
    }
    if let Some(height) = args.height {
        config.grid_height = height;
    }

    let mut analyzer = TerrainAnalyzer::new(config, args.seed)?;
    let grid = analyzer.grid();
    println!(
        "Generated {}x{} grid (seed {})",
        grid.width(),
        grid.height(),
        grid.seed()
            .as_ref()
            .map_or_else(|| "none".to_string(), ToString::to_string)
    );

    print_stats(&analyzer);

    let scale = if args.scale.is_finite() && args.scale > 0.0 {
        args.scale
    } else {
        2.0
    };
    let container = ContainerRect::new(
        0.0,
        0.0,
        analyzer.grid().width() as f32 * scale,
        analyzer.grid().height() as f32 * scale,
    );
    analyzer.set_container(container);

    let events = match &args.events {
        Some(path) => serde_json::from_str::<Vec<ViewportEvent>>(&fs::read_to_string(path)?)?,
        None => default_session(&container),
    };
    let session = replay(&mut analyzer, &events);

    if let Some(path) = &args.png {
        let image = analyzer.image();
        let buffer = image::RgbaImage::from_raw(
            u32::try_from(image.width())?,
            u32::try_from(image.height())?,
            image.as_bytes().to_vec(),
        )
        .ok_or("pixel buffer does not match image size")?;
        buffer.save(path)?;
        info!(path = %path.display(), "Wrote PNG");
        println!("\nWrote raster to {}", path.display());
    }

    if let Some(path) = &args.json {
        let report = Report {
            config: analyzer.config(),
            seed: analyzer.grid().seed(),
            stats: analyzer.stats(),
            coverage: analyzer.coverage(),
            legend: analyzer.legend(),
            session,
        };
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        info!(path = %path.display(), "Wrote JSON report");
        println!("Wrote report to {}", path.display());
    }

    Ok(())
}

fn print_stats(analyzer: &TerrainAnalyzer) {
    let stats = analyzer.stats();
    println!(
        "\nSlope: min {:.2}°  max {:.2}°  mean {:.2}°",
        stats.min_slope, stats.max_slope, stats.mean_slope
    );
    println!(
        "Generation: {:.2} ms, ~{:.2} MiB",
        stats.performance.elapsed_ms(),
        stats.performance.memory_estimate_mb
    );

    println!("\nSuitability coverage:");
    let coverage = analyzer.coverage();
    for entry in analyzer.legend() {
        println!(
            "  {:<11} {:>6} cells ({:5.1}%)  {}",
            entry.label,
            coverage.count(entry.class),
            coverage.fraction(entry.class) * 100.0,
            entry.description
        );
    }
    if coverage.count(Suitability::Optimal) == 0 {
        println!("  (no optimal cells in this sample)");
    }
}

/// Hover the center, zoom in by wheel and button, drag left, hover again,
/// zoom out, leave and reset
fn default_session(container: &ContainerRect) -> Vec<ViewportEvent> {
    let center = container.center();
    let left = Point2::new(center.x - container.size.x / 4.0, center.y);
    vec![
        ViewportEvent::PointerMove { position: center },
        ViewportEvent::Wheel {
            position: center,
            delta_y: -100.0,
        },
        ViewportEvent::ZoomIn,
        ViewportEvent::PointerDown { position: center },
        ViewportEvent::PointerMove { position: left },
        ViewportEvent::PointerUp,
        ViewportEvent::PointerMove { position: center },
        ViewportEvent::ZoomOut,
        ViewportEvent::PointerLeave,
        ViewportEvent::ResetZoom,
    ]
}

fn replay(analyzer: &mut TerrainAnalyzer, events: &[ViewportEvent]) -> Vec<SessionStep> {
    println!("\nReplaying {} viewport events...\n", events.len());
    println!("Step | Event              | Zoom | Pan              | Hover");
    println!("-----|--------------------|------|------------------|---------------------------");

    events
        .iter()
        .enumerate()
        .map(|(i, &event)| {
            let outcome = analyzer.handle(event);
            let state = analyzer.viewport();
            let hovered = analyzer.hovered().copied();
            let hover_text = analyzer
                .pixel_info()
                .as_ref()
                .map_or_else(|| "-".to_string(), ToString::to_string);
            println!(
                "{:4} | {:<18} | {:4.1} | ({:6.1}, {:6.1}) | {}",
                i + 1,
                describe(&event),
                state.zoom,
                state.pan.x,
                state.pan.y,
                hover_text
            );
            SessionStep {
                event,
                outcome,
                zoom: state.zoom,
                pan: [state.pan.x, state.pan.y],
                hovered,
            }
        })
        .collect()
}

fn describe(event: &ViewportEvent) -> String {
    match event {
        ViewportEvent::PointerDown { position } => {
            format!("down {:.0},{:.0}", position.x, position.y)
        }
        ViewportEvent::PointerMove { position } => {
            format!("move {:.0},{:.0}", position.x, position.y)
        }
        ViewportEvent::PointerUp => "up".to_string(),
        ViewportEvent::PointerLeave => "leave".to_string(),
        ViewportEvent::Wheel { delta_y, .. } => format!("wheel {delta_y:+.0}"),
        ViewportEvent::ZoomIn => "zoom in".to_string(),
        ViewportEvent::ZoomOut => "zoom out".to_string(),
        ViewportEvent::ResetZoom => "reset".to_string(),
    }
}
