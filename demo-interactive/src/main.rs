//! Interactive Terrain Analyzer Demo
//!
//! A terminal front end for the terrain analyzer session. Pointer, wheel and
//! zoom-button events are typed as commands and routed through the same
//! viewport controller a graphical host would drive.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package demo-interactive
//! ```
//!
//! # Commands
//!
//! - `gen [seed]` - Generate a new grid (random seed when omitted)
//! - `size <w> <h>` - Recreate the session with a new grid size
//! - `container <left> <top> <w> <h>` - Set the on-screen container rectangle
//! - `move <x> <y>` - Pointer move (hover or drag)
//! - `down <x> <y>` / `up` - Primary button press / release
//! - `leave` - Pointer left the container
//! - `wheel <x> <y> <delta>` - Scroll wheel; negative delta zooms in
//! - `+` / `-` / `reset` - Zoom buttons
//! - `hover` - Show the hovered cell
//! - `stats` - Slope statistics and suitability coverage
//! - `view` - Zoom, pan and render hints
//! - `legend` - Suitability legend
//! - `compass` - Aspect reference card
//! - `map [cols]` - ASCII suitability map of the grid
//! - `config` - Print the active configuration as JSON
//! - `help` - Show available commands
//! - `quit` - Exit

use nalgebra::Point2;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};
use terrain_analyzer_core::classify::reference_card;
use terrain_analyzer_core::{
    classify, AnalyzerConfig, CompassDirection, ContainerRect, EventOutcome, Suitability,
    TerrainAnalyzer, ViewportEvent,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Container pixels per grid cell for the initial container
const DEFAULT_SCALE: f32 = 2.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("╔═══════════════════════════════════════════════════════════╗");
    println!("║        Terrain Slope/Aspect Analyzer - Interactive        ║");
    println!("╚═══════════════════════════════════════════════════════════╝");
    println!();

    let defaults = AnalyzerConfig::default();
    let (width, height) = prompt_grid_dimensions(defaults.grid_width, defaults.grid_height);

    let mut analyzer = match TerrainAnalyzer::new(AnalyzerConfig::with_grid(width, height), None)
    {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("Failed to create analyzer: {}", e);
            return;
        }
    };
    analyzer.set_container(default_container(&analyzer));

    print_session_summary(&analyzer);

    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(e) => {
            eprintln!("Failed to create readline: {}", e);
            return;
        }
    };

    println!("\nType 'help' for available commands.\n");

    loop {
        let readline = rl.readline("terrain> ");
        match readline {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                let parts: Vec<&str> = line.split_whitespace().collect();

                if parts.is_empty() {
                    continue;
                }

                match parts[0].to_lowercase().as_str() {
                    "gen" | "g" => {
                        let seed = parts.get(1).and_then(|s| s.parse().ok());
                        analyzer.regenerate(seed);
                        info!(seed = ?analyzer.grid().seed(), "Regenerated grid");
                        print_session_summary(&analyzer);
                    }
                    "size" | "sz" => {
                        let (Some(w), Some(h)) = (parse_arg(&parts, 1), parse_arg(&parts, 2))
                        else {
                            println!("Usage: size <width> <height>");
                            continue;
                        };
                        let mut config = *analyzer.config();
                        config.grid_width = w;
                        config.grid_height = h;
                        match TerrainAnalyzer::new(config, None) {
                            Ok(mut resized) => {
                                resized.set_container(default_container(&resized));
                                info!(width = w, height = h, "Resized session");
                                analyzer = resized;
                                print_session_summary(&analyzer);
                            }
                            Err(e) => {
                                warn!(width = w, height = h, error = %e, "Resize rejected");
                                println!("Cannot resize: {}", e);
                            }
                        }
                    }
                    "container" | "c" => {
                        let values: Option<Vec<f32>> =
                            (1..=4).map(|i| parse_arg(&parts, i)).collect();
                        match values.as_deref() {
                            Some(&[left, top, w, h]) => {
                                let rect = ContainerRect::new(left, top, w, h);
                                analyzer.set_container(rect);
                                if !rect.is_usable() {
                                    println!(
                                        "Container has no area; pointers will not map to cells."
                                    );
                                }
                                show_container(&analyzer);
                            }
                            _ => {
                                println!("Usage: container <left> <top> <width> <height>");
                                show_container(&analyzer);
                            }
                        }
                    }
                    "move" | "m" => match parse_point(&parts, 1) {
                        Some(position) => {
                            dispatch(&mut analyzer, ViewportEvent::PointerMove { position });
                        }
                        None => println!("Usage: move <x> <y>"),
                    },
                    "down" | "d" => match parse_point(&parts, 1) {
                        Some(position) => {
                            dispatch(&mut analyzer, ViewportEvent::PointerDown { position });
                        }
                        None => println!("Usage: down <x> <y>"),
                    },
                    "up" | "u" => dispatch(&mut analyzer, ViewportEvent::PointerUp),
                    "leave" | "l" => dispatch(&mut analyzer, ViewportEvent::PointerLeave),
                    "wheel" | "wh" => {
                        match (parse_point(&parts, 1), parse_arg::<f32>(&parts, 3)) {
                            (Some(position), Some(delta_y)) => {
                                dispatch(&mut analyzer, ViewportEvent::Wheel { position, delta_y });
                            }
                            _ => println!(
                                "Usage: wheel <x> <y> <delta>  (negative delta zooms in)"
                            ),
                        }
                    }
                    "zoomin" | "+" => dispatch(&mut analyzer, ViewportEvent::ZoomIn),
                    "zoomout" | "-" => dispatch(&mut analyzer, ViewportEvent::ZoomOut),
                    "reset" | "r" => dispatch(&mut analyzer, ViewportEvent::ResetZoom),
                    "hover" | "hv" => show_hover(&analyzer),
                    "stats" | "st" => show_stats(&analyzer),
                    "view" | "v" => show_view(&analyzer),
                    "legend" | "lg" => show_legend(&analyzer),
                    "compass" | "cp" => show_compass(),
                    "map" | "mp" => {
                        let cols = parts
                            .get(1)
                            .and_then(|s| s.parse().ok())
                            .unwrap_or(60usize)
                            .clamp(4, 200);
                        show_map(&analyzer, cols);
                    }
                    "config" | "cfg" => match serde_json::to_string_pretty(analyzer.config()) {
                        Ok(json) => println!("{}", json),
                        Err(e) => println!("Cannot serialize config: {}", e),
                    },
                    "help" | "?" => show_help(),
                    "quit" | "q" | "exit" => {
                        println!("Goodbye!");
                        break;
                    }
                    _ => println!(
                        "Unknown command: {}. Type 'help' for available commands.",
                        parts[0]
                    ),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("^D");
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }
}

/// Prompt for grid dimensions at startup; blank or invalid input keeps the default
fn prompt_grid_dimensions(default_width: usize, default_height: usize) -> (usize, usize) {
    println!("Enter grid dimensions in cells (or press Enter for defaults):");

    let width = prompt_usize("  Width", default_width);
    let height = prompt_usize("  Height", default_height);

    println!();
    (width.clamp(1, 2000), height.clamp(1, 2000))
}

fn prompt_usize(label: &str, default: usize) -> usize {
    print!("{} [{}]: ", label, default);
    if io::stdout().flush().is_err() {
        return default;
    }
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(_) => input.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

fn parse_arg<T: std::str::FromStr>(parts: &[&str], index: usize) -> Option<T> {
    parts.get(index).and_then(|s| s.parse().ok())
}

fn parse_point(parts: &[&str], index: usize) -> Option<Point2<f32>> {
    Some(Point2::new(
        parse_arg(parts, index)?,
        parse_arg(parts, index + 1)?,
    ))
}

/// Container at the origin, `DEFAULT_SCALE` pixels per cell
fn default_container(analyzer: &TerrainAnalyzer) -> ContainerRect {
    let grid = analyzer.grid();
    ContainerRect::new(
        0.0,
        0.0,
        grid.width() as f32 * DEFAULT_SCALE,
        grid.height() as f32 * DEFAULT_SCALE,
    )
}

fn dispatch(analyzer: &mut TerrainAnalyzer, event: ViewportEvent) {
    let outcome = analyzer.handle(event);
    report_outcome(analyzer, outcome);
}

fn report_outcome(analyzer: &TerrainAnalyzer, outcome: EventOutcome) {
    if !outcome.changed() && !outcome.prevent_default {
        println!("(no change)");
        return;
    }
    if outcome.view_changed {
        let state = analyzer.viewport();
        let hints = analyzer.render_hints();
        println!(
            "View: zoom {} ({})  pan ({:.1}, {:.1})  cursor {}",
            hints.zoom_label(),
            state.zoom,
            state.pan.x,
            state.pan.y,
            hints.cursor.css()
        );
    }
    if outcome.hover_changed {
        match analyzer.pixel_info() {
            Some(info) => println!("Hover: {}", info),
            None => println!("Hover: (none)"),
        }
    }
    if outcome.prevent_default {
        println!("(page scroll suppressed)");
    }
}

fn print_session_summary(analyzer: &TerrainAnalyzer) {
    let grid = analyzer.grid();
    let seed = grid
        .seed()
        .map_or_else(|| "none".to_string(), |s| format!("{}", s));
    println!(
        "Generated {}x{} grid (seed {}) in {:.2} ms",
        grid.width(),
        grid.height(),
        seed,
        analyzer.stats().performance.elapsed_ms()
    );
    show_container(analyzer);
}

fn show_container(analyzer: &TerrainAnalyzer) {
    let rect = analyzer.container();
    println!(
        "Container: origin ({:.1}, {:.1}) size {:.1} x {:.1}",
        rect.origin.x, rect.origin.y, rect.size.x, rect.size.y
    );
}

fn show_hover(analyzer: &TerrainAnalyzer) {
    match (analyzer.hovered(), analyzer.pixel_info()) {
        (Some(pixel), Some(info)) => {
            println!("\n═══════════════ HOVERED CELL ═══════════════");
            println!("  Position:  {}", info.position);
            println!("  Slope:     {}", info.slope);
            println!("  Aspect:    {}", info.aspect);
            let class = analyzer.grid().sample(pixel.x, pixel.y).map(|sample| {
                classify(sample, &analyzer.config().suitability)
            });
            if let Some(class) = class {
                println!("  Class:     {}", class);
            }
            println!("════════════════════════════════════════════\n");
        }
        _ => println!("No cell hovered. Use 'move <x> <y>' inside the container."),
    }
}

fn show_stats(analyzer: &TerrainAnalyzer) {
    let stats = analyzer.stats();
    let coverage = analyzer.coverage();

    println!("\n═══════════════ TERRAIN STATISTICS ═══════════════");
    println!("  Min slope:   {:.2}°", stats.min_slope);
    println!("  Max slope:   {:.2}°", stats.max_slope);
    println!("  Mean slope:  {:.2}°", stats.mean_slope);
    println!(
        "  Generation:  {:.2} ms (~{:.2} MiB)",
        stats.performance.elapsed_ms(),
        stats.performance.memory_estimate_mb
    );
    println!();
    for class in Suitability::ALL {
        println!(
            "  {:<11} {:>7} cells  {:5.1}%",
            class.label(),
            coverage.count(class),
            coverage.fraction(class) * 100.0
        );
    }
    println!("══════════════════════════════════════════════════\n");
}

fn show_view(analyzer: &TerrainAnalyzer) {
    let state = analyzer.viewport();
    let hints = analyzer.render_hints();

    println!("\n═══════════════ VIEWPORT ═══════════════");
    println!("  Zoom:       {} ({})", hints.zoom_label(), state.zoom);
    println!("  Pan:        ({:.1}, {:.1})", state.pan.x, state.pan.y);
    println!("  Dragging:   {}", state.is_dragging());
    println!("  Transform:  {}", hints.css_transform());
    println!("  Cursor:     {}", hints.cursor.css());
    println!("  Pixelated:  {}", hints.pixelated);
    println!("  Animate:    {}", hints.animate);
    println!(
        "  Buttons:    zoom in {}  zoom out {}",
        if hints.can_zoom_in { "enabled" } else { "disabled" },
        if hints.can_zoom_out { "enabled" } else { "disabled" }
    );
    println!("════════════════════════════════════════\n");
}

fn show_legend(analyzer: &TerrainAnalyzer) {
    println!("\n═══════════════ SUITABILITY LEGEND ═══════════════");
    for entry in analyzer.legend() {
        println!(
            "  {} {:<11} {}",
            map_glyph(entry.class),
            entry.label,
            entry.description
        );
    }
    println!("══════════════════════════════════════════════════\n");
}

fn show_compass() {
    println!("\n═══ ASPECT REFERENCE ═══");
    for row in reference_card().chunks(3) {
        print!("  ");
        for cell in row {
            let label = cell.direction.map_or("", CompassDirection::label);
            if cell.highlighted {
                print!("[{:^4}]", label);
            } else {
                print!(" {:^4} ", label);
            }
        }
        println!();
    }
    println!("════════════════════════\n");
}

fn map_glyph(class: Suitability) -> char {
    match class {
        Suitability::Optimal => '█',
        Suitability::Suboptimal => '▒',
        Suitability::Unsuitable => '·',
    }
}

/// Display a downsampled ASCII map of suitability classes
fn show_map(analyzer: &TerrainAnalyzer, cols: usize) {
    let grid = analyzer.grid();
    let thresholds = &analyzer.config().suitability;
    let cols = cols.min(grid.width());
    // Terminal cells are roughly twice as tall as wide
    let rows = ((grid.height() * cols) / (grid.width() * 2)).max(1);
    let hovered = analyzer.hovered().map(|p| (p.x, p.y));

    println!("\n═══════════════ SUITABILITY MAP ═══════════════");
    println!("Legend: █ = optimal  ▒ = suboptimal  · = unsuitable  X = hovered\n");

    for row in 0..rows {
        let y0 = row * grid.height() / rows;
        let y1 = ((row + 1) * grid.height() / rows).max(y0 + 1);
        print!("{:4} │ ", y0);
        for col in 0..cols {
            let x0 = col * grid.width() / cols;
            let x1 = ((col + 1) * grid.width() / cols).max(x0 + 1);
            let is_hovered =
                hovered.is_some_and(|(hx, hy)| (x0..x1).contains(&hx) && (y0..y1).contains(&hy));
            if is_hovered {
                print!("X");
                continue;
            }
            let glyph = grid
                .sample((x0 + x1) / 2, (y0 + y1) / 2)
                .map_or(' ', |sample| map_glyph(classify(sample, thresholds)));
            print!("{}", glyph);
        }
        println!();
    }

    print!("     └");
    for _ in 0..cols {
        print!("─");
    }
    println!("\n");
    println!("═══════════════════════════════════════════════\n");
}

fn show_help() {
    println!("\n═══════════════ AVAILABLE COMMANDS ═══════════════");
    println!("  gen [seed], g          - Generate a new grid (random seed if omitted)");
    println!("  size <w> <h>, sz       - Recreate the session with a new grid size");
    println!("  container <l> <t> <w> <h>, c - Set the container rectangle (no args: show it)");
    println!("  move <x> <y>, m        - Pointer move (hover, or pan while dragging)");
    println!("  down <x> <y>, d        - Press primary button (starts a drag when zoomed)");
    println!("  up, u                  - Release primary button");
    println!("  leave, l               - Pointer left the container");
    println!("  wheel <x> <y> <d>, wh  - Scroll wheel (negative d zooms in)");
    println!("  zoomin, +              - Zoom in one step");
    println!("  zoomout, -             - Zoom out one step");
    println!("  reset, r               - Reset zoom and pan");
    println!("  hover, hv              - Show hovered cell");
    println!("  stats, st              - Slope statistics and coverage");
    println!("  view, v                - Zoom, pan and render hints");
    println!("  legend, lg             - Suitability legend");
    println!("  compass, cp            - Aspect reference card");
    println!("  map [cols], mp         - ASCII suitability map (default 60 columns)");
    println!("  config, cfg            - Print configuration as JSON");
    println!("  help, ?                - Show this help");
    println!("  quit, q                - Exit");
    println!("══════════════════════════════════════════════════\n");
}
