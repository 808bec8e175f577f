//! Terrain Analyzer Core Library
//!
//! Synthetic slope/aspect rasters for site-suitability inspection: a raster
//! generator, a suitability classifier that renders the grid as false-color
//! RGBA, and a zoom/pan/hover viewport that maps pointer positions back to
//! grid cells.
//!
//! ## Overview
//!
//! - [`raster`] - grid storage, the synthetic field generator and summary stats
//! - [`classify`] - suitability classes, compass labels and the colorizer
//! - [`viewport`] - zoom/pan state machine, pointer→grid transform, hover
//! - [`TerrainAnalyzer`] - a session tying the three together for a host UI
//!
//! ```
//! use terrain_analyzer_core::{AnalyzerConfig, ContainerRect, TerrainAnalyzer, ViewportEvent};
//! use terrain_analyzer_core::nalgebra::Point2;
//!
//! let mut analyzer = TerrainAnalyzer::new(AnalyzerConfig::default(), Some(42))?;
//! analyzer.set_container(ContainerRect::new(0.0, 0.0, 400.0, 200.0));
//! analyzer.handle(ViewportEvent::PointerMove { position: Point2::new(200.0, 100.0) });
//!
//! let hovered = analyzer.hovered().expect("center is inside the grid");
//! assert_eq!((hovered.x, hovered.y), (100, 50));
//! # Ok::<(), terrain_analyzer_core::AnalyzerError>(())
//! ```

pub mod analyzer;
pub mod classify;
pub mod config;
pub mod error;
pub mod raster;
pub mod viewport;

pub use analyzer::TerrainAnalyzer;
pub use config::{AnalyzerConfig, NoiseConfig, SuitabilityThresholds, ZoomConfig};
pub use error::AnalyzerError;

pub use classify::{
    classify, colorize, direction, legend, Colorizer, CompassDirection, LegendEntry, RgbaImage,
    Suitability, SuitabilityCoverage,
};
pub use raster::{generate, GeneratedRaster, Grid, GridDimensions, RasterGenerator, SummaryStats};
pub use viewport::{
    pointer_to_grid, ContainerRect, CursorHint, EventOutcome, GridCoord, HoveredPixel,
    RenderHints, ViewportEvent, ViewportState,
};

// Re-export nalgebra so hosts can build pointer positions without a direct dependency
pub use nalgebra;
