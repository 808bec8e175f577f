//! Raster generation: grid storage, synthetic field generator and statistics.

mod field;
mod generator;
mod grid;
pub mod profiler;
mod stats;

pub use field::FieldData;
pub use generator::{generate, GeneratedRaster, RasterGenerator};
pub use grid::{CellSample, Grid, GridDimensions};
pub use profiler::ProfilerScope;
pub use stats::{PerformanceMetrics, SummaryStats};
