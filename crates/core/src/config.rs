//! Analyzer configuration
//!
//! All tunables of the analyzer live here. The defaults reproduce the demo
//! page exactly: a 200×100 grid, slopes clamped to 45°, a 5° suitability
//! threshold with a south-facing band of 112.5°–247.5°, and zoom in 0.5 steps
//! between 1× and 5×.

use serde::{Deserialize, Serialize};

use crate::error::AnalyzerError;
use crate::raster::GridDimensions;

/// Default grid width in cells
pub const DEFAULT_GRID_WIDTH: usize = 200;
/// Default grid height in cells
pub const DEFAULT_GRID_HEIGHT: usize = 100;

/// Parameters of the synthetic slope/aspect field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    /// Distance from grid center (cells) is divided by this to get the base slope
    pub distance_divisor: f32,
    /// Upper bound (exclusive) of the uniform slope perturbation in degrees
    pub slope_noise: f32,
    /// Upper bound (exclusive) of the uniform aspect perturbation in degrees
    pub aspect_noise: f32,
    /// Slope ceiling in degrees; also the full-white point of the grayscale ramp
    pub max_slope: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            distance_divisor: 5.0,
            slope_noise: 10.0,
            aspect_noise: 30.0,
            max_slope: 45.0,
        }
    }
}

/// Slope/aspect thresholds for the suitability classes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitabilityThresholds {
    /// Cells strictly below this slope (degrees) are buildable
    pub max_slope: f32,
    /// Start of the south-facing aspect band (inclusive, degrees)
    pub south_band_start: f32,
    /// End of the south-facing aspect band (inclusive, degrees)
    pub south_band_end: f32,
}

impl Default for SuitabilityThresholds {
    fn default() -> Self {
        Self {
            max_slope: 5.0,
            south_band_start: 112.5,
            south_band_end: 247.5,
        }
    }
}

/// Zoom limits and step for the viewport
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoomConfig {
    /// Minimum zoom; at this level panning is disabled
    pub min: f32,
    /// Maximum zoom
    pub max: f32,
    /// Increment applied by a single zoom-in/zoom-out
    pub step: f32,
    /// Zooming out to this level or below snaps the pan back to the origin
    pub pan_snap_threshold: f32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 5.0,
            step: 0.5,
            pan_snap_threshold: 1.5,
        }
    }
}

/// Complete analyzer configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Grid width in cells
    pub grid_width: usize,
    /// Grid height in cells
    pub grid_height: usize,
    /// Synthetic field parameters
    pub noise: NoiseConfig,
    /// Suitability classification thresholds
    pub suitability: SuitabilityThresholds,
    /// Viewport zoom limits
    pub zoom: ZoomConfig,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            noise: NoiseConfig::default(),
            suitability: SuitabilityThresholds::default(),
            zoom: ZoomConfig::default(),
        }
    }
}

impl AnalyzerConfig {
    /// Configuration with a custom grid size and default everything else
    #[must_use]
    pub fn with_grid(grid_width: usize, grid_height: usize) -> Self {
        Self {
            grid_width,
            grid_height,
            ..Self::default()
        }
    }

    /// Validated grid dimensions
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::InvalidDimensions` if either side is zero or the
    /// cell count overflows.
    pub fn dimensions(&self) -> Result<GridDimensions, AnalyzerError> {
        GridDimensions::new(self.grid_width, self.grid_height)
    }

    /// Check every construction precondition.
    ///
    /// # Errors
    ///
    /// Returns the first violated precondition.
    pub fn validate(&self) -> Result<(), AnalyzerError> {
        self.dimensions()?;

        let noise = &self.noise;
        require_positive("noise.distance_divisor", noise.distance_divisor)?;
        require_non_negative("noise.slope_noise", noise.slope_noise)?;
        require_non_negative("noise.aspect_noise", noise.aspect_noise)?;
        require_positive("noise.max_slope", noise.max_slope)?;

        let suitability = &self.suitability;
        require_non_negative("suitability.max_slope", suitability.max_slope)?;
        require_non_negative("suitability.south_band_start", suitability.south_band_start)?;
        require_non_negative("suitability.south_band_end", suitability.south_band_end)?;
        if suitability.south_band_start > suitability.south_band_end {
            return Err(AnalyzerError::invalid_config(
                "suitability.south_band_start",
                format!(
                    "must not exceed south_band_end ({} > {})",
                    suitability.south_band_start, suitability.south_band_end
                ),
            ));
        }

        let zoom = &self.zoom;
        require_positive("zoom.min", zoom.min)?;
        require_positive("zoom.step", zoom.step)?;
        require_positive("zoom.pan_snap_threshold", zoom.pan_snap_threshold)?;
        if !zoom.max.is_finite() || zoom.max < zoom.min {
            return Err(AnalyzerError::invalid_config(
                "zoom.max",
                format!("must be finite and >= zoom.min ({}), got {}", zoom.min, zoom.max),
            ));
        }

        Ok(())
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), AnalyzerError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AnalyzerError::invalid_config(
            field,
            format!("must be finite and positive, got {value}"),
        ))
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), AnalyzerError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AnalyzerError::invalid_config(
            field,
            format!("must be finite and non-negative, got {value}"),
        ))
    }
}
