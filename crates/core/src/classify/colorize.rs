//! False-color rendering of a slope/aspect grid.
//!
//! Each cell becomes one opaque RGBA pixel. The base tone is a grayscale ramp
//! of slope (`gray = clamp(slope / full_scale * 255, 0, 255)`), tinted by
//! suitability class:
//!
//! | Class      | R                      | G                      | B          |
//! |------------|------------------------|------------------------|------------|
//! | Optimal    | `gray*0.3`             | `min(255, gray*0.7+100)` | `gray*0.3` |
//! | Suboptimal | `min(255, gray*0.9+100)` | `min(255, gray*0.8+100)` | `gray*0.3` |
//! | Unsuitable | `gray`                 | `gray`                 | `gray`     |
//!
//! Channels are quantized the way a clamped 8-bit canvas buffer stores them:
//! clamp to `[0, 255]`, round half to even.

use rayon::prelude::*;
use serde::Serialize;

use super::suitability::{classify, Suitability};
use crate::config::{NoiseConfig, SuitabilityThresholds};
use crate::raster::{CellSample, Grid, ProfilerScope};

/// Bytes per pixel
pub const CHANNELS: usize = 4;

/// RGBA8 pixel buffer, row-major, no padding
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RgbaImage {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaImage {
    /// Image width in pixels
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGBA bytes (`width * height * 4`)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the image and return its bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Pixel at `(x, y)`, `None` outside the image
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * CHANNELS;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[offset..offset + CHANNELS]);
        Some(px)
    }
}

/// Grid-to-image renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colorizer {
    thresholds: SuitabilityThresholds,
    /// Slope mapped to full white
    full_scale: f32,
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new(SuitabilityThresholds::default(), NoiseConfig::default().max_slope)
    }
}

impl Colorizer {
    /// Create a colorizer.
    ///
    /// `full_scale` is the slope rendered as full white; non-positive values
    /// fall back to 45°.
    #[must_use]
    pub fn new(thresholds: SuitabilityThresholds, full_scale: f32) -> Self {
        let full_scale = if full_scale.is_finite() && full_scale > 0.0 {
            full_scale
        } else {
            NoiseConfig::default().max_slope
        };
        Self {
            thresholds,
            full_scale,
        }
    }

    /// Thresholds used for classification
    #[must_use]
    pub fn thresholds(&self) -> &SuitabilityThresholds {
        &self.thresholds
    }

    /// Color of a single cell
    #[must_use]
    pub fn cell_color(&self, sample: CellSample) -> [u8; 4] {
        let gray = (sample.slope / self.full_scale * 255.0).clamp(0.0, 255.0);
        let (r, g, b) = match classify(sample, &self.thresholds) {
            Suitability::Optimal => (gray * 0.3, (gray * 0.7 + 100.0).min(255.0), gray * 0.3),
            Suitability::Suboptimal => (
                (gray * 0.9 + 100.0).min(255.0),
                (gray * 0.8 + 100.0).min(255.0),
                gray * 0.3,
            ),
            Suitability::Unsuitable => (gray, gray, gray),
        };
        [to_byte(r), to_byte(g), to_byte(b), u8::MAX]
    }

    /// Render the whole grid. Pure: equal grids give byte-identical images.
    #[must_use]
    pub fn colorize(&self, grid: &Grid) -> RgbaImage {
        let _scope = ProfilerScope::new("colorize");

        let mut data = vec![0u8; grid.dimensions().cell_count() * CHANNELS];
        data.par_chunks_exact_mut(CHANNELS)
            .zip(grid.slope().par_iter().zip(grid.aspect().par_iter()))
            .for_each(|(px, (&slope, &aspect))| {
                px.copy_from_slice(&self.cell_color(CellSample { slope, aspect }));
            });

        RgbaImage {
            width: grid.width(),
            height: grid.height(),
            data,
        }
    }
}

/// Render a grid with the default thresholds and 45° full scale
#[must_use]
pub fn colorize(grid: &Grid) -> RgbaImage {
    Colorizer::default().colorize(grid)
}

#[inline]
fn to_byte(value: f32) -> u8 {
    value.clamp(0.0, 255.0).round_ties_even() as u8
}
