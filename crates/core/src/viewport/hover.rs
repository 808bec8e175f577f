use serde::Serialize;

use super::transform::GridCoord;
use crate::classify::{direction, CompassDirection};
use crate::raster::Grid;

/// The cell currently under the pointer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoveredPixel {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
    /// Slope in degrees
    pub slope: f32,
    /// Aspect in degrees
    pub aspect: f32,
    /// Compass label of `aspect`
    pub direction: CompassDirection,
}

impl HoveredPixel {
    /// Look up `coord` in `grid`, `None` outside it
    #[must_use]
    pub fn lookup(grid: &Grid, coord: GridCoord) -> Option<Self> {
        let sample = grid.sample(coord.x, coord.y)?;
        Some(Self {
            x: coord.x,
            y: coord.y,
            slope: sample.slope,
            aspect: sample.aspect,
            direction: direction(sample.aspect),
        })
    }

    /// Grid coordinate of the cell
    #[must_use]
    pub fn coord(&self) -> GridCoord {
        GridCoord {
            x: self.x,
            y: self.y,
        }
    }

    /// Info-panel lines: position, slope (2 decimals), aspect (1 decimal + direction)
    #[must_use]
    pub fn info(&self) -> PixelInfo {
        PixelInfo {
            position: format!("({}, {})", self.x, self.y),
            slope: format!("{:.2}°", self.slope),
            aspect: format!("{:.1}° ({})", self.aspect, self.direction),
        }
    }
}

/// Formatted hover readout
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PixelInfo {
    /// `(x, y)`
    pub position: String,
    /// e.g. `12.35°`
    pub slope: String,
    /// e.g. `181.2° (S)`
    pub aspect: String,
}

impl std::fmt::Display for PixelInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Position: {}  Slope: {}  Aspect: {}",
            self.position, self.slope, self.aspect
        )
    }
}
