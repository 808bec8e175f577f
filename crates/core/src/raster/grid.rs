//! Slope/aspect raster grid.

use serde::{Deserialize, Serialize};

use super::field::FieldData;
use crate::error::AnalyzerError;

/// Validated grid size.
///
/// Both sides are positive and `width * height` fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct GridDimensions {
    width: usize,
    height: usize,
}

impl GridDimensions {
    /// Validate and create grid dimensions.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::InvalidDimensions` if either side is zero or the
    /// total cell count overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, AnalyzerError> {
        let invalid = |reason| AnalyzerError::InvalidDimensions {
            width,
            height,
            reason,
        };
        if width == 0 {
            return Err(invalid("width must be positive"));
        }
        if height == 0 {
            return Err(invalid("height must be positive"));
        }
        if width.checked_mul(height).is_none() {
            return Err(invalid("cell count overflows"));
        }
        Ok(Self { width, height })
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of `(x, y)`, `None` when out of bounds
    #[inline]
    #[must_use]
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then_some(y * self.width + x)
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            width: crate::config::DEFAULT_GRID_WIDTH,
            height: crate::config::DEFAULT_GRID_HEIGHT,
        }
    }
}

impl TryFrom<(usize, usize)> for GridDimensions {
    type Error = AnalyzerError;

    fn try_from((width, height): (usize, usize)) -> Result<Self, Self::Error> {
        Self::new(width, height)
    }
}

impl From<GridDimensions> for (usize, usize) {
    fn from(dims: GridDimensions) -> Self {
        (dims.width, dims.height)
    }
}

/// Slope and aspect of one cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellSample {
    /// Steepness in degrees
    pub slope: f32,
    /// Facing direction in degrees clockwise from north
    pub aspect: f32,
}

/// Immutable slope/aspect raster.
///
/// Regenerating produces a new `Grid`; nothing mutates a grid after it has
/// been built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    dims: GridDimensions,
    /// Slope in degrees, `[0, max_slope]` for generated grids
    slope: FieldData,
    /// Aspect in degrees, `[0, 360)` for generated grids
    aspect: FieldData,
    /// Seed of the generator run, if the grid was seeded
    seed: Option<u64>,
}

impl Grid {
    /// Build a grid from precomputed fields.
    ///
    /// Values are stored as given. Only the generator guarantees the slope and
    /// aspect ranges.
    ///
    /// # Errors
    ///
    /// Returns `AnalyzerError::InvalidDimensions` if a field's length does not
    /// equal `dims.cell_count()`.
    pub fn from_fields(
        dims: GridDimensions,
        slope: Vec<f32>,
        aspect: Vec<f32>,
    ) -> Result<Self, AnalyzerError> {
        Self::from_parts(dims, slope, aspect, None)
    }

    pub(crate) fn from_parts(
        dims: GridDimensions,
        slope: Vec<f32>,
        aspect: Vec<f32>,
        seed: Option<u64>,
    ) -> Result<Self, AnalyzerError> {
        let mismatch = || AnalyzerError::InvalidDimensions {
            width: dims.width,
            height: dims.height,
            reason: "field length does not match cell count",
        };
        let slope = FieldData::from_vec(dims.width, dims.height, slope).ok_or_else(mismatch)?;
        let aspect = FieldData::from_vec(dims.width, dims.height, aspect).ok_or_else(mismatch)?;
        Ok(Self {
            dims,
            slope,
            aspect,
            seed,
        })
    }

    /// Grid dimensions
    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.dims.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.dims.height
    }

    /// Seed the generator used, `None` for hand-built or externally seeded grids
    #[must_use]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Slope field in row-major order
    #[must_use]
    pub fn slope(&self) -> &[f32] {
        self.slope.as_slice()
    }

    /// Aspect field in row-major order
    #[must_use]
    pub fn aspect(&self) -> &[f32] {
        self.aspect.as_slice()
    }

    /// Slope and aspect at `(x, y)`, `None` outside the grid
    #[must_use]
    pub fn sample(&self, x: usize, y: usize) -> Option<CellSample> {
        Some(CellSample {
            slope: self.slope.get(x, y)?,
            aspect: self.aspect.get(x, y)?,
        })
    }

    /// Iterate all cells in row-major order
    pub fn samples(&self) -> impl ExactSizeIterator<Item = CellSample> + '_ {
        self.slope
            .as_slice()
            .iter()
            .zip(self.aspect.as_slice())
            .map(|(&slope, &aspect)| CellSample { slope, aspect })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_validation() {
        assert!(GridDimensions::new(200, 100).is_ok());
        assert!(matches!(
            GridDimensions::new(0, 100),
            Err(AnalyzerError::InvalidDimensions {
                reason: "width must be positive",
                ..
            })
        ));
        assert!(matches!(
            GridDimensions::new(100, 0),
            Err(AnalyzerError::InvalidDimensions {
                reason: "height must be positive",
                ..
            })
        ));
        assert!(matches!(
            GridDimensions::new(usize::MAX, 2),
            Err(AnalyzerError::InvalidDimensions {
                reason: "cell count overflows",
                ..
            })
        ));
    }

    #[test]
    fn test_default_dimensions() {
        let dims = GridDimensions::default();
        assert_eq!((dims.width(), dims.height()), (200, 100));
        assert_eq!(dims.cell_count(), 20_000);
    }

    #[test]
    fn test_index_bounds() {
        let dims = GridDimensions::new(4, 3).expect("valid");
        assert_eq!(dims.index(0, 0), Some(0));
        assert_eq!(dims.index(3, 2), Some(11));
        assert_eq!(dims.index(4, 0), None);
        assert_eq!(dims.index(0, 3), None);
    }

    #[test]
    fn test_grid_from_fields() {
        let dims = GridDimensions::new(2, 2).expect("valid");
        let grid = Grid::from_fields(dims, vec![1.0, 2.0, 3.0, 4.0], vec![0.0, 90.0, 180.0, 270.0])
            .expect("matching fields");
        assert_eq!(grid.seed(), None);
        assert_eq!(
            grid.sample(1, 1),
            Some(CellSample {
                slope: 4.0,
                aspect: 270.0
            })
        );
        assert_eq!(grid.sample(2, 0), None);
        assert_eq!(grid.samples().len(), 4);
    }

    #[test]
    fn test_grid_from_mismatched_fields() {
        let dims = GridDimensions::new(2, 2).expect("valid");
        assert!(Grid::from_fields(dims, vec![0.0; 3], vec![0.0; 4]).is_err());
        assert!(Grid::from_fields(dims, vec![0.0; 4], vec![0.0; 5]).is_err());
    }

    #[test]
    fn test_dimensions_deserialize_validates() {
        let dims: GridDimensions = serde_json::from_str("[20, 10]").expect("valid pair");
        assert_eq!(dims.cell_count(), 200);
        assert!(serde_json::from_str::<GridDimensions>("[0, 10]").is_err());
    }
}
