//! Suitability classification of slope/aspect cells.
//!
//! Classes are evaluated in precedence order, first match wins:
//!
//! 1. **Optimal** - slope below the threshold and aspect inside the
//!    south-facing band (both band ends inclusive)
//! 2. **Suboptimal** - slope below the threshold, any other aspect
//! 3. **Unsuitable** - everything else

use serde::Serialize;

use crate::config::SuitabilityThresholds;
use crate::raster::{CellSample, Grid};

/// Suitability class of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Suitability {
    /// Gentle slope, south-facing
    Optimal,
    /// Gentle slope, other aspect
    Suboptimal,
    /// Slope at or above the threshold
    Unsuitable,
}

impl Suitability {
    /// All classes in precedence order
    pub const ALL: [Suitability; 3] = [
        Suitability::Optimal,
        Suitability::Suboptimal,
        Suitability::Unsuitable,
    ];

    /// Display name
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Suitability::Optimal => "Optimal",
            Suitability::Suboptimal => "Suboptimal",
            Suitability::Unsuitable => "Unsuitable",
        }
    }

    /// Legend description for the given thresholds, e.g. `Low slope (<5°) + South-facing`
    #[must_use]
    pub fn description(self, thresholds: &SuitabilityThresholds) -> String {
        let limit = thresholds.max_slope;
        match self {
            Suitability::Optimal => format!("Low slope (<{limit}°) + South-facing"),
            Suitability::Suboptimal => format!("Low slope (<{limit}°) + Other aspects"),
            Suitability::Unsuitable => format!("Steep slope (≥{limit}°)"),
        }
    }
}

impl std::fmt::Display for Suitability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify a single cell
#[inline]
#[must_use]
pub fn classify(sample: CellSample, thresholds: &SuitabilityThresholds) -> Suitability {
    let low_slope = sample.slope < thresholds.max_slope;
    let south_facing = (thresholds.south_band_start..=thresholds.south_band_end)
        .contains(&sample.aspect);

    if low_slope && south_facing {
        Suitability::Optimal
    } else if low_slope {
        Suitability::Suboptimal
    } else {
        Suitability::Unsuitable
    }
}

/// One row of the suitability legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// Class this row describes
    pub class: Suitability,
    /// Class name
    pub label: &'static str,
    /// Rule summary
    pub description: String,
}

/// Legend rows in precedence order
#[must_use]
pub fn legend(thresholds: &SuitabilityThresholds) -> Vec<LegendEntry> {
    Suitability::ALL
        .iter()
        .map(|&class| LegendEntry {
            class,
            label: class.label(),
            description: class.description(thresholds),
        })
        .collect()
}

/// Per-class cell counts over a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SuitabilityCoverage {
    /// Optimal cells
    pub optimal: usize,
    /// Suboptimal cells
    pub suboptimal: usize,
    /// Unsuitable cells
    pub unsuitable: usize,
}

impl SuitabilityCoverage {
    /// Count the classes of every cell in `grid`
    #[must_use]
    pub fn of_grid(grid: &Grid, thresholds: &SuitabilityThresholds) -> Self {
        grid.samples()
            .fold(Self::default(), |mut acc, sample| {
                match classify(sample, thresholds) {
                    Suitability::Optimal => acc.optimal += 1,
                    Suitability::Suboptimal => acc.suboptimal += 1,
                    Suitability::Unsuitable => acc.unsuitable += 1,
                }
                acc
            })
    }

    /// Total cells counted
    #[must_use]
    pub fn total(&self) -> usize {
        self.optimal + self.suboptimal + self.unsuitable
    }

    /// Cell count of one class
    #[must_use]
    pub fn count(&self, class: Suitability) -> usize {
        match class {
            Suitability::Optimal => self.optimal,
            Suitability::Suboptimal => self.suboptimal,
            Suitability::Unsuitable => self.unsuitable,
        }
    }

    /// Share of one class in `[0, 1]`, zero for an empty count
    #[must_use]
    pub fn fraction(&self, class: Suitability) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.count(class) as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::GridDimensions;
    use approx::assert_relative_eq;

    fn cell(slope: f32, aspect: f32) -> CellSample {
        CellSample { slope, aspect }
    }

    #[test]
    fn test_classification_precedence() {
        let t = SuitabilityThresholds::default();
        assert_eq!(classify(cell(3.0, 180.0), &t), Suitability::Optimal);
        assert_eq!(classify(cell(3.0, 0.0), &t), Suitability::Suboptimal);
        assert_eq!(classify(cell(10.0, 180.0), &t), Suitability::Unsuitable);
    }

    #[test]
    fn test_thresholds_are_inclusive_and_strict() {
        let t = SuitabilityThresholds::default();
        // Band ends are inclusive
        assert_eq!(classify(cell(0.0, 112.5), &t), Suitability::Optimal);
        assert_eq!(classify(cell(0.0, 247.5), &t), Suitability::Optimal);
        assert_eq!(classify(cell(0.0, 112.4), &t), Suitability::Suboptimal);
        assert_eq!(classify(cell(0.0, 247.6), &t), Suitability::Suboptimal);
        // Slope threshold is strict
        assert_eq!(classify(cell(5.0, 180.0), &t), Suitability::Unsuitable);
        assert_eq!(classify(cell(4.999, 180.0), &t), Suitability::Optimal);
    }

    #[test]
    fn test_legend_descriptions() {
        let entries = legend(&SuitabilityThresholds::default());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].label, "Optimal");
        assert_eq!(entries[0].description, "Low slope (<5°) + South-facing");
        assert_eq!(entries[1].description, "Low slope (<5°) + Other aspects");
        assert_eq!(entries[2].description, "Steep slope (≥5°)");
    }

    #[test]
    fn test_coverage_counts() {
        let dims = GridDimensions::new(2, 2).expect("valid");
        let grid = Grid::from_fields(
            dims,
            vec![3.0, 3.0, 10.0, 1.0],
            vec![180.0, 0.0, 180.0, 200.0],
        )
        .expect("matching fields");
        let coverage = SuitabilityCoverage::of_grid(&grid, &SuitabilityThresholds::default());
        assert_eq!(coverage.optimal, 2);
        assert_eq!(coverage.suboptimal, 1);
        assert_eq!(coverage.unsuitable, 1);
        assert_eq!(coverage.total(), 4);
        assert_relative_eq!(coverage.fraction(Suitability::Optimal), 0.5);
        assert_relative_eq!(SuitabilityCoverage::default().fraction(Suitability::Optimal), 0.0);
    }
}
