//! Slope summary statistics and display-only performance metrics

use std::time::Duration;

use serde::Serialize;

/// Bytes per cell: two `f32` fields plus one RGBA pixel
const BYTES_PER_CELL: usize = 2 * std::mem::size_of::<f32>() + 4;

/// Performance figures shown next to the raster.
///
/// Informational only; nothing in the analyzer branches on these.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceMetrics {
    /// Wall-clock time of the generation pass
    pub elapsed: Duration,
    /// Estimated size of the slope/aspect fields plus the RGBA buffer, in MiB
    pub memory_estimate_mb: f64,
}

impl PerformanceMetrics {
    /// Metrics for a raster of `cells` cells generated in `elapsed`
    #[must_use]
    pub fn for_cells(cells: usize, elapsed: Duration) -> Self {
        let bytes = cells.saturating_mul(BYTES_PER_CELL);
        Self {
            elapsed,
            memory_estimate_mb: bytes as f64 / (1024.0 * 1024.0),
        }
    }

    /// Elapsed time in milliseconds
    #[must_use]
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Aggregate slope figures for one grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryStats {
    /// Smallest slope in the grid (degrees)
    pub min_slope: f32,
    /// Largest slope in the grid (degrees)
    pub max_slope: f32,
    /// Arithmetic mean over every cell (degrees)
    pub mean_slope: f64,
    /// Display-only timing and memory figures
    pub performance: PerformanceMetrics,
}

impl SummaryStats {
    /// Compute stats over an existing slope field.
    ///
    /// Accumulates in index order, so the result matches what the generator
    /// tracks incrementally for the same values.
    #[must_use]
    pub fn from_slopes(slopes: &[f32], elapsed: Duration) -> Self {
        let mut acc = SlopeAccumulator::default();
        for &slope in slopes {
            acc.push(slope);
        }
        acc.finish(elapsed)
    }
}

/// Running min/max/sum tracked while a field is produced
#[derive(Debug, Clone, Copy)]
pub(crate) struct SlopeAccumulator {
    min: f32,
    max: f32,
    sum: f64,
    count: usize,
}

impl Default for SlopeAccumulator {
    fn default() -> Self {
        Self {
            min: f32::INFINITY,
            max: f32::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }
}

impl SlopeAccumulator {
    #[inline]
    pub(crate) fn push(&mut self, slope: f32) {
        self.min = self.min.min(slope);
        self.max = self.max.max(slope);
        self.sum += f64::from(slope);
        self.count += 1;
    }

    pub(crate) fn finish(self, elapsed: Duration) -> SummaryStats {
        // Empty fields never come out of a validated grid; report zeros instead of inf/NaN
        if self.count == 0 {
            return SummaryStats {
                min_slope: 0.0,
                max_slope: 0.0,
                mean_slope: 0.0,
                performance: PerformanceMetrics::for_cells(0, elapsed),
            };
        }
        SummaryStats {
            min_slope: self.min,
            max_slope: self.max,
            mean_slope: self.sum / self.count as f64,
            performance: PerformanceMetrics::for_cells(self.count, elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_stats_from_slopes() {
        let stats = SummaryStats::from_slopes(&[3.0, 1.0, 4.0, 1.5], Duration::ZERO);
        assert_eq!(stats.min_slope, 1.0);
        assert_eq!(stats.max_slope, 4.0);
        assert_relative_eq!(stats.mean_slope, 2.375);
    }

    #[test]
    fn test_empty_stats_are_zero() {
        let stats = SummaryStats::from_slopes(&[], Duration::ZERO);
        assert_eq!(stats.min_slope, 0.0);
        assert_eq!(stats.max_slope, 0.0);
        assert_eq!(stats.mean_slope, 0.0);
    }

    #[test]
    fn test_memory_estimate() {
        // 200x100 cells * 12 bytes = 240_000 bytes
        let metrics = PerformanceMetrics::for_cells(200 * 100, Duration::from_millis(23));
        assert_relative_eq!(metrics.memory_estimate_mb, 240_000.0 / 1_048_576.0);
        assert_relative_eq!(metrics.elapsed_ms(), 23.0);
    }
}
