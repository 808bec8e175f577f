//! Synthetic slope/aspect raster generation.
//!
//! Produces a demo field in a single row-major pass:
//!
//! ```text
//! d      = |(col, row) - (width/2, height/2)|
//! slope  = min(max_slope, d / distance_divisor + U[0, slope_noise))
//! aspect = (360 * col / width + U[0, aspect_noise)) mod 360
//! ```
//!
//! Slopes therefore rise away from the center, and aspect sweeps once around
//! the compass from the left edge to the right edge. Min/max/sum of the stored
//! slope values are tracked in the same pass, so the returned statistics are
//! exact aggregates of the field.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::grid::{Grid, GridDimensions};
use super::profiler::ProfilerScope;
use super::stats::{SlopeAccumulator, SummaryStats};
use crate::config::NoiseConfig;

/// A freshly generated grid together with its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedRaster {
    /// The new immutable grid
    pub grid: Grid,
    /// Aggregates computed during generation
    pub stats: SummaryStats,
}

/// Generator for synthetic slope/aspect rasters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterGenerator {
    dims: GridDimensions,
    noise: NoiseConfig,
}

impl RasterGenerator {
    /// Create a generator for the given size and noise parameters
    #[must_use]
    pub fn new(dims: GridDimensions, noise: NoiseConfig) -> Self {
        Self { dims, noise }
    }

    /// Grid dimensions this generator produces
    #[must_use]
    pub fn dimensions(&self) -> GridDimensions {
        self.dims
    }

    /// Generate a raster.
    ///
    /// With `Some(seed)` the output is fully reproducible. With `None` a seed
    /// is drawn from the thread RNG; either way the seed is recorded on the
    /// grid.
    #[must_use]
    pub fn generate(&self, seed: Option<u64>) -> GeneratedRaster {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = StdRng::seed_from_u64(seed);
        self.run(&mut rng, Some(seed))
    }

    /// Generate a raster drawing noise from a caller-supplied random source.
    ///
    /// The grid records no seed since the source state is opaque.
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratedRaster {
        self.run(rng, None)
    }

    fn run<R: Rng + ?Sized>(&self, rng: &mut R, seed: Option<u64>) -> GeneratedRaster {
        let scope = ProfilerScope::new("raster_generate");

        let width = self.dims.width();
        let height = self.dims.height();
        let cells = self.dims.cell_count();
        let noise = self.noise;

        let center_x = width as f32 / 2.0;
        let center_y = height as f32 / 2.0;

        let mut slope = Vec::with_capacity(cells);
        let mut aspect = Vec::with_capacity(cells);
        let mut acc = SlopeAccumulator::default();

        for row in 0..height {
            let dy = row as f32 - center_y;
            for col in 0..width {
                let dx = col as f32 - center_x;
                let distance = (dx * dx + dy * dy).sqrt();

                let s = (distance / noise.distance_divisor + uniform(rng, noise.slope_noise))
                    .clamp(0.0, noise.max_slope);
                let a = wrap_degrees(
                    360.0 * col as f32 / width as f32 + uniform(rng, noise.aspect_noise),
                );

                slope.push(s);
                aspect.push(a);
                acc.push(s);
            }
        }

        let stats = acc.finish(scope.elapsed());
        let grid = Grid::from_parts(self.dims, slope, aspect, seed)
            .expect("fields are sized from the validated dimensions");

        debug!(
            width,
            height,
            seed = ?seed,
            elapsed_ms = stats.performance.elapsed_ms(),
            mean_slope = stats.mean_slope,
            "Generated terrain raster"
        );

        GeneratedRaster { grid, stats }
    }
}

/// Generate a raster with the default noise parameters.
///
/// # Example
///
/// ```
/// use terrain_analyzer_core::raster::{generate, GridDimensions};
///
/// let dims = GridDimensions::new(200, 100).unwrap();
/// let a = generate(dims, Some(7));
/// let b = generate(dims, Some(7));
/// assert_eq!(a.grid, b.grid);
/// assert!(a.grid.slope().iter().all(|s| (0.0..=45.0).contains(s)));
/// ```
#[must_use]
pub fn generate(dims: GridDimensions, seed: Option<u64>) -> GeneratedRaster {
    RasterGenerator::new(dims, NoiseConfig::default()).generate(seed)
}

/// Uniform sample in `[0, bound)`, zero for an empty range
#[inline]
fn uniform<R: Rng + ?Sized>(rng: &mut R, bound: f32) -> f32 {
    if bound > 0.0 {
        rng.random::<f32>() * bound
    } else {
        0.0
    }
}

/// Wrap a non-negative angle into `[0, 360)`
#[inline]
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for values just below a multiple
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn dims(width: usize, height: usize) -> GridDimensions {
        GridDimensions::new(width, height).expect("valid dimensions")
    }

    #[test]
    fn test_ranges_hold_for_default_grid() {
        let raster = generate(GridDimensions::default(), Some(42));
        assert_eq!(raster.grid.slope().len(), 20_000);
        for (&s, &a) in raster.grid.slope().iter().zip(raster.grid.aspect()) {
            assert!((0.0..=45.0).contains(&s), "slope out of range: {s}");
            assert!((0.0..360.0).contains(&a), "aspect out of range: {a}");
        }
    }

    #[test]
    fn test_stats_are_exact() {
        let raster = generate(dims(64, 32), Some(3));
        let slopes = raster.grid.slope();

        let min = slopes.iter().copied().fold(f32::INFINITY, f32::min);
        let max = slopes.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let mean = slopes.iter().map(|&s| f64::from(s)).sum::<f64>() / slopes.len() as f64;

        assert_eq!(raster.stats.min_slope, min);
        assert_eq!(raster.stats.max_slope, max);
        assert_eq!(raster.stats.mean_slope, mean);
    }

    #[test]
    fn test_same_seed_same_grid() {
        let a = generate(dims(50, 25), Some(1234));
        let b = generate(dims(50, 25), Some(1234));
        let c = generate(dims(50, 25), Some(4321));
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.grid.seed(), Some(1234));
        assert_ne!(a.grid.slope(), c.grid.slope());
    }

    #[test]
    fn test_unseeded_generation_records_seed() {
        let raster = generate(dims(8, 8), None);
        let seed = raster.grid.seed().expect("seed recorded");
        let replay = generate(dims(8, 8), Some(seed));
        assert_eq!(raster.grid, replay.grid);
    }

    #[test]
    fn test_injected_rng_is_deterministic() {
        let generator = RasterGenerator::new(dims(16, 16), NoiseConfig::default());
        let a = generator.generate_with_rng(&mut StdRng::seed_from_u64(9));
        let b = generator.generate_with_rng(&mut StdRng::seed_from_u64(9));
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.grid.seed(), None);
    }

    #[test]
    fn test_noise_free_field_is_geometric() {
        let noise = NoiseConfig {
            slope_noise: 0.0,
            aspect_noise: 0.0,
            ..NoiseConfig::default()
        };
        let raster = RasterGenerator::new(dims(200, 100), noise).generate(Some(0));
        let grid = &raster.grid;

        // Center cell has zero distance, hence zero slope
        let center = grid.sample(100, 50).expect("in bounds");
        assert_eq!(center.slope, 0.0);
        // Aspect sweeps with the column: col 50 of 200 is a quarter turn
        assert_relative_eq!(center.aspect, 180.0);
        assert_relative_eq!(grid.sample(50, 0).expect("in bounds").aspect, 90.0);
        // Corner: distance sqrt(100^2 + 50^2) / 5 ≈ 22.36
        let corner = grid.sample(0, 0).expect("in bounds");
        assert_relative_eq!(corner.slope, (100.0_f32.hypot(50.0)) / 5.0, epsilon = 1e-4);
        assert_eq!(raster.stats.min_slope, 0.0);
    }

    #[test]
    fn test_slope_is_clamped() {
        let noise = NoiseConfig {
            distance_divisor: 0.01,
            ..NoiseConfig::default()
        };
        let raster = RasterGenerator::new(dims(20, 20), noise).generate(Some(5));
        assert_eq!(raster.stats.max_slope, 45.0);
        assert!(raster.grid.slope().iter().all(|&s| s <= 45.0));
    }

    #[test]
    fn test_single_cell_grid() {
        let raster = generate(dims(1, 1), Some(11));
        assert_eq!(raster.grid.slope().len(), 1);
        assert_eq!(raster.stats.min_slope, raster.stats.max_slope);
    }

    #[test]
    fn test_wrap_degrees() {
        assert_eq!(wrap_degrees(0.0), 0.0);
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_relative_eq!(wrap_degrees(389.5), 29.5);
        assert!(wrap_degrees(359.999_97) < 360.0);
    }
}
