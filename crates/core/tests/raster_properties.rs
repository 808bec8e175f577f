//! Property tests for raster generation and colorizing.
//!
//! Verifies:
//! 1. Every generated cell has slope in [0, 45] and aspect in [0, 360)
//! 2. Summary stats are exact aggregates of the stored slope field
//! 3. The same seed always reproduces the same grid and image
//! 4. Every aspect the generator emits gets a principal compass label
//! 5. Image pixels agree with per-cell classification

mod common;

use proptest::prelude::*;
use terrain_analyzer_core::classify::{colorize, Colorizer};
use terrain_analyzer_core::{
    classify, direction, generate, CompassDirection, GridDimensions, Suitability,
    SuitabilityThresholds,
};

fn arb_dims() -> impl Strategy<Value = GridDimensions> {
    (1usize..=64, 1usize..=64)
        .prop_map(|(w, h)| GridDimensions::new(w, h).expect("non-zero dimensions"))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn generated_values_stay_in_range(dims in arb_dims(), seed in any::<u64>()) {
        let raster = generate(dims, Some(seed));
        for sample in raster.grid.samples() {
            prop_assert!((0.0..=45.0).contains(&sample.slope), "slope {}", sample.slope);
            prop_assert!((0.0..360.0).contains(&sample.aspect), "aspect {}", sample.aspect);
        }
    }

    #[test]
    fn stats_are_exact(dims in arb_dims(), seed in any::<u64>()) {
        let raster = generate(dims, Some(seed));
        let slope = raster.grid.slope();

        let min = slope.iter().copied().fold(f32::INFINITY, f32::min);
        let max = slope.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let mean = slope.iter().map(|&s| f64::from(s)).sum::<f64>() / slope.len() as f64;

        prop_assert_eq!(raster.stats.min_slope, min);
        prop_assert_eq!(raster.stats.max_slope, max);
        prop_assert!((raster.stats.mean_slope - mean).abs() <= 1e-9 * mean.abs().max(1.0));
    }

    #[test]
    fn same_seed_same_grid(seed in any::<u64>()) {
        let dims = GridDimensions::new(40, 20).expect("valid");
        let a = generate(dims, Some(seed));
        let b = generate(dims, Some(seed));
        prop_assert_eq!(&a.grid, &b.grid);
        prop_assert_eq!(colorize(&a.grid), colorize(&b.grid));
    }

    #[test]
    fn generated_aspects_have_principal_direction(seed in any::<u64>()) {
        let raster = generate(GridDimensions::new(50, 25).expect("valid"), Some(seed));
        for sample in raster.grid.samples() {
            let dir = direction(sample.aspect);
            prop_assert!(
                CompassDirection::PRINCIPAL.contains(&dir),
                "{} -> {}",
                sample.aspect,
                dir
            );
        }
    }

    #[test]
    fn direction_never_not_available_in_circle(degrees in 0.0f32..360.0) {
        prop_assert_ne!(direction(degrees), CompassDirection::NotAvailable);
    }
}

#[test]
fn pixels_agree_with_classification() {
    let raster = generate(GridDimensions::default(), Some(2024));
    let thresholds = SuitabilityThresholds::default();
    let image = Colorizer::default().colorize(&raster.grid);

    for y in 0..raster.grid.height() {
        for x in 0..raster.grid.width() {
            let sample = raster.grid.sample(x, y).expect("in grid");
            let [r, g, b, a] = image.pixel(x, y).expect("in image");
            assert_eq!(a, 255);
            match classify(sample, &thresholds) {
                Suitability::Unsuitable => assert!(r == g && g == b, "gray at ({x}, {y})"),
                Suitability::Optimal => assert!(g >= 100 && g > r, "green at ({x}, {y})"),
                Suitability::Suboptimal => assert!(r >= 100 && g >= 100, "yellow at ({x}, {y})"),
            }
        }
    }
}

#[test]
fn default_grid_has_gentle_center_and_steep_rim() {
    let raster = generate(GridDimensions::default(), Some(7));
    let thresholds = SuitabilityThresholds::default();
    let classes: Vec<Suitability> = raster
        .grid
        .samples()
        .map(|sample| classify(sample, &thresholds))
        .collect();
    assert!(classes.contains(&Suitability::Optimal));
    assert!(classes.contains(&Suitability::Unsuitable));

    // Corners sit ~111.8 cells from the center: base slope ~22.4 plus noise
    for (x, y) in [(0, 0), (199, 0), (0, 99), (199, 99)] {
        let slope = raster.grid.sample(x, y).expect("corner").slope;
        assert!((22.0..33.0).contains(&slope), "corner ({x}, {y}) slope {slope}");
    }
}
