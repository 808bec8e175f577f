//! The analyzer session: one grid, its image and stats, and the viewport
//! that inspects it.

use tracing::{debug, info};

use crate::classify::{legend, Colorizer, LegendEntry, RgbaImage, SuitabilityCoverage};
use crate::config::AnalyzerConfig;
use crate::error::AnalyzerError;
use crate::raster::{Grid, RasterGenerator, SummaryStats};
use crate::viewport::{
    ContainerRect, EventOutcome, HoveredPixel, PixelInfo, RenderHints, ViewportController,
    ViewportEvent, ViewportState,
};

/// Interactive terrain analyzer session.
///
/// Holds the current grid, its colorized image and statistics, and the
/// viewport. Every operation runs synchronously; regeneration replaces grid,
/// image and stats together and resets the viewport.
#[derive(Debug, Clone)]
pub struct TerrainAnalyzer {
    config: AnalyzerConfig,
    generator: RasterGenerator,
    colorizer: Colorizer,
    grid: Grid,
    image: RgbaImage,
    stats: SummaryStats,
    coverage: SuitabilityCoverage,
    viewport: ViewportController,
}

impl TerrainAnalyzer {
    /// Create a session and generate the first grid.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails [`AnalyzerConfig::validate`].
    pub fn new(config: AnalyzerConfig, seed: Option<u64>) -> Result<Self, AnalyzerError> {
        config.validate()?;
        let dims = config.dimensions()?;

        let generator = RasterGenerator::new(dims, config.noise);
        let colorizer = Colorizer::new(config.suitability, config.noise.max_slope);
        let raster = generator.generate(seed);
        let image = colorizer.colorize(&raster.grid);
        let coverage = SuitabilityCoverage::of_grid(&raster.grid, colorizer.thresholds());

        info!(
            width = dims.width(),
            height = dims.height(),
            seed = raster.grid.seed(),
            "Terrain analyzer created"
        );

        Ok(Self {
            config,
            generator,
            colorizer,
            grid: raster.grid,
            image,
            stats: raster.stats,
            coverage,
            viewport: ViewportController::new(config.zoom),
        })
    }

    /// Replace the grid with a freshly generated one and reset the viewport
    pub fn regenerate(&mut self, seed: Option<u64>) {
        let raster = self.generator.generate(seed);
        let image = self.colorizer.colorize(&raster.grid);
        let coverage = SuitabilityCoverage::of_grid(&raster.grid, self.colorizer.thresholds());

        self.grid = raster.grid;
        self.stats = raster.stats;
        self.image = image;
        self.coverage = coverage;
        self.viewport.reset();

        debug!(
            seed = self.grid.seed(),
            elapsed_ms = self.stats.performance.elapsed_ms(),
            "Regenerated terrain"
        );
    }

    /// Update the container rectangle
    pub fn set_container(&mut self, container: ContainerRect) {
        self.viewport.set_container(container);
    }

    /// Route one input event through the viewport
    pub fn handle(&mut self, event: ViewportEvent) -> EventOutcome {
        self.viewport.handle(event, &self.grid)
    }

    /// Session configuration
    #[must_use]
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Current grid
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Colorized image of the current grid
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA bytes of the current image
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.image.as_bytes()
    }

    /// Stats of the current grid
    #[must_use]
    pub fn stats(&self) -> &SummaryStats {
        &self.stats
    }

    /// Class counts of the current grid
    #[must_use]
    pub fn coverage(&self) -> &SuitabilityCoverage {
        &self.coverage
    }

    /// Legend rows for the configured thresholds
    #[must_use]
    pub fn legend(&self) -> Vec<LegendEntry> {
        legend(self.colorizer.thresholds())
    }

    /// Zoom/pan/drag state
    #[must_use]
    pub fn viewport(&self) -> &ViewportState {
        self.viewport.state()
    }

    /// Current container rectangle
    #[must_use]
    pub fn container(&self) -> &ContainerRect {
        self.viewport.container()
    }

    /// Cell under the pointer
    #[must_use]
    pub fn hovered(&self) -> Option<&HoveredPixel> {
        self.viewport.hovered()
    }

    /// Formatted readout of the hovered cell
    #[must_use]
    pub fn pixel_info(&self) -> Option<PixelInfo> {
        self.viewport.hovered().map(HoveredPixel::info)
    }

    /// Render hints for the host
    #[must_use]
    pub fn render_hints(&self) -> RenderHints {
        self.viewport.render_hints()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn test_new_generates_consistent_session() {
        let analyzer = TerrainAnalyzer::new(AnalyzerConfig::default(), Some(5)).expect("valid");
        assert_eq!(analyzer.grid().seed(), Some(5));
        assert_eq!(analyzer.pixels().len(), 200 * 100 * 4);
        assert_eq!(analyzer.coverage().total(), 200 * 100);
        assert_eq!(analyzer.legend().len(), 3);
        assert!(analyzer.hovered().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = TerrainAnalyzer::new(AnalyzerConfig::with_grid(10, 0), None).unwrap_err();
        assert!(matches!(err, AnalyzerError::InvalidDimensions { height: 0, .. }));
    }

    #[test]
    fn test_regenerate_resets_viewport_and_hover() {
        let mut analyzer =
            TerrainAnalyzer::new(AnalyzerConfig::default(), Some(1)).expect("valid");
        analyzer.set_container(ContainerRect::new(0.0, 0.0, 400.0, 200.0));
        analyzer.handle(ViewportEvent::ZoomIn);
        analyzer.handle(ViewportEvent::PointerMove {
            position: Point2::new(20.0, 20.0),
        });
        assert!(analyzer.hovered().is_some());
        assert!(analyzer.pixel_info().is_some());

        analyzer.regenerate(Some(2));
        assert_eq!(analyzer.grid().seed(), Some(2));
        assert_eq!(*analyzer.viewport(), ViewportState::default());
        assert!(analyzer.hovered().is_none());
        // Container survives regeneration
        assert_eq!(analyzer.container().size.x, 400.0);
    }

    #[test]
    fn test_same_seed_same_image() {
        let a = TerrainAnalyzer::new(AnalyzerConfig::default(), Some(9)).expect("valid");
        let mut b = TerrainAnalyzer::new(AnalyzerConfig::default(), Some(10)).expect("valid");
        b.regenerate(Some(9));
        assert_eq!(a.grid(), b.grid());
        assert_eq!(a.pixels(), b.pixels());
        assert_eq!(a.stats().mean_slope, b.stats().mean_slope);
    }
}
