use terrain_analyzer_core::{CompassDirection, CursorHint, TerrainAnalyzer};

use crate::error::{AnalyzerErrorCode, DefaultAnalyzerError};
use crate::helpers::{into_code, track_error, with_analyzer};
use crate::instance::TerrainAnalyzerInstance;

/// Compass label of an aspect, C-compatible.
#[allow(clippy::upper_case_acronyms)]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerDirection {
    N = 0,
    NE = 1,
    E = 2,
    SE = 3,
    S = 4,
    SW = 5,
    W = 6,
    NW = 7,
    Flat = 8,
    NotAvailable = 9,
}

impl From<CompassDirection> for AnalyzerDirection {
    fn from(direction: CompassDirection) -> Self {
        match direction {
            CompassDirection::N => Self::N,
            CompassDirection::NE => Self::NE,
            CompassDirection::E => Self::E,
            CompassDirection::SE => Self::SE,
            CompassDirection::S => Self::S,
            CompassDirection::SW => Self::SW,
            CompassDirection::W => Self::W,
            CompassDirection::NW => Self::NW,
            CompassDirection::Flat => Self::Flat,
            CompassDirection::NotAvailable => Self::NotAvailable,
        }
    }
}

/// Cursor the host should show over the image.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerCursor {
    Crosshair = 0,
    Grab = 1,
    Grabbing = 2,
}

impl From<CursorHint> for AnalyzerCursor {
    fn from(cursor: CursorHint) -> Self {
        match cursor {
            CursorHint::Crosshair => Self::Crosshair,
            CursorHint::Grab => Self::Grab,
            CursorHint::Grabbing => Self::Grabbing,
        }
    }
}

/// The cell under the pointer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerHoveredPixel {
    /// Column.
    pub x: usize,
    /// Row.
    pub y: usize,
    /// Slope (degrees).
    pub slope: f32,
    /// Aspect (degrees clockwise from north).
    pub aspect: f32,
    /// Compass label of `aspect`.
    pub direction: AnalyzerDirection,
}

/// Grid statistics and suitability counts.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerStats {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Seed of the current grid.
    pub seed: u64,
    /// Whether `seed` is meaningful.
    pub has_seed: bool,
    /// Minimum slope (degrees).
    pub min_slope: f32,
    /// Maximum slope (degrees).
    pub max_slope: f32,
    /// Mean slope (degrees).
    pub mean_slope: f64,
    /// Generation time (ms), display only.
    pub elapsed_ms: f64,
    /// Estimated raster memory (MiB), display only.
    pub memory_estimate_mb: f64,
    /// Cells classified optimal.
    pub optimal_cells: usize,
    /// Cells classified suboptimal.
    pub suboptimal_cells: usize,
    /// Cells classified unsuitable.
    pub unsuitable_cells: usize,
}

impl From<&TerrainAnalyzer> for AnalyzerStats {
    fn from(analyzer: &TerrainAnalyzer) -> Self {
        let stats = analyzer.stats();
        let coverage = analyzer.coverage();
        let grid = analyzer.grid();
        Self {
            width: grid.width(),
            height: grid.height(),
            seed: grid.seed().unwrap_or_default(),
            has_seed: grid.seed().is_some(),
            min_slope: stats.min_slope,
            max_slope: stats.max_slope,
            mean_slope: stats.mean_slope,
            elapsed_ms: stats.performance.elapsed_ms(),
            memory_estimate_mb: stats.performance.memory_estimate_mb,
            optimal_cells: coverage.optimal,
            suboptimal_cells: coverage.suboptimal,
            unsuitable_cells: coverage.unsuitable,
        }
    }
}

/// Viewport transform and render hints.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyzerViewport {
    /// Zoom factor.
    pub zoom: f32,
    /// Pan offset (presentation pixels).
    pub pan_x: f32,
    pub pan_y: f32,
    /// Translation to apply after scaling (`pan / zoom`).
    pub translate_x: f32,
    pub translate_y: f32,
    /// Whether a drag is in progress.
    pub dragging: bool,
    /// Cursor to show.
    pub cursor: AnalyzerCursor,
    /// Use nearest-neighbour sampling.
    pub pixelated: bool,
    /// Animate transform changes.
    pub animate: bool,
    /// Zoom readout in percent.
    pub zoom_percent: u32,
    /// Zoom-in control enabled.
    pub can_zoom_in: bool,
    /// Zoom-out control enabled.
    pub can_zoom_out: bool,
}

impl From<&TerrainAnalyzer> for AnalyzerViewport {
    fn from(analyzer: &TerrainAnalyzer) -> Self {
        let state = analyzer.viewport();
        let hints = analyzer.render_hints();
        Self {
            zoom: state.zoom,
            pan_x: state.pan.x,
            pan_y: state.pan.y,
            translate_x: hints.translate.x,
            translate_y: hints.translate.y,
            dragging: state.is_dragging(),
            cursor: hints.cursor.into(),
            pixelated: hints.pixelated,
            animate: hints.animate,
            zoom_percent: hints.zoom_percent,
            can_zoom_in: hints.can_zoom_in,
            can_zoom_out: hints.can_zoom_out,
        }
    }
}

#[no_mangle]
/// Report the image size and the RGBA buffer length in bytes.
///
/// Call this to size the buffer passed to `analyzer_copy_pixels`.
///
/// # Safety
/// `ptr` must be a live instance; all out pointers must be non-null and writable.
pub unsafe extern "C" fn analyzer_get_image_size(
    ptr: *const TerrainAnalyzerInstance,
    out_width: *mut usize,
    out_height: *mut usize,
    out_byte_len: *mut usize,
) -> AnalyzerErrorCode {
    if out_width.is_null() || out_height.is_null() || out_byte_len.is_null() {
        return track_error(&DefaultAnalyzerError::null_pointer(
            "out_width/out_height/out_byte_len",
        ));
    }

    into_code(unsafe {
        with_analyzer(ptr, |analyzer| {
            let image = analyzer.image();
            *out_width = image.width();
            *out_height = image.height();
            *out_byte_len = image.as_bytes().len();
            Ok(())
        })
    })
}

#[no_mangle]
/// Copy the RGBA pixel buffer (row-major, 4 bytes per cell) into `out_buffer`.
///
/// Returns
/// - `AnalyzerErrorCode::Ok` (0) on success
/// - `AnalyzerErrorCode::NullPointer` if `ptr` or `out_buffer` is null
/// - `AnalyzerErrorCode::BufferTooSmall` if `buffer_len` is smaller than the image
///
/// # Safety
/// `out_buffer` must be writable for `buffer_len` bytes.
pub unsafe extern "C" fn analyzer_copy_pixels(
    ptr: *const TerrainAnalyzerInstance,
    out_buffer: *mut u8,
    buffer_len: usize,
) -> AnalyzerErrorCode {
    if out_buffer.is_null() {
        return track_error(&DefaultAnalyzerError::null_pointer("out_buffer"));
    }

    into_code(unsafe {
        with_analyzer(ptr, |analyzer| {
            let pixels = analyzer.pixels();
            if buffer_len < pixels.len() {
                return Err(DefaultAnalyzerError::buffer_too_small(
                    "out_buffer",
                    pixels.len(),
                    buffer_len,
                ));
            }
            // SAFETY: caller guarantees `buffer_len` writable bytes, checked >= pixels.len()
            let dst = std::slice::from_raw_parts_mut(out_buffer, pixels.len());
            dst.copy_from_slice(pixels);
            Ok(())
        })
    })
}

#[no_mangle]
/// Fill `out_pixel` with the hovered cell.
///
/// `out_found` receives whether a cell is hovered; `out_pixel` is left
/// untouched when nothing is hovered.
///
/// # Safety
/// `ptr` must be a live instance; `out_pixel` and `out_found` non-null and writable.
pub unsafe extern "C" fn analyzer_get_hovered(
    ptr: *const TerrainAnalyzerInstance,
    out_pixel: *mut AnalyzerHoveredPixel,
    out_found: *mut bool,
) -> AnalyzerErrorCode {
    if out_pixel.is_null() || out_found.is_null() {
        return track_error(&DefaultAnalyzerError::null_pointer("out_pixel/out_found"));
    }

    into_code(unsafe {
        with_analyzer(ptr, |analyzer| {
            match analyzer.hovered() {
                Some(hovered) => {
                    *out_pixel = AnalyzerHoveredPixel {
                        x: hovered.x,
                        y: hovered.y,
                        slope: hovered.slope,
                        aspect: hovered.aspect,
                        direction: hovered.direction.into(),
                    };
                    *out_found = true;
                }
                None => *out_found = false,
            }
            Ok(())
        })
    })
}

#[no_mangle]
/// Fill `out_stats` with the current grid's statistics.
///
/// # Safety
/// `ptr` must be a live instance; `out_stats` non-null and writable.
pub unsafe extern "C" fn analyzer_get_stats(
    ptr: *const TerrainAnalyzerInstance,
    out_stats: *mut AnalyzerStats,
) -> AnalyzerErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultAnalyzerError::null_pointer("out_stats"));
    }

    into_code(unsafe {
        with_analyzer(ptr, |analyzer| {
            *out_stats = AnalyzerStats::from(analyzer);
            Ok(())
        })
    })
}

#[no_mangle]
/// Fill `out_viewport` with the current transform and render hints.
///
/// # Safety
/// `ptr` must be a live instance; `out_viewport` non-null and writable.
pub unsafe extern "C" fn analyzer_get_viewport(
    ptr: *const TerrainAnalyzerInstance,
    out_viewport: *mut AnalyzerViewport,
) -> AnalyzerErrorCode {
    if out_viewport.is_null() {
        return track_error(&DefaultAnalyzerError::null_pointer("out_viewport"));
    }

    into_code(unsafe {
        with_analyzer(ptr, |analyzer| {
            *out_viewport = AnalyzerViewport::from(analyzer);
            Ok(())
        })
    })
}
