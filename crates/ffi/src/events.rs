use terrain_analyzer_core::nalgebra::Point2;
use terrain_analyzer_core::{ContainerRect, EventOutcome, ViewportEvent};

use crate::error::{AnalyzerErrorCode, DefaultAnalyzerError};
use crate::helpers::{into_code, with_analyzer_mut};
use crate::instance::TerrainAnalyzerInstance;

/// What an input event changed.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerEventResult {
    /// Zoom, pan or drag phase changed; re-apply the transform.
    pub view_changed: bool,
    /// Hovered cell changed; refresh the info panel.
    pub hover_changed: bool,
    /// Suppress the host's default action (page scroll on wheel).
    pub prevent_default: bool,
}

impl From<EventOutcome> for AnalyzerEventResult {
    fn from(outcome: EventOutcome) -> Self {
        Self {
            view_changed: outcome.view_changed,
            hover_changed: outcome.hover_changed,
            prevent_default: outcome.prevent_default,
        }
    }
}

/// Route one event and write its outcome to `out_result` when non-null.
unsafe fn dispatch(
    ptr: *const TerrainAnalyzerInstance,
    event: ViewportEvent,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    let result = unsafe {
        with_analyzer_mut(ptr, |analyzer| Ok(AnalyzerEventResult::from(analyzer.handle(event))))
    };
    if let Ok(outcome) = result {
        if !out_result.is_null() {
            unsafe {
                *out_result = outcome;
            }
        }
    }
    into_code(result)
}

/// Update the container rectangle in pointer coordinates.
///
/// Returns
/// - `AnalyzerErrorCode::Ok` (0) on success
/// - `AnalyzerErrorCode::NullPointer` if `ptr` is null
/// - `AnalyzerErrorCode::InvalidParameter` if any value is not finite
///
/// A zero or negative size is accepted; pointers then map to no cell.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`.
#[no_mangle]
pub unsafe extern "C" fn analyzer_set_container(
    ptr: *const TerrainAnalyzerInstance,
    left: f32,
    top: f32,
    width: f32,
    height: f32,
) -> AnalyzerErrorCode {
    into_code(unsafe {
        with_analyzer_mut(ptr, |analyzer| {
            if ![left, top, width, height].iter().all(|v| v.is_finite()) {
                return Err(DefaultAnalyzerError::invalid_parameter(format!(
                    "Container rect must be finite, got ({left}, {top}, {width}, {height})"
                )));
            }
            analyzer.set_container(ContainerRect::new(left, top, width, height));
            Ok(())
        })
    })
}

/// Primary button pressed at `(x, y)`. Starts a drag when zoomed in.
///
/// `out_result` is optional (may be null).
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_pointer_down(
    ptr: *const TerrainAnalyzerInstance,
    x: f32,
    y: f32,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    let event = ViewportEvent::PointerDown {
        position: Point2::new(x, y),
    };
    unsafe { dispatch(ptr, event, out_result) }
}

/// Pointer moved to `(x, y)`. Pans while dragging, otherwise updates the hovered cell.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_pointer_move(
    ptr: *const TerrainAnalyzerInstance,
    x: f32,
    y: f32,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    let event = ViewportEvent::PointerMove {
        position: Point2::new(x, y),
    };
    unsafe { dispatch(ptr, event, out_result) }
}

/// Primary button released. Ends any drag.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_pointer_up(
    ptr: *const TerrainAnalyzerInstance,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    unsafe { dispatch(ptr, ViewportEvent::PointerUp, out_result) }
}

/// Pointer left the container. Ends any drag and clears the hovered cell.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_pointer_leave(
    ptr: *const TerrainAnalyzerInstance,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    unsafe { dispatch(ptr, ViewportEvent::PointerLeave, out_result) }
}

/// Scroll wheel at `(x, y)`. Negative `delta_y` zooms in, positive zooms out.
///
/// Check `out_result->prevent_default` to decide whether to cancel the
/// host's page scroll.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_wheel(
    ptr: *const TerrainAnalyzerInstance,
    x: f32,
    y: f32,
    delta_y: f32,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    let event = ViewportEvent::Wheel {
        position: Point2::new(x, y),
        delta_y,
    };
    unsafe { dispatch(ptr, event, out_result) }
}

/// Zoom-in button.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_zoom_in(
    ptr: *const TerrainAnalyzerInstance,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    unsafe { dispatch(ptr, ViewportEvent::ZoomIn, out_result) }
}

/// Zoom-out button.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_zoom_out(
    ptr: *const TerrainAnalyzerInstance,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    unsafe { dispatch(ptr, ViewportEvent::ZoomOut, out_result) }
}

/// Reset button: back to unit zoom with no pan.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`; `out_result` null or writable.
#[no_mangle]
pub unsafe extern "C" fn analyzer_reset_zoom(
    ptr: *const TerrainAnalyzerInstance,
    out_result: *mut AnalyzerEventResult,
) -> AnalyzerErrorCode {
    unsafe { dispatch(ptr, ViewportEvent::ResetZoom, out_result) }
}

/// Generate a new grid, replacing image and stats and resetting the viewport.
///
/// When `use_seed` is false a random seed is drawn.
///
/// # Safety
/// `ptr` must be a live pointer returned by `analyzer_new`.
#[no_mangle]
pub unsafe extern "C" fn analyzer_regenerate(
    ptr: *const TerrainAnalyzerInstance,
    seed: u64,
    use_seed: bool,
) -> AnalyzerErrorCode {
    into_code(unsafe {
        with_analyzer_mut(ptr, |analyzer| {
            analyzer.regenerate(use_seed.then_some(seed));
            Ok(())
        })
    })
}
