use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::sync::RwLock;

use terrain_analyzer_core::{AnalyzerConfig, AnalyzerError, TerrainAnalyzer};

use tracing::debug;

use crate::error::{AnalyzerErrorCode, DefaultAnalyzerError};
use crate::helpers::{track_error, track_result};

/// An analyzer session owned by the host.
///
/// # Thread Safety
/// The session is protected by an `RwLock`:
/// - **Multiple concurrent readers** (pixels, hover, stats, viewport): `.read()` lock
/// - **Exclusive writer** (events, regeneration): `.write()` lock
///
/// A typical host feeds pointer events from its UI thread and may copy the
/// pixel buffer from a render thread.
///
/// # Usage
/// ```cpp
/// TerrainAnalyzerInstance* analyzer = nullptr;
/// if (analyzer_new(200, 100, 42, true, &analyzer) != AnalyzerErrorCode::Ok) {
///     return;
/// }
/// analyzer_set_container(analyzer, rect.x, rect.y, rect.w, rect.h);
///
/// // Mouse move handler
/// AnalyzerEventResult result;
/// analyzer_pointer_move(analyzer, event.x, event.y, &result);
/// if (result.hover_changed) { refresh_info_panel(); }
///
/// analyzer_destroy(analyzer);
/// ```
pub struct TerrainAnalyzerInstance {
    pub(crate) analyzer: RwLock<TerrainAnalyzer>,
}

impl TerrainAnalyzerInstance {
    /// Create an instance from a configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions`/`InvalidConfig` when the configuration is rejected.
    pub(crate) fn new(
        config: AnalyzerConfig,
        seed: Option<u64>,
    ) -> Result<Box<Self>, DefaultAnalyzerError> {
        let analyzer = TerrainAnalyzer::new(config, seed)?;
        Ok(Box::new(Self {
            analyzer: RwLock::new(analyzer),
        }))
    }
}

fn seed_arg(seed: u64, use_seed: bool) -> Option<u64> {
    use_seed.then_some(seed)
}

/// Write a freshly created instance (or null on failure) to `out_instance`.
unsafe fn emit_instance(
    result: Result<Box<TerrainAnalyzerInstance>, DefaultAnalyzerError>,
    out_instance: *mut *mut TerrainAnalyzerInstance,
) -> AnalyzerErrorCode {
    match track_result(result) {
        Ok(instance) => {
            unsafe {
                *out_instance = Box::into_raw(instance);
            }
            AnalyzerErrorCode::Ok
        }
        Err(code) => {
            unsafe {
                // Set to null on error (per documentation contract)
                *out_instance = ptr::null_mut();
            }
            code
        }
    }
}

/// Create a new analyzer with default settings and the given grid size.
///
/// Parameters
/// - `grid_width`, `grid_height`: grid size in cells, both non-zero
/// - `seed`, `use_seed`: when `use_seed` is false a random seed is drawn
/// - `out_instance`: receives the instance on success, null on failure
///
/// Returns
/// - `AnalyzerErrorCode::Ok` (0) - success
/// - `AnalyzerErrorCode::NullPointer` - `out_instance` is null
/// - `AnalyzerErrorCode::InvalidDimensions` - a dimension is zero or the cell count overflows
///
/// # Safety
///
/// - `out_instance` must be a valid, non-null pointer to writable memory.
/// - The caller owns the instance and MUST call `analyzer_destroy` exactly once.
#[no_mangle]
pub unsafe extern "C" fn analyzer_new(
    grid_width: usize,
    grid_height: usize,
    seed: u64,
    use_seed: bool,
    out_instance: *mut *mut TerrainAnalyzerInstance,
) -> AnalyzerErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultAnalyzerError::null_pointer("out_instance"));
    }

    let config = AnalyzerConfig::with_grid(grid_width, grid_height);
    unsafe {
        emit_instance(
            TerrainAnalyzerInstance::new(config, seed_arg(seed, use_seed)),
            out_instance,
        )
    }
}

/// Create a new analyzer from a JSON configuration.
///
/// Missing fields take their defaults, so `"{}"` is the default configuration.
///
/// Returns
/// - `AnalyzerErrorCode::Ok` (0) - success
/// - `AnalyzerErrorCode::NullPointer` - `config_json` or `out_instance` is null
/// - `AnalyzerErrorCode::InvalidConfig` - the JSON is malformed, not UTF-8 or out of range
/// - `AnalyzerErrorCode::InvalidDimensions` - grid size is zero or overflows
///
/// # Safety
///
/// - `config_json` must point to a null-terminated string.
/// - `out_instance` must be a valid, non-null pointer to writable memory.
#[no_mangle]
pub unsafe extern "C" fn analyzer_new_with_config(
    config_json: *const c_char,
    seed: u64,
    use_seed: bool,
    out_instance: *mut *mut TerrainAnalyzerInstance,
) -> AnalyzerErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultAnalyzerError::null_pointer("out_instance"));
    }
    if config_json.is_null() {
        unsafe {
            *out_instance = ptr::null_mut();
        }
        return track_error(&DefaultAnalyzerError::null_pointer("config_json"));
    }

    let config = unsafe { CStr::from_ptr(config_json) }
        .to_str()
        .map_err(|e| format!("config is not valid UTF-8: {e}"))
        .and_then(|text| {
            serde_json::from_str::<AnalyzerConfig>(text)
                .map_err(|e| format!("config is not valid JSON: {e}"))
        });

    let result = match config {
        Ok(config) => TerrainAnalyzerInstance::new(config, seed_arg(seed, use_seed)),
        Err(message) => Err(AnalyzerError::InvalidConfig {
            field: "config_json",
            message,
        }
        .into()),
    };
    unsafe { emit_instance(result, out_instance) }
}

/// Destroy an instance previously created by `analyzer_new`.
///
/// Null is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `analyzer_new`/`analyzer_new_with_config`.
/// - The pointer MUST NOT be used again after this call.
#[no_mangle]
pub unsafe extern "C" fn analyzer_destroy(ptr: *mut TerrainAnalyzerInstance) {
    if ptr.is_null() {
        return;
    }

    debug!("Destroying terrain analyzer instance");
    // SAFETY: created by Box::into_raw in analyzer_new and not freed yet
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
