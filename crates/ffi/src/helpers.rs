use std::ffi::CString;

use terrain_analyzer_core::TerrainAnalyzer;
use tracing::warn;

use crate::error::{with_last_error_mut, AnalyzerErrorCode, DefaultAnalyzerError, FfiError};
use crate::instance::TerrainAnalyzerInstance;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record `error` in thread-local storage and return its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> AnalyzerErrorCode {
    set_last_error(error);
    error.code()
}

/// Record the error of a failed result, or clear the last error on success.
#[inline]
pub(crate) fn track_result<T, E>(result: Result<T, E>) -> Result<T, AnalyzerErrorCode>
where
    E: FfiError,
{
    match result {
        Ok(value) => {
            clear_last_error();
            Ok(value)
        }
        Err(error) => Err(track_error(&error)),
    }
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = AnalyzerErrorCode::Ok;
    });
}

/// Borrow an instance from a raw pointer handed back by C.
///
/// # Safety
/// `ptr` must be null or a pointer returned by `analyzer_new` that has not
/// been destroyed.
pub(crate) unsafe fn instance_from_ptr<'a>(
    ptr: *const TerrainAnalyzerInstance,
) -> Result<&'a TerrainAnalyzerInstance, DefaultAnalyzerError> {
    // SAFETY: non-null pointers come from Box::into_raw in analyzer_new
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultAnalyzerError::null_pointer("ptr"))
}

/// Run `f` with shared access to the session, tracking any error.
///
/// # Safety
/// See [`instance_from_ptr`].
pub(crate) unsafe fn with_analyzer<F, T>(
    ptr: *const TerrainAnalyzerInstance,
    f: F,
) -> Result<T, AnalyzerErrorCode>
where
    F: FnOnce(&TerrainAnalyzer) -> Result<T, DefaultAnalyzerError>,
{
    let result = unsafe { instance_from_ptr(ptr) }.and_then(|instance| {
        let analyzer = instance.analyzer.read().map_err(|_| {
            warn!("Analyzer lock poisoned on read");
            DefaultAnalyzerError::lock_poisoned("RwLock")
        })?;
        f(&analyzer)
    });
    track_result(result)
}

/// Run `f` with exclusive access to the session, tracking any error.
///
/// # Safety
/// See [`instance_from_ptr`].
pub(crate) unsafe fn with_analyzer_mut<F, T>(
    ptr: *const TerrainAnalyzerInstance,
    f: F,
) -> Result<T, AnalyzerErrorCode>
where
    F: FnOnce(&mut TerrainAnalyzer) -> Result<T, DefaultAnalyzerError>,
{
    let result = unsafe { instance_from_ptr(ptr) }.and_then(|instance| {
        let mut analyzer = instance.analyzer.write().map_err(|_| {
            warn!("Analyzer lock poisoned on write");
            DefaultAnalyzerError::lock_poisoned("RwLock")
        })?;
        f(&mut analyzer)
    });
    track_result(result)
}

/// Collapse a tracked result into the code returned over FFI.
#[inline]
pub(crate) fn into_code<T>(result: Result<T, AnalyzerErrorCode>) -> AnalyzerErrorCode {
    match result {
        Ok(_) => AnalyzerErrorCode::Ok,
        Err(code) => code,
    }
}
