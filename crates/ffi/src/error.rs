use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

use terrain_analyzer_core::AnalyzerError;

/// Common interface for FFI error types.
///
/// - `code()` - the error code passed across the FFI boundary
/// - `msg()` - the message stored for `analyzer_get_last_error`
pub(crate) trait FfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> AnalyzerErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FfiError` for the analyzer bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultAnalyzerError {
    code: AnalyzerErrorCode,
    msg: String,
}

impl DefaultAnalyzerError {
    /// Null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: AnalyzerErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Lock poisoned by a panic on another thread.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: AnalyzerErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Caller-provided buffer cannot hold the result.
    pub fn buffer_too_small(param_name: &str, required: usize, provided: usize) -> Self {
        Self {
            code: AnalyzerErrorCode::BufferTooSmall,
            msg: format!("Buffer '{param_name}' holds {provided} bytes, {required} required"),
        }
    }

    /// Invalid parameter passed to function.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: AnalyzerErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl From<AnalyzerError> for DefaultAnalyzerError {
    fn from(error: AnalyzerError) -> Self {
        let code = match error {
            AnalyzerError::InvalidDimensions { .. } => AnalyzerErrorCode::InvalidDimensions,
            AnalyzerError::InvalidConfig { .. } => AnalyzerErrorCode::InvalidConfig,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

impl FfiError for DefaultAnalyzerError {
    fn code(&self) -> AnalyzerErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by analyzer functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalyzerErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Grid width or height is zero, or the cell count overflows.
    InvalidDimensions = 3,

    /// A configuration value is out of range or the configuration could not be parsed.
    InvalidConfig = 4,

    /// Invalid parameter passed to function.
    InvalidParameter = 5,

    /// Output buffer is too small for the requested data.
    BufferTooSmall = 6,
}

impl From<DefaultAnalyzerError> for AnalyzerErrorCode {
    fn from(error: DefaultAnalyzerError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    /// The CString is owned here so the pointer handed to C stays valid.
    static LAST_ERROR: RefCell<(Option<CString>, AnalyzerErrorCode)> =
        const { RefCell::new((None, AnalyzerErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, AnalyzerErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, AnalyzerErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns a borrowed pointer to the message, or null if the last call on
/// this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread that
/// sets or clears the error. **DO NOT FREE THIS POINTER**.
///
/// Example:
/// ```cpp
/// TerrainAnalyzerInstance* analyzer = nullptr;
/// AnalyzerErrorCode err = analyzer_new(0, 100, 0, false, &analyzer);
/// if (err != AnalyzerErrorCode::Ok) {
///     printf("Analyzer creation failed: %s\n", analyzer_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn analyzer_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code on this thread (`Ok` after a success).
#[no_mangle]
pub extern "C" fn analyzer_get_last_error_code() -> AnalyzerErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err: DefaultAnalyzerError = AnalyzerError::InvalidDimensions {
            width: 0,
            height: 1,
            reason: "width must be positive",
        }
        .into();
        assert_eq!(err.code(), AnalyzerErrorCode::InvalidDimensions);
        assert!(err.msg().contains("0x1"));

        let err = DefaultAnalyzerError::null_pointer("ptr");
        assert_eq!(err.code(), AnalyzerErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'ptr' cannot be null");
    }
}
