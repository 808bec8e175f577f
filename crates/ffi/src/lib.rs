//! C ABI for the terrain analyzer.
//!
//! A host UI creates a session with `analyzer_new`, forwards pointer, wheel
//! and zoom-button events, and reads back the RGBA image, hovered cell,
//! statistics and viewport transform. Every function returns an
//! [`AnalyzerErrorCode`]; details of the last failure on the calling thread
//! are available from `analyzer_get_last_error`.
//!
//! The C header `TerrainAnalyzerFFI.h` is generated by `cbindgen` at build time.

mod error;
mod events;
mod helpers;
mod instance;
mod queries;

pub use error::{analyzer_get_last_error, analyzer_get_last_error_code, AnalyzerErrorCode};
pub use events::*;
pub use instance::*;
pub use queries::*;
