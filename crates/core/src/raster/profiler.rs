//! Timing helpers for the generation and colorize passes.
//!
//! Provides an RAII-style scope that logs its elapsed time at `trace` level
//! when dropped.

use std::time::{Duration, Instant};

/// A profiling scope that measures elapsed time using RAII.
///
/// Time is logged automatically when dropped.
pub struct ProfilerScope {
    start: Instant,
    name: &'static str,
}

impl ProfilerScope {
    /// Creates a new profiling scope.
    pub fn new(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    /// Time since the scope was opened.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Gets elapsed time in milliseconds.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ProfilerScope {
    fn drop(&mut self) {
        tracing::trace!(scope = self.name, elapsed_ms = self.elapsed_ms(), "scope closed");
    }
}
