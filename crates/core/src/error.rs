//! Construction errors for the terrain analyzer.
//!
//! Everything that happens after construction (pointer events, zoom requests,
//! out-of-range lookups) is sanitized by clamping and never errors. The only
//! failures are precondition violations when building a grid or a session.

/// Errors that can occur when constructing grids or analyzer sessions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerError {
    /// Grid width/height is zero or the cell count overflows `usize`
    InvalidDimensions {
        /// Requested width in cells
        width: usize,
        /// Requested height in cells
        height: usize,
        /// Which constraint failed
        reason: &'static str,
    },
    /// A configuration value is out of its allowed range
    InvalidConfig {
        /// Dotted path of the offending field (e.g. `zoom.step`)
        field: &'static str,
        /// Description of the constraint
        message: String,
    },
}

impl AnalyzerError {
    pub(crate) fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalyzerError::InvalidDimensions {
                width,
                height,
                reason,
            } => write!(f, "Invalid grid dimensions {width}x{height}: {reason}"),
            AnalyzerError::InvalidConfig { field, message } => {
                write!(f, "Invalid config value '{field}': {message}")
            }
        }
    }
}

impl std::error::Error for AnalyzerError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AnalyzerError::InvalidDimensions {
            width: 0,
            height: 100,
            reason: "width must be positive",
        };
        assert_eq!(
            err.to_string(),
            "Invalid grid dimensions 0x100: width must be positive"
        );

        let err = AnalyzerError::invalid_config("zoom.step", "must be positive, got 0");
        assert_eq!(
            err.to_string(),
            "Invalid config value 'zoom.step': must be positive, got 0"
        );
    }
}
