//! Suitability classification, compass labels and false-color rendering.

mod colorize;
mod compass;
mod suitability;

pub use colorize::{colorize, Colorizer, RgbaImage, CHANNELS};
pub use compass::{direction, reference_card, CompassDirection, CompassReference};
pub use suitability::{classify, legend, LegendEntry, Suitability, SuitabilityCoverage};
