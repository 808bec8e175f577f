//! Viewport: zoom/pan state machine, pointer→grid mapping, hover tracking
//! and render hints.

mod controller;
mod event;
mod hover;
mod render;
mod state;
mod transform;

pub use controller::{EventOutcome, ViewportController};
pub use event::ViewportEvent;
pub use hover::{HoveredPixel, PixelInfo};
pub use render::{CursorHint, RenderHints, PIXELATED_ZOOM};
pub use state::{DragPhase, ViewportState};
pub use transform::{grid_to_pointer, pointer_to_grid, ContainerRect, GridCoord};
