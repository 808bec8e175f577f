use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Input delivered to the viewport by the host.
///
/// Pointer positions are in the same coordinate space as the container
/// rectangle (typically client/window pixels).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ViewportEvent {
    /// Primary button pressed
    PointerDown { position: Point2<f32> },
    /// Pointer moved
    PointerMove { position: Point2<f32> },
    /// Primary button released
    PointerUp,
    /// Pointer left the container
    PointerLeave,
    /// Scroll wheel; negative `delta_y` scrolls up (zoom in)
    Wheel { position: Point2<f32>, delta_y: f32 },
    /// Zoom-in button
    ZoomIn,
    /// Zoom-out button
    ZoomOut,
    /// Reset button
    ResetZoom,
}

impl ViewportEvent {
    /// Pointer position carried by the event, if any
    #[must_use]
    pub fn position(&self) -> Option<Point2<f32>> {
        match *self {
            ViewportEvent::PointerDown { position }
            | ViewportEvent::PointerMove { position }
            | ViewportEvent::Wheel { position, .. } => Some(position),
            _ => None,
        }
    }
}
