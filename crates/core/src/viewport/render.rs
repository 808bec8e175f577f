//! Presentation hints derived from the viewport state.

use nalgebra::Vector2;
use serde::Serialize;

use super::state::ViewportState;
use crate::config::ZoomConfig;

/// Above this zoom the image should be sampled nearest-neighbour
pub const PIXELATED_ZOOM: f32 = 2.0;

/// Pointer cursor the host should show over the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CursorHint {
    /// Unzoomed: pointing inspects cells
    Crosshair,
    /// Zoomed: the image can be dragged
    Grab,
    /// Drag in progress
    Grabbing,
}

impl CursorHint {
    /// CSS cursor keyword
    #[must_use]
    pub const fn css(self) -> &'static str {
        match self {
            CursorHint::Crosshair => "crosshair",
            CursorHint::Grab => "grab",
            CursorHint::Grabbing => "grabbing",
        }
    }
}

/// Everything a host needs to draw the image under the current transform
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RenderHints {
    /// Scale applied about the top-left corner
    pub scale: f32,
    /// Translation applied after scaling, in pre-scale units (`pan / zoom`)
    pub translate: Vector2<f32>,
    /// Cursor to show
    pub cursor: CursorHint,
    /// Sample nearest-neighbour instead of smoothing
    pub pixelated: bool,
    /// Whether transform changes should be animated (off while dragging)
    pub animate: bool,
    /// Zoom readout, `round(zoom * 100)`
    pub zoom_percent: u32,
    /// Zoom-in control enabled
    pub can_zoom_in: bool,
    /// Zoom-out control enabled
    pub can_zoom_out: bool,
}

impl RenderHints {
    /// Derive hints from a viewport state
    #[must_use]
    pub fn from_state(state: &ViewportState, config: &ZoomConfig) -> Self {
        let zoomed = state.is_zoomed(config);
        let cursor = match (zoomed, state.is_dragging()) {
            (false, _) => CursorHint::Crosshair,
            (true, true) => CursorHint::Grabbing,
            (true, false) => CursorHint::Grab,
        };
        let translate = if state.zoom > 0.0 {
            state.pan / state.zoom
        } else {
            Vector2::zeros()
        };

        Self {
            scale: state.zoom,
            translate,
            cursor,
            pixelated: state.zoom > PIXELATED_ZOOM,
            animate: !state.is_dragging(),
            zoom_percent: (state.zoom * 100.0).round().max(0.0) as u32,
            can_zoom_in: state.zoom < config.max,
            can_zoom_out: zoomed,
        }
    }

    /// CSS `transform` value, e.g. `scale(2) translate(15px, -4px)`
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.translate.x, self.translate.y
        )
    }

    /// Zoom readout label, e.g. `150%`
    #[must_use]
    pub fn zoom_label(&self) -> String {
        format!("{}%", self.zoom_percent)
    }
}
