//! Event handling for the viewport: drives the state machine, tracks the
//! container rectangle and keeps the hovered cell current.

use serde::Serialize;
use tracing::trace;

use super::event::ViewportEvent;
use super::hover::HoveredPixel;
use super::render::RenderHints;
use super::state::ViewportState;
use super::transform::{pointer_to_grid, ContainerRect};
use crate::config::ZoomConfig;
use crate::raster::Grid;

/// What an event did, for the host to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EventOutcome {
    /// Zoom, pan or drag phase changed; redraw the transform
    pub view_changed: bool,
    /// Hovered cell changed; refresh the info panel
    pub hover_changed: bool,
    /// Suppress the host's default action (page scroll on wheel)
    pub prevent_default: bool,
}

impl EventOutcome {
    /// Whether anything visible changed
    #[must_use]
    pub fn changed(&self) -> bool {
        self.view_changed || self.hover_changed
    }
}

/// Stateful viewport over one grid at a time
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportController {
    config: ZoomConfig,
    state: ViewportState,
    container: ContainerRect,
    hovered: Option<HoveredPixel>,
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ViewportController {
    /// Controller at default zoom with a default-sized container
    #[must_use]
    pub fn new(config: ZoomConfig) -> Self {
        Self {
            config,
            state: ViewportState::new(&config),
            container: ContainerRect::default(),
            hovered: None,
        }
    }

    /// Zoom limits
    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Current zoom/pan/drag state
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// Current container rectangle
    #[must_use]
    pub fn container(&self) -> &ContainerRect {
        &self.container
    }

    /// Cell under the pointer, if any
    #[must_use]
    pub fn hovered(&self) -> Option<&HoveredPixel> {
        self.hovered.as_ref()
    }

    /// Render hints for the current state
    #[must_use]
    pub fn render_hints(&self) -> RenderHints {
        RenderHints::from_state(&self.state, &self.config)
    }

    /// Update the container rectangle (layout change / resize).
    ///
    /// The hovered cell is kept until the next pointer move.
    pub fn set_container(&mut self, container: ContainerRect) {
        self.container = container;
    }

    /// Drop zoom, pan, drag and hover; used when the grid is replaced
    pub fn reset(&mut self) {
        self.state = ViewportState::new(&self.config);
        self.hovered = None;
    }

    /// Handle one input event against `grid`
    pub fn handle(&mut self, event: ViewportEvent, grid: &Grid) -> EventOutcome {
        let before = self.state;
        let hovered_before = self.hovered;
        let mut prevent_default = false;

        match event {
            ViewportEvent::PointerMove { position } => {
                // Hover is frozen while dragging
                if !before.is_dragging() {
                    self.hovered = if self.container.contains(position) {
                        pointer_to_grid(
                            position,
                            &self.container,
                            before.zoom,
                            before.pan,
                            grid.dimensions(),
                        )
                        .and_then(|coord| HoveredPixel::lookup(grid, coord))
                    } else {
                        None
                    };
                }
                self.state = before.apply(&event, &self.config);
            }
            ViewportEvent::PointerLeave => {
                self.hovered = None;
                self.state = before.apply(&event, &self.config);
            }
            ViewportEvent::Wheel { position, .. } => {
                if self.container.contains(position) {
                    prevent_default = true;
                    self.state = before.apply(&event, &self.config);
                }
            }
            _ => self.state = before.apply(&event, &self.config),
        }

        let view_changed = self.state != before;
        if view_changed {
            trace!(
                zoom = self.state.zoom,
                pan_x = self.state.pan.x,
                pan_y = self.state.pan.y,
                dragging = self.state.is_dragging(),
                "Viewport changed"
            );
        }

        EventOutcome {
            view_changed,
            hover_changed: self.hovered != hovered_before,
            prevent_default,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::CompassDirection;
    use crate::raster::GridDimensions;
    use nalgebra::{Point2, Vector2};

    fn grid() -> Grid {
        // 4x2 grid, slope = index, aspect = 45 * index
        let dims = GridDimensions::new(4, 2).expect("valid");
        let slope = (0..8).map(|i| i as f32).collect();
        let aspect = (0..8).map(|i| i as f32 * 45.0).collect();
        Grid::from_fields(dims, slope, aspect).expect("matching fields")
    }

    fn controller() -> ViewportController {
        let mut c = ViewportController::default();
        c.set_container(ContainerRect::new(100.0, 100.0, 400.0, 200.0));
        c
    }

    fn at(x: f32, y: f32) -> Point2<f32> {
        Point2::new(x, y)
    }

    #[test]
    fn test_hover_inside_and_outside() {
        let grid = grid();
        let mut c = controller();

        let outcome = c.handle(ViewportEvent::PointerMove { position: at(350.0, 250.0) }, &grid);
        assert!(outcome.hover_changed);
        assert!(!outcome.view_changed);
        let hovered = c.hovered().expect("inside");
        assert_eq!((hovered.x, hovered.y), (2, 1));
        assert_eq!(hovered.slope, 6.0);
        assert_eq!(hovered.direction, CompassDirection::W);

        let outcome = c.handle(ViewportEvent::PointerMove { position: at(50.0, 50.0) }, &grid);
        assert!(outcome.hover_changed);
        assert!(c.hovered().is_none());
    }

    #[test]
    fn test_leave_clears_hover() {
        let grid = grid();
        let mut c = controller();
        c.handle(ViewportEvent::PointerMove { position: at(150.0, 150.0) }, &grid);
        assert!(c.hovered().is_some());
        c.handle(ViewportEvent::PointerLeave, &grid);
        assert!(c.hovered().is_none());
    }

    #[test]
    fn test_wheel_outside_is_ignored() {
        let grid = grid();
        let mut c = controller();
        let outcome = c.handle(
            ViewportEvent::Wheel {
                position: at(10.0, 10.0),
                delta_y: -1.0,
            },
            &grid,
        );
        assert_eq!(outcome, EventOutcome::default());
        assert_eq!(c.state().zoom, 1.0);

        let outcome = c.handle(
            ViewportEvent::Wheel {
                position: at(200.0, 200.0),
                delta_y: -1.0,
            },
            &grid,
        );
        assert!(outcome.prevent_default);
        assert!(outcome.view_changed);
        assert_eq!(c.state().zoom, 1.5);
    }

    #[test]
    fn test_wheel_at_limit_still_prevents_default() {
        let grid = grid();
        let mut c = controller();
        let outcome = c.handle(
            ViewportEvent::Wheel {
                position: at(200.0, 200.0),
                delta_y: 3.0,
            },
            &grid,
        );
        assert!(outcome.prevent_default);
        assert!(!outcome.view_changed);
    }

    #[test]
    fn test_hover_frozen_during_drag() {
        let grid = grid();
        let mut c = controller();
        c.handle(ViewportEvent::ZoomIn, &grid);
        c.handle(ViewportEvent::ZoomIn, &grid);
        c.handle(ViewportEvent::PointerMove { position: at(110.0, 110.0) }, &grid);
        let hovered = c.hovered().copied();
        assert!(hovered.is_some());

        c.handle(ViewportEvent::PointerDown { position: at(110.0, 110.0) }, &grid);
        assert!(c.state().is_dragging());
        let outcome = c.handle(ViewportEvent::PointerMove { position: at(160.0, 130.0) }, &grid);
        assert!(outcome.view_changed);
        assert!(!outcome.hover_changed);
        assert_eq!(c.hovered().copied(), hovered);
        assert_eq!(c.state().pan, Vector2::new(50.0, 20.0));

        c.handle(ViewportEvent::PointerUp, &grid);
        assert!(!c.state().is_dragging());
    }

    #[test]
    fn test_reset_clears_state_and_hover() {
        let grid = grid();
        let mut c = controller();
        c.handle(ViewportEvent::ZoomIn, &grid);
        c.handle(ViewportEvent::PointerMove { position: at(150.0, 150.0) }, &grid);
        c.reset();
        assert_eq!(*c.state(), ViewportState::default());
        assert!(c.hovered().is_none());
        assert_eq!(c.container(), &ContainerRect::new(100.0, 100.0, 400.0, 200.0));
    }
}
