//! Zoom/pan/drag state machine.
//!
//! `ViewportState` is a plain value. Every transition returns a new state and
//! leaves the input untouched, so hosts can diff before/after cheaply.
//!
//! Invariant: whenever `zoom` sits at the configured minimum, `pan` is zero.

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use super::event::ViewportEvent;
use crate::config::ZoomConfig;

/// Drag phase of the viewport
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum DragPhase {
    /// No button held
    #[default]
    Idle,
    /// Button held while zoomed; `anchor` is the pointer minus the pan at press time
    Dragging { anchor: Point2<f32> },
}

/// Current zoom, pan and drag phase
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportState {
    /// Scale factor, within `[ZoomConfig::min, ZoomConfig::max]`
    pub zoom: f32,
    /// Offset in presentation pixels, applied after scaling
    pub pan: Vector2<f32>,
    /// Whether a drag is in progress
    pub drag: DragPhase,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(&ZoomConfig::default())
    }
}

impl ViewportState {
    /// Unzoomed, unpanned, idle state
    #[must_use]
    pub fn new(config: &ZoomConfig) -> Self {
        Self {
            zoom: config.min,
            pan: Vector2::zeros(),
            drag: DragPhase::Idle,
        }
    }

    /// Whether a drag is in progress
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragPhase::Dragging { .. })
    }

    /// Whether the view is zoomed past the minimum (panning allowed)
    #[must_use]
    pub fn is_zoomed(&self, config: &ZoomConfig) -> bool {
        self.zoom > config.min
    }

    /// Apply one event and return the resulting state.
    ///
    /// Wheel events are applied unconditionally here; deciding whether the
    /// pointer is over the container is the controller's job.
    #[must_use]
    pub fn apply(self, event: &ViewportEvent, config: &ZoomConfig) -> Self {
        match *event {
            ViewportEvent::PointerDown { position } => self.begin_drag(position, config),
            ViewportEvent::PointerMove { position } => self.drag_to(position, config),
            ViewportEvent::PointerUp | ViewportEvent::PointerLeave => self.end_drag(),
            ViewportEvent::Wheel { delta_y, .. } => self.wheel(delta_y, config),
            ViewportEvent::ZoomIn => self.zoom_in(config),
            ViewportEvent::ZoomOut => self.zoom_out(config),
            ViewportEvent::ResetZoom => self.reset(config),
        }
    }

    /// Step zoom up, capped at the maximum
    #[must_use]
    pub fn zoom_in(self, config: &ZoomConfig) -> Self {
        Self {
            zoom: (self.zoom + config.step).min(config.max),
            ..self
        }
        .normalized(config)
    }

    /// Step zoom down, floored at the minimum.
    ///
    /// Pan snaps back to the origin when the resulting zoom is at or below
    /// `pan_snap_threshold`.
    #[must_use]
    pub fn zoom_out(self, config: &ZoomConfig) -> Self {
        let zoom = (self.zoom - config.step).max(config.min);
        let pan = if zoom <= config.pan_snap_threshold {
            Vector2::zeros()
        } else {
            self.pan
        };
        Self { zoom, pan, ..self }.normalized(config)
    }

    /// Back to minimum zoom and zero pan. Drag phase is kept.
    #[must_use]
    pub fn reset(self, config: &ZoomConfig) -> Self {
        Self {
            zoom: config.min,
            pan: Vector2::zeros(),
            ..self
        }
    }

    fn wheel(self, delta_y: f32, config: &ZoomConfig) -> Self {
        if !delta_y.is_finite() {
            return self;
        }
        if delta_y < 0.0 {
            self.zoom_in(config)
        } else {
            self.zoom_out(config)
        }
    }

    fn begin_drag(self, position: Point2<f32>, config: &ZoomConfig) -> Self {
        if !self.is_zoomed(config) || !is_finite(position) {
            return self;
        }
        Self {
            drag: DragPhase::Dragging {
                anchor: position - self.pan,
            },
            ..self
        }
    }

    fn drag_to(self, position: Point2<f32>, config: &ZoomConfig) -> Self {
        match self.drag {
            DragPhase::Dragging { anchor } if self.is_zoomed(config) && is_finite(position) => {
                Self {
                    pan: position - anchor,
                    ..self
                }
            }
            _ => self,
        }
    }

    fn end_drag(self) -> Self {
        Self {
            drag: DragPhase::Idle,
            ..self
        }
    }

    /// Re-establish the zoom range and the min-zoom ⇒ zero-pan invariant
    fn normalized(mut self, config: &ZoomConfig) -> Self {
        if !self.zoom.is_finite() {
            self.zoom = config.min;
        }
        self.zoom = self.zoom.clamp(config.min, config.max);
        if self.zoom <= config.min {
            self.pan = Vector2::zeros();
        }
        self
    }
}

fn is_finite(p: Point2<f32>) -> bool {
    p.x.is_finite() && p.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cfg() -> ZoomConfig {
        ZoomConfig::default()
    }

    fn down(x: f32, y: f32) -> ViewportEvent {
        ViewportEvent::PointerDown {
            position: Point2::new(x, y),
        }
    }

    fn mv(x: f32, y: f32) -> ViewportEvent {
        ViewportEvent::PointerMove {
            position: Point2::new(x, y),
        }
    }

    #[test]
    fn test_zoom_in_caps_at_max() {
        let mut state = ViewportState::default();
        let zooms: Vec<f32> = (0..10)
            .map(|_| {
                state = state.zoom_in(&cfg());
                state.zoom
            })
            .collect();
        assert_eq!(&zooms[..5], &[1.5, 2.0, 2.5, 3.0, 3.5]);
        assert_relative_eq!(state.zoom, 5.0);
    }

    #[test]
    fn test_zoom_in_five_times_from_three() {
        let mut state = ViewportState {
            zoom: 3.0,
            ..ViewportState::default()
        };
        for _ in 0..5 {
            state = state.zoom_in(&cfg());
        }
        assert_relative_eq!(state.zoom, 5.0);
    }

    #[test]
    fn test_zoom_out_snaps_pan_at_threshold() {
        let state = ViewportState {
            zoom: 1.5,
            pan: Vector2::new(30.0, -12.0),
            drag: DragPhase::Idle,
        };
        let out = state.zoom_out(&cfg());
        assert_relative_eq!(out.zoom, 1.0);
        assert_eq!(out.pan, Vector2::zeros());

        // 2.0 -> 1.5 is at the threshold, pan snaps too
        let state = ViewportState {
            zoom: 2.0,
            pan: Vector2::new(30.0, -12.0),
            drag: DragPhase::Idle,
        };
        assert_eq!(state.zoom_out(&cfg()).pan, Vector2::zeros());

        // 3.0 -> 2.5 keeps the pan
        let state = ViewportState {
            zoom: 3.0,
            pan: Vector2::new(30.0, -12.0),
            drag: DragPhase::Idle,
        };
        let out = state.zoom_out(&cfg());
        assert_relative_eq!(out.zoom, 2.5);
        assert_eq!(out.pan, Vector2::new(30.0, -12.0));
    }

    #[test]
    fn test_zoom_out_floors_at_min() {
        let state = ViewportState::default().zoom_out(&cfg());
        assert_relative_eq!(state.zoom, 1.0);
        assert_eq!(state.pan, Vector2::zeros());
    }

    #[test]
    fn test_pointer_down_at_unit_zoom_stays_idle() {
        let state = ViewportState::default().apply(&down(10.0, 10.0), &cfg());
        assert_eq!(state.drag, DragPhase::Idle);
        // Moving does not pan
        let state = state.apply(&mv(50.0, 50.0), &cfg());
        assert_eq!(state.pan, Vector2::zeros());
    }

    #[test]
    fn test_drag_pans_relative_to_anchor() {
        let state = ViewportState {
            zoom: 2.0,
            pan: Vector2::new(10.0, 5.0),
            drag: DragPhase::Idle,
        };
        let state = state.apply(&down(100.0, 100.0), &cfg());
        assert_eq!(
            state.drag,
            DragPhase::Dragging {
                anchor: Point2::new(90.0, 95.0)
            }
        );
        let state = state.apply(&mv(150.0, 80.0), &cfg());
        assert_eq!(state.pan, Vector2::new(60.0, -15.0));
        let state = state.apply(&ViewportEvent::PointerUp, &cfg());
        assert!(!state.is_dragging());
        // Moves after release do not pan
        let state = state.apply(&mv(0.0, 0.0), &cfg());
        assert_eq!(state.pan, Vector2::new(60.0, -15.0));
    }

    #[test]
    fn test_pointer_leave_ends_drag() {
        let state = ViewportState {
            zoom: 2.0,
            ..ViewportState::default()
        }
        .apply(&down(1.0, 1.0), &cfg())
        .apply(&ViewportEvent::PointerLeave, &cfg());
        assert_eq!(state.drag, DragPhase::Idle);
    }

    #[test]
    fn test_wheel_direction() {
        let wheel = |delta_y| ViewportEvent::Wheel {
            position: Point2::new(0.0, 0.0),
            delta_y,
        };
        let state = ViewportState::default().apply(&wheel(-100.0), &cfg());
        assert_relative_eq!(state.zoom, 1.5);
        let state = state.apply(&wheel(100.0), &cfg());
        assert_relative_eq!(state.zoom, 1.0);
        let state = state.apply(&wheel(f32::NAN), &cfg());
        assert_relative_eq!(state.zoom, 1.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let state = ViewportState {
            zoom: 4.0,
            pan: Vector2::new(-80.0, 20.0),
            drag: DragPhase::Idle,
        }
        .apply(&ViewportEvent::ResetZoom, &cfg());
        assert_eq!(state, ViewportState::default());
    }

    #[test]
    fn test_zoom_out_mid_drag_freezes_pan() {
        let state = ViewportState {
            zoom: 1.5,
            ..ViewportState::default()
        }
        .apply(&down(10.0, 10.0), &cfg())
        .apply(&ViewportEvent::ZoomOut, &cfg());
        assert!(state.is_dragging());
        let state = state.apply(&mv(90.0, 90.0), &cfg());
        assert_eq!(state.pan, Vector2::zeros());
    }

    #[test]
    fn test_apply_does_not_mutate_input() {
        let before = ViewportState::default();
        let _ = before.apply(&ViewportEvent::ZoomIn, &cfg());
        assert_eq!(before, ViewportState::default());
    }
}
