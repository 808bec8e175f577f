//! Pointer ↔ grid coordinate mapping under a zoom/pan transform.
//!
//! The image is drawn scaled by `zoom` about the container's top-left corner,
//! then offset by `pan` (in presentation pixels), and stretched to fill the
//! container. A pointer maps to a grid cell by undoing those steps:
//!
//! ```text
//! local = pointer - container.origin
//! image = (local - pan) / zoom
//! cell  = floor(image / container.size * grid_size)
//! ```

use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::raster::GridDimensions;

/// Screen rectangle of the viewport container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContainerRect {
    /// Top-left corner in pointer coordinates
    pub origin: Point2<f32>,
    /// Width and height in pointer units
    pub size: Vector2<f32>,
}

impl ContainerRect {
    /// Rectangle from its left/top corner and size
    #[must_use]
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Point2::new(left, top),
            size: Vector2::new(width, height),
        }
    }

    /// Whether the rectangle can map pointers at all (finite, positive size)
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.size.iter().all(|v| v.is_finite() && *v > 0.0)
            && self.origin.iter().all(|v| v.is_finite())
    }

    /// Whether `point` lies inside the rectangle (left/top inclusive, right/bottom exclusive)
    #[must_use]
    pub fn contains(&self, point: Point2<f32>) -> bool {
        if !self.is_usable() {
            return false;
        }
        let local = point - self.origin;
        (0.0..self.size.x).contains(&local.x) && (0.0..self.size.y).contains(&local.y)
    }

    /// Center of the rectangle
    #[must_use]
    pub fn center(&self) -> Point2<f32> {
        self.origin + self.size / 2.0
    }
}

impl Default for ContainerRect {
    /// A container the size of the default grid at one pixel per cell
    fn default() -> Self {
        let dims = GridDimensions::default();
        Self::new(0.0, 0.0, dims.width() as f32, dims.height() as f32)
    }
}

/// Integer cell coordinate inside a grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCoord {
    /// Column
    pub x: usize,
    /// Row
    pub y: usize,
}

/// Map a pointer position to the grid cell under it.
///
/// Returns `None` when the mapped cell falls outside `[0, width) × [0, height)`
/// or when the container, zoom or pointer are unusable (zero/negative/NaN).
#[must_use]
pub fn pointer_to_grid(
    pointer: Point2<f32>,
    container: &ContainerRect,
    zoom: f32,
    pan: Vector2<f32>,
    dims: GridDimensions,
) -> Option<GridCoord> {
    if !container.is_usable() || !zoom.is_finite() || zoom <= 0.0 {
        return None;
    }

    let local = pointer - container.origin;
    let image = (local - pan) / zoom;

    let grid_w = dims.width() as f32;
    let grid_h = dims.height() as f32;
    let gx = (image.x / container.size.x * grid_w).floor();
    let gy = (image.y / container.size.y * grid_h).floor();

    // NaN fails both comparisons
    if !(gx >= 0.0 && gx < grid_w && gy >= 0.0 && gy < grid_h) {
        return None;
    }

    // Float rounding can put gx at exactly grid_w - 1 + ε; index() rechecks bounds
    let (x, y) = (gx as usize, gy as usize);
    dims.index(x, y).map(|_| GridCoord { x, y })
}

/// Screen position of a cell's center under the given transform.
///
/// Inverse of [`pointer_to_grid`]: mapping the returned point back yields
/// `coord` for any usable container and positive zoom.
#[must_use]
pub fn grid_to_pointer(
    coord: GridCoord,
    container: &ContainerRect,
    zoom: f32,
    pan: Vector2<f32>,
    dims: GridDimensions,
) -> Point2<f32> {
    let image = Vector2::new(
        (coord.x as f32 + 0.5) / dims.width() as f32 * container.size.x,
        (coord.y as f32 + 0.5) / dims.height() as f32 * container.size.y,
    );
    container.origin + image * zoom + pan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> GridDimensions {
        GridDimensions::new(200, 100).expect("valid")
    }

    #[test]
    fn test_center_maps_to_center_cell() {
        let rect = ContainerRect::new(0.0, 0.0, 400.0, 200.0);
        let coord = pointer_to_grid(rect.center(), &rect, 1.0, Vector2::zeros(), dims());
        assert_eq!(coord, Some(GridCoord { x: 100, y: 50 }));
    }

    #[test]
    fn test_container_offset_is_subtracted() {
        let rect = ContainerRect::new(50.0, 30.0, 400.0, 200.0);
        let coord = pointer_to_grid(Point2::new(50.0, 30.0), &rect, 1.0, Vector2::zeros(), dims());
        assert_eq!(coord, Some(GridCoord { x: 0, y: 0 }));
        let coord = pointer_to_grid(
            Point2::new(449.9, 229.9),
            &rect,
            1.0,
            Vector2::zeros(),
            dims(),
        );
        assert_eq!(coord, Some(GridCoord { x: 199, y: 99 }));
    }

    #[test]
    fn test_zoom_and_pan() {
        let rect = ContainerRect::new(0.0, 0.0, 400.0, 200.0);
        // At 2x the container shows the top-left quarter; its center is cell (50, 25)
        let coord = pointer_to_grid(rect.center(), &rect, 2.0, Vector2::zeros(), dims());
        assert_eq!(coord, Some(GridCoord { x: 50, y: 25 }));

        // Panning left by 200px at 2x moves the view right by 50 cells
        let coord = pointer_to_grid(rect.center(), &rect, 2.0, Vector2::new(-200.0, 0.0), dims());
        assert_eq!(coord, Some(GridCoord { x: 100, y: 25 }));
    }

    #[test]
    fn test_outside_grid_is_none() {
        let rect = ContainerRect::new(0.0, 0.0, 400.0, 200.0);
        let z = Vector2::zeros();
        assert_eq!(pointer_to_grid(Point2::new(-1.0, 10.0), &rect, 1.0, z, dims()), None);
        assert_eq!(pointer_to_grid(Point2::new(10.0, -0.1), &rect, 1.0, z, dims()), None);
        assert_eq!(pointer_to_grid(Point2::new(400.0, 10.0), &rect, 1.0, z, dims()), None);
        assert_eq!(pointer_to_grid(Point2::new(10.0, 200.0), &rect, 1.0, z, dims()), None);
        // Panned fully off-view
        let pan = Vector2::new(1000.0, 0.0);
        assert_eq!(pointer_to_grid(rect.center(), &rect, 2.0, pan, dims()), None);
    }

    #[test]
    fn test_degenerate_inputs_are_none() {
        let z = Vector2::zeros();
        let p = Point2::new(0.0, 0.0);
        let empty = ContainerRect::new(0.0, 0.0, 0.0, 100.0);
        assert_eq!(pointer_to_grid(p, &empty, 1.0, z, dims()), None);
        let rect = ContainerRect::new(0.0, 0.0, 400.0, 200.0);
        assert_eq!(pointer_to_grid(p, &rect, 0.0, z, dims()), None);
        assert_eq!(pointer_to_grid(p, &rect, f32::NAN, z, dims()), None);
        assert_eq!(
            pointer_to_grid(Point2::new(f32::NAN, 1.0), &rect, 1.0, z, dims()),
            None
        );
    }

    #[test]
    fn test_contains_is_half_open() {
        let rect = ContainerRect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Point2::new(10.0, 10.0)));
        assert!(rect.contains(Point2::new(109.9, 59.9)));
        assert!(!rect.contains(Point2::new(110.0, 20.0)));
        assert!(!rect.contains(Point2::new(20.0, 9.9)));
        assert!(!ContainerRect::new(0.0, 0.0, -5.0, 5.0).contains(Point2::new(0.0, 0.0)));
    }

    #[test]
    fn test_grid_to_pointer_inverts_mapping() {
        let rect = ContainerRect::new(12.0, 34.0, 640.0, 320.0);
        let pan = Vector2::new(-150.0, 40.0);
        for coord in [
            GridCoord { x: 0, y: 0 },
            GridCoord { x: 37, y: 81 },
            GridCoord { x: 199, y: 99 },
        ] {
            let p = grid_to_pointer(coord, &rect, 3.5, pan, dims());
            assert_eq!(pointer_to_grid(p, &rect, 3.5, pan, dims()), Some(coord));
        }
    }
}
