//! Row-major scalar field storage

use serde::Serialize;

/// Field data container
///
/// Stores 2D field data as a flat `Vec<f32>` in row-major order.
/// Each field represents one per-cell property of the raster.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldData {
    /// Field values in row-major order (y * width + x)
    data: Vec<f32>,
    /// Grid width in cells
    width: usize,
    /// Grid height in cells
    height: usize,
}

impl FieldData {
    /// Wrap existing values.
    ///
    /// # Returns
    ///
    /// `None` if `data.len() != width * height`
    #[must_use]
    pub fn from_vec(width: usize, height: usize, data: Vec<f32>) -> Option<Self> {
        (width.checked_mul(height) == Some(data.len())).then_some(Self {
            data,
            width,
            height,
        })
    }

    /// Get reference to field data
    #[must_use]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Grid width in cells
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get value at grid position
    ///
    /// # Arguments
    ///
    /// * `x` - X coordinate (0 to width-1)
    /// * `y` - Y coordinate (0 to height-1)
    ///
    /// # Returns
    ///
    /// Field value at the given position, `None` when out of bounds
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[y * self.width + x])
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_from_vec() {
        let field = FieldData::from_vec(10, 20, vec![0.0; 200]).expect("matching length");
        assert_eq!(field.width(), 10);
        assert_eq!(field.height(), 20);
        assert_eq!(field.as_slice().len(), 200);
        assert!(field.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_field_length_mismatch() {
        assert!(FieldData::from_vec(10, 10, vec![0.0; 99]).is_none());
        assert!(FieldData::from_vec(usize::MAX, 2, Vec::new()).is_none());
    }

    #[test]
    fn test_field_get_row_major() {
        let data: Vec<f32> = (0..100).map(|i| i as f32).collect();
        let field = FieldData::from_vec(10, 10, data).expect("matching length");
        // index = 4 * 10 + 3
        assert_eq!(field.get(3, 4), Some(43.0));
        assert_eq!(field.get(10, 5), None);
        assert_eq!(field.get(5, 10), None);
    }
}
