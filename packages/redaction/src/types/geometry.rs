//! Bounding box geometry for word-level image regions.

use serde::{Deserialize, Serialize};

use crate::error::{RedactionError, Result};

/// An axis-aligned rectangle in pixel units.
///
/// Coordinates are the top-left corner; width and height are non-negative.
/// Boxes are independent of each other (no union/intersection semantics).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge in pixels
    pub x: f32,

    /// Top edge in pixels
    pub y: f32,

    /// Width in pixels
    pub width: f32,

    /// Height in pixels
    pub height: f32,
}

impl BoundingBox {
    /// Create a bounding box, clamping negative dimensions to zero.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Build the envelope of a polygon given as flat `[x1, y1, x2, y2, ...]`
    /// coordinates.
    ///
    /// OCR providers report word positions as quadrilaterals; the redaction
    /// region is the axis-aligned envelope of those points. At least four
    /// points (eight coordinates) are required.
    pub fn from_polygon(polygon: &[f32]) -> Result<Self> {
        if polygon.len() < 8 || polygon.len() % 2 != 0 {
            return Err(RedactionError::InvalidGeometry {
                reason: format!(
                    "polygon needs at least 4 points (8 coordinates), got {}",
                    polygon.len()
                ),
            });
        }

        let mut min_x = f32::INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut max_y = f32::NEG_INFINITY;

        for point in polygon.chunks_exact(2) {
            min_x = min_x.min(point[0]);
            max_x = max_x.max(point[0]);
            min_y = min_y.min(point[1]);
            max_y = max_y.max(point[1]);
        }

        Ok(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Convert to an integer pixel rect clamped to `(image_width, image_height)`.
    ///
    /// Returns `None` when the box lies entirely outside the image or has
    /// zero area after clamping.
    pub fn to_pixel_rect(&self, image_width: u32, image_height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x.max(0.0) as u32;
        let y0 = self.y.max(0.0) as u32;
        let x1 = ((self.x + self.width).ceil().max(0.0) as u32).min(image_width);
        let y1 = ((self.y + self.height).ceil().max(0.0) as u32).min(image_height);

        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        Some((x0, y0, x1, y1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_polygon_envelope() {
        // Rotated quadrilateral: envelope is the min/max of each axis
        let polygon = [10.0, 5.0, 50.0, 8.0, 48.0, 20.0, 9.0, 18.0];
        let bbox = BoundingBox::from_polygon(&polygon).unwrap();

        assert_eq!(bbox.x, 9.0);
        assert_eq!(bbox.y, 5.0);
        assert_eq!(bbox.width, 41.0);
        assert_eq!(bbox.height, 15.0);
    }

    #[test]
    fn test_from_polygon_too_few_points() {
        let err = BoundingBox::from_polygon(&[1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::RedactionError::InvalidGeometry { .. }
        ));
    }

    #[test]
    fn test_negative_dimensions_clamped() {
        let bbox = BoundingBox::new(5.0, 5.0, -3.0, -1.0);
        assert_eq!(bbox.width, 0.0);
        assert_eq!(bbox.height, 0.0);
    }

    #[test]
    fn test_to_pixel_rect_clamps_to_image() {
        let bbox = BoundingBox::new(90.0, 90.0, 50.0, 50.0);
        assert_eq!(bbox.to_pixel_rect(100, 100), Some((90, 90, 100, 100)));
    }

    #[test]
    fn test_to_pixel_rect_outside_image() {
        let bbox = BoundingBox::new(200.0, 200.0, 10.0, 10.0);
        assert_eq!(bbox.to_pixel_rect(100, 100), None);

        let empty = BoundingBox::new(10.0, 10.0, 0.0, 0.0);
        assert_eq!(empty.to_pixel_rect(100, 100), None);
    }
}
