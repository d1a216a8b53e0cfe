//! Pixel-space geometry shared by placement, drawing and cropping.
//!
//! All coordinates are image pixels with the origin at the top-left corner.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Point
// ============================================================================

/// A point in image pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ============================================================================
// CanvasSize
// ============================================================================

/// Dimensions of the image being annotated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CanvasSize {
    /// Creates a new canvas size.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Reads the size of an image.
    #[inline]
    #[must_use]
    pub fn of<I: image::GenericImageView>(image: &I) -> Self {
        let (width, height) = image.dimensions();
        Self { width, height }
    }

    /// Returns `true` if `(x, y)` lies within `[0, width] x [0, height]`.
    ///
    /// Both edges are inclusive.
    #[inline]
    #[must_use]
    pub fn contains_inclusive(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x <= f64::from(self.width) && y <= f64::from(self.height)
    }
}

// ============================================================================
// BoundingBox
// ============================================================================

/// Axis-aligned element rectangle `(x1, y1)-(x2, y2)`.
///
/// Construct through [`BoundingBox::new`] or [`BoundingBox::from_rect`], which
/// reject non-finite, negative or inverted coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl BoundingBox {
    /// Creates a validated bounding box.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundingBox`] if any coordinate is not finite
    /// or negative, or if `x1 > x2` or `y1 > y2`.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self> {
        if ![x1, y1, x2, y2].iter().all(|v| v.is_finite()) {
            return Err(Error::invalid_bounding_box(format!(
                "non-finite coordinate in ({x1}, {y1}, {x2}, {y2})"
            )));
        }
        if x1 < 0.0 || y1 < 0.0 {
            return Err(Error::invalid_bounding_box(format!(
                "negative origin ({x1}, {y1})"
            )));
        }
        if x1 > x2 {
            return Err(Error::invalid_bounding_box(format!("x1 {x1} > x2 {x2}")));
        }
        if y1 > y2 {
            return Err(Error::invalid_bounding_box(format!("y1 {y1} > y2 {y2}")));
        }
        Ok(Self { x1, y1, x2, y2 })
    }

    /// Creates a bounding box from an origin and size, as reported by
    /// `getClientRects()`.
    ///
    /// # Errors
    ///
    /// Same as [`BoundingBox::new`].
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(x, y, x + width, y + height)
    }

    /// Left edge.
    #[inline]
    #[must_use]
    pub const fn x1(&self) -> f64 {
        self.x1
    }

    /// Top edge.
    #[inline]
    #[must_use]
    pub const fn y1(&self) -> f64 {
        self.y1
    }

    /// Right edge.
    #[inline]
    #[must_use]
    pub const fn x2(&self) -> f64 {
        self.x2
    }

    /// Bottom edge.
    #[inline]
    #[must_use]
    pub const fn y2(&self) -> f64 {
        self.y2
    }

    /// Horizontal extent, `x2 - x1`.
    #[inline]
    #[must_use]
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Vertical extent, `y2 - y1`.
    #[inline]
    #[must_use]
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Returns `true` if the box has zero width or zero height.
    #[inline]
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    /// Midpoint of the box.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Returns the box moved by `(dx, dy)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBoundingBox`] if the moved box has a negative
    /// origin.
    pub fn translate(&self, dx: f64, dy: f64) -> Result<Self> {
        Self::new(self.x1 + dx, self.y1 + dy, self.x2 + dx, self.y2 + dy)
    }
}

impl<'de> Deserialize<'de> for BoundingBox {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            x1: f64,
            y1: f64,
            x2: f64,
            y2: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.x1, raw.y1, raw.x2, raw.y2).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}, {}]", self.x1, self.y1, self.x2, self.y2)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_box() {
        let bbox = BoundingBox::new(10.0, 20.0, 110.0, 70.0).unwrap();
        assert_eq!(bbox.width(), 100.0);
        assert_eq!(bbox.height(), 50.0);
        assert_eq!(bbox.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_inverted_x_rejected() {
        let err = BoundingBox::new(50.0, 0.0, 10.0, 10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidBoundingBox { .. }));
    }

    #[test]
    fn test_inverted_y_rejected() {
        assert!(BoundingBox::new(0.0, 50.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_negative_origin_rejected() {
        assert!(BoundingBox::new(-1.0, 0.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_nan_rejected() {
        assert!(BoundingBox::new(f64::NAN, 0.0, 10.0, 10.0).is_err());
    }

    #[test]
    fn test_from_rect() {
        let bbox = BoundingBox::from_rect(5.0, 6.0, 10.0, 0.0).unwrap();
        assert_eq!(bbox.x2(), 15.0);
        assert_eq!(bbox.y2(), 6.0);
        assert!(bbox.is_degenerate());
    }

    #[test]
    fn test_translate() {
        let moved = BoundingBox::new(1.0, 2.0, 3.0, 4.0)
            .unwrap()
            .translate(3.0, 3.0)
            .unwrap();
        assert_eq!(moved, BoundingBox::new(4.0, 5.0, 6.0, 7.0).unwrap());
        assert!(moved.translate(-10.0, 0.0).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: BoundingBox =
            serde_json::from_str(r#"{"x1":1,"y1":2,"x2":3,"y2":4}"#).unwrap();
        assert_eq!(ok.x1(), 1.0);

        let bad = serde_json::from_str::<BoundingBox>(r#"{"x1":5,"y1":2,"x2":3,"y2":4}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn test_canvas_contains_inclusive() {
        let canvas = CanvasSize::new(100, 50);
        assert!(canvas.contains_inclusive(0.0, 0.0));
        assert!(canvas.contains_inclusive(100.0, 50.0));
        assert!(!canvas.contains_inclusive(100.5, 50.0));
        assert!(!canvas.contains_inclusive(-0.5, 10.0));
    }
}
