//! Arrow geometry.
//!
//! An arrow is three strokes: the shaft and two head strokes. The shaft
//! starts at the placement anchor next to the element and runs into free
//! space along the placement direction, where the head marks its tip.

use crate::geometry::Point;

use super::placement::Direction;

// ============================================================================
// Segment
// ============================================================================

/// A straight stroke between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Where the stroke begins.
    pub start: Point,
    /// Where the stroke ends.
    pub end: Point,
}

impl Segment {
    /// Creates a stroke from `start` to `end`.
    #[inline]
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Euclidean length of the stroke.
    #[must_use]
    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).hypot(self.end.y - self.start.y)
    }
}

// ============================================================================
// Arrow
// ============================================================================

/// Arrow dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrowShape {
    /// Shaft length.
    pub length: f64,
    /// Distance from the tip back along the shaft to the head stroke ends.
    pub head_length: f64,
    /// Sideways spread of each head stroke.
    pub head_half_width: f64,
}

impl Default for ArrowShape {
    fn default() -> Self {
        Self {
            length: 150.0,
            head_length: 50.0,
            head_half_width: 10.0,
        }
    }
}

/// Computes the strokes of an arrow leaving `anchor` along `direction`.
///
/// Order: shaft (anchor to tip), then the two head strokes (tip backward).
/// The tip lies `shape.length` from the anchor, so the arrow points away
/// from the element.
#[must_use]
pub fn arrow_segments(anchor: Point, shape: ArrowShape, direction: Direction) -> [Segment; 3] {
    let (ux, uy) = direction.unit_vector();
    // Perpendicular to the shaft.
    let (px, py) = (-uy, ux);

    let tip = anchor.offset(ux * shape.length, uy * shape.length);
    let back = tip.offset(-ux * shape.head_length, -uy * shape.head_length);

    let wing_a = back.offset(px * shape.head_half_width, py * shape.head_half_width);
    let wing_b = back.offset(-px * shape.head_half_width, -py * shape.head_half_width);

    [
        Segment::new(anchor, tip),
        Segment::new(tip, wing_a),
        Segment::new(tip, wing_b),
    ]
}

// ============================================================================
// Tests
// ============================================================================
