//! Free-space placement for the pointer arrow.
//!
//! Given an element box and the canvas size, decides where an arrow can be
//! drawn without running off the image. Candidates are tried in a fixed
//! order and the first one whose guard holds wins: the four corners first,
//! then the four edges.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::{BoundingBox, CanvasSize, Point};

// ============================================================================
// Constants
// ============================================================================

/// Minimum distance from the canvas edge for a side to count as free.
pub const SAFE_MARGIN: f64 = 200.0;

/// Gap between the element box and the arrow tip.
pub const MARGIN: f64 = 10.0;

// ============================================================================
// Direction
// ============================================================================

/// Side or corner of the element where free space was found.
///
/// The arrow is drawn from the anchor into this direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Above the element.
    Top,
    /// Below the element.
    Bottom,
    /// Left of the element.
    Left,
    /// Right of the element.
    Right,
    /// Above and to the left.
    TopLeft,
    /// Above and to the right.
    TopRight,
    /// Below and to the left.
    BottomLeft,
    /// Below and to the right.
    BottomRight,
}

impl Direction {
    /// All directions, corners first.
    pub const ALL: [Direction; 8] = [
        Direction::BottomLeft,
        Direction::TopRight,
        Direction::TopLeft,
        Direction::BottomRight,
        Direction::Left,
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
    ];

    /// Unit vector pointing from the element into free space.
    ///
    /// Image coordinates: `+y` points down.
    #[must_use]
    pub fn unit_vector(self) -> (f64, f64) {
        use std::f64::consts::FRAC_1_SQRT_2 as D;

        match self {
            Self::Top => (0.0, -1.0),
            Self::Bottom => (0.0, 1.0),
            Self::Left => (-1.0, 0.0),
            Self::Right => (1.0, 0.0),
            Self::TopLeft => (-D, -D),
            Self::TopRight => (D, -D),
            Self::BottomLeft => (-D, D),
            Self::BottomRight => (D, D),
        }
    }

    /// Returns `true` for the four diagonal directions.
    #[inline]
    #[must_use]
    pub const fn is_corner(self) -> bool {
        matches!(
            self,
            Self::TopLeft | Self::TopRight | Self::BottomLeft | Self::BottomRight
        )
    }
}

// ============================================================================
// Placement
// ============================================================================

/// Where to start the arrow and which way it runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Arrow tip, just outside the element box.
    pub anchor: Point,
    /// Direction of free space.
    pub direction: Direction,
}

/// Safe band of the canvas.
///
/// Bounds are signed so a canvas narrower than the margin simply makes every
/// guard on that axis fail.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
}

impl Bounds {
    fn of(canvas: CanvasSize) -> Self {
        Self {
            left: SAFE_MARGIN,
            right: f64::from(canvas.width) - SAFE_MARGIN,
            top: SAFE_MARGIN,
            bottom: f64::from(canvas.height) - SAFE_MARGIN,
        }
    }
}

/// Edge tests shared by the rules.
#[derive(Debug, Clone, Copy)]
struct Fit {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

impl Fit {
    fn new(bbox: &BoundingBox, bounds: Bounds) -> Self {
        Self {
            left: bbox.x1() >= bounds.left,
            right: bbox.x2() <= bounds.right,
            top: bbox.y1() >= bounds.top,
            bottom: bbox.y2() <= bounds.bottom,
        }
    }

    /// Both vertical edges clear the band.
    fn vertical(&self) -> bool {
        self.top && self.bottom
    }
}

/// One guarded candidate.
struct Rule {
    direction: Direction,
    guard: fn(&Fit) -> bool,
    anchor: fn(&BoundingBox) -> Point,
}

/// Candidates in priority order.
const RULES: [Rule; 8] = [
    Rule {
        direction: Direction::BottomLeft,
        guard: |f| f.left && f.bottom,
        anchor: |b| Point::new(b.x1() - MARGIN, b.y2() + MARGIN),
    },
    Rule {
        direction: Direction::TopRight,
        guard: |f| f.right && f.top,
        anchor: |b| Point::new(b.x2() + MARGIN, b.y1() - MARGIN),
    },
    Rule {
        direction: Direction::TopLeft,
        guard: |f| f.left && f.top,
        anchor: |b| Point::new(b.x1() - MARGIN, b.y1() - MARGIN),
    },
    Rule {
        direction: Direction::BottomRight,
        guard: |f| f.right && f.bottom,
        anchor: |b| Point::new(b.x2() + MARGIN, b.y2() + MARGIN),
    },
    Rule {
        direction: Direction::Left,
        guard: |f| f.left && !f.vertical(),
        anchor: |b| Point::new(b.x1() - MARGIN, b.center().y),
    },
    Rule {
        direction: Direction::Top,
        guard: |f| !f.left && f.top,
        anchor: |b| Point::new(b.center().x, b.y1() - MARGIN),
    },
    Rule {
        direction: Direction::Right,
        guard: |f| f.right && !f.vertical(),
        anchor: |b| Point::new(b.x2() + MARGIN, b.center().y),
    },
    Rule {
        direction: Direction::Bottom,
        guard: |f| !f.right && f.bottom,
        anchor: |b| Point::new(b.center().x, b.y2() + MARGIN),
    },
];

/// Finds free space around `bbox` for an arrow.
///
/// Returns `None` when the element spans the safe band on both axes, in
/// which case no arrow is drawn.
#[must_use]
pub fn find_placement(bbox: &BoundingBox, canvas: CanvasSize) -> Option<Placement> {
    let fit = Fit::new(bbox, Bounds::of(canvas));

    let placement = RULES
        .iter()
        .find(|rule| (rule.guard)(&fit))
        .map(|rule| Placement {
            anchor: (rule.anchor)(bbox),
            direction: rule.direction,
        });

    debug!(
        bbox = %bbox,
        width = canvas.width,
        height = canvas.height,
        placement = ?placement,
        "Resolved arrow placement"
    );

    placement
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2).unwrap()
    }

    #[test]
    fn test_centered_box_prefers_bottom_left() {
        let placement = find_placement(
            &bbox(400.0, 400.0, 600.0, 600.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();

        assert_eq!(placement.direction, Direction::BottomLeft);
        assert_eq!(placement.anchor, Point::new(390.0, 610.0));
    }

    #[test]
    fn test_top_left_box_takes_bottom_right_corner() {
        // x2 <= right and y2 <= bottom, so the fourth corner rule matches
        // before any edge rule is considered.
        let placement = find_placement(
            &bbox(50.0, 50.0, 150.0, 150.0),
            CanvasSize::new(1000, 800),
        )
        .unwrap();

        assert_eq!(placement.direction, Direction::BottomRight);
        assert_eq!(placement.anchor, Point::new(160.0, 160.0));
    }

    #[test]
    fn test_right_edge() {
        let placement = find_placement(
            &bbox(50.0, 50.0, 150.0, 950.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();

        assert_eq!(placement.direction, Direction::Right);
        assert_eq!(placement.anchor, Point::new(160.0, 500.0));
    }

    #[test]
    fn test_full_span_has_no_placement() {
        let placement = find_placement(
            &bbox(100.0, 100.0, 900.0, 900.0),
            CanvasSize::new(1000, 1000),
        );
        assert!(placement.is_none());
    }

    #[test]
    fn test_top_right_when_bottom_blocked() {
        // x1 < left rules out BottomLeft; y1 >= top and x2 <= right.
        let placement = find_placement(
            &bbox(100.0, 300.0, 300.0, 950.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();
        assert_eq!(placement.direction, Direction::TopRight);
        assert_eq!(placement.anchor, Point::new(310.0, 290.0));
    }

    #[test]
    fn test_top_left() {
        let placement = find_placement(
            &bbox(300.0, 300.0, 950.0, 950.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();
        assert_eq!(placement.direction, Direction::TopLeft);
        assert_eq!(placement.anchor, Point::new(290.0, 290.0));
    }

    #[test]
    fn test_bottom_right() {
        let placement = find_placement(
            &bbox(100.0, 100.0, 300.0, 300.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();
        assert_eq!(placement.direction, Direction::BottomRight);
        assert_eq!(placement.anchor, Point::new(310.0, 310.0));
    }

    #[test]
    fn test_left_edge() {
        // x1 >= left but spans the whole vertical band, and x2 > right.
        let placement = find_placement(
            &bbox(300.0, 100.0, 950.0, 900.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();
        assert_eq!(placement.direction, Direction::Left);
        assert_eq!(placement.anchor, Point::new(290.0, 500.0));
    }

    #[test]
    fn test_top_edge() {
        let placement = find_placement(
            &bbox(100.0, 300.0, 900.0, 950.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();
        assert_eq!(placement.direction, Direction::Top);
        assert_eq!(placement.anchor, Point::new(500.0, 290.0));
    }

    #[test]
    fn test_bottom_edge() {
        let placement = find_placement(
            &bbox(100.0, 100.0, 900.0, 700.0),
            CanvasSize::new(1000, 1000),
        )
        .unwrap();
        assert_eq!(placement.direction, Direction::Bottom);
        assert_eq!(placement.anchor, Point::new(500.0, 710.0));
    }

    #[test]
    fn test_small_canvas_has_no_placement() {
        let placement = find_placement(&bbox(10.0, 10.0, 300.0, 300.0), CanvasSize::new(350, 350));
        assert!(placement.is_none());
    }

    #[test]
    fn test_zero_canvas_has_no_placement() {
        let placement = find_placement(&bbox(0.0, 0.0, 0.0, 0.0), CanvasSize::new(0, 0));
        assert!(placement.is_none());
    }

    #[test]
    fn test_corner_vectors_are_unit_length() {
        for direction in Direction::ALL {
            let (dx, dy) = direction.unit_vector();
            assert!(((dx * dx + dy * dy).sqrt() - 1.0).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn prop_bottom_left_wins_when_guard_holds(
            x1 in 200.0f64..1500.0,
            y1 in 0.0f64..600.0,
            w in 0.0f64..400.0,
            h in 0.0f64..200.0,
        ) {
            let canvas = CanvasSize::new(2000, 1000);
            let b = bbox(x1, y1, x1 + w, y1 + h);
            prop_assume!(b.y2() <= 800.0);

            let placement = find_placement(&b, canvas).unwrap();
            prop_assert_eq!(placement.direction, Direction::BottomLeft);
        }

        #[test]
        fn prop_corners_beat_edges(
            x1 in 0.0f64..1800.0,
            y1 in 0.0f64..1800.0,
            w in 0.0f64..1000.0,
            h in 0.0f64..1000.0,
        ) {
            let canvas = CanvasSize::new(2000, 2000);
            let b = bbox(x1, y1, x1 + w, y1 + h);
            let bounds = Bounds::of(canvas);
            let fit = Fit::new(&b, bounds);
            let any_corner = (fit.left || fit.right) && (fit.top || fit.bottom);

            if let Some(placement) = find_placement(&b, canvas) {
                prop_assert_eq!(placement.direction.is_corner(), any_corner);
            } else {
                prop_assert!(!any_corner);
            }
        }
    }
}
