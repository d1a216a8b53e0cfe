//! Outline color selection.
//!
//! The outline is red unless the pixels just outside the element already look
//! red, in which case black keeps the highlight visible.

use image::{Rgb, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::geometry::{BoundingBox, CanvasSize};

// ============================================================================
// Constants
// ============================================================================

/// Distance of each probe from the element corner.
pub const PROBE_DISTANCE: f64 = 5.0;

/// Lower bound of the red channel for a "reddish" pixel.
const RED_MIN: u8 = 150;

/// Upper bound of the green or blue channel for a "reddish" pixel.
const OTHER_MAX: u8 = 150;

// ============================================================================
// ContourColor
// ============================================================================

/// Color of the element outline and arrow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContourColor {
    /// Pure red, used unless the surroundings are reddish.
    #[default]
    Red,
    /// Pure black, for reddish surroundings.
    Black,
}

impl ContourColor {
    /// RGB components.
    #[inline]
    #[must_use]
    pub const fn rgb(self) -> [u8; 3] {
        match self {
            Self::Red => [255, 0, 0],
            Self::Black => [0, 0, 0],
        }
    }

    /// Opaque RGBA pixel.
    #[inline]
    #[must_use]
    pub const fn rgba(self) -> Rgba<u8> {
        let [r, g, b] = self.rgb();
        Rgba([r, g, b, 255])
    }
}

// ============================================================================
// Selection
// ============================================================================

/// Returns `true` if the pixel would blend with a red outline.
#[inline]
#[must_use]
pub fn is_reddish(Rgb([r, g, b]): Rgb<u8>) -> bool {
    r >= RED_MIN && (g <= OTHER_MAX || b <= OTHER_MAX)
}

/// Probe positions around the element, in sampling order.
#[must_use]
pub fn probe_points(bbox: &BoundingBox) -> [(f64, f64); 4] {
    [
        (bbox.x1() - PROBE_DISTANCE, bbox.y1()),
        (bbox.x1(), bbox.y1() - PROBE_DISTANCE),
        (bbox.x2() + PROBE_DISTANCE, bbox.y2()),
        (bbox.x2(), bbox.y2() + PROBE_DISTANCE),
    ]
}

/// Picks the outline color for `bbox` on `image`.
///
/// Probes outside `[0, width] x [0, height]` are skipped. A probe on the far
/// edge (`x == width` or `y == height`) samples the last row or column.
#[must_use]
pub fn pick_contour_color(bbox: &BoundingBox, image: &RgbaImage) -> ContourColor {
    let canvas = CanvasSize::of(image);
    if canvas.width == 0 || canvas.height == 0 {
        return ContourColor::Red;
    }

    for (x, y) in probe_points(bbox) {
        if !canvas.contains_inclusive(x, y) {
            trace!(x, y, "Probe outside image, skipped");
            continue;
        }

        let px = (x.floor() as u32).min(canvas.width - 1);
        let py = (y.floor() as u32).min(canvas.height - 1);
        let Rgba([r, g, b, _]) = *image.get_pixel(px, py);

        if is_reddish(Rgb([r, g, b])) {
            trace!(x = px, y = py, r, g, b, "Reddish probe, switching to black");
            return ContourColor::Black;
        }
    }

    ContourColor::Red
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn bbox(x1: f64, y1: f64, x2: f64, y2: f64) -> BoundingBox {
        BoundingBox::new(x1, y1, x2, y2).unwrap()
    }

    fn filled(width: u32, height: u32, rgb: [u8; 3]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([rgb[0], rgb[1], rgb[2], 255]))
    }

    #[test]
    fn test_reddish_probe_picks_black() {
        let mut image = filled(100, 100, [255, 255, 255]);
        image.put_pixel(15, 20, Rgba([200, 50, 50, 255]));

        let color = pick_contour_color(&bbox(20.0, 20.0, 60.0, 60.0), &image);
        assert_eq!(color, ContourColor::Black);
    }

    #[test]
    fn test_green_background_picks_red() {
        let image = filled(100, 100, [0, 200, 0]);
        let color = pick_contour_color(&bbox(20.0, 20.0, 60.0, 60.0), &image);
        assert_eq!(color, ContourColor::Red);
    }

    #[test]
    fn test_all_probes_out_of_bounds_picks_red() {
        let image = filled(10, 10, [255, 0, 0]);
        // Every probe either has a negative coordinate or lies past the far edge.
        let color = pick_contour_color(&bbox(0.0, 0.0, 30.0, 30.0), &image);
        assert_eq!(color, ContourColor::Red);
    }

    #[test]
    fn test_probe_at_origin_is_in_bounds() {
        let mut image = filled(100, 100, [255, 255, 255]);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255]));

        // First probe lands exactly on (0, 0).
        let color = pick_contour_color(&bbox(5.0, 0.0, 40.0, 40.0), &image);
        assert_eq!(color, ContourColor::Black);
    }

    #[test]
    fn test_probe_at_far_corner_is_in_bounds() {
        let mut image = filled(100, 100, [255, 255, 255]);
        image.put_pixel(99, 99, Rgba([180, 10, 200, 255]));

        // Third probe lands exactly on (width, height).
        let color = pick_contour_color(&bbox(60.0, 60.0, 95.0, 100.0), &image);
        assert_eq!(color, ContourColor::Black);
    }

    #[test]
    fn test_threshold_boundaries() {
        assert!(is_reddish(Rgb([150, 150, 255])));
        assert!(is_reddish(Rgb([255, 255, 150])));
        assert!(!is_reddish(Rgb([149, 0, 0])));
        assert!(!is_reddish(Rgb([255, 151, 151])));
    }

    #[test]
    fn test_empty_image_picks_red() {
        let image = RgbaImage::new(0, 0);
        assert_eq!(
            pick_contour_color(&bbox(0.0, 0.0, 0.0, 0.0), &image),
            ContourColor::Red
        );
    }
}
