//! Frame, crop and resize helpers for finished screenshots.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::geometry::BoundingBox;

// ============================================================================
// Constants
// ============================================================================

/// Context kept around the element when cropping.
pub const DEFAULT_SAFE_AREA: u32 = 400;

// ============================================================================
// Frame
// ============================================================================

/// Returns a copy of `image` surrounded by a solid frame `width` pixels wide.
#[must_use]
pub fn add_border(image: &RgbaImage, width: u32, color: Rgba<u8>) -> RgbaImage {
    if width == 0 {
        return image.clone();
    }

    let (w, h) = image.dimensions();
    let mut framed = RgbaImage::from_pixel(w + 2 * width, h + 2 * width, color);
    imageops::replace(&mut framed, image, i64::from(width), i64::from(width));
    framed
}

// ============================================================================
// Crop
// ============================================================================

/// Crops `image` to the element plus `safe_area` pixels on every side,
/// clamped to the image.
#[must_use]
pub fn crop_around(image: &RgbaImage, bbox: &BoundingBox, safe_area: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    let s = f64::from(safe_area);

    let left = (bbox.x1() - s).max(0.0).min(f64::from(w)) as u32;
    let top = (bbox.y1() - s).max(0.0).min(f64::from(h)) as u32;
    let right = (bbox.x2() + s).min(f64::from(w)).max(f64::from(left)) as u32;
    let bottom = (bbox.y2() + s).min(f64::from(h)).max(f64::from(top)) as u32;

    debug!(left, top, right, bottom, "Cropping around element");

    imageops::crop_imm(image, left, top, right - left, bottom - top).to_image()
}

// ============================================================================
// Resize
// ============================================================================

/// How to scale a cropped element image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeMode {
    /// Scale both sides by a percentage.
    Scale(u32),
    /// Scale to a fixed width, keeping the aspect ratio.
    FitWidth(u32),
}

impl Default for ResizeMode {
    fn default() -> Self {
        Self::FitWidth(500)
    }
}

impl ResizeMode {
    /// Scales both sides to 70%.
    pub const DEFAULT_SCALE: Self = Self::Scale(70);

    /// Target size for an image of `width x height`.
    ///
    /// `None` when the percentage scale would shrink a side below 1px.
    #[must_use]
    pub fn target_size(self, width: u32, height: u32) -> Option<(u32, u32)> {
        let (w, h) = (u64::from(width), u64::from(height));
        match self {
            Self::Scale(percent) => {
                let p = u64::from(percent);
                let tw = w * p / 100;
                let th = h * p / 100;
                let (tw, th) = (u32::try_from(tw).ok()?, u32::try_from(th).ok()?);
                (tw >= 1 && th >= 1).then_some((tw, th))
            }
            Self::FitWidth(target) => {
                // Images too small for a 70% scale are left alone.
                Self::DEFAULT_SCALE.target_size(width, height)?;
                let th = u32::try_from(h * u64::from(target) / w).ok()?;
                (target >= 1 && th >= 1).then_some((target, th))
            }
        }
    }
}

/// Resizes with a bilinear filter.
///
/// Returns `None` when the target size would be empty; callers then keep the
/// original image.
#[must_use]
pub fn resize(image: &RgbaImage, mode: ResizeMode) -> Option<RgbaImage> {
    let (width, height) = image.dimensions();
    let (tw, th) = mode.target_size(width, height)?;
    debug!(width, height, target_width = tw, target_height = th, "Resizing");
    Some(imageops::resize(image, tw, th, FilterType::Triangle))
}

// ============================================================================
// Tests
// ============================================================================
