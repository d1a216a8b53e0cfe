//! Drawing the highlight onto a screenshot.

use image::RgbaImage;
use serde::Serialize;
use tiny_skia::{IntSize, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform};
use tracing::debug;

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, CanvasSize};
use crate::imaging;

use super::arrow::{Segment, arrow_segments};
use super::contour::{ContourColor, pick_contour_color};
use super::placement::{Placement, find_placement};
use super::style::AnnotationStyle;

// ============================================================================
// Types
// ============================================================================

/// What was drawn for one element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Highlight {
    /// Outline and arrow color.
    pub color: ContourColor,
    /// Arrow placement, `None` when no arrow was drawn.
    pub placement: Option<Placement>,
}

// ============================================================================
// Annotator
// ============================================================================

/// Draws element highlights: outline, optional arrow and an image frame.
///
/// Stateless apart from its style; one annotator can serve any number of
/// images, including from several threads.
///
/// # Example
///
/// ```ignore
/// let annotator = Annotator::default();
/// let bbox = BoundingBox::new(400.0, 400.0, 600.0, 600.0)?;
/// let annotated = annotator.annotate(&bbox, screenshot)?;
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Annotator {
    style: AnnotationStyle,
}

impl Annotator {
    /// Creates an annotator with a custom style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the style fails validation.
    pub fn new(style: AnnotationStyle) -> Result<Self> {
        style.validate()?;
        Ok(Self { style })
    }

    /// Returns the drawing style.
    #[inline]
    #[must_use]
    pub fn style(&self) -> &AnnotationStyle {
        &self.style
    }

    /// Highlights `bbox` and frames the image.
    ///
    /// The returned image is `2 * border_width` larger in each dimension and
    /// replaces the input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the image cannot be drawn on.
    pub fn annotate(&self, bbox: &BoundingBox, mut image: RgbaImage) -> Result<RgbaImage> {
        self.highlight(bbox, &mut image)?;
        let [r, g, b] = self.style.border_color;
        Ok(imaging::add_border(
            &image,
            self.style.border_width,
            image::Rgba([r, g, b, 255]),
        ))
    }

    /// Draws the outline and arrow in place, without the frame.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the image cannot be drawn on.
    pub fn highlight(&self, bbox: &BoundingBox, image: &mut RgbaImage) -> Result<Highlight> {
        let color = pick_contour_color(bbox, image);
        let placement = find_placement(bbox, CanvasSize::of(image));

        debug!(
            bbox = %bbox,
            color = ?color,
            direction = ?placement.map(|p| p.direction),
            "Drawing highlight"
        );

        with_pixmap(image, |pixmap| {
            let paint = solid_paint(color);
            draw_outline(pixmap, bbox, self.style.outline_width, &paint);

            if let Some(placement) = placement {
                let segments =
                    arrow_segments(placement.anchor, self.style.arrow_shape(), placement.direction);
                draw_segments(pixmap, &segments, self.style.arrow_width, &paint);
            }
        })?;

        Ok(Highlight { color, placement })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Wraps the image in a pixmap, draws, and copies the pixels back.
fn with_pixmap(image: &mut RgbaImage, draw: impl FnOnce(&mut Pixmap)) -> Result<()> {
    let (width, height) = image.dimensions();
    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| Error::render(format!("cannot draw on a {width}x{height} image")))?;
    let mut pixmap = Pixmap::from_vec(image.as_raw().clone(), size)
        .ok_or_else(|| Error::render("pixel buffer does not match image size"))?;

    draw(&mut pixmap);

    image.copy_from_slice(pixmap.data());
    Ok(())
}

fn solid_paint(color: ContourColor) -> Paint<'static> {
    let [r, g, b] = color.rgb();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, 255);
    // Crisp pixels keep repeated runs byte-identical and the outline solid.
    paint.anti_alias = false;
    paint
}

/// Fills four bands inside the box edges.
///
/// Edges are inclusive, so a zero-width box still renders as a 1px line.
fn draw_outline(pixmap: &mut Pixmap, bbox: &BoundingBox, width: f32, paint: &Paint<'_>) {
    let x = bbox.x1() as f32;
    let y = bbox.y1() as f32;
    let span_w = bbox.width() as f32 + 1.0;
    let span_h = bbox.height() as f32 + 1.0;
    let band_x = width.min(span_w);
    let band_y = width.min(span_h);

    let bands = [
        Rect::from_xywh(x, y, span_w, band_y),
        Rect::from_xywh(x, y + span_h - band_y, span_w, band_y),
        Rect::from_xywh(x, y, band_x, span_h),
        Rect::from_xywh(x + span_w - band_x, y, band_x, span_h),
    ];

    for band in bands.into_iter().flatten() {
        pixmap.fill_rect(band, paint, Transform::identity(), None);
    }
}

fn draw_segments(pixmap: &mut Pixmap, segments: &[Segment], width: f32, paint: &Paint<'_>) {
    let mut pb = PathBuilder::new();
    for segment in segments {
        pb.move_to(segment.start.x as f32, segment.start.y as f32);
        pb.line_to(segment.end.x as f32, segment.end.y as f32);
    }
    let Some(path) = pb.finish() else {
        return;
    };

    let stroke = Stroke {
        width,
        ..Default::default()
    };
    pixmap.stroke_path(&path, paint, &stroke, Transform::identity(), None);
}

// ============================================================================
// Tests
// ============================================================================
