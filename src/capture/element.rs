//! Element screenshots.
//!
//! For each element: scroll it into view, read its client rect, take a
//! viewport screenshot, highlight the element and crop around it.
//!
//! # Example
//!
//! ```ignore
//! let capture = ElementCapture::new(&tab, CaptureOptions::new())?;
//!
//! if let Some(image) = capture.capture("#submit").await? {
//!     image.save("submit.png")?;
//! }
//!
//! // One entry per selector, `None` for elements that could not be shot.
//! let images = capture.capture_all(&["#logo", "nav a", ".footer"]).await;
//! ```

use image::RgbaImage;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::annotate::Annotator;
use crate::error::{Error, Result};
use crate::geometry::BoundingBox;
use crate::imaging;

use super::options::CaptureOptions;
use super::page::{Page, eval_as, json_string};

// ============================================================================
// Types
// ============================================================================

/// One entry of `getClientRects()`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ClientRect {
    /// Left edge in viewport pixels.
    pub x: f64,
    /// Top edge in viewport pixels.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl ClientRect {
    fn area(&self) -> f64 {
        self.width * self.height
    }

    fn to_box(self) -> Result<BoundingBox> {
        BoundingBox::from_rect(self.x, self.y, self.width, self.height)
    }
}

/// Raw result of the locate script.
#[derive(Debug, Clone, Deserialize)]
struct LocatedRects {
    /// First client rect of the element itself.
    own: Option<ClientRect>,
    /// First non-degenerate rect walking up from the element.
    visible: Option<ClientRect>,
    /// Computed style leaves the element visible.
    displayed: bool,
}

/// Where an element is on the current screenshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementGeometry {
    /// Box that gets outlined.
    pub highlight: BoundingBox,
    /// Box the crop is centred on.
    pub crop: BoundingBox,
}

impl ElementGeometry {
    /// Resolves the located rects.
    ///
    /// A visible element with area is both outlined and cropped on. An
    /// element with zero width or height is outlined as a line, and its
    /// nearest non-empty ancestor provides the crop.
    fn resolve(rects: LocatedRects) -> Result<Option<Self>> {
        let Some(own) = rects.own else {
            return Ok(None);
        };

        if own.area() > 0.0 && rects.displayed {
            let bbox = own.to_box()?;
            return Ok(Some(Self {
                highlight: bbox,
                crop: bbox,
            }));
        }

        if own.width == 0.0 || own.height == 0.0 {
            let Some(visible) = rects.visible.filter(|r| r.area() > 0.0) else {
                return Ok(None);
            };
            return Ok(Some(Self {
                highlight: own.to_box()?,
                crop: visible.to_box()?,
            }));
        }

        Ok(None)
    }
}

// ============================================================================
// Scripts
// ============================================================================

/// Builds the script returning [`LocatedRects`] for `selector`.
fn locate_script(selector: &str) -> String {
    format!(
        r#"
        const el = document.querySelector({sel});
        if (!el) return null;
        const first = (node) => {{
            const r = node.getClientRects()[0];
            return r ? {{ x: r.x, y: r.y, width: r.width, height: r.height }} : null;
        }};
        const own = first(el);
        let visible = own;
        let node = el;
        while (visible && (visible.width === 0 || visible.height === 0) && node.parentElement) {{
            node = node.parentElement;
            visible = first(node);
        }}
        const style = window.getComputedStyle(el);
        const displayed = style.display !== 'none' && style.visibility !== 'hidden';
        return {{ own, visible, displayed }};
        "#,
        sel = json_string(selector)
    )
}

fn scroll_into_view_script(selector: &str) -> String {
    format!(
        "const el = document.querySelector({}); if (el) el.scrollIntoView();",
        json_string(selector)
    )
}

/// Hides overlays at `(x, y)` whose markup mentions cookies.
///
/// Does nothing unless something other than the element is on top at that
/// point.
fn hide_cookie_banners_script(selector: &str, x: f64, y: f64) -> String {
    format!(
        r#"
        const target = document.querySelector({sel});
        const top = document.elementFromPoint({x}, {y});
        if (!target || !top || top === target || target.contains(top)) return 0;
        let hidden = 0;
        for (const e of document.elementsFromPoint({x}, {y})) {{
            if (['BODY', 'HTML', 'SCRIPT'].includes(e.tagName)) continue;
            if (e === target || (target && e.contains(target))) continue;
            if (e.outerHTML.includes('cookie')) {{
                e.style.display = 'none';
                hidden += 1;
            }}
        }}
        return hidden;
        "#,
        sel = json_string(selector)
    )
}

// ============================================================================
// ElementCapture
// ============================================================================

/// Captures annotated element screenshots from a [`Page`].
pub struct ElementCapture<'a, P: Page + ?Sized> {
    page: &'a P,
    options: CaptureOptions,
    annotator: Annotator,
}

impl<'a, P: Page + ?Sized> ElementCapture<'a, P> {
    /// Creates a capture pipeline for `page`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the options fail validation.
    pub fn new(page: &'a P, options: CaptureOptions) -> Result<Self> {
        options.validate()?;
        let annotator = Annotator::new(options.style)?;
        Ok(Self {
            page,
            options,
            annotator,
        })
    }

    /// Returns the capture options.
    #[inline]
    #[must_use]
    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    /// Scrolls `selector` into view and reads its geometry.
    ///
    /// Returns `None` when the element is missing, has no client rects, or
    /// is not displayed.
    pub async fn locate(&self, selector: &str) -> Result<Option<ElementGeometry>> {
        self.page.scroll_to(0, 0).await?;
        self.page
            .execute_script(&scroll_into_view_script(selector))
            .await?;

        let rects: Option<LocatedRects> = eval_as(self.page, &locate_script(selector)).await?;
        let geometry = match rects {
            Some(rects) => ElementGeometry::resolve(rects)?,
            None => None,
        };

        debug!(selector, geometry = ?geometry, "Located element");
        Ok(geometry)
    }

    /// Captures one element, cropped around it.
    ///
    /// Returns `None` when the element cannot be located.
    pub async fn capture(&self, selector: &str) -> Result<Option<RgbaImage>> {
        let Some(geometry) = self.locate(selector).await? else {
            return Ok(None);
        };

        if self.options.annotate && self.options.hide_cookie_banners {
            let script =
                hide_cookie_banners_script(selector, geometry.crop.x1(), geometry.crop.y1());
            let hidden = self.page.execute_script(&script).await?;
            debug!(selector, hidden = %hidden, "Hid cookie overlays");
        }

        let screenshot = self.page.screenshot_image().await?;
        let annotate = self.options.annotate;
        let annotator = self.annotator;
        let safe_area = self.options.safe_area;

        let cropped = tokio::task::spawn_blocking(move || -> Result<RgbaImage> {
            if !annotate {
                return Ok(imaging::crop_around(&screenshot, &geometry.crop, safe_area));
            }
            let framed = annotator.annotate(&geometry.highlight, screenshot)?;
            // The frame shifts the page content by the border width.
            let border = f64::from(annotator.style().border_width);
            let crop = geometry.crop.translate(border, border)?;
            Ok(imaging::crop_around(&framed, &crop, safe_area))
        })
        .await
        .map_err(|e| Error::render(format!("annotation task failed: {e}")))??;

        Ok(Some(cropped))
    }

    /// Captures every selector in order.
    ///
    /// Each image is resized per [`CaptureOptions::resize`], keeping the
    /// unresized crop when the resize would be empty. Failures are logged and
    /// recorded as `None` so one bad element does not stop the batch.
    pub async fn capture_all<S: AsRef<str>>(&self, selectors: &[S]) -> Vec<Option<RgbaImage>> {
        if let Err(e) = self.page.scroll_to(0, 0).await {
            warn!(error = %e, "Failed to reset scroll position");
        }

        let mut images = Vec::with_capacity(selectors.len());
        for selector in selectors {
            let selector = selector.as_ref();
            let image = match self.capture(selector).await {
                Ok(image) => image,
                Err(e) => {
                    warn!(selector, error = %e, recoverable = e.is_recoverable(), "Element capture failed");
                    None
                }
            };

            images.push(image.map(|image| match self.options.resize {
                Some(mode) => imaging::resize(&image, mode).unwrap_or(image),
                None => image,
            }));
        }
        images
    }
}

// ============================================================================
// Tests
// ============================================================================
