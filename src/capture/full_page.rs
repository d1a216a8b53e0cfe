//! Full-page screenshots stitched from viewport tiles.

use image::{Rgba, RgbaImage, imageops};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

use super::page::{Page, eval_as};

// ============================================================================
// Constants
// ============================================================================

/// Scroll height beyond which a page is treated as infinitely scrolling.
pub const INFINITE_SCROLL_LIMIT: u64 = 20_000;

const PAGE_METRICS_SCRIPT: &str = r#"
    return {
        total_width: document.body.offsetWidth,
        total_height: document.body.parentNode.scrollHeight,
        viewport_width: document.body.clientWidth,
        viewport_height: window.innerHeight
    };
"#;

const SCROLL_HEIGHT_SCRIPT: &str = "return document.body.scrollHeight;";

const VIEWPORT_HEIGHT_SCRIPT: &str = "return window.innerHeight;";

// ============================================================================
// Types
// ============================================================================

/// Page and viewport dimensions in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageMetrics {
    /// Width of the document body.
    pub total_width: u32,
    /// Scroll height of the document.
    pub total_height: u32,
    /// Visible width of the body.
    pub viewport_width: u32,
    /// Height of the window viewport.
    pub viewport_height: u32,
}

/// One viewport-sized region of the page, `[x, right) x [y, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    /// Left edge, inclusive.
    pub x: u32,
    /// Top edge, inclusive.
    pub y: u32,
    /// Right edge, exclusive.
    pub right: u32,
    /// Bottom edge, exclusive.
    pub bottom: u32,
}

// ============================================================================
// Planning
// ============================================================================

/// Splits the page into row-major tiles stepping by the viewport size.
///
/// Tiles on the last row and column are clipped to the page. An empty
/// viewport yields no tiles.
#[must_use]
pub fn plan_tiles(metrics: &PageMetrics) -> Vec<Tile> {
    let PageMetrics {
        total_width,
        total_height,
        viewport_width,
        viewport_height,
    } = *metrics;

    if viewport_width == 0 || viewport_height == 0 {
        return Vec::new();
    }

    let mut tiles = Vec::new();
    for y in (0..total_height).step_by(viewport_height as usize) {
        let bottom = (y + viewport_height).min(total_height);
        for x in (0..total_width).step_by(viewport_width as usize) {
            let right = (x + viewport_width).min(total_width);
            tiles.push(Tile {
                x,
                y,
                right,
                bottom,
            });
        }
    }
    tiles
}

/// Where a tile's screenshot is pasted.
///
/// The browser cannot scroll past the end of the page, so the last row is
/// captured aligned to the page bottom and pasted there.
#[must_use]
pub fn tile_offset(tile: &Tile, viewport_height: u32, total_height: u32) -> (i64, i64) {
    let y = if u64::from(tile.y) + u64::from(viewport_height) > u64::from(total_height) {
        i64::from(total_height) - i64::from(viewport_height)
    } else {
        i64::from(tile.y)
    };
    (i64::from(tile.x), y)
}

// ============================================================================
// Capture
// ============================================================================

/// Captures the whole page by scrolling through it tile by tile.
///
/// # Errors
///
/// Returns [`Error::Script`] if the page reports an empty size, or any error
/// from scrolling and capturing.
pub async fn capture_full_page<P: Page + ?Sized>(page: &P) -> Result<RgbaImage> {
    page.scroll_to(0, 0).await?;

    let metrics: PageMetrics = eval_as(page, PAGE_METRICS_SCRIPT).await?;
    if metrics.total_width == 0 || metrics.total_height == 0 {
        return Err(Error::script(format!("page has no area: {metrics:?}")));
    }

    let tiles = plan_tiles(&metrics);
    info!(
        width = metrics.total_width,
        height = metrics.total_height,
        tiles = tiles.len(),
        "Capturing full page"
    );

    let mut stitched = RgbaImage::from_pixel(
        metrics.total_width,
        metrics.total_height,
        Rgba([0, 0, 0, 255]),
    );

    for (index, tile) in tiles.iter().enumerate() {
        if index > 0 {
            page.scroll_to(i64::from(tile.x), i64::from(tile.y)).await?;
        }
        let shot = page.screenshot_image().await?;
        let (x, y) = tile_offset(tile, metrics.viewport_height, metrics.total_height);

        debug!(index, x, y, "Pasting tile");
        imageops::replace(&mut stitched, &shot, x, y);
    }

    Ok(stitched)
}

/// Returns `true` if the page keeps growing while scrolling to its end.
///
/// Scrolls to the bottom one viewport step at a time. Stops with `false`
/// once the steps cover the page, or with `true` as soon as the scroll
/// height exceeds [`INFINITE_SCROLL_LIMIT`].
///
/// # Errors
///
/// Returns [`Error::Script`] if the viewport height is zero.
pub async fn detect_infinite_scroll<P: Page + ?Sized>(page: &P) -> Result<bool> {
    let mut total_height: u64 = eval_as(page, SCROLL_HEIGHT_SCRIPT).await?;
    let viewport: u64 = eval_as(page, VIEWPORT_HEIGHT_SCRIPT).await?;
    if viewport == 0 {
        return Err(Error::script("viewport height is zero"));
    }

    let mut covered = 0;
    while covered < total_height {
        covered += viewport;
        page.scroll_to(0, total_height as i64).await?;
        total_height = eval_as(page, SCROLL_HEIGHT_SCRIPT).await?;
        debug!(covered, total_height, "Scrolled to bottom");

        if total_height > INFINITE_SCROLL_LIMIT {
            return Ok(true);
        }
    }
    Ok(false)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::capture::testing::ScriptedPage;

    fn metrics(tw: u32, th: u32, vw: u32, vh: u32) -> PageMetrics {
        PageMetrics {
            total_width: tw,
            total_height: th,
            viewport_width: vw,
            viewport_height: vh,
        }
    }

    /// Page image with a distinct color per 10px row band.
    fn striped(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(y / 10 % 256) as u8, (x / 10 % 256) as u8, 100, 255])
        })
    }

    #[test]
    fn test_plan_tiles_covers_page() {
        let tiles = plan_tiles(&metrics(1000, 2500, 1000, 800));
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[0], Tile { x: 0, y: 0, right: 1000, bottom: 800 });
        assert_eq!(tiles[3], Tile { x: 0, y: 2400, right: 1000, bottom: 2500 });
    }

    #[test]
    fn test_plan_tiles_row_major() {
        let tiles = plan_tiles(&metrics(1500, 900, 1000, 600));
        let origins: Vec<_> = tiles.iter().map(|t| (t.x, t.y)).collect();
        assert_eq!(origins, vec![(0, 0), (1000, 0), (0, 600), (1000, 600)]);
        assert_eq!(tiles[1].right, 1500);
    }

    #[test]
    fn test_plan_tiles_empty_viewport() {
        assert!(plan_tiles(&metrics(1000, 1000, 0, 800)).is_empty());
    }

    #[test]
    fn test_tile_offset_clamps_last_row() {
        let tile = Tile { x: 0, y: 2400, right: 1000, bottom: 2500 };
        assert_eq!(tile_offset(&tile, 800, 2500), (0, 1700));

        let tile = Tile { x: 0, y: 800, right: 1000, bottom: 1600 };
        assert_eq!(tile_offset(&tile, 800, 2500), (0, 800));
    }

    #[tokio::test]
    async fn test_capture_full_page_matches_document() {
        let document = striped(300, 1000);
        let page = ScriptedPage::new(document.clone(), (300, 400)).respond(
            "total_width",
            json!({
                "total_width": 300,
                "total_height": 1000,
                "viewport_width": 300,
                "viewport_height": 400
            }),
        );

        let stitched = capture_full_page(&page).await.unwrap();
        assert_eq!(stitched.dimensions(), (300, 1000));
        assert_eq!(stitched.as_raw(), document.as_raw());
        assert_eq!(page.screenshot_count(), 3);
    }

    #[tokio::test]
    async fn test_capture_full_page_rejects_empty_page() {
        let page = ScriptedPage::new(RgbaImage::new(1, 1), (1, 1)).respond(
            "total_width",
            json!({
                "total_width": 0,
                "total_height": 0,
                "viewport_width": 300,
                "viewport_height": 400
            }),
        );
        assert!(matches!(
            capture_full_page(&page).await,
            Err(Error::Script { .. })
        ));
    }

    #[tokio::test]
    async fn test_detect_infinite_scroll_finite_page() {
        let page = ScriptedPage::new(RgbaImage::new(10, 3000), (10, 1000))
            .respond("scrollHeight", json!(3000))
            .respond("innerHeight", json!(1000));
        assert!(!detect_infinite_scroll(&page).await.unwrap());
    }

    #[tokio::test]
    async fn test_detect_infinite_scroll_growing_page() {
        let page = ScriptedPage::new(RgbaImage::new(10, 10), (10, 10))
            .respond("scrollHeight", json!(25_000))
            .respond("innerHeight", json!(1000));
        assert!(detect_infinite_scroll(&page).await.unwrap());
    }

    #[tokio::test]
    async fn test_detect_infinite_scroll_zero_viewport() {
        let page = ScriptedPage::new(RgbaImage::new(10, 10), (10, 10))
            .respond("scrollHeight", json!(3000))
            .respond("innerHeight", json!(0));
        assert!(detect_infinite_scroll(&page).await.is_err());
    }
}
