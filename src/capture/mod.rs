//! Screenshots driven through a browser [`Page`].
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `page` | [`Page`] trait implemented by the automation backend |
//! | `element` | Annotated element screenshots |
//! | `full_page` | Tile stitching and infinite scroll detection |
//! | `options` | [`CaptureOptions`] |
//!
//! # Example
//!
//! ```ignore
//! let capture = ElementCapture::new(&tab, CaptureOptions::new())?;
//! let images = capture.capture_all(&["#login", "#signup"]).await;
//!
//! let page_image = capture_full_page(&tab).await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

mod element;
mod full_page;
mod options;
mod page;

#[cfg(test)]
pub(crate) mod testing;

// ============================================================================
// Re-exports
// ============================================================================

pub use element::{ClientRect, ElementCapture, ElementGeometry};
pub use full_page::{
    INFINITE_SCROLL_LIMIT, PageMetrics, Tile, capture_full_page, detect_infinite_scroll,
    plan_tiles, tile_offset,
};
pub use options::CaptureOptions;
pub use page::Page;
