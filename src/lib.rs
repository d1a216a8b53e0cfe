//! Element Annotator - highlight web page elements on screenshots.
//!
//! Given an element's bounding box on a captured page image, this library
//! outlines the element, points an arrow at it from whichever side has free
//! space, and frames, crops and resizes the result. A capture pipeline drives
//! any browser backend through the small [`Page`] trait, and can also stitch
//! full-page screenshots from viewport tiles.
//!
//! # Quick Start
//!
//! ```no_run
//! use element_annotator::{Annotator, BoundingBox, Result};
//!
//! fn main() -> Result<()> {
//!     let screenshot = image::open("page.png")?.to_rgba8();
//!     let bbox = BoundingBox::new(400.0, 400.0, 600.0, 600.0)?;
//!
//!     let annotated = Annotator::default().annotate(&bbox, screenshot)?;
//!     annotated.save("annotated.png")?;
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`annotate`] | Placement, contour color, arrow geometry, [`Annotator`] |
//! | [`capture`] | [`Page`] trait, element and full-page capture |
//! | [`geometry`] | [`BoundingBox`], [`Point`], [`CanvasSize`] |
//! | [`imaging`] | Frame, crop and resize helpers |
//! | [`error`] | Error types and [`Result`] alias |
//!
//! # Placement
//!
//! The arrow goes where the element keeps at least
//! [`SAFE_MARGIN`](annotate::placement::SAFE_MARGIN) pixels to the canvas
//! edge. Corners are tried before edges, in the order bottom-left,
//! top-right, top-left, bottom-right, left, top, right, bottom. When the
//! element spans the safe band on both axes no arrow is drawn.

// ============================================================================
// Modules
// ============================================================================

/// Element highlighting: placement, color, arrow and rendering.
pub mod annotate;

/// Browser-driven element and full-page capture.
pub mod capture;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Pixel-space geometry types.
pub mod geometry;

/// Frame, crop and resize helpers.
pub mod imaging;

// ============================================================================
// Re-exports
// ============================================================================

// Annotation types
pub use annotate::{
    AnnotationStyle, Annotator, ArrowShape, ContourColor, Direction, Highlight, Placement,
    Segment, arrow_segments, find_placement, pick_contour_color,
};

// Capture types
pub use capture::{
    CaptureOptions, ElementCapture, ElementGeometry, Page, capture_full_page,
    detect_infinite_scroll,
};

// Error types
pub use error::{Error, Result};

// Geometry types
pub use geometry::{BoundingBox, CanvasSize, Point};

// Imaging helpers
pub use imaging::{ResizeMode, add_border, crop_around, resize};
