//! Element highlighting.
//!
//! # Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | `placement` | Free-space search for the arrow |
//! | `arrow` | Arrow stroke geometry |
//! | `contour` | Outline color from surrounding pixels |
//! | `style` | Stroke and frame dimensions |
//! | `render` | [`Annotator`]: draws everything onto the image |
//!
//! # Example
//!
//! ```ignore
//! let bbox = BoundingBox::new(400.0, 400.0, 600.0, 600.0)?;
//! let placement = find_placement(&bbox, CanvasSize::new(1000, 1000));
//! // Some(Placement { anchor: (390, 610), direction: BottomLeft })
//!
//! let annotated = Annotator::default().annotate(&bbox, screenshot)?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

pub mod arrow;
pub mod contour;
pub mod placement;
mod render;
mod style;

// ============================================================================
// Re-exports
// ============================================================================

pub use arrow::{ArrowShape, Segment, arrow_segments};
pub use contour::{ContourColor, pick_contour_color};
pub use placement::{Direction, Placement, find_placement};
pub use render::{Annotator, Highlight};
pub use style::AnnotationStyle;
