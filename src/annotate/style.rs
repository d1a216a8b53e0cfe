//! Annotation stroke and frame dimensions.
//!
//! # Example
//!
//! ```ignore
//! use element_annotator::AnnotationStyle;
//!
//! let style = AnnotationStyle::new()
//!     .with_outline_width(6.0)
//!     .with_border_width(0);
//!
//! assert!(style.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::arrow::ArrowShape;

// ============================================================================
// AnnotationStyle
// ============================================================================

/// Dimensions used when drawing an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationStyle {
    /// Width of the rectangle outline, drawn inside the element box.
    pub outline_width: f32,

    /// Width of the arrow strokes.
    pub arrow_width: f32,

    /// Arrow shaft length.
    pub arrow_length: f64,

    /// Length of the arrow head strokes along the shaft.
    pub head_length: f64,

    /// Sideways spread of each head stroke.
    pub head_half_width: f64,

    /// Width of the frame added around the whole image.
    pub border_width: u32,

    /// RGB color of the frame.
    pub border_color: [u8; 3],
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl AnnotationStyle {
    /// Creates the default style: 4px strokes, 150px arrow, 3px black frame.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outline_width: 4.0,
            arrow_width: 4.0,
            arrow_length: 150.0,
            head_length: 50.0,
            head_half_width: 10.0,
            border_width: 3,
            border_color: [0, 0, 0],
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl AnnotationStyle {
    /// Sets the outline width.
    #[inline]
    #[must_use]
    pub fn with_outline_width(mut self, width: f32) -> Self {
        self.outline_width = width;
        self
    }

    /// Sets the arrow stroke width.
    #[inline]
    #[must_use]
    pub fn with_arrow_width(mut self, width: f32) -> Self {
        self.arrow_width = width;
        self
    }

    /// Sets shaft length, head length and head half width.
    #[inline]
    #[must_use]
    pub fn with_arrow(mut self, length: f64, head_length: f64, head_half_width: f64) -> Self {
        self.arrow_length = length;
        self.head_length = head_length;
        self.head_half_width = head_half_width;
        self
    }

    /// Sets the frame width. Zero disables the frame.
    #[inline]
    #[must_use]
    pub fn with_border_width(mut self, width: u32) -> Self {
        self.border_width = width;
        self
    }

    /// Sets the frame color.
    #[inline]
    #[must_use]
    pub fn with_border_color(mut self, rgb: [u8; 3]) -> Self {
        self.border_color = rgb;
        self
    }
}

// ============================================================================
// Conversion Methods
// ============================================================================

impl AnnotationStyle {
    /// Arrow dimensions.
    #[inline]
    #[must_use]
    pub fn arrow_shape(&self) -> ArrowShape {
        ArrowShape {
            length: self.arrow_length,
            head_length: self.head_length,
            head_half_width: self.head_half_width,
        }
    }

    /// Validates the style.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a stroke width is not positive
    /// or an arrow dimension is negative.
    pub fn validate(&self) -> Result<()> {
        if !(self.outline_width.is_finite() && self.outline_width > 0.0) {
            return Err(Error::invalid_argument(format!(
                "outline width must be positive, got {}",
                self.outline_width
            )));
        }
        if !(self.arrow_width.is_finite() && self.arrow_width > 0.0) {
            return Err(Error::invalid_argument(format!(
                "arrow width must be positive, got {}",
                self.arrow_width
            )));
        }
        let arrow = [self.arrow_length, self.head_length, self.head_half_width];
        if arrow.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(Error::invalid_argument(format!(
                "arrow dimensions must be non-negative, got {arrow:?}"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
