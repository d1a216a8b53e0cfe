//! Element capture configuration.
//!
//! # Example
//!
//! ```ignore
//! use element_annotator::{CaptureOptions, ResizeMode};
//!
//! let options = CaptureOptions::new()
//!     .with_safe_area(200)
//!     .with_resize(ResizeMode::Scale(70))
//!     .with_hide_cookie_banners();
//! ```

use serde::{Deserialize, Serialize};

use crate::annotate::AnnotationStyle;
use crate::error::{Error, Result};
use crate::imaging::{DEFAULT_SAFE_AREA, ResizeMode};

// ============================================================================
// CaptureOptions
// ============================================================================

/// How element screenshots are taken and post-processed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Draw the outline and arrow before cropping.
    pub annotate: bool,

    /// Context kept around the element when cropping, in pixels.
    pub safe_area: u32,

    /// Resize applied by batch capture. `None` keeps the crop as is.
    pub resize: Option<ResizeMode>,

    /// Hide cookie overlays covering the element before the screenshot.
    ///
    /// Only applies when another element is on top at the element's
    /// top-left corner; overlays elsewhere are left alone.
    pub hide_cookie_banners: bool,

    /// Drawing style.
    pub style: AnnotationStyle,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Constructors
// ============================================================================

impl CaptureOptions {
    /// Creates options with annotation on, 400px context and 500px wide output.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            annotate: true,
            safe_area: DEFAULT_SAFE_AREA,
            resize: Some(ResizeMode::FitWidth(500)),
            hide_cookie_banners: false,
            style: AnnotationStyle::new(),
        }
    }

    /// Creates options that crop the raw screenshot without drawing.
    #[inline]
    #[must_use]
    pub fn plain() -> Self {
        Self {
            annotate: false,
            ..Self::new()
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl CaptureOptions {
    /// Enables or disables drawing.
    #[inline]
    #[must_use]
    pub fn with_annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Sets the crop context.
    #[inline]
    #[must_use]
    pub fn with_safe_area(mut self, safe_area: u32) -> Self {
        self.safe_area = safe_area;
        self
    }

    /// Sets the batch resize mode.
    #[inline]
    #[must_use]
    pub fn with_resize(mut self, mode: ResizeMode) -> Self {
        self.resize = Some(mode);
        self
    }

    /// Disables batch resizing.
    #[inline]
    #[must_use]
    pub fn without_resize(mut self) -> Self {
        self.resize = None;
        self
    }

    /// Hides cookie overlays before capturing.
    #[inline]
    #[must_use]
    pub fn with_hide_cookie_banners(mut self) -> Self {
        self.hide_cookie_banners = true;
        self
    }

    /// Sets the drawing style.
    #[inline]
    #[must_use]
    pub fn with_style(mut self, style: AnnotationStyle) -> Self {
        self.style = style;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl CaptureOptions {
    /// Validates the options.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for a zero resize target or an
    /// invalid style.
    pub fn validate(&self) -> Result<()> {
        match self.resize {
            Some(ResizeMode::Scale(0)) => {
                return Err(Error::invalid_argument("resize percentage must be positive"));
            }
            Some(ResizeMode::FitWidth(0)) => {
                return Err(Error::invalid_argument("resize width must be positive"));
            }
            _ => {}
        }
        self.style.validate()
    }
}

// ============================================================================
// Tests
// ============================================================================
