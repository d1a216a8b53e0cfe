//! Error types for element annotation.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use element_annotator::{Annotator, BoundingBox, Result};
//!
//! fn example(image: image::RgbaImage) -> Result<image::RgbaImage> {
//!     let bbox = BoundingBox::new(40.0, 40.0, 120.0, 80.0)?;
//!     Annotator::default().annotate(&bbox, image)
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Input | [`Error::InvalidBoundingBox`], [`Error::InvalidArgument`] |
//! | Drawing | [`Error::Render`] |
//! | Page | [`Error::Script`], [`Error::Capture`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::Image`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use image::ImageError;
use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Input Errors
    // ========================================================================
    /// Malformed bounding box.
    ///
    /// Returned when coordinates are not finite, negative, or inverted.
    #[error("Invalid bounding box: {message}")]
    InvalidBoundingBox {
        /// Description of what is wrong with the box.
        message: String,
    },

    /// Invalid configuration value.
    ///
    /// Returned when style or capture options fail validation.
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: String,
    },

    // ========================================================================
    // Drawing Errors
    // ========================================================================
    /// Drawing onto the pixel buffer failed.
    ///
    /// Returned when the image cannot be wrapped for rendering.
    #[error("Render error: {message}")]
    Render {
        /// Description of the rendering failure.
        message: String,
    },

    // ========================================================================
    // Page Errors
    // ========================================================================
    /// Unexpected script result from the page.
    ///
    /// Returned when a script value is missing fields or has the wrong shape.
    #[error("Script error: {message}")]
    Script {
        /// Description of the script failure.
        message: String,
    },

    /// Screenshot payload missing or undecodable.
    #[error("Capture error: {message}")]
    Capture {
        /// Description of the capture failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Image decoding or encoding error.
    #[error("Image error: {0}")]
    Image(#[from] ImageError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates an invalid bounding box error.
    #[inline]
    pub fn invalid_bounding_box(message: impl Into<String>) -> Self {
        Self::InvalidBoundingBox {
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[inline]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a render error.
    #[inline]
    pub fn render(message: impl Into<String>) -> Self {
        Self::Render {
            message: message.into(),
        }
    }

    /// Creates a script error.
    #[inline]
    pub fn script(message: impl Into<String>) -> Self {
        Self::Script {
            message: message.into(),
        }
    }

    /// Creates a capture error.
    #[inline]
    pub fn capture(message: impl Into<String>) -> Self {
        Self::Capture {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if the error was caused by caller input.
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidBoundingBox { .. } | Self::InvalidArgument { .. }
        )
    }

    /// Returns `true` if the error came from the page collaborator.
    #[inline]
    #[must_use]
    pub fn is_page_error(&self) -> bool {
        matches!(self, Self::Script { .. } | Self::Capture { .. })
    }

    /// Returns `true` if this error only affects a single element.
    ///
    /// Batch callers skip the element and continue with the next one.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::InvalidBoundingBox { .. }
                | Self::Render { .. }
                | Self::Script { .. }
                | Self::Capture { .. }
                | Self::Image(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
