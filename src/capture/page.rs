//! The browser page as seen by the capture pipeline.
//!
//! Any automation backend can drive the pipeline by implementing the two
//! required methods of [`Page`]; everything else is expressed as scripts.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use image::RgbaImage;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// Page
// ============================================================================

/// A browser page that can run scripts and capture its viewport.
///
/// # Example
///
/// ```ignore
/// struct MyTab(firefox_webdriver::Tab);
///
/// #[async_trait]
/// impl Page for MyTab {
///     async fn execute_script(&self, script: &str) -> Result<Value> {
///         self.0.execute_script(script).await.map_err(|e| Error::script(e.to_string()))
///     }
///
///     async fn capture_screenshot(&self) -> Result<String> {
///         self.0.capture_screenshot().await.map_err(|e| Error::capture(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait Page: Send + Sync {
    /// Executes synchronous JavaScript in the page context.
    ///
    /// The script uses `return` to produce a value.
    async fn execute_script(&self, script: &str) -> Result<Value>;

    /// Captures the visible viewport as base64-encoded PNG.
    async fn capture_screenshot(&self) -> Result<String>;

    /// Scrolls the page to the specified position.
    async fn scroll_to(&self, x: i64, y: i64) -> Result<()> {
        debug!(x, y, "Scrolling to");
        self.execute_script(&scroll_script(x, y)).await?;
        Ok(())
    }

    /// Captures and decodes the viewport.
    async fn screenshot_image(&self) -> Result<RgbaImage> {
        let data = self.capture_screenshot().await?;
        let bytes = Base64Standard
            .decode(data.trim())
            .map_err(|e| Error::capture(format!("Failed to decode base64: {e}")))?;
        let image = image::load_from_memory(&bytes)?.to_rgba8();

        debug!(
            width = image.width(),
            height = image.height(),
            "Decoded screenshot"
        );
        Ok(image)
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Runs `script` and deserializes its return value.
pub(crate) async fn eval_as<P, T>(page: &P, script: &str) -> Result<T>
where
    P: Page + ?Sized,
    T: DeserializeOwned,
{
    let value = page.execute_script(script).await?;
    serde_json::from_value(value.clone())
        .map_err(|e| Error::script(format!("Unexpected script result {value}: {e}")))
}

/// Script that scrolls the window to `(x, y)`.
pub(crate) fn scroll_script(x: i64, y: i64) -> String {
    format!("window.scrollTo({x}, {y});")
}

/// Escapes a string for safe use in JavaScript.
pub(crate) fn json_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""))
}

// ============================================================================
// Tests
// ============================================================================
