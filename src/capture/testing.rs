//! In-memory [`Page`] for pipeline tests.
//!
//! The page is a single large image; screenshots return the viewport-sized
//! window at the current scroll position, clamped the way a browser clamps
//! scrolling.

use std::io::Cursor;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as Base64Standard;
use image::{ImageFormat, RgbaImage, imageops};
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::Result;

use super::page::Page;

pub(crate) struct ScriptedPage {
    document: RgbaImage,
    viewport: (u32, u32),
    scroll: Mutex<(i64, i64)>,
    responses: Vec<(String, Value)>,
    scripts: Mutex<Vec<String>>,
    raw_screenshot: Option<String>,
    shots: Mutex<usize>,
}

impl ScriptedPage {
    pub(crate) fn new(document: RgbaImage, viewport: (u32, u32)) -> Self {
        Self {
            document,
            viewport,
            scroll: Mutex::new((0, 0)),
            responses: Vec::new(),
            scripts: Mutex::new(Vec::new()),
            raw_screenshot: None,
            shots: Mutex::new(0),
        }
    }

    /// Answers any script containing `needle` with `value`. First match wins.
    pub(crate) fn respond(mut self, needle: impl Into<String>, value: Value) -> Self {
        self.responses.push((needle.into(), value));
        self
    }

    pub(crate) fn with_raw_screenshot(mut self, data: impl Into<String>) -> Self {
        self.raw_screenshot = Some(data.into());
        self
    }

    pub(crate) fn scroll_position(&self) -> (i64, i64) {
        *self.scroll.lock()
    }

    pub(crate) fn scripts(&self) -> Vec<String> {
        self.scripts.lock().clone()
    }

    pub(crate) fn screenshot_count(&self) -> usize {
        *self.shots.lock()
    }

    fn max_scroll(&self) -> (i64, i64) {
        let (w, h) = self.document.dimensions();
        (
            i64::from(w.saturating_sub(self.viewport.0)),
            i64::from(h.saturating_sub(self.viewport.1)),
        )
    }

    fn apply_scroll(&self, script: &str) {
        let Some(args) = script
            .strip_prefix("window.scrollTo(")
            .and_then(|rest| rest.strip_suffix(");"))
        else {
            return;
        };
        let parsed: Vec<i64> = args
            .split(',')
            .filter_map(|v| v.trim().parse().ok())
            .collect();
        if let [x, y] = parsed[..] {
            let (max_x, max_y) = self.max_scroll();
            *self.scroll.lock() = (x.clamp(0, max_x), y.clamp(0, max_y));
        }
    }
}

#[async_trait]
impl Page for ScriptedPage {
    async fn execute_script(&self, script: &str) -> Result<Value> {
        self.scripts.lock().push(script.to_string());
        self.apply_scroll(script);

        let value = self
            .responses
            .iter()
            .find(|(needle, _)| script.contains(needle.as_str()))
            .map(|(_, value)| value.clone())
            .unwrap_or(Value::Null);
        Ok(value)
    }

    async fn capture_screenshot(&self) -> Result<String> {
        *self.shots.lock() += 1;
        if let Some(raw) = &self.raw_screenshot {
            return Ok(raw.clone());
        }

        let (x, y) = self.scroll_position();
        let view = imageops::crop_imm(
            &self.document,
            x as u32,
            y as u32,
            self.viewport.0,
            self.viewport.1,
        )
        .to_image();

        let mut bytes = Vec::new();
        view.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(Base64Standard.encode(bytes))
    }
}
