//! Pad configuration.
//!
//! Every field has a default, so the host may pass an empty string or a
//! partial JSON object containing only the overrides it cares about.

use crate::layout::LayoutConfig;
use crate::model::StrokeStyle;
use serde::{Deserialize, Serialize};

// ─── Config ───────────────────────────────────────────────────────────────

/// Configuration for a `DrawingPad` and the widget hosting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PadConfig {
    pub layout: LayoutConfig,
    pub stroke: StrokeStyle,
    /// Filename offered to the browser when the drawing is saved.
    pub download_filename: String,
    /// Heading shown above the canvas.
    pub title: String,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            stroke: StrokeStyle::default(),
            download_filename: "drawing.png".to_string(),
            title: "Alzheimer's Handwriting Test".to_string(),
        }
    }
}

impl PadConfig {
    /// Parse a JSON object of overrides. Blank input yields the defaults.
    ///
    /// # Errors
    /// Returns the serde error message for malformed JSON or bad values,
    /// or the `validate` message for out-of-range settings.
    pub fn from_json(json: &str) -> Result<Self, String> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(json).map_err(|e| format!("invalid pad config: {e}"))?;
        config.validate()?;
        log::debug!("pad config loaded: {config:?}");
        Ok(config)
    }

    /// Reject settings that would make the pad unusable.
    pub fn validate(&self) -> Result<(), String> {
        if self.layout.aspect_width == 0 || self.layout.aspect_height == 0 {
            return Err("aspect ratio components must be non-zero".to_string());
        }
        if !(self.stroke.width.is_finite() && self.stroke.width > 0.0) {
            return Err(format!("stroke width must be positive, got {}", self.stroke.width));
        }
        if self.download_filename.trim().is_empty() {
            return Err("download filename must not be empty".to_string());
        }
        Ok(())
    }
}
