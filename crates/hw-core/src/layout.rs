//! Responsive canvas sizing.
//!
//! The canvas tracks the viewport width minus a horizontal padding, capped
//! at a maximum width, with the height derived from a fixed aspect ratio.

use serde::{Deserialize, Serialize};

/// The host viewport dimensions, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Sizing rules for the drawing canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutConfig {
    /// Upper bound on the canvas width.
    pub max_width: u32,
    /// Total horizontal space reserved around the canvas (both sides).
    pub horizontal_padding: u32,
    pub aspect_width: u32,
    pub aspect_height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_width: 500,
            horizontal_padding: 40,
            aspect_width: 5,
            aspect_height: 3,
        }
    }
}

/// Pixel dimensions of the raster surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Fit the canvas to a viewport.
    ///
    /// `width = min(viewport.width - padding, max_width)`, floored and never
    /// negative; `height = round(width * aspect_height / aspect_width)`.
    pub fn fit(viewport: Viewport, config: &LayoutConfig) -> Self {
        let available = (viewport.width - f64::from(config.horizontal_padding)).max(0.0);
        let width = available.min(f64::from(config.max_width)).floor() as u32;

        let height = if config.aspect_width == 0 {
            0
        } else {
            (f64::from(width) * f64::from(config.aspect_height) / f64::from(config.aspect_width))
                .round() as u32
        };

        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// The full-canvas rectangle in local coordinates.
    pub fn bounds(&self) -> kurbo::Rect {
        kurbo::Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}
