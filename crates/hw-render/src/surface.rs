//! Rendering surface abstraction.
//!
//! A `Surface` is a 2D immediate-mode raster context: it keeps one current
//! path and a stroke style, and paints into its pixels only on `stroke`.
//! The browser canvas and the headless `RasterSurface` both implement it.

use hw_core::{CanvasSize, Point, Rect, StrokeStyle};

/// A 2D immediate-mode raster drawing context.
pub trait Surface {
    /// Current pixel dimensions.
    fn size(&self) -> CanvasSize;

    /// Reallocate the raster. Clears all pixels, the current path, and
    /// resets the stroke style to the context's initial state.
    fn resize(&mut self, size: CanvasSize);

    /// Top-left corner of the surface in client coordinates, read live.
    fn client_origin(&self) -> Point;

    fn set_stroke_style(&mut self, style: &StrokeStyle);

    /// Discard the current path.
    fn begin_path(&mut self);

    /// Start a new subpath at `p`.
    fn move_to(&mut self, p: Point);

    /// Add a segment from the path cursor to `p`. Acts as `move_to` when the
    /// path is empty.
    fn line_to(&mut self, p: Point);

    /// Paint the current path with the stroke style. The path is kept.
    fn stroke(&mut self);

    /// Reset every pixel inside `rect` to fully transparent.
    fn clear_rect(&mut self, rect: Rect);

    /// Encode the raster as a `data:image/png;base64,...` URL.
    fn to_data_url(&self) -> Result<String, String>;

    /// Apply one primitive op.
    fn apply(&mut self, op: SurfaceOp) {
        match op {
            SurfaceOp::BeginPath => self.begin_path(),
            SurfaceOp::MoveTo(p) => self.move_to(p),
            SurfaceOp::LineTo(p) => self.line_to(p),
            SurfaceOp::Stroke => self.stroke(),
        }
    }
}

/// A primitive path/paint call, as emitted by input tools.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceOp {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    Stroke,
}
