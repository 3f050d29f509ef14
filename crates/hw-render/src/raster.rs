//! Headless software surface on `tiny-skia`.
//!
//! Mirrors the browser canvas semantics the pad relies on: the current path
//! survives `stroke`, `line_to` on an empty path behaves like `move_to`,
//! zero-length subpaths paint their caps, and resizing wipes pixels, path
//! and style.

use crate::surface::Surface;
use base64::Engine;
use hw_core::{CanvasSize, LineCap, LineJoin, Point, Rect, Rgba, StrokeStyle};
use kurbo::{BezPath, PathEl};
use tiny_skia::{BlendMode, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Curve flattening tolerance, in pixels.
const FLATTEN_TOLERANCE: f64 = 0.25;

/// Style a freshly created canvas context starts with.
const INITIAL_STYLE: StrokeStyle = StrokeStyle {
    color: Rgba::BLACK,
    width: 1.0,
    cap: LineCap::Butt,
    join: LineJoin::Miter,
};

/// An in-memory RGBA surface.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    size: CanvasSize,
    /// `None` while the size is empty; tiny-skia has no 0×0 pixmaps.
    pixmap: Option<Pixmap>,
    style: StrokeStyle,
    path: BezPath,
    /// Simulated page position, for client → local translation.
    origin: Point,
}

impl RasterSurface {
    pub fn new(size: CanvasSize) -> Self {
        Self {
            size,
            pixmap: Pixmap::new(size.width, size.height),
            style: INITIAL_STYLE,
            path: BezPath::new(),
            origin: Point::ZERO,
        }
    }

    /// Move the surface within the simulated page.
    pub fn set_client_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    pub fn stroke_style(&self) -> &StrokeStyle {
        &self.style
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    /// Demultiplied color at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        // Pixmap::pixel indexes linearly, so x past the edge lands on the next row.
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let px = self.pixmap.as_ref()?.pixel(x, y)?.demultiply();
        Some(Rgba::rgba(px.red(), px.green(), px.blue(), px.alpha()))
    }

    /// Number of pixels with any coverage.
    pub fn painted_pixels(&self) -> usize {
        self.pixmap
            .as_ref()
            .map(|p| p.pixels().iter().filter(|px| px.alpha() > 0).count())
            .unwrap_or(0)
    }

    /// Encode the raster as PNG bytes. An empty surface has no image.
    pub fn encode_png(&self) -> Result<Vec<u8>, String> {
        let pixmap = self
            .pixmap
            .as_ref()
            .ok_or_else(|| format!("cannot encode empty {}x{} surface", self.size.width, self.size.height))?;
        pixmap.encode_png().map_err(|e| format!("png encoding failed: {e}"))
    }

    fn paint(&self) -> Paint<'static> {
        let Rgba { r, g, b, a } = self.style.color;
        let mut paint = Paint::default();
        paint.set_color_rgba8(r, g, b, a);
        paint.anti_alias = true;
        paint
    }

    fn skia_stroke(&self) -> Stroke {
        Stroke {
            width: self.style.width as f32,
            line_cap: match self.style.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match self.style.join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Stroke::default()
        }
    }

    /// Paint the cap of a zero-length subpath.
    fn paint_cap(&mut self, at: Point, paint: &Paint<'_>) {
        let radius = (self.style.width / 2.0) as f32;
        let (x, y) = (at.x as f32, at.y as f32);
        let cap = self.style.cap;
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        match cap {
            LineCap::Butt => {}
            LineCap::Round => {
                if let Some(circle) = PathBuilder::from_circle(x, y, radius) {
                    pixmap.fill_path(&circle, paint, FillRule::Winding, Transform::identity(), None);
                }
            }
            LineCap::Square => {
                if let Some(square) =
                    tiny_skia::Rect::from_xywh(x - radius, y - radius, radius * 2.0, radius * 2.0)
                {
                    pixmap.fill_rect(square, paint, Transform::identity(), None);
                }
            }
        }
    }
}

/// Split a path into flattened polylines, one per subpath.
fn polylines(path: &BezPath) -> Vec<Vec<Point>> {
    let mut lines: Vec<Vec<Point>> = Vec::new();
    path.flatten(FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => lines.push(vec![p]),
        PathEl::LineTo(p) => match lines.last_mut() {
            Some(line) => line.push(p),
            None => lines.push(vec![p]),
        },
        PathEl::ClosePath => {
            if let Some(line) = lines.last_mut()
                && let Some(&start) = line.first()
            {
                line.push(start);
            }
        }
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    lines
}

impl Surface for RasterSurface {
    fn size(&self) -> CanvasSize {
        self.size
    }

    fn resize(&mut self, size: CanvasSize) {
        log::trace!("raster resize {}x{}", size.width, size.height);
        *self = Self {
            origin: self.origin,
            ..Self::new(size)
        };
    }

    fn client_origin(&self) -> Point {
        self.origin
    }

    fn set_stroke_style(&mut self, style: &StrokeStyle) {
        self.style = *style;
    }

    fn begin_path(&mut self) {
        self.path = BezPath::new();
    }

    fn move_to(&mut self, p: Point) {
        self.path.move_to(p);
    }

    fn line_to(&mut self, p: Point) {
        if self.path.elements().is_empty() {
            self.path.move_to(p);
        } else {
            self.path.line_to(p);
        }
    }

    fn stroke(&mut self) {
        if self.pixmap.is_none() {
            return;
        }
        let paint = self.paint();
        let mut builder = PathBuilder::new();
        let mut dots = Vec::new();

        for line in polylines(&self.path) {
            let Some((&first, rest)) = line.split_first() else {
                continue;
            };
            if rest.is_empty() {
                // A lone move-to paints nothing.
                continue;
            }
            if rest.iter().all(|p| *p == first) {
                dots.push(first);
                continue;
            }
            builder.move_to(first.x as f32, first.y as f32);
            for p in rest {
                builder.line_to(p.x as f32, p.y as f32);
            }
        }

        if let Some(path) = builder.finish() {
            let stroke = self.skia_stroke();
            if let Some(pixmap) = self.pixmap.as_mut() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }
        }
        for dot in dots {
            self.paint_cap(dot, &paint);
        }
    }

    fn clear_rect(&mut self, rect: Rect) {
        let Some(pixmap) = self.pixmap.as_mut() else {
            return;
        };
        let rect = rect.abs();
        if let Some(area) =
            tiny_skia::Rect::from_ltrb(rect.x0 as f32, rect.y0 as f32, rect.x1 as f32, rect.y1 as f32)
        {
            let paint = Paint {
                blend_mode: BlendMode::Clear,
                ..Paint::default()
            };
            pixmap.fill_rect(area, &paint, Transform::identity(), None);
        }
    }

    fn to_data_url(&self) -> Result<String, String> {
        if self.size.is_empty() {
            // What browsers return for a zero-sized canvas.
            return Ok("data:,".to_string());
        }
        let png = self.encode_png()?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(png);
        Ok(format!("data:image/png;base64,{encoded}"))
    }
}
