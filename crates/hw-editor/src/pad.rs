//! The drawing pad component.
//!
//! `DrawingPad` owns the surface between `mount` and `unmount`, keeps it
//! sized to the viewport, and routes mouse and touch input through one
//! stroke tool. Without a mounted surface every operation is a no-op.

use crate::input::{InputEvent, MouseInput, TouchInput};
use crate::tools::StrokeTool;
use hw_core::{CanvasSize, PadConfig, Viewport};
use hw_render::Surface;

/// Hands an encoded image to the host's save mechanism.
pub trait Downloader {
    /// Offer `data_url` to the user as a file named `filename`.
    fn download(&mut self, filename: &str, data_url: &str) -> Result<(), String>;
}

pub struct DrawingPad<S: Surface> {
    config: PadConfig,
    surface: Option<S>,
    tool: StrokeTool,
}

impl<S: Surface> DrawingPad<S> {
    /// Create an unmounted pad.
    pub fn new(config: PadConfig) -> Self {
        Self {
            config,
            surface: None,
            tool: StrokeTool::new(),
        }
    }

    pub fn config(&self) -> &PadConfig {
        &self.config
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.surface.is_some()
    }

    pub fn is_drawing(&self) -> bool {
        self.tool.is_drawing()
    }

    /// Size of the mounted surface; zero when unmounted.
    pub fn size(&self) -> CanvasSize {
        self.surface.as_ref().map(Surface::size).unwrap_or_default()
    }

    /// Take ownership of `surface`, fit it to `viewport` and apply the
    /// stroke style. A previously mounted surface is dropped.
    pub fn mount(&mut self, surface: S, viewport: Viewport) {
        self.surface = Some(surface);
        self.tool.reset();
        self.resize(viewport);
        log::debug!("pad mounted at {:?}", self.size());
    }

    /// Release the surface back to the caller.
    pub fn unmount(&mut self) -> Option<S> {
        self.tool.reset();
        let surface = self.surface.take();
        if surface.is_some() {
            log::debug!("pad unmounted");
        }
        surface
    }

    /// Refit the surface to `viewport`. Resizing wipes the raster; an
    /// in-flight stroke keeps going on the blank surface.
    pub fn resize(&mut self, viewport: Viewport) {
        let size = CanvasSize::fit(viewport, &self.config.layout);
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        log::debug!(
            "resize for viewport {}x{} -> {}x{}",
            viewport.width,
            viewport.height,
            size.width,
            size.height
        );
        surface.resize(size);
        surface.set_stroke_style(&self.config.stroke);
    }

    /// Mouse dispatcher.
    pub fn handle_mouse(&mut self, input: MouseInput) {
        self.dispatch(input.to_event());
    }

    /// Touch dispatcher. Only the first touch point draws.
    pub fn handle_touch(&mut self, input: &TouchInput) {
        if let Some(event) = input.to_event() {
            self.dispatch(event);
        }
    }

    /// Translate a client-space event into canvas space and run it through
    /// the stroke tool.
    fn dispatch(&mut self, event: InputEvent) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        // Read the origin per event; the canvas may have scrolled or moved.
        let origin = surface.client_origin().to_vec2();
        for op in self.tool.handle(&event.translated(origin)) {
            surface.apply(op);
        }
    }

    /// Erase every pixel.
    pub fn clear(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let bounds = surface.size().bounds();
        surface.clear_rect(bounds);
        log::debug!("cleared {}x{}", bounds.width(), bounds.height());
    }

    /// Snapshot the raster and hand it to `downloader`. Failures are logged
    /// and otherwise ignored.
    pub fn export(&self, downloader: &mut impl Downloader) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };
        let filename = &self.config.download_filename;
        let result = surface
            .to_data_url()
            .and_then(|url| downloader.download(filename, &url));
        match result {
            Ok(()) => log::debug!("exported {filename}"),
            Err(e) => log::warn!("export of {filename} failed: {e}"),
        }
    }
}
