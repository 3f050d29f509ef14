//! Integration tests: drawing pad over the software raster (hw-editor + hw-render).
//!
//! Drives the pad with host-style mouse and touch events and inspects the
//! resulting pixels, including the exported PNG.

use base64::Engine;
use hw_core::{CanvasSize, PadConfig, Point, Viewport};
use hw_editor::{Downloader, DrawingPad, MouseInput, MouseKind, TouchInput, TouchKind};
use hw_render::RasterSurface;
use pretty_assertions::assert_eq;
use tiny_skia::Pixmap;

const DESKTOP: Viewport = Viewport::new(800.0, 600.0);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn make_pad() -> DrawingPad<RasterSurface> {
    init_logging();
    let mut pad = DrawingPad::new(PadConfig::default());
    pad.mount(RasterSurface::new(CanvasSize::default()), DESKTOP);
    pad
}

fn mouse(pad: &mut DrawingPad<RasterSurface>, kind: MouseKind, x: f64, y: f64) {
    pad.handle_mouse(MouseInput::new(kind, x, y));
}

fn touch(pad: &mut DrawingPad<RasterSurface>, kind: TouchKind, points: &[(f64, f64)]) {
    let input = TouchInput::new(kind, points.iter().map(|&(x, y)| Point::new(x, y)));
    pad.handle_touch(&input);
}

fn surface(pad: &DrawingPad<RasterSurface>) -> &RasterSurface {
    pad.surface().expect("pad is mounted")
}

fn inked(pad: &DrawingPad<RasterSurface>, x: u32, y: u32) -> bool {
    surface(pad).pixel(x, y).is_some_and(|c| c.a > 0)
}

#[derive(Default)]
struct Capture {
    files: Vec<(String, String)>,
}

impl Downloader for Capture {
    fn download(&mut self, filename: &str, data_url: &str) -> Result<(), String> {
        self.files.push((filename.to_string(), data_url.to_string()));
        Ok(())
    }
}

fn export_pixmap(pad: &DrawingPad<RasterSurface>) -> (String, Pixmap) {
    let mut capture = Capture::default();
    pad.export(&mut capture);
    let (filename, url) = capture.files.pop().expect("export reached the downloader");
    let payload = url
        .strip_prefix("data:image/png;base64,")
        .expect("png data url");
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .expect("valid base64");
    (filename, Pixmap::decode_png(&bytes).expect("valid png"))
}

// ─── Sizing ─────────────────────────────────────────────────────────────

#[test]
fn sizing_follows_viewport() {
    let mut pad = make_pad();
    assert_eq!(pad.size(), CanvasSize::new(500, 300));

    pad.resize(Viewport::new(100.0, 600.0));
    assert_eq!(pad.size(), CanvasSize::new(60, 36));

    for width in [40.0, 41.0, 333.0, 539.0, 540.0, 2000.0] {
        pad.resize(Viewport::new(width, 600.0));
        let size = pad.size();
        assert_eq!(size.width, ((width - 40.0) as u32).min(500));
        assert_eq!(size.height, (f64::from(size.width) * 3.0 / 5.0).round() as u32);
    }
}

// ─── Stroke contract ────────────────────────────────────────────────────

#[test]
fn move_without_down_draws_nothing() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Move, 10.0, 10.0);
    mouse(&mut pad, MouseKind::Move, 100.0, 100.0);
    assert_eq!(surface(&pad).painted_pixels(), 0);
    assert!(!pad.is_drawing());
}

#[test]
fn tap_leaves_a_dot() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 50.0, 50.0);
    mouse(&mut pad, MouseKind::Up, 50.0, 50.0);
    assert!(inked(&pad, 49, 49));
    assert!(inked(&pad, 50, 50));
    assert!(!inked(&pad, 53, 53));
}

#[test]
fn consecutive_moves_form_a_continuous_line() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 10.0, 10.0);
    mouse(&mut pad, MouseKind::Move, 20.0, 10.0);
    mouse(&mut pad, MouseKind::Move, 30.0, 10.0);
    mouse(&mut pad, MouseKind::Up, 30.0, 10.0);

    // Every column between the endpoints is covered, including the joint.
    for x in 10..30 {
        assert!(inked(&pad, x, 10), "gap at x={x}");
        assert!(inked(&pad, x, 9), "gap at x={x}");
    }
    // Round caps extend past the endpoints by half the line width.
    assert!(inked(&pad, 30, 10));
    assert!(!inked(&pad, 33, 10));
    assert!(!inked(&pad, 20, 13));
}

#[test]
fn strokes_do_not_connect_across_up() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 5.0, 5.0);
    mouse(&mut pad, MouseKind::Move, 15.0, 5.0);
    mouse(&mut pad, MouseKind::Up, 15.0, 5.0);
    mouse(&mut pad, MouseKind::Down, 50.0, 50.0);
    mouse(&mut pad, MouseKind::Move, 60.0, 50.0);

    assert!(inked(&pad, 10, 5));
    assert!(inked(&pad, 55, 50));
    // Nothing along the would-be bridge from (15,5) to (50,50).
    for t in 1..10 {
        let t = f64::from(t) / 10.0;
        let x = 15.0 + 35.0 * t;
        let y = 5.0 + 45.0 * t;
        assert!(!inked(&pad, x as u32, y as u32), "bridge pixel at ({x}, {y})");
    }
}

#[test]
fn leaving_the_canvas_ends_the_stroke() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 20.0, 20.0);
    mouse(&mut pad, MouseKind::Out, 20.0, 20.0);
    let before = surface(&pad).painted_pixels();
    mouse(&mut pad, MouseKind::Move, 200.0, 200.0);
    assert_eq!(surface(&pad).painted_pixels(), before);
    assert!(!pad.is_drawing());
}

#[test]
fn out_of_range_coordinates_are_clipped() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 10.0, 150.0);
    mouse(&mut pad, MouseKind::Move, -50.0, 150.0);
    mouse(&mut pad, MouseKind::Move, 900.0, 150.0);
    mouse(&mut pad, MouseKind::Up, 0.0, 0.0);
    assert!(inked(&pad, 0, 150));
    assert!(inked(&pad, 499, 150));
}

// ─── Touch ──────────────────────────────────────────────────────────────

#[test]
fn touch_and_mouse_render_identically() {
    let mut by_mouse = make_pad();
    mouse(&mut by_mouse, MouseKind::Down, 40.0, 40.0);
    mouse(&mut by_mouse, MouseKind::Move, 80.0, 60.0);
    mouse(&mut by_mouse, MouseKind::Move, 120.0, 40.0);
    mouse(&mut by_mouse, MouseKind::Up, 120.0, 40.0);

    let mut by_touch = make_pad();
    touch(&mut by_touch, TouchKind::Start, &[(40.0, 40.0)]);
    touch(&mut by_touch, TouchKind::Move, &[(80.0, 60.0), (300.0, 200.0)]);
    touch(&mut by_touch, TouchKind::Move, &[]);
    touch(&mut by_touch, TouchKind::Move, &[(120.0, 40.0)]);
    touch(&mut by_touch, TouchKind::End, &[]);

    let a = surface(&by_mouse).pixmap().map(|p| p.data().to_vec());
    let b = surface(&by_touch).pixmap().map(|p| p.data().to_vec());
    assert!(a == b, "touch raster differs from mouse raster");
    assert!(!by_touch.is_drawing());
}

#[test]
fn touch_cancel_ends_the_stroke() {
    let mut pad = make_pad();
    touch(&mut pad, TouchKind::Start, &[(30.0, 30.0)]);
    touch(&mut pad, TouchKind::Cancel, &[]);
    assert!(!pad.is_drawing());
    let before = surface(&pad).painted_pixels();
    touch(&mut pad, TouchKind::Move, &[(90.0, 90.0)]);
    assert_eq!(surface(&pad).painted_pixels(), before);
}

// ─── Coordinate translation ─────────────────────────────────────────────

#[test]
fn client_coordinates_are_made_local_with_live_origin() {
    let mut pad = make_pad();
    if let Some(surface) = pad.unmount().map(|mut s| {
        s.set_client_origin(Point::new(20.0, 80.0));
        s
    }) {
        pad.mount(surface, DESKTOP);
    }
    mouse(&mut pad, MouseKind::Down, 70.0, 130.0);
    mouse(&mut pad, MouseKind::Up, 70.0, 130.0);
    assert!(inked(&pad, 50, 50));
    assert!(!inked(&pad, 70, 130));
}

// ─── Clear / resize / export ────────────────────────────────────────────

#[test]
fn clear_then_export_is_blank() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 10.0, 10.0);
    mouse(&mut pad, MouseKind::Move, 400.0, 250.0);
    mouse(&mut pad, MouseKind::Up, 400.0, 250.0);
    assert!(surface(&pad).painted_pixels() > 0);

    pad.clear();
    let (filename, image) = export_pixmap(&pad);
    assert_eq!(filename, "drawing.png");
    assert_eq!((image.width(), image.height()), (500, 300));
    assert_eq!(image.pixels().iter().filter(|px| px.alpha() > 0).count(), 0);

    // Clearing twice changes nothing.
    pad.clear();
    assert_eq!(surface(&pad).painted_pixels(), 0);
}

#[test]
fn export_matches_live_raster() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 100.0, 100.0);
    mouse(&mut pad, MouseKind::Move, 200.0, 120.0);
    mouse(&mut pad, MouseKind::Up, 200.0, 120.0);
    let (_, image) = export_pixmap(&pad);
    let exported = image.pixels().iter().filter(|px| px.alpha() > 0).count();
    assert_eq!(exported, surface(&pad).painted_pixels());
}

#[test]
fn resize_clears_canvas() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 10.0, 10.0);
    mouse(&mut pad, MouseKind::Move, 50.0, 30.0);
    mouse(&mut pad, MouseKind::Up, 50.0, 30.0);
    assert!(surface(&pad).painted_pixels() > 0);

    pad.resize(Viewport::new(300.0, 600.0));
    assert_eq!(pad.size(), CanvasSize::new(260, 156));
    assert_eq!(surface(&pad).painted_pixels(), 0);
}

#[test]
fn stroke_survives_resize_mid_gesture() {
    let mut pad = make_pad();
    mouse(&mut pad, MouseKind::Down, 10.0, 10.0);
    pad.resize(Viewport::new(300.0, 600.0));
    assert!(pad.is_drawing());
    mouse(&mut pad, MouseKind::Move, 40.0, 10.0);
    // The first segment starts from an empty path, so only later ones paint.
    mouse(&mut pad, MouseKind::Move, 80.0, 10.0);
    assert!(inked(&pad, 60, 10));
}
