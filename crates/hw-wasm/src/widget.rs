//! The mounted widget: title, canvas, and the Clear / Save Drawing buttons.

use crate::canvas::CanvasSurface;
use crate::download::AnchorDownloader;
use gloo_events::{EventListener, EventListenerOptions};
use hw_core::{PadConfig, Point, Viewport};
use hw_editor::{DrawingPad, MouseInput, MouseKind, TouchInput, TouchKind};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlCanvasElement, MouseEvent, TouchEvent, Window};

/// Canvas mouse events and how they map onto the stroke contract.
pub const MOUSE_EVENTS: [(&str, MouseKind); 4] = [
    ("mousedown", MouseKind::Down),
    ("mousemove", MouseKind::Move),
    ("mouseup", MouseKind::Up),
    ("mouseout", MouseKind::Out),
];

/// Canvas touch events and how they map onto the stroke contract.
pub const TOUCH_EVENTS: [(&str, TouchKind); 4] = [
    ("touchstart", TouchKind::Start),
    ("touchmove", TouchKind::Move),
    ("touchend", TouchKind::End),
    ("touchcancel", TouchKind::Cancel),
];

const ROOT_STYLE: &str = "display:flex;flex-direction:column;align-items:center;\
    padding:16px;background:#fff;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,.1)";
const TITLE_STYLE: &str = "font-size:1.5rem;font-weight:700;margin:0 0 16px;text-align:center";
const CANVAS_STYLE: &str =
    "border:1px solid #d1d5db;border-radius:6px;cursor:crosshair;touch-action:none";
const BUTTON_ROW_STYLE: &str = "display:flex;justify-content:center;gap:16px;margin-top:16px";

pub type SharedPad = Rc<RefCell<DrawingPad<CanvasSurface>>>;

pub struct Widget {
    pub pad: SharedPad,
    pub root: Element,
    /// Dropping these unsubscribes every handler, including window resize.
    pub listeners: Vec<EventListener>,
}

/// Current viewport size; zero when the window reports nothing numeric.
pub fn viewport(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

fn element(document: &Document, tag: &str, style: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    el.set_attribute("style", style)?;
    Ok(el)
}

fn button(document: &Document, label: &str) -> Result<Element, JsValue> {
    let el = document.create_element("button")?;
    el.set_attribute("type", "button")?;
    el.set_text_content(Some(label));
    Ok(el)
}

impl Widget {
    /// Build the widget inside `container` and subscribe all handlers.
    pub fn mount(window: Window, container: &Element, config: PadConfig) -> Result<Self, JsValue> {
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;

        let root = element(&document, "div", ROOT_STYLE)?;
        let title = element(&document, "h1", TITLE_STYLE)?;
        title.set_text_content(Some(&config.title));
        let canvas = element(&document, "canvas", CANVAS_STYLE)?.dyn_into::<HtmlCanvasElement>()?;
        let buttons = element(&document, "div", BUTTON_ROW_STYLE)?;
        let clear_button = button(&document, "Clear")?;
        let save_button = button(&document, "Save Drawing")?;

        buttons.append_child(&clear_button)?;
        buttons.append_child(&save_button)?;
        root.append_child(&title)?;
        root.append_child(&canvas)?;
        root.append_child(&buttons)?;
        container.append_child(&root)?;

        let pad: SharedPad = Rc::new(RefCell::new(DrawingPad::new(config)));
        match CanvasSurface::new(canvas.clone()) {
            Ok(surface) => pad.borrow_mut().mount(surface, viewport(&window)),
            // Leave the pad unmounted; every operation becomes a no-op.
            Err(e) => log::warn!("no 2d context, drawing disabled: {e:?}"),
        }

        let mut listeners = Vec::new();

        for (name, kind) in MOUSE_EVENTS {
            let pad = pad.clone();
            listeners.push(EventListener::new(&canvas, name, move |event| {
                let Some(e) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let input = MouseInput::new(kind, f64::from(e.client_x()), f64::from(e.client_y()));
                if let Ok(mut pad) = pad.try_borrow_mut() {
                    pad.handle_mouse(input);
                }
            }));
        }

        for (name, kind) in TOUCH_EVENTS {
            let pad = pad.clone();
            let options = EventListenerOptions::enable_prevent_default();
            listeners.push(EventListener::new_with_options(&canvas, name, options, move |event| {
                let Some(e) = event.dyn_ref::<TouchEvent>() else {
                    return;
                };
                // Keep the page from scrolling or zooming under the pen.
                e.prevent_default();
                let list = e.touches();
                let points = (0..list.length())
                    .filter_map(|i| list.get(i))
                    .map(|t| Point::new(f64::from(t.client_x()), f64::from(t.client_y())));
                let input = TouchInput::new(kind, points);
                if let Ok(mut pad) = pad.try_borrow_mut() {
                    pad.handle_touch(&input);
                }
            }));
        }

        {
            let pad = pad.clone();
            listeners.push(EventListener::new(&clear_button, "click", move |_| {
                if let Ok(mut pad) = pad.try_borrow_mut() {
                    pad.clear();
                }
            }));
        }

        {
            let pad = pad.clone();
            let mut downloader = AnchorDownloader::new(document.clone());
            listeners.push(EventListener::new(&save_button, "click", move |_| {
                if let Ok(pad) = pad.try_borrow() {
                    pad.export(&mut downloader);
                }
            }));
        }

        {
            let pad = pad.clone();
            let resize_window = window.clone();
            listeners.push(EventListener::new(&window, "resize", move |_| {
                if let Ok(mut pad) = pad.try_borrow_mut() {
                    pad.resize(viewport(&resize_window));
                }
            }));
        }

        log::debug!("widget mounted with {} listeners", listeners.len());
        Ok(Self {
            pad,
            root,
            listeners,
        })
    }

    /// Unsubscribe, release the surface, and detach the DOM.
    pub fn unmount(&mut self) {
        self.listeners.clear();
        if let Ok(mut pad) = self.pad.try_borrow_mut() {
            pad.unmount();
        }
        self.root.remove();
    }
}


#[cfg(test)]
#[cfg(target_arch = "wasm32")]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::Event;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount() -> (Widget, Element) {
        let window = web_sys::window().expect("window");
        let document = window.document().expect("document");
        let container = document.create_element("div").expect("div");
        document.body().expect("body").append_child(&container).expect("append");
        let widget = Widget::mount(window, &container, PadConfig::default()).expect("mount");
        (widget, container)
    }

    #[wasm_bindgen_test]
    fn mount_subscribes_canvas_buttons_and_window() {
        let (widget, container) = mount();
        // 4 mouse + 4 touch + clear + save + resize
        assert_eq!(widget.listeners.len(), 11);
        assert!(widget.pad.borrow().is_mounted());
        assert_eq!(container.child_element_count(), 1);
    }

    #[wasm_bindgen_test]
    fn unmount_drops_listeners_and_detaches() {
        let (mut widget, container) = mount();
        widget.unmount();
        assert!(widget.listeners.is_empty());
        assert!(!widget.pad.borrow().is_mounted());
        assert_eq!(container.child_element_count(), 0);

        // A resize after teardown reaches no handler.
        let window = web_sys::window().expect("window");
        let resize = Event::new("resize").expect("event");
        window.dispatch_event(&resize).expect("dispatch");
        assert_eq!(Rc::strong_count(&widget.pad), 1);
    }
}
