//! WASM bridge for the handwriting pad: mounts the widget into a web page.
//!
//! Compiled via `wasm-pack build --target web`. JS creates a
//! `HandwritingPad` with the id of a container element; everything else
//! (DOM, listeners, rendering) is owned by the Rust side.

mod canvas;
mod download;
mod widget;

use hw_core::PadConfig;
use hw_editor::DrawingPad;
use wasm_bindgen::prelude::*;
use widget::Widget;

pub use canvas::CanvasSurface;
pub use download::AnchorDownloader;

/// JS handle to one mounted pad.
///
/// Dropping the handle (or calling `destroy`) removes every listener,
/// including the window resize subscription.
#[wasm_bindgen]
pub struct HandwritingPad {
    widget: Widget,
}

#[wasm_bindgen]
impl HandwritingPad {
    /// Mount a pad into the element with id `container_id`.
    ///
    /// `config_json` is empty for defaults, or a JSON object of overrides.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, config_json: &str) -> Result<HandwritingPad, JsValue> {
        runtime_setup();

        let config = PadConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e))?;
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let container = window
            .document()
            .and_then(|doc| doc.get_element_by_id(container_id))
            .ok_or_else(|| JsValue::from_str(&format!("container #{container_id} not found")))?;

        let widget = Widget::mount(window, &container, config)?;
        Ok(Self { widget })
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.with_pad(|pad| pad.is_drawing()).unwrap_or(false)
    }

    /// Current canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.with_pad(|pad| pad.size().width).unwrap_or(0)
    }

    /// Current canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.with_pad(|pad| pad.size().height).unwrap_or(0)
    }

    /// Active configuration as JSON.
    pub fn config_json(&self) -> String {
        self.with_pad(|pad| serde_json::to_string(pad.config()).unwrap_or_default())
            .unwrap_or_default()
    }

    /// Same as pressing "Clear".
    pub fn clear(&self) {
        if let Ok(mut pad) = self.widget.pad.try_borrow_mut() {
            pad.clear();
        }
    }

    /// Same as pressing "Save Drawing".
    pub fn save(&self) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Ok(pad) = self.widget.pad.try_borrow() {
            pad.export(&mut AnchorDownloader::new(document));
        }
    }

    /// Unsubscribe all listeners, release the canvas, and remove the DOM.
    pub fn destroy(&mut self) {
        self.widget.unmount();
    }
}

impl HandwritingPad {
    fn with_pad<T>(&self, f: impl FnOnce(&DrawingPad<CanvasSurface>) -> T) -> Option<T> {
        self.widget.pad.try_borrow().ok().map(|pad| f(&pad))
    }
}

/// Set the console log level: `error`, `warn`, `info`, `debug` or `trace`.
#[wasm_bindgen]
pub fn set_log_level(level: &str) -> bool {
    match level.parse::<log::LevelFilter>() {
        Ok(filter) => {
            log::set_max_level(filter);
            true
        }
        Err(_) => false,
    }
}

// ─── Panic hook and console logger ───────────────────────────────────────

struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let msg = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&msg),
            log::Level::Warn => web_sys::console::warn_1(&msg),
            log::Level::Info => web_sys::console::info_1(&msg),
            log::Level::Debug => web_sys::console::debug_1(&msg),
            log::Level::Trace => web_sys::console::log_1(&msg),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

fn runtime_setup() {
    use std::sync::Once;
    static SETUP: Once = Once::new();
    SETUP.call_once(|| {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(|info| {
            let msg = format!("handwriting pad panic: {info}");
            web_sys::console::error_1(&msg.into());
        }));
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(log::LevelFilter::Warn);
        }
    });
}
