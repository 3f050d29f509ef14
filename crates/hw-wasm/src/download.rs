//! Browser save-as via a transient `<a download>` element.

use hw_editor::Downloader;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlAnchorElement};

pub struct AnchorDownloader {
    document: Document,
}

impl AnchorDownloader {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Downloader for AnchorDownloader {
    fn download(&mut self, filename: &str, data_url: &str) -> Result<(), String> {
        let anchor = self
            .document
            .create_element("a")
            .map_err(|e| format!("create <a> failed: {e:?}"))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| "created element is not an anchor".to_string())?;
        anchor.set_download(filename);
        anchor.set_href(data_url);
        // Never attached to the document; the click alone starts the download.
        anchor.click();
        Ok(())
    }
}
