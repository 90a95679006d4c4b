//! Browser host implementation
//!
//! Implements the `tyforms-host` capabilities on top of the page's DOM and
//! globals:
//!
//! - elements via `document.querySelector` / `getAttribute`
//! - iframes via `document.createElement("iframe")` + `appendChild`
//! - resizing via the global `iFrameResize` from iframe-resizer
//! - console output via `console.log` / `warn` / `error`
//! - entropy via `crypto.getRandomValues` (through `getrandom`)

use tyforms_host::{
    Console, ElementLocator, Entropy, FrameSpec, HostError, ResizeAttacher, ResizeOptions,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlIFrameElement, Window};

mod dom;
mod resize;

pub use dom::DomElement;

/// Name of the global installed by iframe-resizer
pub const IFRAME_RESIZE_GLOBAL: &str = "iFrameResize";

/// Host backed by the current browser window
pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    /// Bind to the global window and its document
    pub fn new() -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("window has no document"))?;
        Ok(Self { window, document })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn create_iframe(&self, frame: &FrameSpec) -> Result<HtmlIFrameElement, HostError> {
        let iframe = self
            .document
            .create_element("iframe")
            .map_err(|e| HostError::IframeCreation(describe(&e)))?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| HostError::IframeCreation("created element is not an iframe".into()))?;

        iframe.set_id(&frame.id);
        if let Some(url) = &frame.url {
            iframe.set_src(url);
        }
        iframe
            .style()
            .set_property("width", frame.width)
            .map_err(|e| HostError::IframeCreation(describe(&e)))?;
        Ok(iframe)
    }
}

impl ElementLocator for BrowserHost {
    type Element = DomElement;

    fn locate(&self, selector: &str) -> Option<Self::Element> {
        // Invalid selectors throw; treat them like a miss.
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(DomElement::new)
    }

    fn mount_iframe(&self, parent: &Self::Element, frame: &FrameSpec) -> Result<(), HostError> {
        let iframe = self.create_iframe(frame)?;
        parent
            .element()
            .append_child(&iframe)
            .map_err(|e| HostError::Append(describe(&e)))?;
        Ok(())
    }
}

impl ResizeAttacher for BrowserHost {
    fn attach_resize(&self, options: &ResizeOptions, selector: &str) -> Result<(), HostError> {
        let iframe_resize = js_sys::Reflect::get(&self.window, &IFRAME_RESIZE_GLOBAL.into())
            .ok()
            .and_then(|f| f.dyn_into::<js_sys::Function>().ok())
            .ok_or(HostError::ResizeUnavailable)?;

        let options_json = resize::options_json(options).to_string();
        let options_obj = js_sys::JSON::parse(&options_json)
            .map_err(|e| HostError::ResizeFailed(describe(&e)))?;

        iframe_resize
            .call2(&JsValue::NULL, &options_obj, &JsValue::from_str(selector))
            .map_err(|e| HostError::ResizeFailed(describe(&e)))?;
        Ok(())
    }
}

impl Console for BrowserHost {
    fn log(&self, msg: &str) {
        web_sys::console::log_1(&JsValue::from_str(msg));
    }

    fn warn(&self, msg: &str) {
        web_sys::console::warn_1(&JsValue::from_str(msg));
    }

    fn error(&self, msg: &str) {
        web_sys::console::error_1(&JsValue::from_str(msg));
    }
}

impl Entropy for BrowserHost {
    fn random_bytes(&self, buf: &mut [u8]) -> Result<(), HostError> {
        getrandom::getrandom(buf).map_err(|_| HostError::EntropyUnavailable)
    }
}

/// Human-readable text for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{:?}", value)
}
