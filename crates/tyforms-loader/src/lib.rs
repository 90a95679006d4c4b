//! Browser loader for TypefullyForms embeddable widgets
//!
//! Compiled to WebAssembly and loaded by a host page snippet. On start it
//! looks up the page's instance slot, replays the calls queued on it and
//! replaces it with a live API function.
//!
//! ## Module Structure
//!
//! - `host` - `tyforms-host` capabilities over the DOM, `iFrameResize` and `console`
//! - `bootstrap` - Reading `window[instance].q` and installing the live handler
//!
//! ## Host page contract
//!
//! ```js
//! window._ty = window._ty || function () { (window._ty.q = window._ty.q || []).push(arguments) };
//! _ty('init', { debug: true });
//! _ty('render', { selector: '#signup', url: 'https://forms.example/signup' });
//! ```

use std::rc::Rc;

use tyforms_core::PRODUCT_NAME;
use tyforms_host::Console;
use wasm_bindgen::prelude::*;

mod bootstrap;
pub mod host;

pub use host::BrowserHost;

/// Module entry point: boot the instance named by the executing script tag.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    let host = BrowserHost::new()?;
    host.log(&format!("{} starting", PRODUCT_NAME));
    let instance = bootstrap::current_instance_name(host.document());
    bootstrap::boot_instance(Rc::new(host), &instance)
}

/// Boot a named instance slot.
///
/// For pages that load the module from a JS shim, where `document.currentScript`
/// is not the snippet's script tag. Booting an instance that is already live
/// does nothing.
#[wasm_bindgen]
pub fn boot(instance_name: Option<String>) -> Result<(), JsValue> {
    let host = BrowserHost::new()?;
    let instance = instance_name
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| bootstrap::current_instance_name(host.document()));
    bootstrap::boot_instance(Rc::new(host), &instance)
}
