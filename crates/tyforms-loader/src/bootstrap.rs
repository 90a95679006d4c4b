//! Instance bootstrap against the page globals
//!
//! The host page snippet leaves a placeholder on `window[instance]` whose `q`
//! field holds `[method, params]` pairs queued before the loader executed.
//! Bootstrap reads that queue, drains it through `tyforms-core`, and on
//! success overwrites `window[instance]` with a live `(api, params)` function.
//!
//! On a bootstrap error a JS `Error` is thrown and the placeholder is left
//! exactly as the page created it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use js_sys::{Array, Reflect};
use serde_json::Value;
use tyforms_core::{drain, Command, Handler, InstanceSlot, DEFAULT_INSTANCE_NAME};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Document;

use crate::host::BrowserHost;

/// Field of the placeholder holding queued calls
const QUEUE_FIELD: &str = "q";

/// Live `(api, params)` function exposed on the page
type ApiClosure = Closure<dyn Fn(JsValue, JsValue) -> Result<(), JsValue>>;

thread_local! {
    /// Installed handlers by instance name; dropping one invalidates the JS function.
    static INSTALLED: RefCell<HashMap<String, ApiClosure>> = RefCell::new(HashMap::new());
}

/// Instance name from the `id` of the executing script tag, or the default.
pub(crate) fn current_instance_name(document: &Document) -> String {
    document
        .current_script()
        .map(|script| script.id())
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| DEFAULT_INSTANCE_NAME.to_string())
}

/// Drain `window[instance]` and install the live handler.
pub(crate) fn boot_instance(host: Rc<BrowserHost>, instance: &str) -> Result<(), JsValue> {
    let placeholder = Reflect::get(host.window(), &JsValue::from_str(instance))?;
    if placeholder.is_undefined() || placeholder.is_null() {
        return Ok(());
    }

    let mut slot = InstanceSlot::queue(read_queue(&placeholder));
    drain(instance, &mut slot, &host)
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;

    if let Some(handler) = slot.handler() {
        install_handler(&host, instance, handler.clone())?;
    }
    Ok(())
}

/// Queued commands on a placeholder; empty when `q` is missing or not an array.
fn read_queue(placeholder: &JsValue) -> Vec<Command> {
    let queue = match Reflect::get(placeholder, &QUEUE_FIELD.into()) {
        Ok(q) if Array::is_array(&q) => q.unchecked_into::<Array>(),
        _ => return Vec::new(),
    };

    queue
        .iter()
        .map(|entry| match entry.dyn_into::<Array>() {
            Ok(entry) => {
                let method = entry.get(0).as_string().unwrap_or_default();
                Command::new(method, to_json(&entry.get(1)))
            }
            // Not a pair: reaches the handler as a call without an api name.
            Err(_) => Command::new(String::new(), None),
        })
        .collect()
}

/// Convert a JS value to JSON through `JSON.stringify`.
///
/// `undefined`, functions and values that fail to stringify give `None`.
pub(crate) fn to_json(value: &JsValue) -> Option<Value> {
    if value.is_undefined() {
        return None;
    }
    let text = js_sys::JSON::stringify(value).ok()?.as_string()?;
    serde_json::from_str(&text).ok()
}

/// Overwrite `window[instance]` with a function dispatching to `handler`.
fn install_handler(
    host: &BrowserHost,
    instance: &str,
    handler: Handler<BrowserHost>,
) -> Result<(), JsValue> {
    let api_handler: ApiClosure = Closure::new(
        move |api: JsValue, params: JsValue| {
            let api = api.as_string().unwrap_or_default();
            handler
                .call(&api, to_json(&params).as_ref())
                .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))
        },
    );

    Reflect::set(
        host.window(),
        &JsValue::from_str(instance),
        api_handler.as_ref(),
    )?;
    INSTALLED.with(|installed| {
        installed
            .borrow_mut()
            .insert(instance.to_string(), api_handler);
    });
    Ok(())
}
