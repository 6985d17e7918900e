//! Module entry point and the JavaScript utility API.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use gloo::events::EventListener;
use js_sys::Function;
use vista_runtime::{Debounce, Throttle};
use vista_widgets::{Controller, Severity};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::clock::BrowserClock;
use crate::config::{CONFIG_ELEMENT_ID, resolve_or_default};
use crate::dom::{DomSurface, describe};
use crate::{logging, waits_for_dom};

thread_local! {
    static PAGE: RefCell<Option<Controller<DomSurface>>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    if waits_for_dom(&document.ready_state()) {
        EventListener::once(&document, "DOMContentLoaded", |_| boot()).forget();
    } else {
        boot();
    }
    Ok(())
}

fn boot() {
    let source = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|block| block.text_content());
    let (config, rejected) = resolve_or_default(source.as_deref());
    logging::init(&config.log_level);
    if let Some(err) = rejected {
        tracing::warn!(%err, "page configuration ignored");
    }

    match DomSurface::new() {
        Ok(surface) => {
            let controller = Controller::start(Rc::new(surface), config);
            PAGE.with(|page| *page.borrow_mut() = Some(controller));
        }
        Err(err) => tracing::error!(%err, "page not wired"),
    }
}

fn with_page<T>(f: impl FnOnce(&Controller<DomSurface>) -> T) -> Result<T, JsValue> {
    PAGE.with(|page| page.borrow().as_ref().map(f))
        .ok_or_else(|| JsValue::from_str("page not started"))
}

/// Replace the visible toast. `kind` is `"success"`, `"error"` or `"info"`.
#[wasm_bindgen(js_name = showMessage)]
pub fn show_message(text: &str, kind: Option<String>) -> Result<(), JsValue> {
    let severity = kind.as_deref().map(Severity::parse).unwrap_or_default();
    with_page(|page| page.show_message(text, severity))?
        .map(drop)
        .map_err(|err| JsValue::from_str(&err.to_string()))
}

#[wasm_bindgen(js_name = validateForm)]
pub fn validate_form(form: Element) -> Result<bool, JsValue> {
    with_page(|page| page.validate_form(&form))
}

/// Open a share popup. `url` and `title` default to the current page.
/// Returns the share URL, or `undefined` for an unknown platform.
#[wasm_bindgen(js_name = shareOnSocial)]
pub fn share_on_social(
    platform: &str,
    url: Option<String>,
    title: Option<String>,
) -> Result<Option<String>, JsValue> {
    with_page(|page| {
        let surface = page.surface();
        let url = url
            .or_else(|| surface.window().location().href().ok())
            .unwrap_or_default();
        let title = title.unwrap_or_else(|| surface.document().title());
        page.share_on_social(platform, &url, &title)
    })
}

#[wasm_bindgen(js_name = printPage)]
pub fn print_page() -> Result<(), JsValue> {
    with_page(Controller::print_page)
}

/// Wrap `func` so it runs `wait_ms` after the last of a burst of calls.
/// Only the first argument is forwarded.
#[wasm_bindgen]
pub fn debounce(func: Function, wait_ms: u32) -> JsValue {
    let clock = Rc::new(BrowserClock::new());
    let debounced = Debounce::new(clock, Duration::from_millis(wait_ms.into()), move |arg| {
        invoke(&func, &arg);
    });
    Closure::<dyn Fn(JsValue)>::new(move |arg| debounced.call(arg)).into_js_value()
}

/// Wrap `func` so it runs at most once per `limit_ms`.
/// Only the first argument is forwarded.
#[wasm_bindgen]
pub fn throttle(func: Function, limit_ms: u32) -> JsValue {
    let clock = Rc::new(BrowserClock::new());
    let throttled = Throttle::new(clock, Duration::from_millis(limit_ms.into()), move |arg| {
        invoke(&func, &arg);
    });
    Closure::<dyn Fn(JsValue)>::new(move |arg| {
        throttled.call(arg);
    })
    .into_js_value()
}

fn invoke(func: &Function, arg: &JsValue) {
    if let Err(err) = func.call1(&JsValue::NULL, arg) {
        tracing::warn!(error = %describe(&err), "wrapped callback threw");
    }
}

/// Drop the page controller, detaching every listener and observer.
#[wasm_bindgen]
pub fn teardown() {
    if PAGE.with(|page| page.borrow_mut().take()).is_some() {
        tracing::info!("page controller torn down");
    }
}
