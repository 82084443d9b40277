//! Package-image readiness.
//!
//! A failed asset must never hold the page back: load and error both mark the
//! image ready, error with a warning, and the choreography runs either way.

use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn watch_package_image(img: &web::HtmlImageElement) -> Rc<Cell<bool>> {
    let ready = Rc::new(Cell::new(false));
    if img.complete() {
        ready.set(true);
        return ready;
    }

    let ready_load = ready.clone();
    let on_load = Closure::wrap(Box::new(move || {
        ready_load.set(true);
        log::info!("[assets] package image loaded");
    }) as Box<dyn FnMut()>);
    _ = img.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref());
    on_load.forget();

    let ready_error = ready.clone();
    let on_error = Closure::wrap(Box::new(move || {
        ready_error.set(true);
        log::warn!("[assets] package image failed to load; continuing without it");
    }) as Box<dyn FnMut()>);
    _ = img.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref());
    on_error.forget();

    ready
}
