//! Device-orientation wiring: gamma/beta tilt feeds a small additive lean on
//! every visible entity.

use crate::input::tilt_from_orientation;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_orientation(tilt: Rc<RefCell<Vec2>>) {
    let closure = Closure::wrap(Box::new(move |ev: web::DeviceOrientationEvent| {
        *tilt.borrow_mut() = tilt_from_orientation(ev.gamma(), ev.beta());
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
