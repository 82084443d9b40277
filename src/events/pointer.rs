//! Pointer wiring: route pointer events into per-entity drags by hit-testing
//! against the bounding boxes the last frame produced.

use crate::core::conductor::Conductor;
use crate::core::entity::topmost_hit;
use crate::core::scene::TransformList;
use crate::frame::Epoch;
use crate::overlay;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct PointerWiring {
    pub conductor: Rc<RefCell<Conductor>>,
    pub transforms: Rc<RefCell<TransformList>>,
    pub epoch: Rc<Epoch>,
    pub document: web::Document,
}

pub fn wire_pointer_handlers(w: PointerWiring) {
    // Drags live on the conductor's board; this cell only remembers which
    // entity the current pointer sequence grabbed.
    let active: Rc<Cell<Option<u32>>> = Rc::new(Cell::new(None));
    wire_pointerdown(&w, &active);
    wire_pointermove(&w, &active);
    wire_pointerup(&w, &active, "pointerup");
    wire_pointerup(&w, &active, "pointercancel");
}

fn wire_pointerdown(w: &PointerWiring, active: &Rc<Cell<Option<u32>>>) {
    let w = w.clone();
    let active = active.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        if let Some(id) = topmost_hit(&w.transforms.borrow(), x, y) {
            w.conductor.borrow_mut().drags.begin(id, x);
            active.set(Some(id));
            overlay::set_grab_cursor(&w.document, Some(true));
            log::info!("[drag] begin on entity {}", id);
            ev.prevent_default();
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointermove(w: &PointerWiring, active: &Rc<Cell<Option<u32>>>) {
    let w = w.clone();
    let active = active.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        match active.get() {
            Some(id) => {
                w.conductor.borrow_mut().drags.update(id, x);
            }
            None => {
                let hovering = topmost_hit(&w.transforms.borrow(), x, y).is_some();
                overlay::set_grab_cursor(&w.document, hovering.then_some(false));
            }
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn wire_pointerup(w: &PointerWiring, active: &Rc<Cell<Option<u32>>>, event: &'static str) {
    let w = w.clone();
    let active = active.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        if let Some(id) = active.take() {
            // The offset survives until its deadline; the visual eases out on
            // the consuming side.
            w.conductor
                .borrow_mut()
                .drags
                .release(id, w.epoch.now_ms());
            overlay::set_grab_cursor(&w.document, None);
            log::info!("[drag] release entity {}", id);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
