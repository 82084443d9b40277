//! Scroll and resize wiring. Scroll events only move the follower's target;
//! the frame loop owns the per-frame convergence.

use crate::core::conductor::Conductor;
use crate::core::track::scroll_progress;
use crate::dom;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_scroll(conductor: Rc<RefCell<Conductor>>) {
    let push_target = move || {
        if let Some(window) = web::window() {
            let (scroll_y, doc_height, viewport_height) = dom::scroll_metrics(&window);
            let raw = scroll_progress(scroll_y, doc_height, viewport_height);
            conductor.borrow_mut().set_scroll_target(raw);
        }
    };

    // Seed once at mount so the page restores mid-scroll correctly.
    push_target();

    let closure = Closure::wrap(Box::new(push_target) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

pub fn wire_resize(canvas: &web::HtmlCanvasElement, viewport: Rc<RefCell<Vec2>>) {
    dom::sync_canvas_backing_size(canvas);
    if let Some(window) = web::window() {
        *viewport.borrow_mut() = dom::viewport_size(&window);
    }

    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
        if let Some(window) = web::window() {
            *viewport.borrow_mut() = dom::viewport_size(&window);
        }
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}
