//! Progress and drag hints layered over the scene. Every call tolerates a
//! missing element so the engine runs on pages without the overlay markup.

use web_sys as web;

#[inline]
pub fn set_stage_hint(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id("stage-hint") {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

#[inline]
pub fn show_drag_hint(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("drag-hint") {
        let _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_drag_hint(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("drag-hint") {
        let _ = el.set_attribute("style", "display:none");
    }
}

/// Cursor over the stage: None when nothing is under the pointer, otherwise
/// whether a drag is in progress.
pub fn set_grab_cursor(document: &web::Document, state: Option<bool>) {
    if let Some(body) = document.body() {
        let cursor = match state {
            Some(true) => "grabbing",
            Some(false) => "grab",
            None => "",
        };
        _ = body.style().set_property("cursor", cursor);
    }
}
