//! Document helpers: element lookup, canvas sizing, layout reads, and the
//! package-pose writeback.

use crate::core::entity::Rect;
use crate::core::scene::PackagePose;
use glam::Vec2;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Keep the canvas backing store at CSS size times devicePixelRatio.
pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn device_pixel_ratio() -> f32 {
    web::window().map_or(1.0, |w| w.device_pixel_ratio() as f32)
}

/// Scroll offset, document height, and viewport height in CSS pixels.
pub fn scroll_metrics(window: &web::Window) -> (f64, f64, f64) {
    let scroll_y = window.scroll_y().unwrap_or(0.0);
    let doc_height = window
        .document()
        .and_then(|d| d.document_element())
        .map_or(0.0, |e| e.scroll_height() as f64);
    let viewport_height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (scroll_y, doc_height, viewport_height)
}

pub fn viewport_size(window: &web::Window) -> Vec2 {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    Vec2::new(w as f32, h as f32)
}

pub fn element_rect(el: &web::Element) -> Rect {
    let r = el.get_bounding_client_rect();
    Rect {
        left: r.left() as f32,
        top: r.top() as f32,
        width: r.width() as f32,
        height: r.height() as f32,
    }
}

/// Scene requested by the host page via `data-scene` on the canvas.
pub fn scene_name(canvas: &web::HtmlCanvasElement) -> String {
    canvas.get_attribute("data-scene").unwrap_or_default()
}

/// Write one frame's package pose onto the image wrapper element. The element
/// is expected to sit at the viewport origin with `position: fixed`.
pub fn apply_package_pose(el: &web::HtmlElement, pose: &PackagePose) {
    let style = el.style();
    _ = style.set_property(
        "visibility",
        if pose.visible { "visible" } else { "hidden" },
    );
    if !pose.visible {
        return;
    }
    _ = style.set_property("opacity", &format!("{:.3}", pose.opacity));
    _ = style.set_property("width", &format!("{:.0}px", pose.width_px));
    let transform = format!(
        "translate(-50%, -50%) translate({:.1}px, {:.1}px) translateZ({:.0}px) rotate({:.2}deg)",
        pose.center.x, pose.center.y, -pose.recede_px, pose.rotation_deg
    );
    _ = style.set_property("transform", &transform);
    if pose.blur_px > 0.05 {
        _ = style.set_property("filter", &format!("blur({:.2}px)", pose.blur_px));
    } else {
        _ = style.set_property("filter", "none");
    }
}
