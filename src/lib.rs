#![cfg(target_arch = "wasm32")]
//! Scroll-driven hero choreography for the landing page.
//!
//! The host page supplies a fixed canvas (`#hero-canvas`, optionally carrying
//! `data-scene`), the 2D package image wrapper (`#package-img`), and the
//! overlay elements; this crate wires the inputs, runs the engine every
//! frame, and draws the entities through WebGPU.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod assets;
mod constants;
pub mod core;
mod dom;
mod events;
mod frame;
mod input;
mod overlay;
mod render;

use crate::core::conductor::Conductor;
use crate::core::scene::{Scene, TransformList};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("lezza-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id("hero-canvas")
        .ok_or_else(|| anyhow::anyhow!("missing #hero-canvas"))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    // The package image is optional; the spill point falls back to the
    // viewport center until it can be measured.
    let package_el: Option<web::HtmlElement> = document
        .get_element_by_id("package-img")
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok());
    if package_el.is_none() {
        log::warn!("[init] no #package-img element; using fallback spill point");
    }

    let scene = Scene::by_name(&dom::scene_name(&canvas));
    log::info!(
        "[init] scene={} follow={:?}",
        scene.name(),
        scene.follow_mode()
    );

    let epoch = Rc::new(frame::Epoch::new());
    let conductor = Rc::new(RefCell::new(Conductor::new(scene, epoch.now_ms())));
    let viewport = Rc::new(RefCell::new(dom::viewport_size(&window)));
    let tilt = Rc::new(RefCell::new(glam::Vec2::ZERO));
    let transforms: Rc<RefCell<TransformList>> = Rc::new(RefCell::new(TransformList::new()));

    let assets_ready = package_el
        .as_ref()
        .and_then(|el| el.dyn_ref::<web::HtmlImageElement>().cloned())
        .map(|img| assets::watch_package_image(&img))
        .unwrap_or_else(|| Rc::new(Cell::new(true)));

    events::scroll::wire_resize(&canvas, viewport.clone());
    events::scroll::wire_scroll(conductor.clone());
    events::orientation::wire_orientation(tilt.clone());
    events::pointer::wire_pointer_handlers(events::pointer::PointerWiring {
        conductor: conductor.clone(),
        transforms: transforms.clone(),
        epoch: epoch.clone(),
        document: document.clone(),
    });

    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        conductor,
        viewport,
        tilt,
        transforms,
        assets_ready,
        epoch,
        document,
        canvas,
        package_el,
        gpu,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
