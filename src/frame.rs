//! The requestAnimationFrame loop. Each frame ticks the conductor, writes the
//! package pose and overlay hints back to the DOM, submits the billboard
//! instances to the GPU, and publishes the transforms for pointer routing.

use crate::core::conductor::{Conductor, TickInput};
use crate::core::scene::TransformList;
use crate::{dom, overlay, render};
use glam::Vec2;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Single wall-clock source for the whole engine. The pure core only ever
/// sees milliseconds from here.
pub struct Epoch {
    start: Instant,
}

impl Epoch {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    #[inline]
    pub fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Self::new()
    }
}

pub struct FrameContext {
    pub conductor: Rc<RefCell<Conductor>>,
    pub viewport: Rc<RefCell<Vec2>>,
    pub tilt: Rc<RefCell<Vec2>>,
    pub transforms: Rc<RefCell<TransformList>>,
    pub assets_ready: Rc<Cell<bool>>,
    pub epoch: Rc<Epoch>,

    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub package_el: Option<web::HtmlElement>,

    pub gpu: Option<render::GpuState<'static>>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let now_ms = self.epoch.now_ms();
        let package_rect = self.package_el.as_ref().map(|el| dom::element_rect(el));
        let tick = TickInput {
            now_ms,
            viewport: *self.viewport.borrow(),
            package_rect,
            tilt: *self.tilt.borrow(),
        };

        let mut out = self.conductor.borrow_mut().tick(&tick);

        // Until the image settles one way or the other, hold the package
        // fully visible so the hero never opens on a blank stage.
        if !self.assets_ready.get() {
            out.package.opacity = 1.0;
            out.package.visible = true;
        }
        if let Some(el) = &self.package_el {
            dom::apply_package_pose(el, &out.package);
        }

        overlay::set_stage_hint(&self.document, out.stage);
        let draggable = out.transforms.iter().any(|t| t.interactive && t.visible);
        if draggable && !self.conductor.borrow().drags.any_dragging() {
            overlay::show_drag_hint(&self.document);
        } else {
            overlay::hide_drag_hint(&self.document);
        }

        if let Some(gpu) = &mut self.gpu {
            gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
            if let Err(e) = gpu.render(&out.transforms, dom::device_pixel_ratio()) {
                log::error!("render error: {:?}", e);
            }
        }

        *self.transforms.borrow_mut() = out.transforms;
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        if let Some(w) = web::window() {
            _ = w.request_animation_frame(
                tick_clone
                    .borrow()
                    .as_ref()
                    .unwrap()
                    .as_ref()
                    .unchecked_ref(),
            );
        }
    }) as Box<dyn FnMut()>));
    if let Some(w) = web::window() {
        _ = w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}
