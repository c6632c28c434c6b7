#![cfg(target_arch = "wasm32")]
use hero_core::HeroScene;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod config;
mod dom;
mod frame;
mod scroll;

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");
    Ok(())
}

/// A mounted hero scene: frame loop, scroll wiring and the resize listener.
#[wasm_bindgen]
pub struct HeroHandle {
    frame_ctx: Rc<RefCell<frame::FrameContext>>,
    frame_loop: frame::FrameLoop,
    scroll: scroll::ScrollWiring,
    resize: Option<Closure<dyn FnMut()>>,
    particles: Vec<f32>,
    node_names: Vec<&'static str>,
}

#[wasm_bindgen]
impl HeroHandle {
    /// Interleaved `[x, y, z, r, g, b]` particle vertices, generated once.
    pub fn particle_vertices(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.particles[..])
    }

    pub fn particle_count(&self) -> u32 {
        (self.particles.len() / 6) as u32
    }

    /// Names of the scene-graph nodes, in the order their world matrices are
    /// passed to the render callback.
    pub fn node_names(&self) -> js_sys::Array {
        self.node_names
            .iter()
            .map(|n| JsValue::from_str(n))
            .collect()
    }

    /// `callback(elapsedSeconds, worldMatrices, viewProjection, cameraEye)` runs
    /// once per frame after every animator has advanced. Matrices are
    /// column-major `Float32Array`s.
    pub fn set_render_callback(&self, callback: js_sys::Function) {
        match self.frame_ctx.try_borrow_mut() {
            Ok(mut ctx) => ctx.render_callback = Some(callback),
            Err(_) => log::warn!("set_render_callback ignored while a frame is running"),
        }
    }

    pub fn scroll_progress(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.scroll.progress()[..])
    }

    pub fn is_mounted(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// Stop the frame loop and release every listener.
    pub fn unmount(&mut self) {
        self.frame_loop.stop();
        if let Ok(mut ctx) = self.frame_ctx.try_borrow_mut() {
            ctx.teardown();
        }
        self.scroll.release();
        if let Some(resize) = self.resize.take() {
            if let Some(w) = web::window() {
                dom::remove_listener(&w, "resize", resize.as_ref().unchecked_ref());
            }
        }
        log::info!("hero scene unmounted");
    }
}

/// Mount the hero scene on the canvas with id `canvas_id`. Scene options come
/// from the canvas' `data-*` attributes; scroll styling from the elements that
/// carry `data-scroll-*` attributes.
#[wasm_bindgen]
pub fn mount(canvas_id: &str) -> Result<HeroHandle, JsValue> {
    init(canvas_id).map_err(js_err)
}

fn init(canvas_id: &str) -> anyhow::Result<HeroHandle> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{canvas_id}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = config::scene_config_from(|k| canvas.get_attribute(&format!("data-{k}")))?;
    let scene = HeroScene::new(config)?;
    let particles = scene.particle_vertices()?;
    let node_names = scene.node_names().to_vec();

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(scene, canvas)));
    frame_ctx.borrow_mut().resize();

    let ctx_resize = frame_ctx.clone();
    let resize = Closure::wrap(Box::new(move || {
        if let Ok(mut ctx) = ctx_resize.try_borrow_mut() {
            ctx.resize();
        }
    }) as Box<dyn FnMut()>);
    dom::add_listener(&window, "resize", resize.as_ref().unchecked_ref());

    let scroll = scroll::ScrollWiring::attach(&document);
    let frame_loop = frame::start_loop(frame_ctx.clone());
    log::info!("hero scene mounted on #{canvas_id}");

    Ok(HeroHandle {
        frame_ctx,
        frame_loop,
        scroll,
        resize: Some(resize),
        particles,
        node_names,
    })
}
