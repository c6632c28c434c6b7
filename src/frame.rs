use crate::dom;
use hero_core::{FrameScheduler, HeroScene, PixelDensityGovernor, SceneMount};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct FrameContext {
    pub scene: HeroScene,
    pub scheduler: FrameScheduler,
    pub mount: Option<SceneMount>,
    pub canvas: web::HtmlCanvasElement,
    pub governor: PixelDensityGovernor,
    pub render_callback: Option<js_sys::Function>,
    pub last_elapsed: f32,
    pub render_failed: bool,
}

impl FrameContext {
    pub fn new(scene: HeroScene, canvas: web::HtmlCanvasElement) -> Self {
        let mut scheduler = FrameScheduler::new();
        let mount = scene.mount(&mut scheduler);
        let governor = PixelDensityGovernor::new();
        dom::sync_canvas_backing_size(&canvas, governor.pixel_ratio(dom::device_pixel_ratio()));
        scheduler.start();
        Self {
            scene,
            scheduler,
            mount: Some(mount),
            canvas,
            governor,
            render_callback: None,
            last_elapsed: 0.0,
            render_failed: false,
        }
    }

    pub fn frame(&mut self) {
        self.scheduler.tick();
        let elapsed = self.scheduler.last_elapsed();
        let delta = elapsed - self.last_elapsed;
        self.last_elapsed = elapsed;

        if self.governor.observe(delta) {
            let ratio = self.governor.pixel_ratio(dom::device_pixel_ratio());
            dom::sync_canvas_backing_size(&self.canvas, ratio);
        }

        if let Some(cb) = &self.render_callback {
            let out = match self.scene.frame_output() {
                Ok(out) => out,
                Err(e) => {
                    log::warn!("frame output skipped: {e}");
                    return;
                }
            };
            let worlds: Vec<f32> = out.nodes.iter().flat_map(|n| n.world).collect();
            let eye = [out.camera_eye.x, out.camera_eye.y, out.camera_eye.z];
            let args = js_sys::Array::of4(
                &JsValue::from_f64(out.elapsed as f64),
                &js_sys::Float32Array::from(&worlds[..]),
                &js_sys::Float32Array::from(&out.view_projection[..]),
                &js_sys::Float32Array::from(&eye[..]),
            );
            let result = cb.apply(&JsValue::NULL, &args);
            match result {
                Ok(_) => self.render_failed = false,
                Err(e) => {
                    if !self.render_failed {
                        log::warn!("render callback error: {:?}", e);
                    }
                    self.render_failed = true;
                }
            }
        }
    }

    pub fn resize(&mut self) {
        let ratio = self.governor.pixel_ratio(dom::device_pixel_ratio());
        dom::sync_canvas_backing_size(&self.canvas, ratio);
        let (w, h) = (self.canvas.width(), self.canvas.height());
        match self.scene.state().try_borrow_mut() {
            Ok(mut s) => s.camera.set_viewport(w, h),
            Err(_) => log::warn!("viewport update skipped while the scene is busy"),
        }
    }

    pub fn teardown(&mut self) {
        if let Some(mount) = self.mount.take() {
            mount.release(&mut self.scheduler);
        }
        self.scheduler.unmount();
        self.render_callback = None;
    }
}

/// Handle on a running requestAnimationFrame loop.
pub struct FrameLoop {
    tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
    pending: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
    in_frame: Rc<Cell<bool>>,
}

impl FrameLoop {
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    /// Cancel the pending frame and drop the callback so no further tick fires.
    /// Called from inside a frame, the callback stays alive until it returns
    /// and only the running flag stops the loop.
    pub fn stop(&self) {
        self.running.set(false);
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        if !self.in_frame.get() {
            self.tick.borrow_mut().take();
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) -> Option<i32> {
    let w = web::window()?;
    let slot = tick.borrow();
    let closure = slot.as_ref()?;
    w.request_animation_frame(closure.as_ref().unchecked_ref()).ok()
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let running = Rc::new(Cell::new(true));
    let in_frame = Rc::new(Cell::new(false));

    let tick_clone = tick.clone();
    let pending_tick = pending.clone();
    let running_tick = running.clone();
    let in_frame_tick = in_frame.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        if !running_tick.get() {
            return;
        }
        in_frame_tick.set(true);
        frame_ctx.borrow_mut().frame();
        in_frame_tick.set(false);
        if !running_tick.get() {
            // stopped by the render callback during this frame
            frame_ctx.borrow_mut().teardown();
            return;
        }
        pending_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    pending.set(request_frame(&tick));

    FrameLoop {
        tick,
        pending,
        running,
        in_frame,
    }
}
